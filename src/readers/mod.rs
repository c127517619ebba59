pub mod weather_reader;

pub use weather_reader::{RawRows, RawWeatherRow, WeatherReader};
