pub mod results;
pub mod table;
pub mod weather;

pub use results::{
    ConditionCount, DailyTemperature, LocationExtremes, LocationHumidity, LocationPrecipitation,
    LocationStatistics, LocationTemperature,
};
pub use table::WeatherTable;
pub use weather::{ClimateBand, WeatherRecord};
