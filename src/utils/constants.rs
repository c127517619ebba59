/// Cities the synthesizer draws from
pub const LOCATIONS: [&str; 10] = [
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Philadelphia",
    "San Antonio",
    "San Diego",
    "Dallas",
    "San Jose",
];

/// Climate bands used by the temperature model
pub const WARM_LOCATIONS: [&str; 4] = ["Phoenix", "Los Angeles", "San Diego", "San Jose"];
pub const TEMPERATE_LOCATIONS: [&str; 3] = ["Chicago", "New York", "Philadelphia"];

/// Sky conditions
pub const CONDITIONS: [&str; 6] = ["Sunny", "Cloudy", "Rainy", "Snowy", "Foggy", "Windy"];

/// CSV header, in column order
pub const CSV_HEADER: [&str; 7] = [
    "date",
    "location",
    "temperature",
    "humidity",
    "precipitation",
    "wind_speed",
    "condition",
];

/// Date format used in the data file and JSON output
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Synthetic calendar starts here and wraps every 365 records
pub const BASE_YEAR: i32 = 2023;
pub const DAYS_PER_CYCLE: u64 = 365;

/// Measurement ranges
pub const MIN_HUMIDITY: f64 = 30.0;
pub const MAX_HUMIDITY: f64 = 90.0;
pub const MIN_PRECIPITATION: f64 = 0.0;
pub const MAX_PRECIPITATION: f64 = 50.0;
pub const MIN_WIND_SPEED: f64 = 0.0;
pub const MAX_WIND_SPEED: f64 = 30.0;
pub const RAIN_PROBABILITY: f64 = 0.3;

/// Processing defaults
pub const DEFAULT_DATA_FILE: &str = "data/weather_data.csv";
pub const DEFAULT_RECORD_COUNT: usize = 1000;
pub const DEFAULT_DAILY_WINDOW: usize = 30;
pub const DEFAULT_CHUNK_SIZE: usize = 256;
pub const DEFAULT_CONFIG_FILE: &str = "weather-dashboard";
pub const ENV_PREFIX: &str = "WEATHER";

/// Server defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "static";
