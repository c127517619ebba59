use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::{WeatherRecord, WeatherTable};

fn day(d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2023, 1, d)
}

/// Three locations with hand-checkable aggregates:
/// A temps [10, 20], B temps [0, 3, 7], C temps [-4.5].
pub fn known_table() -> WeatherTable {
    WeatherTable::new(vec![
        WeatherRecord::new(day(1), "A", 10.0)
            .with_humidity(60.0)
            .with_precipitation(5.0)
            .with_wind_speed(4.0)
            .with_condition("Sunny"),
        WeatherRecord::new(day(2), "A", 20.0)
            .with_humidity(80.0)
            .with_precipitation(7.5)
            .with_wind_speed(6.0)
            .with_condition("Rainy"),
        WeatherRecord::new(day(1), "B", 0.0)
            .with_humidity(50.0)
            .with_condition("Sunny"),
        WeatherRecord::new(day(2), "B", 3.0)
            .with_precipitation(0.0)
            .with_condition("Cloudy"),
        WeatherRecord::new(day(3), "B", 7.0).with_precipitation(1.0),
        WeatherRecord::new(day(3), "C", -4.5),
    ])
}

pub fn by_key<T, F: Fn(&T) -> String>(rows: Vec<T>, key: F) -> HashMap<String, T> {
    rows.into_iter().map(|row| (key(&row), row)).collect()
}
