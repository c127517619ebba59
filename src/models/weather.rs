use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::constants::{TEMPERATE_LOCATIONS, WARM_LOCATIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClimateBand {
    Warm,      // base 20 + 2/month
    Temperate, // seasonal, coldest mid-year offset
    Moderate,  // base 15 + 1.5/month
}

impl ClimateBand {
    pub fn for_location(location: &str) -> Self {
        if WARM_LOCATIONS.contains(&location) {
            ClimateBand::Warm
        } else if TEMPERATE_LOCATIONS.contains(&location) {
            ClimateBand::Temperate
        } else {
            ClimateBand::Moderate
        }
    }

    /// Baseline temperature for a month (1-12)
    pub fn base_temperature(&self, month: u32) -> f64 {
        let month = month as f64;
        match self {
            ClimateBand::Warm => 20.0 + (month - 1.0) * 2.0,
            ClimateBand::Temperate => 10.0 + 10.0 * (6.0 - month).abs() / 6.0,
            ClimateBand::Moderate => 15.0 + (month - 1.0) * 1.5,
        }
    }

    /// Uniform noise bounds added on top of the baseline
    pub fn noise_range(&self) -> (f64, f64) {
        match self {
            ClimateBand::Warm => (-5.0, 15.0),
            ClimateBand::Temperate => (-10.0, 10.0),
            ClimateBand::Moderate => (-8.0, 12.0),
        }
    }
}

/// One daily observation. `location` and `temperature` are mandatory, the
/// rest may be blank in a hand-edited file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeatherRecord {
    pub date: Option<NaiveDate>,

    #[validate(length(min = 1))]
    pub location: String,

    pub temperature: f64,

    #[validate(range(min = 30.0, max = 90.0))]
    pub humidity: Option<f64>,

    #[validate(range(min = 0.0, max = 50.0))]
    pub precipitation: Option<f64>,

    #[validate(range(min = 0.0, max = 30.0))]
    pub wind_speed: Option<f64>,

    pub condition: Option<String>,
}

impl WeatherRecord {
    pub fn new(date: Option<NaiveDate>, location: impl Into<String>, temperature: f64) -> Self {
        Self {
            date,
            location: location.into(),
            temperature,
            humidity: None,
            precipitation: None,
            wind_speed: None,
            condition: None,
        }
    }

    pub fn with_humidity(mut self, humidity: f64) -> Self {
        self.humidity = Some(humidity);
        self
    }

    pub fn with_precipitation(mut self, precipitation: f64) -> Self {
        self.precipitation = Some(precipitation);
        self
    }

    pub fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = Some(wind_speed);
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn climate_band(&self) -> ClimateBand {
        ClimateBand::for_location(&self.location)
    }

    pub fn is_complete(&self) -> bool {
        self.date.is_some()
            && self.humidity.is_some()
            && self.precipitation.is_some()
            && self.wind_speed.is_some()
            && self.condition.is_some()
    }

    pub fn is_within_ranges(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WeatherRecord {
        WeatherRecord::new(NaiveDate::from_ymd_opt(2023, 7, 15), "Phoenix", 41.2)
            .with_humidity(35.0)
            .with_precipitation(0.0)
            .with_wind_speed(12.5)
            .with_condition("Sunny")
    }

    #[test]
    fn test_climate_bands() {
        assert_eq!(ClimateBand::for_location("Phoenix"), ClimateBand::Warm);
        assert_eq!(ClimateBand::for_location("Chicago"), ClimateBand::Temperate);
        assert_eq!(ClimateBand::for_location("Dallas"), ClimateBand::Moderate);
        assert_eq!(ClimateBand::for_location("Atlantis"), ClimateBand::Moderate);
    }

    #[test]
    fn test_base_temperature() {
        assert_eq!(ClimateBand::Warm.base_temperature(1), 20.0);
        assert_eq!(ClimateBand::Warm.base_temperature(12), 42.0);
        assert_eq!(ClimateBand::Temperate.base_temperature(6), 10.0);
        assert_eq!(ClimateBand::Temperate.base_temperature(12), 20.0);
        assert_eq!(ClimateBand::Moderate.base_temperature(3), 18.0);
    }

    #[test]
    fn test_record_validation() {
        let record = sample();
        assert!(record.validate().is_ok());
        assert!(record.is_complete());

        let humid = sample().with_humidity(95.0);
        assert!(humid.validate().is_err());

        let windy = sample().with_wind_speed(-1.0);
        assert!(!windy.is_within_ranges());
    }

    #[test]
    fn test_missing_optionals_still_valid() {
        let record = WeatherRecord::new(None, "Houston", 22.0);
        assert!(record.validate().is_ok());
        assert!(!record.is_complete());
    }
}
