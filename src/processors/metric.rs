use serde::Serialize;
use std::str::FromStr;

use crate::analyzers::AggregationEngine;
use crate::error::{DashboardError, Result};
use crate::models::{
    ConditionCount, DailyTemperature, LocationExtremes, LocationHumidity, LocationPrecipitation,
    LocationStatistics, LocationTemperature, WeatherTable,
};

/// One dashboard query, named after its API route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TemperatureByLocation,
    MaxMinTemperature,
    PrecipitationByLocation,
    WeatherConditions,
    DailyTemperature,
    LocationStatistics,
    HumidityByLocation,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::TemperatureByLocation,
        Metric::MaxMinTemperature,
        Metric::PrecipitationByLocation,
        Metric::WeatherConditions,
        Metric::DailyTemperature,
        Metric::LocationStatistics,
        Metric::HumidityByLocation,
    ];

    pub fn route_name(&self) -> &'static str {
        match self {
            Metric::TemperatureByLocation => "temperature-by-location",
            Metric::MaxMinTemperature => "max-min-temperature",
            Metric::PrecipitationByLocation => "precipitation-by-location",
            Metric::WeatherConditions => "weather-conditions",
            Metric::DailyTemperature => "daily-temperature",
            Metric::LocationStatistics => "location-statistics",
            Metric::HumidityByLocation => "humidity-by-location",
        }
    }

    pub fn run(&self, engine: &dyn AggregationEngine, table: &WeatherTable) -> Result<QueryOutput> {
        Ok(match self {
            Metric::TemperatureByLocation => {
                QueryOutput::TemperatureByLocation(engine.temperature_by_location(table)?)
            }
            Metric::MaxMinTemperature => {
                QueryOutput::MaxMinTemperature(engine.max_min_temperature_by_location(table)?)
            }
            Metric::PrecipitationByLocation => {
                QueryOutput::PrecipitationByLocation(engine.precipitation_by_location(table)?)
            }
            Metric::WeatherConditions => {
                QueryOutput::WeatherConditions(engine.weather_condition_distribution(table)?)
            }
            Metric::DailyTemperature => {
                QueryOutput::DailyTemperature(engine.daily_average_temperature(table)?)
            }
            Metric::LocationStatistics => {
                QueryOutput::LocationStatistics(engine.location_statistics(table)?)
            }
            Metric::HumidityByLocation => {
                QueryOutput::HumidityByLocation(engine.humidity_by_location(table)?)
            }
        })
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.route_name())
    }
}

impl FromStr for Metric {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        Metric::ALL
            .into_iter()
            .find(|m| m.route_name() == s)
            .ok_or_else(|| DashboardError::InvalidFormat(format!("Unknown metric: '{}'", s)))
    }
}

/// Result rows of any metric; serializes as a bare JSON array
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
    TemperatureByLocation(Vec<LocationTemperature>),
    MaxMinTemperature(Vec<LocationExtremes>),
    PrecipitationByLocation(Vec<LocationPrecipitation>),
    WeatherConditions(Vec<ConditionCount>),
    DailyTemperature(Vec<DailyTemperature>),
    LocationStatistics(Vec<LocationStatistics>),
    HumidityByLocation(Vec<LocationHumidity>),
}

impl QueryOutput {
    pub fn len(&self) -> usize {
        match self {
            QueryOutput::TemperatureByLocation(rows) => rows.len(),
            QueryOutput::MaxMinTemperature(rows) => rows.len(),
            QueryOutput::PrecipitationByLocation(rows) => rows.len(),
            QueryOutput::WeatherConditions(rows) => rows.len(),
            QueryOutput::DailyTemperature(rows) => rows.len(),
            QueryOutput::LocationStatistics(rows) => rows.len(),
            QueryOutput::HumidityByLocation(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep only the latest `window` days of a daily series; 0 keeps all.
    /// Other outputs pass through.
    pub fn keep_latest_days(self, window: usize) -> Self {
        match self {
            QueryOutput::DailyTemperature(mut rows) if window > 0 && rows.len() > window => {
                let excess = rows.len() - window;
                rows.drain(..excess);
                QueryOutput::DailyTemperature(rows)
            }
            other => other,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_route_names_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(metric.route_name().parse::<Metric>().unwrap(), metric);
        }
        assert!("temperature".parse::<Metric>().is_err());
    }

    #[test]
    fn test_keep_latest_days() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let rows: Vec<DailyTemperature> = (0..40)
            .map(|i| DailyTemperature {
                date: start + chrono::Duration::days(i),
                avg_temperature: i as f64,
            })
            .collect();

        let output = QueryOutput::DailyTemperature(rows.clone()).keep_latest_days(30);
        match output {
            QueryOutput::DailyTemperature(kept) => {
                assert_eq!(kept.len(), 30);
                assert_eq!(kept[0].avg_temperature, 10.0);
                assert_eq!(kept[29].date, rows[39].date);
            }
            other => panic!("unexpected output: {:?}", other),
        }

        let short = QueryOutput::DailyTemperature(rows[..5].to_vec()).keep_latest_days(30);
        assert_eq!(short.len(), 5);
        assert_eq!(
            QueryOutput::DailyTemperature(rows).keep_latest_days(0).len(),
            40
        );
    }

    #[test]
    fn test_serializes_as_array() {
        let output = QueryOutput::WeatherConditions(vec![ConditionCount {
            condition: "Foggy".to_string(),
            count: 3,
        }]);
        assert_eq!(
            output.to_json().unwrap(),
            serde_json::json!([{"condition": "Foggy", "count": 3}])
        );
    }
}
