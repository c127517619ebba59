//! Accumulators shared by both engines. Each is seeded from one record and
//! merged pairwise; float sums depend on merge order, so both engines fold a
//! key's values left to right in record order. Finishing applies the
//! two-decimal rounding.

use chrono::NaiveDate;

use crate::models::{
    ConditionCount, DailyTemperature, LocationExtremes, LocationHumidity, LocationPrecipitation,
    LocationStatistics, LocationTemperature, WeatherRecord,
};
use crate::utils::rounding::{mean_or_zero, round2};

/// Running sum and count of contributing values
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SumCount {
    pub sum: f64,
    pub count: usize,
}

impl SumCount {
    pub fn of(value: f64) -> Self {
        Self {
            sum: value,
            count: 1,
        }
    }

    pub fn maybe(value: Option<f64>) -> Self {
        value.map(Self::of).unwrap_or_default()
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            count: self.count + other.count,
        }
    }

    pub fn mean(&self) -> f64 {
        round2(mean_or_zero(self.sum, self.count))
    }

    pub fn total(&self) -> f64 {
        round2(self.sum)
    }
}

/// Running extrema by pairwise comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxMin {
    pub max: f64,
    pub min: f64,
}

impl MaxMin {
    pub fn of(value: f64) -> Self {
        Self {
            max: value,
            min: value,
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            max: self.max.max(other.max),
            min: self.min.min(other.min),
        }
    }
}

/// Everything location-statistics needs for one location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationAccumulator {
    pub temperature: SumCount,
    pub extremes: MaxMin,
    pub humidity: SumCount,
    pub precipitation: SumCount,
    pub wind_speed: SumCount,
    pub records: usize,
}

impl LocationAccumulator {
    pub fn of(record: &WeatherRecord) -> Self {
        Self {
            temperature: SumCount::of(record.temperature),
            extremes: MaxMin::of(record.temperature),
            humidity: SumCount::maybe(record.humidity),
            precipitation: SumCount::maybe(record.precipitation),
            wind_speed: SumCount::maybe(record.wind_speed),
            records: 1,
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            temperature: self.temperature.merge(other.temperature),
            extremes: self.extremes.merge(other.extremes),
            humidity: self.humidity.merge(other.humidity),
            precipitation: self.precipitation.merge(other.precipitation),
            wind_speed: self.wind_speed.merge(other.wind_speed),
            records: self.records + other.records,
        }
    }
}

// Map steps: key plus measure, `None` drops the record.

pub fn location_temperature(record: &WeatherRecord) -> Option<(String, SumCount)> {
    Some((record.location.clone(), SumCount::of(record.temperature)))
}

pub fn location_extremes(record: &WeatherRecord) -> Option<(String, MaxMin)> {
    Some((record.location.clone(), MaxMin::of(record.temperature)))
}

pub fn location_precipitation(record: &WeatherRecord) -> Option<(String, SumCount)> {
    record
        .precipitation
        .map(|p| (record.location.clone(), SumCount::of(p)))
}

pub fn condition_tally(record: &WeatherRecord) -> Option<(String, usize)> {
    record.condition.as_ref().map(|c| (c.clone(), 1))
}

pub fn daily_temperature(record: &WeatherRecord) -> Option<(NaiveDate, SumCount)> {
    record.date.map(|d| (d, SumCount::of(record.temperature)))
}

pub fn location_summary(record: &WeatherRecord) -> Option<(String, LocationAccumulator)> {
    Some((record.location.clone(), LocationAccumulator::of(record)))
}

pub fn location_humidity(record: &WeatherRecord) -> Option<(String, SumCount)> {
    record
        .humidity
        .map(|h| (record.location.clone(), SumCount::of(h)))
}

// Finalize steps.

pub fn finish_temperature(location: String, acc: SumCount) -> LocationTemperature {
    LocationTemperature {
        location,
        avg_temperature: acc.mean(),
        count: acc.count,
    }
}

pub fn finish_extremes(location: String, acc: MaxMin) -> LocationExtremes {
    LocationExtremes {
        location,
        max_temperature: round2(acc.max),
        min_temperature: round2(acc.min),
    }
}

pub fn finish_precipitation(location: String, acc: SumCount) -> LocationPrecipitation {
    LocationPrecipitation {
        location,
        total_precipitation: acc.total(),
    }
}

pub fn finish_condition(condition: String, count: usize) -> ConditionCount {
    ConditionCount { condition, count }
}

pub fn finish_daily(date: NaiveDate, acc: SumCount) -> DailyTemperature {
    DailyTemperature {
        date,
        avg_temperature: acc.mean(),
    }
}

pub fn finish_statistics(location: String, acc: LocationAccumulator) -> LocationStatistics {
    LocationStatistics {
        location,
        avg_temperature: acc.temperature.mean(),
        max_temperature: round2(acc.extremes.max),
        min_temperature: round2(acc.extremes.min),
        avg_humidity: acc.humidity.mean(),
        avg_precipitation: acc.precipitation.mean(),
        avg_wind_speed: acc.wind_speed.mean(),
        record_count: acc.records,
    }
}

pub fn finish_humidity(location: String, acc: SumCount) -> LocationHumidity {
    LocationHumidity {
        location,
        avg_humidity: acc.mean(),
    }
}
