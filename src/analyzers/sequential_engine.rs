use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::path::Path;

use crate::analyzers::reduce::{self, LocationAccumulator, MaxMin, SumCount};
use crate::analyzers::{AggregationEngine, EngineKind};
use crate::error::Result;
use crate::models::{
    ConditionCount, DailyTemperature, LocationExtremes, LocationHumidity, LocationPrecipitation,
    LocationStatistics, LocationTemperature, WeatherRecord, WeatherTable,
};
use crate::readers::WeatherReader;

/// Single-threaded engine. One pass over the records into an ordered map,
/// so location groups come back in key order.
pub struct SequentialEngine {
    reader: WeatherReader,
}

impl SequentialEngine {
    pub fn new() -> Self {
        Self {
            reader: WeatherReader::new(),
        }
    }

    fn group<K, V, M, R>(records: &[WeatherRecord], map: M, reduce: R) -> BTreeMap<K, V>
    where
        K: Ord,
        V: Copy,
        M: Fn(&WeatherRecord) -> Option<(K, V)>,
        R: Fn(V, V) -> V,
    {
        let mut groups = BTreeMap::new();
        for (key, value) in records.iter().filter_map(map) {
            groups
                .entry(key)
                .and_modify(|existing: &mut V| *existing = reduce(*existing, value))
                .or_insert(value);
        }
        groups
    }

    fn finalize<K, V, T>(groups: BTreeMap<K, V>, finish: impl Fn(K, V) -> T) -> Vec<T> {
        groups.into_iter().map(|(k, v)| finish(k, v)).collect()
    }
}

impl Default for SequentialEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregationEngine for SequentialEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Sequential
    }

    fn load(&self, path: &Path) -> Result<WeatherTable> {
        self.reader.load(path)
    }

    fn temperature_by_location(&self, table: &WeatherTable) -> Result<Vec<LocationTemperature>> {
        let groups = Self::group(table.records(), reduce::location_temperature, SumCount::merge);
        Ok(Self::finalize(groups, reduce::finish_temperature))
    }

    fn max_min_temperature_by_location(
        &self,
        table: &WeatherTable,
    ) -> Result<Vec<LocationExtremes>> {
        let groups = Self::group(table.records(), reduce::location_extremes, MaxMin::merge);
        Ok(Self::finalize(groups, reduce::finish_extremes))
    }

    fn precipitation_by_location(
        &self,
        table: &WeatherTable,
    ) -> Result<Vec<LocationPrecipitation>> {
        let groups = Self::group(table.records(), reduce::location_precipitation, SumCount::merge);
        Ok(Self::finalize(groups, reduce::finish_precipitation))
    }

    /// Most frequent condition first
    fn weather_condition_distribution(&self, table: &WeatherTable) -> Result<Vec<ConditionCount>> {
        let groups = Self::group(table.records(), reduce::condition_tally, |a, b| a + b);
        let mut counts = Self::finalize(groups, reduce::finish_condition);
        counts.sort_by_key(|c| Reverse(c.count));
        Ok(counts)
    }

    fn daily_average_temperature(&self, table: &WeatherTable) -> Result<Vec<DailyTemperature>> {
        let groups = Self::group(table.records(), reduce::daily_temperature, SumCount::merge);
        Ok(Self::finalize(groups, reduce::finish_daily))
    }

    fn location_statistics(&self, table: &WeatherTable) -> Result<Vec<LocationStatistics>> {
        let groups = Self::group(
            table.records(),
            reduce::location_summary,
            LocationAccumulator::merge,
        );
        Ok(Self::finalize(groups, reduce::finish_statistics))
    }

    fn humidity_by_location(&self, table: &WeatherTable) -> Result<Vec<LocationHumidity>> {
        let groups = Self::group(table.records(), reduce::location_humidity, SumCount::merge);
        Ok(Self::finalize(groups, reduce::finish_humidity))
    }
}
