use rayon::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::Path;
use tracing::debug;

use crate::analyzers::reduce::{self, LocationAccumulator, MaxMin, SumCount};
use crate::analyzers::{AggregationEngine, EngineKind};
use crate::error::{DashboardError, Result};
use crate::models::{
    ConditionCount, DailyTemperature, LocationExtremes, LocationHumidity, LocationPrecipitation,
    LocationStatistics, LocationTemperature, WeatherRecord, WeatherTable,
};
use crate::readers::{RawWeatherRow, WeatherReader};
use crate::utils::constants::DEFAULT_CHUNK_SIZE;

/// Map/reduce engine on a dedicated rayon pool. Records are mapped in
/// fixed-size chunks, partitioned by key in record order, and each key's
/// values are reduced on its own task.
pub struct ParallelEngine {
    pool: rayon::ThreadPool,
    chunk_size: usize,
}

impl ParallelEngine {
    pub fn new(max_workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_workers)
            .thread_name(|i| format!("weather-agg-{}", i))
            .build()
            .map_err(|e| DashboardError::engine_failure(EngineKind::Parallel, e.to_string()))?;

        debug!(max_workers, "Started parallel aggregation pool");
        Ok(Self {
            pool,
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Map each record to an optional (key, value), then reduce values per
    /// key. Each key folds its values left to right in record order, the
    /// same order the sequential engine adds them in.
    fn reduce_by_key<K, V, M, R>(&self, records: &[WeatherRecord], map: M, reduce: R) -> HashMap<K, V>
    where
        K: Eq + Hash + Send,
        V: Copy + Send,
        M: Fn(&WeatherRecord) -> Option<(K, V)> + Sync + Send,
        R: Fn(V, V) -> V + Sync + Send,
    {
        let map = &map;
        self.pool.install(|| {
            let mapped: Vec<(K, V)> = records
                .par_chunks(self.chunk_size)
                .flat_map_iter(move |chunk| chunk.iter().filter_map(map))
                .collect();

            let mut partitions: HashMap<K, Vec<V>> = HashMap::new();
            for (key, value) in mapped {
                partitions.entry(key).or_default().push(value);
            }

            partitions
                .into_par_iter()
                .filter_map(|(key, values)| {
                    values.into_iter().reduce(&reduce).map(|value| (key, value))
                })
                .collect()
        })
    }

    fn finalize<K, V, T, F>(&self, grouped: HashMap<K, V>, finish: F) -> Vec<T>
    where
        K: Eq + Hash + Send,
        V: Send,
        T: Send,
        F: Fn(K, V) -> T + Sync + Send,
    {
        self.pool.install(|| {
            grouped
                .into_par_iter()
                .map(|(key, value)| finish(key, value))
                .collect()
        })
    }
}

impl AggregationEngine for ParallelEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Parallel
    }

    fn load(&self, path: &Path) -> Result<WeatherTable> {
        let raw = WeatherReader::new().read_raw_rows(path)?;

        let typed: Vec<Option<WeatherRecord>> = self.pool.install(|| {
            raw.rows
                .into_par_iter()
                .map(RawWeatherRow::into_record)
                .collect()
        });

        let parsed = typed.len();
        let records: Vec<WeatherRecord> = typed.into_iter().flatten().collect();
        let dropped = raw.undecodable + (parsed - records.len());

        debug!(
            records = records.len(),
            dropped,
            "Loaded weather table in parallel"
        );
        Ok(WeatherTable::from_source(records, dropped, path))
    }

    fn temperature_by_location(&self, table: &WeatherTable) -> Result<Vec<LocationTemperature>> {
        let grouped =
            self.reduce_by_key(table.records(), reduce::location_temperature, SumCount::merge);
        Ok(self.finalize(grouped, reduce::finish_temperature))
    }

    fn max_min_temperature_by_location(
        &self,
        table: &WeatherTable,
    ) -> Result<Vec<LocationExtremes>> {
        let grouped = self.reduce_by_key(table.records(), reduce::location_extremes, MaxMin::merge);
        Ok(self.finalize(grouped, reduce::finish_extremes))
    }

    fn precipitation_by_location(
        &self,
        table: &WeatherTable,
    ) -> Result<Vec<LocationPrecipitation>> {
        let grouped =
            self.reduce_by_key(table.records(), reduce::location_precipitation, SumCount::merge);
        Ok(self.finalize(grouped, reduce::finish_precipitation))
    }

    fn weather_condition_distribution(&self, table: &WeatherTable) -> Result<Vec<ConditionCount>> {
        let grouped = self.reduce_by_key(table.records(), reduce::condition_tally, |a, b| a + b);
        Ok(self.finalize(grouped, reduce::finish_condition))
    }

    fn daily_average_temperature(&self, table: &WeatherTable) -> Result<Vec<DailyTemperature>> {
        let grouped =
            self.reduce_by_key(table.records(), reduce::daily_temperature, SumCount::merge);
        let mut daily = self.finalize(grouped, reduce::finish_daily);
        self.pool
            .install(|| daily.par_sort_unstable_by_key(|d| d.date));
        Ok(daily)
    }

    fn location_statistics(&self, table: &WeatherTable) -> Result<Vec<LocationStatistics>> {
        let grouped = self.reduce_by_key(
            table.records(),
            reduce::location_summary,
            LocationAccumulator::merge,
        );
        Ok(self.finalize(grouped, reduce::finish_statistics))
    }

    fn humidity_by_location(&self, table: &WeatherTable) -> Result<Vec<LocationHumidity>> {
        let grouped =
            self.reduce_by_key(table.records(), reduce::location_humidity, SumCount::merge);
        Ok(self.finalize(grouped, reduce::finish_humidity))
    }
}
