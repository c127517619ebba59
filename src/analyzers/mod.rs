#[cfg(test)]
pub(crate) mod fixtures;
pub mod parallel_engine;
pub mod reduce;
pub mod sequential_engine;

pub use parallel_engine::ParallelEngine;
pub use sequential_engine::SequentialEngine;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{DashboardError, Result};
use crate::models::{
    ConditionCount, DailyTemperature, LocationExtremes, LocationHumidity, LocationPrecipitation,
    LocationStatistics, LocationTemperature, WeatherTable,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[serde(alias = "distributed")]
    Parallel,
    #[serde(alias = "single-process")]
    Sequential,
}

impl EngineKind {
    /// The engine tried when this one fails
    pub fn alternate(&self) -> Self {
        match self {
            EngineKind::Parallel => EngineKind::Sequential,
            EngineKind::Sequential => EngineKind::Parallel,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Parallel => "parallel",
            EngineKind::Sequential => "sequential",
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parallel" | "distributed" => Ok(EngineKind::Parallel),
            "sequential" | "single-process" => Ok(EngineKind::Sequential),
            other => Err(DashboardError::InvalidFormat(format!(
                "Unknown engine: '{}'",
                other
            ))),
        }
    }
}

/// Group-by aggregations over a loaded weather table. Both implementations
/// return the same rows (up to order) for the same table, so callers can
/// swap one for the other.
pub trait AggregationEngine: Send + Sync {
    fn kind(&self) -> EngineKind;

    fn load(&self, path: &Path) -> Result<WeatherTable>;

    fn temperature_by_location(&self, table: &WeatherTable) -> Result<Vec<LocationTemperature>>;

    fn max_min_temperature_by_location(
        &self,
        table: &WeatherTable,
    ) -> Result<Vec<LocationExtremes>>;

    fn precipitation_by_location(&self, table: &WeatherTable)
        -> Result<Vec<LocationPrecipitation>>;

    fn weather_condition_distribution(&self, table: &WeatherTable) -> Result<Vec<ConditionCount>>;

    /// Sorted ascending by date
    fn daily_average_temperature(&self, table: &WeatherTable) -> Result<Vec<DailyTemperature>>;

    fn location_statistics(&self, table: &WeatherTable) -> Result<Vec<LocationStatistics>>;

    fn humidity_by_location(&self, table: &WeatherTable) -> Result<Vec<LocationHumidity>>;
}

/// Builds engines on demand; the dispatcher constructs lazily and again on
/// fallback.
pub trait EngineFactory: Send + Sync {
    fn build(&self, kind: EngineKind) -> Result<Arc<dyn AggregationEngine>>;
}

pub struct DefaultEngineFactory {
    max_workers: usize,
}

impl DefaultEngineFactory {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }
}

impl Default for DefaultEngineFactory {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

impl EngineFactory for DefaultEngineFactory {
    fn build(&self, kind: EngineKind) -> Result<Arc<dyn AggregationEngine>> {
        Ok(match kind {
            EngineKind::Parallel => Arc::new(ParallelEngine::new(self.max_workers)?),
            EngineKind::Sequential => Arc::new(SequentialEngine::new()),
        })
    }
}
