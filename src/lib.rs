pub mod analyzers;
pub mod cli;
pub mod config;
pub mod error;
pub mod generators;
pub mod models;
pub mod processors;
pub mod readers;
pub mod server;
pub mod utils;
pub mod writers;

pub use analyzers::{AggregationEngine, EngineKind, ParallelEngine, SequentialEngine};
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use processors::{Metric, QueryDispatcher, QueryOutput};
