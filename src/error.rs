use std::path::PathBuf;
use thiserror::Error;

use crate::analyzers::EngineKind;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Weather data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("{engine} engine failed: {message}")]
    EngineFailure { engine: EngineKind, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl DashboardError {
    pub fn engine_failure(engine: EngineKind, message: impl Into<String>) -> Self {
        DashboardError::EngineFailure {
            engine,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DashboardError::NotFound { .. })
    }
}

impl From<config::ConfigError> for DashboardError {
    fn from(err: config::ConfigError) -> Self {
        DashboardError::Config(err.to_string())
    }
}
