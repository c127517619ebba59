use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analyzers::EngineKind;
use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_DAILY_WINDOW, DEFAULT_DATA_FILE, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_RECORD_COUNT, DEFAULT_STATIC_DIR, ENV_PREFIX,
};

/// Runtime settings. Layered as defaults, then an optional TOML file, then
/// `WEATHER_*` environment variables; CLI flags are applied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub data_file: PathBuf,
    pub default_records: usize,
    pub daily_window: usize,
    pub engine: EngineKind,
    pub max_workers: usize,
    pub seed: Option<u64>,
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            default_records: DEFAULT_RECORD_COUNT,
            daily_window: DEFAULT_DAILY_WINDOW,
            engine: EngineKind::Parallel,
            max_workers: num_cpus::get(),
            seed: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl DashboardConfig {
    /// Load settings. An explicit `path` must exist; otherwise
    /// `weather-dashboard.toml` in the working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("data_file", defaults.data_file.to_string_lossy().to_string())?
            .set_default("default_records", defaults.default_records as i64)?
            .set_default("daily_window", defaults.daily_window as i64)?
            .set_default("engine", defaults.engine.as_str())?
            .set_default("max_workers", defaults.max_workers as i64)?
            .set_default("host", defaults.host.clone())?
            .set_default("port", defaults.port as i64)?
            .set_default("static_dir", defaults.static_dir.to_string_lossy().to_string())?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let mut config: Self = settings.try_deserialize()?;
        config.max_workers = config.max_workers.max(1);
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.data_file, PathBuf::from("data/weather_data.csv"));
        assert_eq!(config.default_records, 1000);
        assert_eq!(config.daily_window, 30);
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert!(config.max_workers >= 1);
    }

    #[test]
    fn test_file_overrides_defaults() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "data_file = \"custom/weather.csv\"")?;
        writeln!(file, "engine = \"sequential\"")?;
        writeln!(file, "port = 8080")?;
        writeln!(file, "seed = 42")?;

        let config = DashboardConfig::load(Some(file.path()))?;

        assert_eq!(config.data_file, PathBuf::from("custom/weather.csv"));
        assert_eq!(config.engine, EngineKind::Sequential);
        assert_eq!(config.port, 8080);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.daily_window, 30);

        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = DashboardConfig::load(Some(Path::new("no/such/config.toml")));
        assert!(result.is_err());
    }
}
