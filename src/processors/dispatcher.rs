use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, error, info, warn};

use crate::analyzers::{AggregationEngine, DefaultEngineFactory, EngineFactory, EngineKind};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::generators::RecordSynthesizer;
use crate::processors::metric::{Metric, QueryOutput};

#[derive(Debug, Clone)]
pub struct DispatcherSettings {
    pub data_file: PathBuf,
    pub default_records: usize,
    pub daily_window: usize,
    pub seed: Option<u64>,
    pub preferred: EngineKind,
}

impl From<&DashboardConfig> for DispatcherSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            data_file: config.data_file.clone(),
            default_records: config.default_records,
            daily_window: config.daily_window,
            seed: config.seed,
            preferred: config.engine,
        }
    }
}

struct EngineSlot {
    kind: EngineKind,
    engine: Option<Arc<dyn AggregationEngine>>,
}

/// Resolves metrics against the selected engine, switching to the alternate
/// engine for good when the selected one fails and the alternate succeeds.
pub struct QueryDispatcher {
    settings: DispatcherSettings,
    factory: Arc<dyn EngineFactory>,
    slot: RwLock<EngineSlot>,
}

impl QueryDispatcher {
    pub fn new(settings: DispatcherSettings, factory: Arc<dyn EngineFactory>) -> Self {
        let slot = EngineSlot {
            kind: settings.preferred,
            engine: None,
        };
        Self {
            settings,
            factory,
            slot: RwLock::new(slot),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            DispatcherSettings::from(config),
            Arc::new(DefaultEngineFactory::new(config.max_workers)),
        )
    }

    pub fn data_file(&self) -> &Path {
        &self.settings.data_file
    }

    pub fn selected_engine(&self) -> EngineKind {
        match self.slot.read() {
            Ok(slot) => slot.kind,
            Err(poisoned) => poisoned.into_inner().kind,
        }
    }

    /// Synthesize the default table if the data file is missing.
    /// Returns true when a file was written.
    pub fn ensure_data(&self) -> Result<bool> {
        if self.settings.data_file.exists() {
            return Ok(false);
        }

        info!(
            path = %self.settings.data_file.display(),
            records = self.settings.default_records,
            "Data file missing, generating sample data"
        );
        RecordSynthesizer::new()
            .with_optional_seed(self.settings.seed)
            .generate(self.settings.default_records, &self.settings.data_file)?;
        Ok(true)
    }

    pub fn dispatch(&self, metric: Metric) -> Result<QueryOutput> {
        self.ensure_data()?;

        let (kind, engine) = self.current_engine();
        let first_error = match engine.and_then(|engine| self.run_on(engine.as_ref(), metric)) {
            Ok(output) => return Ok(self.finish(metric, output)),
            Err(e) => e,
        };

        let alternate = kind.alternate();
        warn!(
            %metric,
            engine = %kind,
            error = %first_error,
            "Engine failed, retrying with {} engine",
            alternate
        );

        if first_error.is_not_found() {
            self.ensure_data()?;
        }

        let retried = self.factory.build(alternate).and_then(|engine| {
            let output = self.run_on(engine.as_ref(), metric)?;
            Ok((engine, output))
        });

        match retried {
            Ok((engine, output)) => {
                self.switch_to(alternate, engine);
                info!(engine = %alternate, "Switched aggregation engine");
                Ok(self.finish(metric, output))
            }
            Err(fallback_error) => {
                error!(
                    %metric,
                    engine = %alternate,
                    error = %fallback_error,
                    "Fallback engine also failed"
                );
                Err(first_error)
            }
        }
    }

    /// Drop the constructed engine; the next dispatch builds it again
    pub fn shutdown(&self) {
        let mut slot = match self.slot.write() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        if slot.engine.take().is_some() {
            debug!(engine = %slot.kind, "Released aggregation engine");
        }
    }

    /// The selected engine, built on first use, paired with the kind it was
    /// selected under so a concurrent switch cannot split the two.
    fn current_engine(&self) -> (EngineKind, Result<Arc<dyn AggregationEngine>>) {
        if let Ok(slot) = self.slot.read() {
            if let Some(engine) = &slot.engine {
                return (slot.kind, Ok(Arc::clone(engine)));
            }
        }

        let mut slot = match self.slot.write() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        let kind = slot.kind;
        if let Some(engine) = &slot.engine {
            return (kind, Ok(Arc::clone(engine)));
        }

        let built = self.factory.build(kind);
        if let Ok(engine) = &built {
            debug!(engine = %kind, "Constructed aggregation engine");
            slot.engine = Some(Arc::clone(engine));
        }
        (kind, built)
    }

    // Concurrent fallbacks may both land here; each writes the same kind.
    fn switch_to(&self, kind: EngineKind, engine: Arc<dyn AggregationEngine>) {
        let mut slot = match self.slot.write() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.kind = kind;
        slot.engine = Some(engine);
    }

    fn run_on(&self, engine: &dyn AggregationEngine, metric: Metric) -> Result<QueryOutput> {
        let table = engine.load(&self.settings.data_file)?;
        debug!(
            %metric,
            engine = %engine.kind(),
            records = table.len(),
            dropped = table.dropped_rows(),
            "Running aggregation"
        );
        metric.run(engine, &table)
    }

    fn finish(&self, metric: Metric, output: QueryOutput) -> QueryOutput {
        match metric {
            Metric::DailyTemperature => output.keep_latest_days(self.settings.daily_window),
            _ => output,
        }
    }
}
