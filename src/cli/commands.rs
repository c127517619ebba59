use std::sync::Arc;
use tracing::{info, warn};

use crate::cli::args::{Cli, Commands};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::generators::RecordSynthesizer;
use crate::processors::QueryDispatcher;
use crate::readers::WeatherReader;
use crate::server;
use crate::utils::logging::init_tracing;
use crate::utils::progress::ProgressReporter;

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose, cli.log_file.as_deref())?;
    let mut config = DashboardConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            records,
            output,
            seed,
            force,
        } => {
            let records = records.unwrap_or(config.default_records);
            let output = output.unwrap_or_else(|| config.data_file.clone());

            if output.exists() && !force {
                println!(
                    "Data file already exists: {} (use --force to regenerate)",
                    output.display()
                );
                return Ok(());
            }

            let progress = ProgressReporter::new(records as u64, "Generating weather data...", false);
            let path = RecordSynthesizer::new()
                .with_optional_seed(seed.or(config.seed))
                .generate_with_progress(records, &output, Some(&progress))?;

            progress.finish_with_message(&format!(
                "Generated {} weather records in {}",
                records,
                path.display()
            ));
        }

        Commands::Serve {
            host,
            port,
            data_file,
            engine,
            static_dir,
        } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(data_file) = data_file {
                config.data_file = data_file;
            }
            if let Some(engine) = engine {
                config.engine = engine;
            }
            if let Some(static_dir) = static_dir {
                config.static_dir = static_dir;
            }

            let dispatcher = Arc::new(QueryDispatcher::from_config(&config));
            match dispatcher.ensure_data() {
                Ok(true) => info!(path = %config.data_file.display(), "Sample data generated"),
                Ok(false) => info!(path = %config.data_file.display(), "Using existing data file"),
                Err(e) => warn!(
                    error = %e,
                    "Could not generate sample data; API endpoints may fail"
                ),
            }

            server::serve(&config, dispatcher).await?;
        }

        Commands::Query {
            metric,
            data_file,
            engine,
        } => {
            if let Some(data_file) = data_file {
                config.data_file = data_file;
            }
            if let Some(engine) = engine {
                config.engine = engine;
            }

            let dispatcher = QueryDispatcher::from_config(&config);
            let output = tokio::task::spawn_blocking(move || {
                let output = dispatcher.dispatch(metric);
                dispatcher.shutdown();
                output
            })
            .await??;

            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Inspect { data_file } => {
            let path = data_file.unwrap_or_else(|| config.data_file.clone());
            println!("Inspecting weather data: {}", path.display());

            let table = WeatherReader::new().load(&path)?;
            println!("\n{}", table.summary());
        }
    }

    Ok(())
}
