use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::analyzers::EngineKind;
use crate::processors::Metric;

#[derive(Parser)]
#[command(name = "weather-dashboard")]
#[command(about = "Weather analytics dashboard: synthetic data, aggregations and a JSON API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Configuration file [default: weather-dashboard.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a synthetic weather data file
    Generate {
        #[arg(short, long, help = "Number of records [default: 1000]")]
        records: Option<usize>,

        #[arg(
            short,
            long,
            help = "Output CSV path [default: data/weather_data.csv]"
        )]
        output: Option<PathBuf>,

        #[arg(long, help = "Random seed for reproducible data")]
        seed: Option<u64>,

        #[arg(short, long, help = "Overwrite an existing file")]
        force: bool,
    },

    /// Run the dashboard API server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,

        #[arg(short, long)]
        data_file: Option<PathBuf>,

        #[arg(short, long, help = "Preferred engine: parallel or sequential")]
        engine: Option<EngineKind>,

        #[arg(long, help = "Directory served under /static")]
        static_dir: Option<PathBuf>,
    },

    /// Run one aggregation and print the JSON result
    Query {
        #[arg(
            value_name = "METRIC",
            help = "temperature-by-location, max-min-temperature, precipitation-by-location, \
                    weather-conditions, daily-temperature, location-statistics, humidity-by-location"
        )]
        metric: Metric,

        #[arg(short, long)]
        data_file: Option<PathBuf>,

        #[arg(short, long)]
        engine: Option<EngineKind>,
    },

    /// Summarize a weather data file
    Inspect {
        #[arg(short, long)]
        data_file: Option<PathBuf>,
    },
}
