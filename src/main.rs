//! CLI entry point for the bikeshare explorer.
//!
//! `explore` (the default) runs the interactive prompt loop; `summary` runs
//! the same pipeline once for scripted use.

use anyhow::{Context, Result};
use bikeshare_explorer::{
    config::CityConfig,
    filter::Filters,
    output::{print_pretty, write_json, write_summary},
    pager::DEFAULT_PAGE_SIZE,
    session::Session,
    stats::CitySummary,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory holding the city CSV files
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".", global = true)]
    data_dir: PathBuf,

    /// JSON file mapping city names to CSV files (defaults to the built-in cities)
    #[arg(long, env = "BIKESHARE_CITIES", global = true)]
    cities: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively choose a city and filters, then view statistics
    Explore {
        /// Rows shown per raw-data page
        #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Print statistics for one city and filter selection
    Summary {
        /// City to analyze
        #[arg(short, long)]
        city: String,

        /// Month to filter by (january..june) or "all"
        #[arg(short, long, default_value = "all")]
        month: String,

        /// Day of week to filter by or "all"
        #[arg(short, long, default_value = "all")]
        day: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // Quiet by default so log lines don't interleave with prompts
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = match &cli.cities {
        Some(path) => CityConfig::load(path, &cli.data_dir)?,
        None => CityConfig::with_defaults(&cli.data_dir),
    };
    info!(
        data_dir = %cli.data_dir.display(),
        cities = ?config.names().collect::<Vec<_>>(),
        "Configuration loaded"
    );

    match cli.command {
        None => explore(&config, DEFAULT_PAGE_SIZE)?,
        Some(Commands::Explore { page_size }) => explore(&config, page_size)?,
        Some(Commands::Summary {
            city,
            month,
            day,
            format,
        }) => summary(&config, &city, &month, &day, format)?,
    }

    Ok(())
}

/// Runs the interactive session on stdin/stdout.
fn explore(config: &CityConfig, page_size: usize) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(config, stdin.lock(), stdout.lock())
        .with_page_size(page_size)
        .run()
}

/// Loads, filters and summarises one city without prompting.
#[tracing::instrument(skip(config, format))]
fn summary(
    config: &CityConfig,
    city: &str,
    month: &str,
    day: &str,
    format: Format,
) -> Result<()> {
    let filters = Filters::parse(month, day)
        .context("month must be january..june and day a weekday name, or 'all'")?;
    let summary = CitySummary::for_city(config, city, filters)?;
    print_pretty(&summary);

    let mut stdout = io::stdout().lock();
    match format {
        Format::Text => write_summary(&mut stdout, &summary)?,
        Format::Json => write_json(&mut stdout, &summary)?,
    }
    stdout.flush()?;

    Ok(())
}
