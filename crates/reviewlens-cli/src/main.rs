mod report;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use reviewlens_core::{AppConfig, ConfigError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reviewlens-cli")]
#[command(about = "Scrape product reviews and classify their sentiment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape reviews for a product and render its charts
    Scrape {
        /// Product to search for, e.g. "iphone 15"
        #[arg(long)]
        product: String,

        /// Number of reviews to collect (a multiple of 10, at least 10)
        #[arg(long, default_value_t = 10)]
        count: u32,

        /// Directory for chart output; defaults to `REVIEWLENS_CHARTS_DIR`
        #[arg(long)]
        charts_dir: Option<PathBuf>,

        /// Print the full report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Classify the sentiment of a piece of text
    Classify {
        /// Text to classify
        text: String,
    },
}

/// Only `scrape` reads the environment config, so a bad variable cannot
/// break `classify` or `--help`.
fn config_for(
    command: &Commands,
    load: impl FnOnce() -> Result<AppConfig, ConfigError>,
) -> Result<Option<AppConfig>, ConfigError> {
    match command {
        Commands::Scrape { .. } => load().map(Some),
        Commands::Classify { .. } => Ok(None),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = config_for(&cli.command, reviewlens_core::load_app_config)?;

    let default_level = config.as_ref().map_or("info", |c| c.log_level.as_str());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scrape {
            product,
            count,
            charts_dir,
            json,
        } => {
            let config = config.context("scrape runs with a loaded config")?;
            let charts_dir = charts_dir.unwrap_or_else(|| config.charts_dir.clone());
            report::run_scrape(&config, &product, count, &charts_dir, json).await?;
        }
        Commands::Classify { text } => report::run_classify(&text),
    }

    Ok(())
}
