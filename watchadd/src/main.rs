use anyhow::{Context, Result};
use clap::Parser;
use covercraft_core::AppConfig;
use covercraft_core::watchlist::{CatalogClient, append_row};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "watchadd")]
#[command(about = "Look up a movie or TV title and append it to the watchlist workbook", long_about = None)]
#[command(version)]
struct Cli {
    /// Free-text title to search for
    #[arg(value_name = "TITLE")]
    title: String,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from("watchadd.toml"));
    let config = AppConfig::from_file(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let watchlist = config
        .watchlist
        .context("No [watchlist] section in the config file")?;

    let client = CatalogClient::new(&watchlist)?;
    let entry = client
        .lookup(&cli.title)
        .with_context(|| format!("Lookup failed for '{}'", cli.title))?;

    let row = entry.to_row();
    let row_number = append_row(&watchlist.output_path, &row)
        .with_context(|| format!("Could not append to {}", watchlist.output_path.display()))?;

    println!(
        "✓ Added '{}' ({}) to {} at row {}",
        entry.title,
        entry.kind.label(),
        watchlist.output_path.display(),
        row_number
    );
    Ok(())
}
