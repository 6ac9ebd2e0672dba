use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use covercraft_core::{AppConfig, load_template_sheet, run_batch};
use std::path::PathBuf;

mod formatter;

#[derive(Parser)]
#[command(name = "coverplace")]
#[command(about = "Ensure every workbook under a directory carries a leftmost cover sheet", long_about = None)]
#[command(version)]
struct Cli {
    /// Root directory to process (overrides the config file)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Template workbook whose first sheet is cloned (overrides the config file)
    #[arg(long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Rename a non-canonical marker match to the target title
    #[arg(long)]
    rename_matches: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for scripting
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        AppConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("coverplace.toml");
        if default_config_path.exists() {
            AppConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            AppConfig::default()
        }
    };

    // Command-line overrides
    if let Some(root) = cli.root {
        config.placer.root_dir = Some(root);
    }
    if let Some(template) = cli.template {
        config.placer.template_path = Some(template);
    }
    if cli.rename_matches {
        config.placer.rename_matches = true;
    }

    let root = config
        .placer
        .root_dir
        .clone()
        .context("No root directory given; set root_dir in the config file or pass --root")?;
    let template_path = config.placer.template_path.clone().context(
        "No template workbook given; set template_path in the config file or pass --template",
    )?;

    // A broken template is fatal: with nothing to insert there is no point
    // walking the tree.
    let template = load_template_sheet(&template_path)?;

    let summary = run_batch(&root, &template, &config.placer)
        .with_context(|| format!("Failed to process {}", root.display()))?;

    match cli.format {
        OutputFormat::Human => {
            formatter::print_human(&root, &summary);
        }
        OutputFormat::Json => {
            formatter::print_json(&summary)?;
        }
    }

    let exit_code = if summary.has_failures() { 1 } else { 0 };
    std::process::exit(exit_code);
}
