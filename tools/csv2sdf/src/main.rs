//! csv2sdf - script data conversion tool
//!
//! Converts a comma-delimited event table (timer, system, command,
//! parameters) into an `.sdf` file next to it.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;

use csv2sdf::{ConvertConfig, Converter, prompt_for_path, resolve_input};

#[derive(Parser)]
#[command(name = "csv2sdf")]
#[command(about = "Convert CSV event tables to SDF script data files")]
#[command(version)]
struct Cli {
    /// Input CSV file (asked for interactively when omitted)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    tracing::info!("Convert CSV file to SDF file for use with the engine");

    let input = resolve_input(cli.input, || {
        prompt_for_path(io::stdin().lock(), io::stdout())
    })?;

    let config = ConvertConfig::for_input(input);
    tracing::info!("Converting {:?} -> {:?}", config.input, config.output);

    Converter::new(config.clone())
        .run()
        .with_context(|| format!("Failed to convert {:?}", config.input))?;

    tracing::info!("Done!");
    Ok(())
}
