mod cli;
mod config;
mod error;
mod extract;
mod parser;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::parser::PdfExtractBackend;

fn main() -> Result<()> {
    // Only warnings by default, use RUST_LOG=info or debug for per-page detail
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    extract::run(&PdfExtractBackend, &cli.input, &cli.output)
        .with_context(|| format!("Failed to extract text from {}", cli.input.display()))?;

    Ok(())
}
