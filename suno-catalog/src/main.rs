//! Catalog generator (suno-catalog) - Main entry point
//!
//! Scans `data/styles/*/` for MP3 files, classifies each by filename and
//! writes `data/styles/catalog.json`. Runs without arguments; the data root
//! resolves to the workspace `data/` directory unless overridden.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use suno_catalog::CatalogScanner;
use suno_common::config::{DataRootResolver, TomlConfig};
use suno_common::DataLayout;
use tracing::{info, warn};

/// Command-line arguments for suno-catalog
#[derive(Parser, Debug)]
#[command(name = "suno-catalog")]
#[command(about = "Generate catalog.json from the MP3 files in data/styles")]
#[command(version)]
struct Args {
    /// Data root containing styles/
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Output file (defaults to <data-dir>/styles/catalog.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base URL prefixed to every track URL
    #[arg(long, env = "SUNO_CATALOG_BASE_URL")]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let toml = TomlConfig::load();

    // Diagnostics go to stderr; stdout carries the summary
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("suno_catalog={}", toml.logging.level).into()),
        )
        .init();

    let data_dir = DataRootResolver::new("suno-catalog")
        .with_cli_arg(args.data_dir)
        .with_toml(toml.clone())
        .resolve();
    let layout = DataLayout::new(data_dir);
    info!("Styles directory: {}", layout.styles_dir.display());

    let base_url = args
        .base_url
        .or(toml.catalog.base_url)
        .unwrap_or_else(|| suno_catalog::DEFAULT_BASE_URL.to_string());
    let scanner = CatalogScanner::new(&base_url);

    println!("🔍 Scanning MP3 files...");
    let outcome = scanner
        .scan(&layout.styles_dir)
        .with_context(|| format!("Failed to scan {}", layout.styles_dir.display()))?;
    let catalog = outcome.catalog;

    if !outcome.skipped.is_empty() {
        warn!(
            "{} files did not match a catalog category and were skipped",
            outcome.skipped.len()
        );
    }

    println!("\n✅ Found {} tracks:", catalog.total_tracks);
    for line in catalog.summary() {
        println!("   {} {}: {} tracks", line.emoji, line.name, line.count);
    }

    let output_path = args.output.unwrap_or_else(|| layout.catalog_path());
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    catalog
        .write_to(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!("\n📝 Wrote catalog to: {}", output_path.display());
    println!("📊 Total: {} tracks", catalog.total_tracks);

    Ok(())
}
