//! AICapacity CLI - which local AI models fit next to the game servers

use aicapacity::capacity::{CapacityAnalyzer, Catalog, HostInfo};
use aicapacity::config::{CapacityConfig, CliArgs};
use aicapacity::render::ReportRenderer;
use aicapacity::system::{HostSource, LinuxHost, ResourceReader};
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Logs go to stderr so stdout stays machine-readable
    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = CapacityConfig::from_cli(&args)?;

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading model catalog {}", path.display()))?,
        None => Catalog::builtin(),
    };
    let fallback_total_ram_gb = config.fallback_total_ram_gb;
    let analyzer = CapacityAnalyzer::new(config, catalog);
    info!(models = analyzer.catalog().len(), "catalog ready");

    // 1. Gather
    let reader = ResourceReader::new(LinuxHost::new());
    if !reader.host().is_linux() {
        let advisory = "This tool is designed for Linux servers; values below are best-effort.";
        if args.format.includes_table() {
            println!("{advisory}");
        } else {
            eprintln!("{advisory}");
        }
    }
    let reading = reader.read().with_total_fallback(fallback_total_ram_gb);

    // 2. Analyze
    let report = analyzer.analyze(&reading, HostInfo::collect());

    // 3. Report
    let colors = !args.no_color && console::colors_enabled();
    ReportRenderer::new(args.format, colors)
        .print(&report)
        .context("writing report")?;

    Ok(())
}
