//! adbscan - List Android devices attached through adb
//!
//! Runs `adb devices -l` once and prints the attached devices as a table
//! or as JSON.

mod config;
mod output;

use adbscan_core::DeviceListing;
use adbscan_discovery::{list_devices_with, DeviceTool};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "adbscan")]
#[command(about = "List Android devices attached through adb")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "adbscan.toml")]
    config: PathBuf,

    /// Path to the adb executable (overrides the configuration)
    #[arg(long)]
    adb: Option<PathBuf>,

    /// Print the listing as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Write a default configuration file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    debug!("adbscan v{}", env!("CARGO_PKG_VERSION"));

    if args.init_config {
        config::save_default_config(&args.config)
            .with_context(|| format!("failed to write {}", args.config.display()))?;
        info!(path = %args.config.display(), "Wrote default configuration");
        return Ok(());
    }

    let mut config = config::load_config(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    // Command line wins over the file
    if let Some(adb) = args.adb {
        config.adb.path = Some(adb);
    }
    if args.json {
        config.output.json = true;
    }

    let tool = config.to_adb_command();
    let devices = list_devices_with(&tool).context("failed to list adb devices")?;
    let listing = DeviceListing::new(tool.describe(), devices);

    info!(count = listing.len(), tool = %listing.tool, "Device scan complete");

    if config.output.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print!("{}", output::format_devices(&listing));
    }

    Ok(())
}
