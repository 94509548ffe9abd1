//! otaplanctl - OTA radio-firmware planning CLI
//!
//! Runs one planning pass over on-disk target-files packages and writes
//! the generated installer script and the output OTA package.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "otaplanctl")]
#[command(about = "Plan OTA radio-firmware updates from target-files packages")]
#[command(version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a full update from a target package
    Full {
        /// Target-files package (zip)
        #[arg(long)]
        target: PathBuf,

        /// Output OTA package receiving staged blobs
        #[arg(long)]
        output: PathBuf,

        /// File receiving the generated installer script
        #[arg(long)]
        script: PathBuf,

        /// Installer API version of the target build
        #[arg(long, default_value_t = 3)]
        api_version: u32,
    },

    /// Plan an incremental update against a previously-shipped package
    Incremental {
        /// Target-files package (zip)
        #[arg(long)]
        target: PathBuf,

        /// Source target-files package the device currently runs
        #[arg(long)]
        source: PathBuf,

        /// Output OTA package receiving staged blobs
        #[arg(long)]
        output: PathBuf,

        /// File receiving the generated installer script
        #[arg(long)]
        script: PathBuf,

        /// Installer API version of the target build
        #[arg(long, default_value_t = 3)]
        api_version: u32,
    },

    /// Parse and print the filesmap of a target package
    Filesmap {
        /// Target-files package (zip)
        #[arg(long)]
        target: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("otaplan={log_level},otaplanctl={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Full {
            target,
            output,
            script,
            api_version,
        } => commands::plan(&target, None, &output, &script, api_version),
        Commands::Incremental {
            target,
            source,
            output,
            script,
            api_version,
        } => commands::plan(&target, Some(&source), &output, &script, api_version),
        Commands::Filesmap { target, json } => commands::show_filesmap(&target, json),
    }
}
