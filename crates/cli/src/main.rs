//! Control-plane resource report CLI
//!
//! Queries a control plane for per-cluster resource inventories and writes
//! comparison or summary workbooks.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use report_lib::{Credentials, SummarySettings};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use output::{LogFormat, OutputFormat};

/// Control-plane resource report CLI
#[derive(Parser)]
#[command(name = "cp-report")]
#[command(author, version, about = "Resource inventory reports for control-plane clusters", long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log line format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Also print the built report to stdout
    #[arg(long, value_enum, global = true)]
    pub preview: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize resources per cluster and type (clusters are discovered)
    Summary {
        /// Control plane URL (e.g. https://customer-cp.console.example.cloud)
        #[arg(long, env = "CP_REPORT_URL")]
        url: String,

        /// Username for authentication
        #[arg(long, env = "CP_REPORT_USERNAME")]
        username: String,

        /// Authentication token
        #[arg(long, env = "CP_REPORT_TOKEN", hide_env_values = true)]
        token: String,

        /// Directory for the timestamped workbook
        #[arg(long, short, default_value = ".")]
        output_dir: PathBuf,

        /// Per-request timeout in seconds (no timeout by default)
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Compare resource status across the configured clusters
    Compare {
        /// Configuration file (defaults to ~/.config/cp-report/compare.toml)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Output workbook path, overriding the configuration
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool, format: LogFormat) {
    let default_level = if verbose { "debug" } else { "info" };
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)));

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    match cli.command {
        Commands::Summary {
            url,
            username,
            token,
            output_dir,
            timeout_secs,
        } => {
            let settings = SummarySettings {
                control_plane_url: url,
                credentials: Credentials::new(username, token),
                output_dir,
                timeout: timeout_secs.map(Duration::from_secs),
            };
            commands::summary::analyze(&settings, cli.preview).await?;
        }
        Commands::Compare { config, output } => {
            commands::compare::compare(config, output, cli.preview).await?;
        }
    }

    Ok(())
}
