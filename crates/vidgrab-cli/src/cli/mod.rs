//! CLI for the vidgrab media detection engine.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::Path;
use vidgrab_core::config;

use commands::{run_classify, run_completions, run_provider, run_scan_har, run_variants, ScanHarArgs};

/// Top-level CLI for vidgrab.
#[derive(Debug, Parser)]
#[command(name = "vidgrab")]
#[command(about = "vidgrab: detect and classify media in observed web traffic", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Classify one URL, optionally with response headers.
    Classify {
        /// URL as observed on the wire.
        url: String,
        /// Response header as "Name: value" (repeatable).
        #[arg(short = 'H', long = "header", value_name = "HEADER")]
        headers: Vec<String>,
    },

    /// Show the provider of a URL and its canonical form.
    Provider {
        /// URL to resolve.
        url: String,
    },

    /// Replay a HAR capture through the engine and print the detected media.
    ScanHar {
        /// Path to the HAR file.
        path: String,
        /// Print the catalog as JSON.
        #[arg(long)]
        json: bool,
        /// Only show one format family (hls, dash, mp4, webm, blob, mse, embed, ...).
        #[arg(long = "type", value_name = "FAMILY")]
        family: Option<String>,
        /// Only show one quality (4k, 1080p, 720p, ...).
        #[arg(long, value_name = "QUALITY")]
        quality: Option<String>,
    },

    /// Fetch an HLS master playlist and list its variants.
    Variants {
        /// Master playlist URL.
        url: String,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Classify { url, headers } => run_classify(&cfg, &url, &headers)?,
            CliCommand::Provider { url } => run_provider(&url),
            CliCommand::ScanHar {
                path,
                json,
                family,
                quality,
            } => {
                let args = ScanHarArgs {
                    json,
                    family,
                    quality,
                };
                run_scan_har(&cfg, Path::new(&path), &args)?;
            }
            CliCommand::Variants { url } => run_variants(&cfg, &url).await?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
