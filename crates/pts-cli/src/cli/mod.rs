//! CLI for pts.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pts_core::api::Service;
use pts_core::config;

use commands::{run_config, run_fetch};

/// Top-level CLI for pts.
#[derive(Debug, Parser)]
#[command(name = "pts")]
#[command(about = "pts: Plex/Trakt API access with transient-error retries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// GET a Plex or Trakt URL, retrying transient failures.
    Fetch {
        /// Which API the URL belongs to: plex or trakt.
        service: Service,
        /// Full request URL.
        url: String,
        /// Override the configured retry budget (0 = single attempt).
        #[arg(long, value_name = "N")]
        retries: Option<u32>,
        /// Extra request header as "Name: value" (repeatable).
        #[arg(long = "header", short = 'H', value_name = "HEADER")]
        headers: Vec<String>,
    },

    /// Show the config file location and effective retry settings.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                service,
                url,
                retries,
                headers,
            } => run_fetch(&cfg, service, &url, retries, &headers)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
