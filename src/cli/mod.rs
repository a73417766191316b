//! CLI interface for the forecast relay

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hourly weather forecasts relayed through NATS JetStream
#[derive(Parser)]
#[command(name = "forecast-relay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch forecasts for all configured cities and publish them
    Publish {
        /// Configuration file path
        #[arg(short, long, default_value = "forecast-relay.yaml")]
        config: PathBuf,

        /// Repeat every N seconds until interrupted
        #[arg(short, long)]
        interval_secs: Option<u64>,
    },

    /// Print the latest forecast per city as JSON
    Read {
        /// Configuration file path
        #[arg(short, long, default_value = "forecast-relay.yaml")]
        config: PathBuf,

        /// City key to read (repeatable; defaults to the configured reader cities)
        #[arg(long = "city")]
        cities: Vec<String>,
    },

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "forecast-relay.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}
