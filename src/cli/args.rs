//! CLI argument definitions using clap
//!
//! Commands:
//! - restash init --config <path>
//! - restash start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// restash - generic CRUD resources over a pluggable key-value store
#[derive(Parser, Debug)]
#[command(name = "restash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file and create the data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./restash.json")]
        config: PathBuf,
    },

    /// Start the restash server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./restash.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_with_default_config_path() {
        let cli = Cli::try_parse_from(["restash", "start"]).unwrap();
        match cli.command {
            Command::Start { config } => {
                assert_eq!(config, PathBuf::from("./restash.json"));
            }
            _ => panic!("expected start command"),
        }
    }

    #[test]
    fn test_init_with_custom_config_path() {
        let cli = Cli::try_parse_from(["restash", "init", "--config", "/tmp/r.json"]).unwrap();
        match cli.command {
            Command::Init { config } => {
                assert_eq!(config, PathBuf::from("/tmp/r.json"));
            }
            _ => panic!("expected init command"),
        }
    }
}
