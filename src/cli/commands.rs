//! CLI command implementations
//!
//! `init` writes a default configuration and creates the data
//! directory; `start` loads the configuration, initializes logging,
//! and serves until the process exits.

use std::fs;
use std::path::Path;

use crate::config::{ServerConfig, StoreBackend};
use crate::server::AppServer;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
    }
}

/// Write a default configuration file and create the data directory
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path));
    }

    let config = ServerConfig::default();
    config.write(config_path)?;

    if config.store == StoreBackend::Disk {
        fs::create_dir_all(&config.data_dir)
            .map_err(|e| CliError::config_error(format!("failed to create data dir: {e}")))?;
    }

    println!("wrote {}", config_path.display());
    Ok(())
}

/// Load configuration and serve
pub fn start(config_path: &Path) -> CliResult<()> {
    let config = ServerConfig::load(config_path)?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let server = AppServer::new(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("failed to create tokio runtime: {e}")))?;

    rt.block_on(server.start())
        .map_err(|e| CliError::boot_failed(e.to_string()))
}
