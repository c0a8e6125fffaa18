//! Console host for the Blackfile command dispatcher.
//!
//! Reads one command per line from stdin and writes one JSON response
//! envelope per line to stdout. Logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`BLACKFILE_CONFIG` or `blackfile-config.yaml`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the campaign and register the configured roster
//! 4. Run the command loop until end of input or `:quit`

mod error;
mod repl;

use std::io;

use anyhow::Context;
use blackfile_core::config::LoggingConfig;
use blackfile_core::{BlackfileConfig, Campaign, Dispatcher};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ConsoleError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, the roster cannot
/// be registered, or stdin/stdout fail.
fn main() -> anyhow::Result<()> {
    // 1. Load configuration before logging so its level applies.
    let (config, loaded_from) = load_config().context("loading configuration")?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging)?;
    match &loaded_from {
        Some(path) => info!(path = %path, "configuration loaded"),
        None => info!("config file not found, using defaults"),
    }

    // 3. Build the campaign.
    let campaign = Campaign::new(config)
        .map_err(ConsoleError::from)
        .context("registering configured roster")?;
    info!(
        campaign = %campaign.config().campaign.name,
        agents = campaign.store().agent_count(),
        "blackfile-console ready"
    );
    let mut dispatcher = Dispatcher::new(campaign);

    // 4. Serve commands.
    let stdin = io::stdin();
    let stdout = io::stdout();
    let dispatched = repl::run(&mut dispatcher, stdin.lock(), stdout.lock())?;
    info!(dispatched, audited = dispatcher.audit_log().len(), "blackfile-console stopped");
    Ok(())
}

/// Load configuration from the configured path, falling back to defaults
/// when no file exists.
fn load_config() -> Result<(BlackfileConfig, Option<String>), ConsoleError> {
    let path = BlackfileConfig::default_path();
    if path.exists() {
        let config = BlackfileConfig::from_file(&path)?;
        Ok((config, Some(path.display().to_string())))
    } else {
        Ok((BlackfileConfig::default(), None))
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(logging: &LoggingConfig) -> Result<(), ConsoleError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| ConsoleError::LogFilter {
            filter: logging.level.clone(),
            reason: e.to_string(),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
