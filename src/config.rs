//! Runtime configuration and logging setup for the `courtchess` binary.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::errors::ConfigError;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_LOG_FILTER: &str = "courtchess=info";

/// Settings for a sync session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Delay before a local move is written to the fragment.
    pub debounce: Duration,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

/// Play a 3x3 court chess game and share it as a URL fragment.
#[derive(Debug, Clone, Parser)]
#[command(name = "courtchess", version, about)]
pub struct CliArgs {
    /// Milliseconds to wait before writing a local move.
    #[arg(long, default_value_t = 300)]
    pub debounce_ms: u64,

    /// Log filter, overridden by RUST_LOG.
    #[arg(long = "log", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,

    /// Name of the light player for `new`.
    #[arg(long, default_value = "Light")]
    pub light: String,

    /// Name of the dark player for `new`.
    #[arg(long, default_value = "Dark")]
    pub dark: String,

    /// Name attached to every payload this side writes.
    #[arg(long)]
    pub name: Option<String>,

    /// Fragment to open at startup.
    #[arg(long)]
    pub fragment: Option<String>,
}

impl CliArgs {
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            log_filter: self.log_filter.clone(),
        }
    }
}

impl SyncConfig {
    /// Parse `log_filter`, ignoring `RUST_LOG`.
    pub fn log_env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_filter).map_err(|err| ConfigError::LogFilter {
            filter: self.log_filter.clone(),
            reason: err.to_string(),
        })
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries command output.
pub fn init_tracing(config: &SyncConfig) -> Result<(), ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => config.log_env_filter()?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ConfigError::Subscriber(err.to_string()))
}
