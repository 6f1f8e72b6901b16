//! Log setup for the binaries. Logs go to stderr so the status line on
//! stdout stays machine-readable.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Failed to initialize logging: {0}")]
    Initialization(String),
}

/// Level for a `-v` count: warn, info, debug, then trace.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init_logging(verbosity: u8) -> Result<(), LogError> {
    let filter = EnvFilter::new(format!("debug_strip={}", level_for(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| LogError::Initialization(e.to_string()))
}
