//! Tracing setup for the binary
//!
//! Batch mode logs to stderr. Terminal mode owns the screen, so it only
//! logs when a file is given.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init(default_filter: &str, target: LogTarget<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer)
                .try_init()?;
        }
        LogTarget::File(path) => {
            let file = File::create(path)
                .map_err(|e| format!("cannot open log file {}: {}", path.display(), e))?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer)
                .try_init()?;
        }
    }

    tracing::debug!("logging initialised with filter {}", default_filter);
    Ok(())
}
