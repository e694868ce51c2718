#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Simple logging utilities for the generator.
//!
//! Library crates only emit `tracing` events; binaries call [`init`] once to
//! install a subscriber.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Errors that can occur while installing the log subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file could not be opened
    #[error("Failed to open log file: {0}")]
    Io(#[from] std::io::Error),
    /// The level string is not a valid filter directive
    #[error("Invalid log level '{level}': {source}")]
    Filter {
        /// Level string as supplied
        level: String,
        /// Parse failure reported by the filter
        source: tracing_subscriber::filter::ParseError,
    },
    /// A global subscriber was already installed
    #[error("Failed to install log subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Emits a trace event tagged with the module it came from.
pub fn trace(module: &str, msg: &str) {
    tracing::trace!(target: "stackwrap", module = module, "{}", msg);
}

/// Build the filter for `level`; `RUST_LOG` wins when it is set and valid.
pub fn filter_for(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|source| LoggingError::Filter { level: level.to_string(), source })
}

/// Install the global subscriber.
///
/// Events go to `file` when given (appending, no ANSI colours), otherwise to stderr.
pub fn init(level: &str, file: Option<&Path>) -> Result<(), LoggingError> {
    let filter = filter_for(level)?;

    let file_layer = match file {
        Some(path) => {
            let handle = OpenOptions::new().create(true).append(true).open(path)?;
            Some(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(handle)))
        }
        None => None,
    };
    let stderr_layer = if file_layer.is_none() {
        Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    } else {
        None
    };

    tracing_subscriber::registry().with(filter).with(file_layer).with(stderr_layer).try_init()?;
    Ok(())
}
