//! Error types.
//!
//! The simulation itself never fails: bad ticks degrade to "do nothing". The
//! only reportable failures are loading tuning/script files and observers
//! rejecting an event.

use thiserror::Error;

/// Failure loading a RON file (tuning config or input script).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Returned by an event listener that could not handle an event. The bus logs
/// it and keeps dispatching to the remaining listeners.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("{listener} failed: {message}")]
    Failed {
        listener: &'static str,
        message: String,
    },
}
