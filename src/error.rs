use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the risk monitor
#[derive(Error, Debug)]
pub enum MonitorError {
    /// The process listing could not be opened or read
    #[error("failed to read {}: {source}", .path.display())]
    SourceReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A flagged line could not be appended to the risk log
    #[error("failed to append to risk log {}: {source}", .path.display())]
    LogWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error reading, parsing or validating configuration
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The interrupt handler could not be installed
    #[error("failed to install interrupt handler: {0}")]
    SignalError(#[source] std::io::Error),
}

impl MonitorError {
    /// Whether the loop should keep polling after this error
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            MonitorError::SourceReadError { .. } | MonitorError::LogWriteError { .. }
        )
    }
}

/// Result type alias for monitor operations
pub type Result<T> = std::result::Result<T, MonitorError>;
