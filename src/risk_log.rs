//! Append-only log of flagged listing lines.

use std::path::PathBuf;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::{MonitorError, Result};

/// Writer for the persistent risk log
///
/// No handle is kept between appends: every call opens the file, writes the
/// line, flushes and closes it again, so an interrupt never finds a
/// half-written buffer.
#[derive(Debug, Clone)]
pub struct RiskLog {
    path: PathBuf,
}

impl RiskLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append `line` verbatim, creating the file if absent
    ///
    /// The parent directory is never created.
    pub async fn append(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.write_error(e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.write_error(e))?;
        file.flush().await.map_err(|e| self.write_error(e))?;
        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> MonitorError {
        MonitorError::LogWriteError {
            path: self.path.clone(),
            source,
        }
    }
}
