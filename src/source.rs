use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{MonitorError, Result};

/// Trait for listing sources (the kernel pseudo-file or a test double)
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Human-readable name used in console messages
    fn describe(&self) -> String;

    /// Read the complete current listing
    async fn read_listing(&self) -> Result<String>;
}

/// Production implementation of ListingSource that reads a file on every call
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ListingSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_listing(&self) -> Result<String> {
        // Opened fresh each time so the kernel module regenerates the table.
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| MonitorError::SourceReadError {
                path: self.path.clone(),
                source,
            })?;
        debug!("Read {} bytes from {}", text.len(), self.path.display());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mod2");
        std::fs::write(&path, "h1\nh2\n101 Medio cpu=5\n").unwrap();

        let source = FileSource::new(&path);
        let text = source.read_listing().await.unwrap();
        assert_eq!(text, "h1\nh2\n101 Medio cpu=5\n");
    }

    #[tokio::test]
    async fn test_rereads_on_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mod2");
        std::fs::write(&path, "first").unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.read_listing().await.unwrap(), "first");

        std::fs::write(&path, "second").unwrap();
        assert_eq!(source.read_listing().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_missing_file_is_source_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("absent"));

        let err = source.read_listing().await.unwrap_err();
        assert!(err.is_transient());
        match err {
            MonitorError::SourceReadError { path, source } => {
                assert_eq!(path, dir.path().join("absent"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected SourceReadError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_source_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mod2");
        std::fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();

        let result = FileSource::new(&path).read_listing().await;
        assert!(matches!(result, Err(MonitorError::SourceReadError { .. })));
    }
}
