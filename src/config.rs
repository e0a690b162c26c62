use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{MonitorError, Result};

/// Main configuration for the risk monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listing produced by the kernel risk module
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,
    /// Append-only file receiving every flagged line (its directory must exist)
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// Substring that flags a listing line
    #[serde(default = "default_risk_marker")]
    pub risk_marker: String,
    /// Wait between two reads of the listing, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_source_path() -> PathBuf {
    PathBuf::from("/proc/mod2")
}

fn default_log_path() -> PathBuf {
    PathBuf::from("results/ProcessosAltoRisco.txt")
}

fn default_risk_marker() -> String {
    "Medio".to_string()
}

fn default_poll_interval_ms() -> u64 {
    5_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            log_path: default_log_path(),
            risk_marker: default_risk_marker(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| MonitorError::ConfigError(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| MonitorError::ConfigError(e.to_string()))
    }

    /// Merge CLI arguments into this configuration
    /// CLI arguments take precedence over config file values
    pub fn merge_cli_args(
        &mut self,
        source_path: Option<PathBuf>,
        log_path: Option<PathBuf>,
        risk_marker: Option<String>,
        poll_interval_ms: Option<u64>,
    ) {
        if let Some(sp) = source_path {
            self.source_path = sp;
        }
        if let Some(lp) = log_path {
            self.log_path = lp;
        }
        if let Some(rm) = risk_marker {
            self.risk_marker = rm;
        }
        if let Some(ms) = poll_interval_ms {
            self.poll_interval_ms = ms;
        }
    }

    /// Reject values the loop cannot work with
    pub fn validate(&self) -> Result<()> {
        // An empty marker is a substring of every line.
        if self.risk_marker.is_empty() {
            return Err(MonitorError::ConfigError(
                "risk marker must not be empty".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(MonitorError::ConfigError(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_kernel_module_setup() {
        let config = Config::default();
        assert_eq!(config.source_path, PathBuf::from("/proc/mod2"));
        assert_eq!(config.risk_marker, "Medio");
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            risk_marker = "Alto"
            poll_interval_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.risk_marker, "Alto");
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.source_path, PathBuf::from("/proc/mod2"));
        assert_eq!(
            config.log_path,
            PathBuf::from("results/ProcessosAltoRisco.txt")
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source_path = \"/tmp/listing\"").unwrap();
        writeln!(file, "log_path = \"/tmp/flagged.txt\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.source_path, PathBuf::from("/tmp/listing"));
        assert_eq!(config.log_path, PathBuf::from("/tmp/flagged.txt"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(MonitorError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = Config::from_toml_str("poll_interval_ms = \"soon\"");
        assert!(matches!(result, Err(MonitorError::ConfigError(_))));
    }

    #[test]
    fn test_cli_args_take_precedence() {
        let mut config = Config {
            risk_marker: "Alto".to_string(),
            ..Config::default()
        };
        config.merge_cli_args(
            Some(PathBuf::from("/tmp/src")),
            None,
            Some("Baixo".to_string()),
            Some(100),
        );
        assert_eq!(config.source_path, PathBuf::from("/tmp/src"));
        assert_eq!(
            config.log_path,
            PathBuf::from("results/ProcessosAltoRisco.txt")
        );
        assert_eq!(config.risk_marker, "Baixo");
        assert_eq!(config.poll_interval_ms, 100);
    }

    #[test]
    fn test_validate_rejects_empty_marker_and_zero_interval() {
        let empty_marker = Config {
            risk_marker: String::new(),
            ..Config::default()
        };
        assert!(empty_marker.validate().is_err());

        let zero_interval = Config {
            poll_interval_ms: 0,
            ..Config::default()
        };
        assert!(zero_interval.validate().is_err());
    }
}
