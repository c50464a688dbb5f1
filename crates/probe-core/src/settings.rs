//! Run settings
//!
//! Stored as a plain camelCase JSON file. A missing file means defaults;
//! command-line flags are applied on top by the binary.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{ProbeError, Result};

/// Transcript log file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogFileSettings {
    /// Whether the transcript is mirrored to a file
    pub enabled: bool,
    /// Directory for the log file (defaults to the working directory)
    pub directory: Option<PathBuf>,
    /// File name prefix, followed by `-<dd-MM-yyyy>.log`
    pub prefix: String,
}

impl Default for LogFileSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: None,
            prefix: "requests".to_string(),
        }
    }
}

impl LogFileSettings {
    /// Path of the log file for the given day
    pub fn path_for<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> PathBuf
    where
        Tz::Offset: std::fmt::Display,
    {
        let name = format!("{}-{}.log", self.prefix, now.format("%d-%m-%Y"));
        match &self.directory {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

/// Settings for one probe run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeSettings {
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Pause between consecutive requests in milliseconds (0 = none)
    pub request_delay_ms: u64,
    /// Bound on nested object expansion during synthesis
    pub max_schema_depth: usize,
    /// Transcript log file
    pub log_file: LogFileSettings,
    /// Login payload for the primary environment, skips interactive entry
    pub login_body: Option<Map<String, Value>>,
    /// Login payload for the comparison environment
    pub compare_login_body: Option<Map<String, Value>>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            request_delay_ms: 0,
            max_schema_depth: fake_data::DEFAULT_MAX_DEPTH,
            log_file: LogFileSettings::default(),
            login_body: None,
            compare_login_body: None,
        }
    }
}

impl ProbeSettings {
    /// Load settings from file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)
            .map_err(|e| ProbeError::Settings(format!("{}: {}", path.display(), e)))?;
        settings.validate()?;

        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Reject values that would make the run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(ProbeError::Settings("requestTimeoutSecs must be positive".to_string()));
        }
        if self.max_schema_depth == 0 {
            return Err(ProbeError::Settings("maxSchemaDepth must be positive".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ProbeSettings::load(&dir.path().join("probe.json")).unwrap();

        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.request_delay(), Duration::ZERO);
        assert!(settings.log_file.enabled);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.json");
        std::fs::write(
            &path,
            r#"{"requestDelayMs": 250, "loginBody": {"username": "admin"}}"#,
        )
        .unwrap();

        let settings = ProbeSettings::load(&path).unwrap();
        assert_eq!(settings.request_delay(), Duration::from_millis(250));
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.login_body.unwrap()["username"], "admin");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.json");
        std::fs::write(&path, r#"{"requestTimeoutSecs": 0}"#).unwrap();

        assert!(matches!(ProbeSettings::load(&path), Err(ProbeError::Settings(_))));
    }

    #[test]
    fn test_log_file_name() {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        let log = LogFileSettings::default();
        assert_eq!(log.path_for(&now), PathBuf::from("requests-07-03-2024.log"));
    }
}
