//! Clinic session configuration.

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::triage::WalkInDesk;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Longest reminder look-ahead a config may ask for (one leap year).
pub const MAX_REMINDER_WINDOW_HOURS: u32 = 366 * 24;

/// Per-session settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClinicConfig {
    /// Clinic name stamped onto walk-ins
    pub clinic_name: String,
    /// Doctor stamped onto walk-ins
    pub triage_doctor: Option<String>,
    /// Reason stamped onto walk-ins
    pub walk_in_reason: String,
    /// Look-ahead used by `due_reminders`
    pub reminder_window_hours: u32,
    /// Start each session with an unread welcome entry
    pub welcome_notification: bool,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            clinic_name: "Happy Paws Hospital".into(),
            triage_doctor: Some("Triage Vet".into()),
            walk_in_reason: "Walk-in Patient".into(),
            reminder_window_hours: 72,
            welcome_notification: true,
        }
    }
}

impl ClinicConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: ClinicConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.clinic_name.trim().is_empty() {
            return Err(ConfigError::Invalid("clinic_name must not be empty".into()));
        }
        if self.reminder_window_hours == 0 {
            return Err(ConfigError::Invalid(
                "reminder_window_hours must be positive".into(),
            ));
        }
        if self.reminder_window_hours > MAX_REMINDER_WINDOW_HOURS {
            return Err(ConfigError::Invalid(format!(
                "reminder_window_hours must be at most {}",
                MAX_REMINDER_WINDOW_HOURS
            )));
        }
        Ok(())
    }

    pub fn reminder_window(&self) -> Duration {
        Duration::hours(i64::from(self.reminder_window_hours))
    }

    pub fn walk_in_desk(&self) -> WalkInDesk {
        WalkInDesk {
            clinic_name: self.clinic_name.clone(),
            doctor_name: self.triage_doctor.clone(),
            reason: self.walk_in_reason.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = ClinicConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ClinicConfig::default());
        assert_eq!(config.reminder_window(), Duration::hours(72));
    }

    #[test]
    fn test_partial_override() {
        let config = ClinicConfig::from_json_str(
            r#"{"clinic_name": "Northside Vets", "welcome_notification": false}"#,
        )
        .unwrap();
        assert_eq!(config.clinic_name, "Northside Vets");
        assert!(!config.welcome_notification);
        assert_eq!(config.walk_in_reason, "Walk-in Patient");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ClinicConfig::from_json_str(r#"{"clinic_name": " "}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ClinicConfig::from_json_str(r#"{"reminder_window_hours": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ClinicConfig::from_json_str(r#"{"reminder_window_hours": 4294967295}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(ClinicConfig::from_json_str(r#"{"reminder_window_hours": 8784}"#).is_ok());
        assert!(matches!(
            ClinicConfig::from_json_str("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"triage_doctor": null, "reminder_window_hours": 24}}"#).unwrap();

        let config = ClinicConfig::load(file.path()).unwrap();
        assert_eq!(config.triage_doctor, None);
        assert_eq!(config.walk_in_desk().doctor_name, None);
        assert_eq!(config.reminder_window(), Duration::hours(24));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ClinicConfig::load("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
