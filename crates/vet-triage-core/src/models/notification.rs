//! Notification feed entries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UnknownLabel;

/// Presentation class of a notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationClass {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationClass::Info => "info",
            NotificationClass::Success => "success",
            NotificationClass::Warning => "warning",
            NotificationClass::Error => "error",
        }
    }
}

impl fmt::Display for NotificationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationClass {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(NotificationClass::Info),
            "success" => Ok(NotificationClass::Success),
            "warning" => Ok(NotificationClass::Warning),
            "error" => Ok(NotificationClass::Error),
            _ => Err(UnknownLabel::new("notification class", s)),
        }
    }
}

/// One entry in the notification feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub class: NotificationClass,
    pub timestamp: DateTime<Utc>,
    /// Only ever flips from false to true
    pub read: bool,
    pub action_label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_labels() {
        assert_eq!("Warning".parse::<NotificationClass>(), Ok(NotificationClass::Warning));
        assert_eq!(NotificationClass::default(), NotificationClass::Info);
        assert!("alert".parse::<NotificationClass>().is_err());
    }

    #[test]
    fn test_json_shape() {
        let notification = Notification {
            id: "n1".into(),
            title: "Booking Confirmed".into(),
            message: "Appointment confirmed.".into(),
            class: NotificationClass::Success,
            timestamp: Utc::now(),
            read: false,
            action_label: Some("View".into()),
        };
        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(value["type"], "success");
        assert_eq!(value["actionLabel"], "View");
    }
}
