//! Medication, vaccine and checkup reminder models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UnknownLabel;

/// What a reminder is for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    Medicine,
    Vaccine,
    Checkup,
}

impl ReminderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::Medicine => "Medicine",
            ReminderKind::Vaccine => "Vaccine",
            ReminderKind::Checkup => "Checkup",
        }
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderKind {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "medicine" => Ok(ReminderKind::Medicine),
            "vaccine" => Ok(ReminderKind::Vaccine),
            "checkup" => Ok(ReminderKind::Checkup),
            _ => Err(UnknownLabel::new("reminder kind", s)),
        }
    }
}

/// A due-date reminder for one pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Unique reminder id
    pub id: String,
    /// Pet this reminder belongs to
    pub pet_id: String,
    /// Display name (e.g., "Heartgard Plus")
    pub name: String,
    /// Medicine, vaccine or checkup
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    /// Dosage as shown to the owner; never parsed
    pub dosage: String,
    /// Frequency as shown to the owner (e.g., "Monthly"); never parsed
    pub frequency: String,
    /// When the next dose or visit is due
    pub due_at: DateTime<Utc>,
    /// Set once the owner confirms; never cleared
    pub confirmed: bool,
}

impl Reminder {
    /// Create an unconfirmed reminder.
    pub fn new(
        id: impl Into<String>,
        pet_id: impl Into<String>,
        name: impl Into<String>,
        kind: ReminderKind,
        due_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            pet_id: pet_id.into(),
            name: name.into(),
            kind,
            dosage: String::new(),
            frequency: String::new(),
            due_at,
            confirmed: false,
        }
    }

    /// Attach the display-only dosage and frequency.
    pub fn with_schedule(mut self, dosage: impl Into<String>, frequency: impl Into<String>) -> Self {
        self.dosage = dosage.into();
        self.frequency = frequency.into();
        self
    }

    /// Past due and still unconfirmed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_at < now && !self.confirmed
    }
}
