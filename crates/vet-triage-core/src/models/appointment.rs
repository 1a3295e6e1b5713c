//! Appointment models for the triage queue.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UnknownLabel;

/// Caller-supplied urgency label. The core never classifies severity itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    Urgent,
    Routine,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Urgent, Severity::Routine];

    /// Ordinal weight; higher is seen first.
    pub fn weight(self) -> u8 {
        match self {
            Severity::Critical => 3,
            Severity::Urgent => 2,
            Severity::Routine => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Urgent => "URGENT",
            Severity::Routine => "ROUTINE",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLabel::new("severity", s))
    }
}

/// Kind of visit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppointmentType {
    Vaccine,
    Checkup,
    Surgery,
    Emergency,
    Followup,
    Sick,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 6] = [
        AppointmentType::Vaccine,
        AppointmentType::Checkup,
        AppointmentType::Surgery,
        AppointmentType::Emergency,
        AppointmentType::Followup,
        AppointmentType::Sick,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Vaccine => "VACCINE",
            AppointmentType::Checkup => "CHECKUP",
            AppointmentType::Surgery => "SURGERY",
            AppointmentType::Emergency => "EMERGENCY",
            AppointmentType::Followup => "FOLLOWUP",
            AppointmentType::Sick => "SICK",
        }
    }

    /// Visit type given to a walk-in of the given severity.
    pub fn for_walk_in(severity: Severity) -> Self {
        match severity {
            Severity::Critical => AppointmentType::Emergency,
            Severity::Urgent | Severity::Routine => AppointmentType::Checkup,
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLabel::new("appointment type", s))
    }
}

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLabel::new("appointment status", s))
    }
}

/// Caller input for booking; id and status are assigned on booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    pub pet_id: String,
    pub clinic_name: String,
    pub doctor_name: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub severity: Severity,
    #[serde(default)]
    pub reason: String,
    pub symptoms: Option<String>,
    pub prep_instructions: Option<Vec<String>>,
}

impl AppointmentDraft {
    /// Create a draft with the required fields.
    pub fn new(
        pet_id: impl Into<String>,
        clinic_name: impl Into<String>,
        date: DateTime<Utc>,
        appointment_type: AppointmentType,
        severity: Severity,
    ) -> Self {
        Self {
            pet_id: pet_id.into(),
            clinic_name: clinic_name.into(),
            doctor_name: None,
            date,
            appointment_type,
            severity,
            reason: String::new(),
            symptoms: None,
            prep_instructions: None,
        }
    }
}

/// A booked or walk-in appointment in the triage queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Unique appointment id
    pub id: String,
    /// Pet being seen
    pub pet_id: String,
    /// Clinic or hospital name
    pub clinic_name: String,
    /// Assigned doctor, if any
    pub doctor_name: Option<String>,
    /// Scheduled time (arrival time for walk-ins)
    pub date: DateTime<Utc>,
    /// Kind of visit
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    /// Triage severity
    pub severity: Severity,
    /// Reason for visit
    pub reason: String,
    /// Owner-reported symptoms
    pub symptoms: Option<String>,
    /// Lifecycle status
    pub status: AppointmentStatus,
    /// Things to bring or do before the visit
    pub prep_instructions: Option<Vec<String>>,
    /// Registered at the desk rather than booked
    #[serde(default)]
    pub is_walk_in: bool,
}

impl Appointment {
    /// Confirm a draft under the given id.
    pub fn from_draft(id: impl Into<String>, draft: AppointmentDraft) -> Self {
        Self {
            id: id.into(),
            pet_id: draft.pet_id,
            clinic_name: draft.clinic_name,
            doctor_name: draft.doctor_name,
            date: draft.date,
            appointment_type: draft.appointment_type,
            severity: draft.severity,
            reason: draft.reason,
            symptoms: draft.symptoms,
            status: AppointmentStatus::Confirmed,
            prep_instructions: draft.prep_instructions,
            is_walk_in: false,
        }
    }
}
