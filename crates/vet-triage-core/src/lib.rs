//! Vet Triage Core Library
//!
//! Coordination core for a veterinary clinic: a severity-ordered triage queue,
//! medication / vaccine reminders, and the notification feed that records
//! every state change.
//!
//! # Architecture
//!
//! ```text
//!   Owner app / Vet desk / Walk-in registration
//!                      │
//!                      ▼
//!              ┌───────────────┐        Clock, IdGenerator
//!              │  Coordinator  │◄────── PetDirectory (memory | SQLite)
//!              └───────┬───────┘
//!          ┌───────────┼────────────┐
//!          ▼           ▼            ▼
//!     Reminder      Triage     Notification
//!     Tracker       Queue          Feed
//!  (confirm once) (severity ↓,  (newest first,
//!                  date ↑)       read once)
//! ```
//!
//! # Core Principle
//!
//! **A mutation and its notification are one unit.** If the mutation is
//! rejected nothing changes; if it succeeds the notification is in the feed
//! before the call returns.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Pet, Reminder, Appointment, Notification)
//! - [`reminders`]: Reminder tracker
//! - [`triage`]: Severity-ordered appointment queue
//! - [`feed`]: Notification feed
//! - [`coordinator`]: Session facade sequencing the three
//! - [`directory`]: Pet directory seam
//! - [`db`]: SQLite pet directory and reminder seed storage
//! - [`clock`]: Time and id sources
//! - [`config`]: Session configuration

pub mod clock;
pub mod config;
pub mod coordinator;
pub mod db;
pub mod directory;
pub mod feed;
pub mod models;
pub mod reminders;
pub mod triage;

// Re-export commonly used types
pub use clock::{Clock, IdGenerator, ManualClock, SequentialIds, SystemClock, UuidIds};
pub use config::ClinicConfig;
pub use coordinator::{Coordinator, CoordinatorError, CoordinatorResult};
pub use db::Database;
pub use directory::{InMemoryPets, PetDirectory, PetRegistry};
pub use models::{
    Appointment, AppointmentDraft, AppointmentStatus, AppointmentType, Notification,
    NotificationClass, Pet, PetProfile, Reminder, ReminderKind, Severity,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No pet on the roster to attach a walk-in to")]
    EmptyRoster,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<CoordinatorError> for ClinicError {
    fn from(e: CoordinatorError) -> Self {
        match e {
            CoordinatorError::NotFound(what) => ClinicError::NotFound(what),
            CoordinatorError::EmptyRoster => ClinicError::EmptyRoster,
            CoordinatorError::InvalidInput(msg) => ClinicError::InvalidInput(msg),
            CoordinatorError::Storage(e) => ClinicError::DatabaseError(e.to_string()),
        }
    }
}

impl From<db::DbError> for ClinicError {
    fn from(e: db::DbError) -> Self {
        ClinicError::DatabaseError(e.to_string())
    }
}

impl From<config::ConfigError> for ClinicError {
    fn from(e: config::ConfigError) -> Self {
        ClinicError::InvalidInput(e.to_string())
    }
}

impl From<models::UnknownLabel> for ClinicError {
    fn from(e: models::UnknownLabel) -> Self {
        ClinicError::InvalidInput(e.to_string())
    }
}

impl From<chrono::ParseError> for ClinicError {
    fn from(e: chrono::ParseError) -> Self {
        ClinicError::InvalidInput(format!("Invalid timestamp: {}", e))
    }
}

impl From<serde_json::Error> for ClinicError {
    fn from(e: serde_json::Error) -> Self {
        ClinicError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

fn parse_config(config_json: Option<String>) -> Result<ClinicConfig, ClinicError> {
    match config_json {
        Some(json) => Ok(ClinicConfig::from_json_str(&json)?),
        None => Ok(ClinicConfig::default()),
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ClinicError> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a clinic session backed by a SQLite pet directory at `path`.
///
/// Reminders stored in the database seed the session's reminder tracker.
#[uniffi::export]
pub fn open_clinic(
    path: String,
    config_json: Option<String>,
) -> Result<Arc<ClinicCore>, ClinicError> {
    let config = parse_config(config_json)?;
    let db = Database::open(&path)?;
    let seed = db.list_reminders()?;

    let mut coordinator = Coordinator::new(config, db);
    coordinator.import_reminders(seed)?;
    Ok(ClinicCore::wrap(coordinator))
}

/// Open a clinic session with an in-memory pet directory.
#[uniffi::export]
pub fn open_clinic_in_memory(config_json: Option<String>) -> Result<Arc<ClinicCore>, ClinicError> {
    let config = parse_config(config_json)?;
    Ok(ClinicCore::wrap(Coordinator::new(config, InMemoryPets::new())))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session handle for FFI. Concurrent callers are serialized on
/// one lock, so a reader never sees a mutation without its notification.
#[derive(uniffi::Object)]
pub struct ClinicCore {
    coordinator: Arc<Mutex<Coordinator>>,
}

impl ClinicCore {
    /// Wrap an existing coordinator (e.g., one built with a custom clock).
    pub fn wrap(coordinator: Coordinator) -> Arc<Self> {
        Arc::new(Self {
            coordinator: Arc::new(Mutex::new(coordinator)),
        })
    }
}

#[uniffi::export]
impl ClinicCore {
    // =========================================================================
    // Pet Operations
    // =========================================================================

    /// Register a pet.
    pub fn add_pet(&self, profile: FfiPetProfile) -> Result<FfiPet, ClinicError> {
        let mut coordinator = self.coordinator.lock()?;
        let pet = coordinator.add_pet(profile.into())?;
        Ok(pet.into())
    }

    /// Get a pet by id.
    pub fn get_pet(&self, id: String) -> Result<FfiPet, ClinicError> {
        let coordinator = self.coordinator.lock()?;
        Ok(coordinator.pet(&id)?.into())
    }

    /// List pets in registration order.
    pub fn list_pets(&self) -> Result<Vec<FfiPet>, ClinicError> {
        let coordinator = self.coordinator.lock()?;
        let pets = coordinator.pets()?;
        Ok(pets.into_iter().map(|p| p.into()).collect())
    }

    /// Add a clinical note to a pet's history.
    pub fn add_history_note(&self, pet_id: String, note: String) -> Result<(), ClinicError> {
        let mut coordinator = self.coordinator.lock()?;
        coordinator.add_history_note(&pet_id, &note)?;
        Ok(())
    }

    // =========================================================================
    // Reminder Operations
    // =========================================================================

    /// Seed reminders; all or nothing.
    pub fn import_reminders(&self, reminders: Vec<FfiReminder>) -> Result<u32, ClinicError> {
        let reminders = reminders
            .into_iter()
            .map(Reminder::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let mut coordinator = self.coordinator.lock()?;
        Ok(coordinator.import_reminders(reminders)? as u32)
    }

    /// Confirm a reminder. Safe to call more than once.
    pub fn confirm_medication(&self, id: String) -> Result<FfiReminder, ClinicError> {
        let mut coordinator = self.coordinator.lock()?;
        let reminder = coordinator.confirm_medication(&id)?;
        let overdue = coordinator.is_overdue(&reminder);
        Ok(FfiReminder::from_reminder(reminder, overdue))
    }

    /// Reminders due in the next `window_minutes`, earliest first.
    pub fn due_within(&self, window_minutes: u32) -> Result<Vec<FfiReminder>, ClinicError> {
        let coordinator = self.coordinator.lock()?;
        let due = coordinator.due_within(Duration::minutes(i64::from(window_minutes)));
        Ok(due
            .into_iter()
            .map(|r| {
                let overdue = coordinator.is_overdue(&r);
                FfiReminder::from_reminder(r, overdue)
            })
            .collect())
    }

    /// Reminders due within the configured `reminder_window_hours`.
    pub fn due_reminders(&self) -> Result<Vec<FfiReminder>, ClinicError> {
        let coordinator = self.coordinator.lock()?;
        let due = coordinator.due_reminders();
        Ok(due
            .into_iter()
            .map(|r| {
                let overdue = coordinator.is_overdue(&r);
                FfiReminder::from_reminder(r, overdue)
            })
            .collect())
    }

    /// Overdue reminders, most overdue first.
    pub fn overdue_reminders(&self) -> Result<Vec<FfiReminder>, ClinicError> {
        let coordinator = self.coordinator.lock()?;
        Ok(coordinator
            .overdue_reminders()
            .into_iter()
            .map(|r| FfiReminder::from_reminder(r, true))
            .collect())
    }

    // =========================================================================
    // Triage Operations
    // =========================================================================

    /// Book an appointment.
    pub fn book_appointment(
        &self,
        draft: FfiAppointmentDraft,
    ) -> Result<FfiAppointment, ClinicError> {
        let draft = AppointmentDraft::try_from(draft)?;
        let mut coordinator = self.coordinator.lock()?;
        Ok(coordinator.book_appointment(draft)?.into())
    }

    /// Register a walk-in on the first pet of the roster.
    pub fn register_walk_in(&self, severity: String) -> Result<FfiAppointment, ClinicError> {
        let severity: Severity = severity.parse()?;
        let mut coordinator = self.coordinator.lock()?;
        Ok(coordinator.register_walk_in(severity)?.into())
    }

    /// Register a walk-in for a specific pet.
    pub fn register_walk_in_for_pet(
        &self,
        pet_id: String,
        severity: String,
    ) -> Result<FfiAppointment, ClinicError> {
        let severity: Severity = severity.parse()?;
        let mut coordinator = self.coordinator.lock()?;
        Ok(coordinator.register_walk_in_for_pet(&pet_id, severity)?.into())
    }

    /// Record a status change (e.g., "COMPLETED", "CANCELLED").
    pub fn update_appointment_status(
        &self,
        id: String,
        status: String,
    ) -> Result<FfiAppointment, ClinicError> {
        let status: AppointmentStatus = status.parse()?;
        let mut coordinator = self.coordinator.lock()?;
        Ok(coordinator.update_appointment_status(&id, status)?.into())
    }

    /// The queue in triage order.
    pub fn queue_snapshot(&self) -> Result<Vec<FfiAppointment>, ClinicError> {
        let coordinator = self.coordinator.lock()?;
        Ok(coordinator
            .queue_snapshot()
            .into_iter()
            .map(|a| a.into())
            .collect())
    }

    pub fn count_by_severity(&self, severity: String) -> Result<u32, ClinicError> {
        let severity: Severity = severity.parse()?;
        let coordinator = self.coordinator.lock()?;
        Ok(coordinator.count_by_severity(severity) as u32)
    }

    pub fn count_by_status(&self, status: String) -> Result<u32, ClinicError> {
        let status: AppointmentStatus = status.parse()?;
        let coordinator = self.coordinator.lock()?;
        Ok(coordinator.count_by_status(status) as u32)
    }

    // =========================================================================
    // Notification Operations
    // =========================================================================

    /// Post a caller-requested notification.
    pub fn record_event(
        &self,
        title: String,
        message: String,
        notification_class: String,
        action_label: Option<String>,
    ) -> Result<FfiNotification, ClinicError> {
        let class: NotificationClass = notification_class.parse()?;
        let mut coordinator = self.coordinator.lock()?;
        Ok(coordinator
            .record_event(&title, &message, class, action_label)
            .into())
    }

    /// The feed, newest first.
    pub fn feed_snapshot(&self) -> Result<Vec<FfiNotification>, ClinicError> {
        let coordinator = self.coordinator.lock()?;
        Ok(coordinator
            .feed_snapshot()
            .into_iter()
            .map(|n| n.into())
            .collect())
    }

    pub fn mark_read(&self, id: String) -> Result<(), ClinicError> {
        let mut coordinator = self.coordinator.lock()?;
        coordinator.mark_read(&id)?;
        Ok(())
    }

    pub fn mark_all_read(&self) -> Result<(), ClinicError> {
        let mut coordinator = self.coordinator.lock()?;
        coordinator.mark_all_read();
        Ok(())
    }

    pub fn unread_count(&self) -> Result<u32, ClinicError> {
        let coordinator = self.coordinator.lock()?;
        Ok(coordinator.unread_count() as u32)
    }

    // =========================================================================
    // JSON Export
    // =========================================================================

    /// Export the queue as a JSON array.
    pub fn queue_json(&self) -> Result<String, ClinicError> {
        let coordinator = self.coordinator.lock()?;
        Ok(serde_json::to_string(&coordinator.queue_snapshot())?)
    }

    /// Export the feed as a JSON array, newest first.
    pub fn feed_json(&self) -> Result<String, ClinicError> {
        let coordinator = self.coordinator.lock()?;
        Ok(serde_json::to_string(&coordinator.feed_snapshot())?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe pet.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPet {
    pub id: String,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub weight_kg: Option<f64>,
    pub birthday: Option<String>,
    pub food: Option<String>,
    pub owner_name: Option<String>,
    pub allergies: Vec<String>,
    pub history: Vec<String>,
}

impl From<Pet> for FfiPet {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            name: pet.name,
            species: pet.species,
            breed: pet.breed,
            sex: pet.sex,
            weight_kg: pet.weight_kg,
            birthday: pet.birthday,
            food: pet.food,
            owner_name: pet.owner_name,
            allergies: pet.allergies,
            history: pet.history,
        }
    }
}

/// FFI-safe pet registration.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPetProfile {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub weight_kg: Option<f64>,
    pub birthday: Option<String>,
    pub food: Option<String>,
    pub owner_name: Option<String>,
    pub allergies: Vec<String>,
}

impl From<FfiPetProfile> for PetProfile {
    fn from(profile: FfiPetProfile) -> Self {
        PetProfile {
            name: profile.name,
            species: profile.species,
            breed: profile.breed,
            sex: profile.sex,
            weight_kg: profile.weight_kg,
            birthday: profile.birthday,
            food: profile.food,
            owner_name: profile.owner_name,
            allergies: profile.allergies,
        }
    }
}

/// FFI-safe reminder. Timestamps are RFC 3339.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReminder {
    pub id: String,
    pub pet_id: String,
    pub name: String,
    pub kind: String,
    pub dosage: String,
    pub frequency: String,
    pub due_at: String,
    pub confirmed: bool,
    /// Computed at read time; ignored on import
    pub overdue: bool,
}

impl FfiReminder {
    fn from_reminder(reminder: Reminder, overdue: bool) -> Self {
        Self {
            id: reminder.id,
            pet_id: reminder.pet_id,
            name: reminder.name,
            kind: reminder.kind.to_string(),
            dosage: reminder.dosage,
            frequency: reminder.frequency,
            due_at: reminder.due_at.to_rfc3339(),
            confirmed: reminder.confirmed,
            overdue,
        }
    }
}

impl TryFrom<FfiReminder> for Reminder {
    type Error = ClinicError;

    fn try_from(reminder: FfiReminder) -> Result<Self, Self::Error> {
        Ok(Reminder {
            kind: reminder.kind.parse()?,
            due_at: parse_timestamp(&reminder.due_at)?,
            id: reminder.id,
            pet_id: reminder.pet_id,
            name: reminder.name,
            dosage: reminder.dosage,
            frequency: reminder.frequency,
            confirmed: reminder.confirmed,
        })
    }
}

/// FFI-safe booking request.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentDraft {
    pub pet_id: String,
    pub clinic_name: String,
    pub doctor_name: Option<String>,
    /// RFC 3339
    pub date: String,
    pub appointment_type: String,
    pub severity: String,
    pub reason: String,
    pub symptoms: Option<String>,
    pub prep_instructions: Option<Vec<String>>,
}

impl TryFrom<FfiAppointmentDraft> for AppointmentDraft {
    type Error = ClinicError;

    fn try_from(draft: FfiAppointmentDraft) -> Result<Self, Self::Error> {
        Ok(AppointmentDraft {
            date: parse_timestamp(&draft.date)?,
            appointment_type: draft.appointment_type.parse()?,
            severity: draft.severity.parse()?,
            pet_id: draft.pet_id,
            clinic_name: draft.clinic_name,
            doctor_name: draft.doctor_name,
            reason: draft.reason,
            symptoms: draft.symptoms,
            prep_instructions: draft.prep_instructions,
        })
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub pet_id: String,
    pub clinic_name: String,
    pub doctor_name: Option<String>,
    pub date: String,
    pub appointment_type: String,
    pub severity: String,
    pub reason: String,
    pub symptoms: Option<String>,
    pub status: String,
    pub prep_instructions: Option<Vec<String>>,
    pub is_walk_in: bool,
}

impl From<Appointment> for FfiAppointment {
    fn from(appt: Appointment) -> Self {
        Self {
            id: appt.id,
            pet_id: appt.pet_id,
            clinic_name: appt.clinic_name,
            doctor_name: appt.doctor_name,
            date: appt.date.to_rfc3339(),
            appointment_type: appt.appointment_type.to_string(),
            severity: appt.severity.to_string(),
            reason: appt.reason,
            symptoms: appt.symptoms,
            status: appt.status.to_string(),
            prep_instructions: appt.prep_instructions,
            is_walk_in: appt.is_walk_in,
        }
    }
}

/// FFI-safe notification.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNotification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub notification_class: String,
    pub timestamp: String,
    pub read: bool,
    pub action_label: Option<String>,
}

impl From<Notification> for FfiNotification {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            title: n.title,
            message: n.message,
            notification_class: n.class.to_string(),
            timestamp: n.timestamp.to_rfc3339(),
            read: n.read,
            action_label: n.action_label,
        }
    }
}
