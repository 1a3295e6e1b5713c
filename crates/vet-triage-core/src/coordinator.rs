//! Coordinator facade.
//!
//! One `Coordinator` owns the reminder tracker, the triage queue and the
//! notification feed for a clinic session. Every mutation that raises a
//! notification does so before returning, and a rejected mutation leaves all
//! three collections untouched.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::clock::{Clock, IdGenerator, SystemClock, UuidIds};
use crate::config::ClinicConfig;
use crate::db::DbError;
use crate::directory::{DirectoryError, PetRegistry};
use crate::feed::{FeedError, NotificationFeed};
use crate::models::{
    Appointment, AppointmentDraft, AppointmentStatus, Notification, NotificationClass, Pet,
    PetProfile, Reminder, Severity,
};
use crate::reminders::{ReminderError, ReminderTracker};
use crate::triage::{TriageError, TriageQueue};

/// Errors reported to coordinator callers. All are recoverable.
#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No pet on the roster to attach a walk-in to")]
    EmptyRoster,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

pub type CoordinatorResult<T> = Result<T, CoordinatorError>;

impl From<ReminderError> for CoordinatorError {
    fn from(e: ReminderError) -> Self {
        match e {
            ReminderError::NotFound(id) => CoordinatorError::NotFound(format!("reminder {}", id)),
            ReminderError::Duplicate(id) => {
                CoordinatorError::InvalidInput(format!("duplicate reminder id {}", id))
            }
        }
    }
}

impl From<TriageError> for CoordinatorError {
    fn from(e: TriageError) -> Self {
        match e {
            TriageError::NotFound(id) => CoordinatorError::NotFound(format!("appointment {}", id)),
            TriageError::EmptyRoster => CoordinatorError::EmptyRoster,
            TriageError::InvalidInput(msg) => CoordinatorError::InvalidInput(msg),
        }
    }
}

impl From<FeedError> for CoordinatorError {
    fn from(e: FeedError) -> Self {
        match e {
            FeedError::NotFound(id) => CoordinatorError::NotFound(format!("notification {}", id)),
        }
    }
}

impl From<DirectoryError> for CoordinatorError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::NotFound(id) => CoordinatorError::NotFound(format!("pet {}", id)),
            DirectoryError::Duplicate(id) => {
                CoordinatorError::InvalidInput(format!("duplicate pet id {}", id))
            }
            DirectoryError::Database(e) => CoordinatorError::Storage(e),
        }
    }
}

/// Session-scoped owner of reminders, the triage queue and the feed.
pub struct Coordinator {
    config: ClinicConfig,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    pets: Box<dyn PetRegistry>,
    reminders: ReminderTracker,
    queue: TriageQueue,
    feed: NotificationFeed,
}

impl Coordinator {
    /// Start a session on the wall clock with UUID ids.
    pub fn new(config: ClinicConfig, pets: impl PetRegistry + 'static) -> Self {
        Self::with_sources(config, pets, SystemClock, UuidIds)
    }

    /// Start a session with explicit time and id sources.
    pub fn with_sources(
        config: ClinicConfig,
        pets: impl PetRegistry + 'static,
        clock: impl Clock + 'static,
        ids: impl IdGenerator + 'static,
    ) -> Self {
        let mut coordinator = Self {
            config,
            clock: Box::new(clock),
            ids: Box::new(ids),
            pets: Box::new(pets),
            reminders: ReminderTracker::new(),
            queue: TriageQueue::new(),
            feed: NotificationFeed::new(),
        };

        if coordinator.config.welcome_notification {
            let message = format!(
                "Your {} dashboard is ready. Reminders and the triage queue will show up here.",
                coordinator.config.clinic_name
            );
            coordinator.notify("Welcome", message, NotificationClass::Info, None);
        }

        coordinator
    }

    pub fn config(&self) -> &ClinicConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // =========================================================================
    // Pets
    // =========================================================================

    /// Register a pet with the directory.
    pub fn add_pet(&mut self, profile: PetProfile) -> CoordinatorResult<Pet> {
        if profile.name.trim().is_empty() || profile.species.trim().is_empty() {
            warn!("pet registration rejected: name and species are required");
            return Err(CoordinatorError::InvalidInput(
                "pet name and species are required".into(),
            ));
        }

        let pet = Pet::from_profile(self.ids.new_id("p"), profile);
        self.pets.register_pet(pet.clone())?;
        info!(pet_id = %pet.id, name = %pet.name, "pet registered");

        self.notify(
            "Pet Added",
            format!("{} has been added to your family profile.", pet.name),
            NotificationClass::Success,
            None,
        );
        Ok(pet)
    }

    pub fn pet(&self, id: &str) -> CoordinatorResult<Pet> {
        Ok(self.pets.lookup_pet(id)?)
    }

    pub fn pets(&self) -> CoordinatorResult<Vec<Pet>> {
        Ok(self.pets.list_pets()?)
    }

    /// Append a vet note to a pet's clinical history.
    pub fn add_history_note(&mut self, pet_id: &str, note: &str) -> CoordinatorResult<()> {
        if note.trim().is_empty() {
            warn!(pet_id = %pet_id, "history note rejected: empty note");
            return Err(CoordinatorError::InvalidInput("note must not be empty".into()));
        }

        self.pets
            .append_history(pet_id, &Pet::vet_record(note))
            .inspect_err(|e| warn!(pet_id = %pet_id, error = %e, "history note rejected"))?;
        info!(pet_id = %pet_id, "history note added");

        self.notify(
            "Record Updated",
            "Clinical note added to patient history.".into(),
            NotificationClass::Success,
            None,
        );
        Ok(())
    }

    // =========================================================================
    // Reminders
    // =========================================================================

    /// Seed reminders created outside the core.
    pub fn import_reminders(&mut self, reminders: Vec<Reminder>) -> CoordinatorResult<usize> {
        let count = self.reminders.import(reminders)?;
        info!(count, "reminders imported");
        Ok(count)
    }

    /// Confirm a medication, vaccine or checkup reminder.
    ///
    /// Only the first confirmation of a reminder raises a notification.
    pub fn confirm_medication(&mut self, id: &str) -> CoordinatorResult<Reminder> {
        let outcome = self
            .reminders
            .confirm(id)
            .inspect_err(|e| warn!(reminder_id = %id, error = %e, "confirmation rejected"))?;

        if outcome.newly_confirmed {
            info!(reminder_id = %id, pet_id = %outcome.reminder.pet_id, "reminder confirmed");
            self.notify(
                "Medication Confirmed",
                "Great job keeping up with the schedule!".into(),
                NotificationClass::Success,
                None,
            );
        } else {
            debug!(reminder_id = %id, "reminder already confirmed");
        }
        Ok(outcome.reminder)
    }

    pub fn reminder(&self, id: &str) -> CoordinatorResult<Reminder> {
        self.reminders
            .get(id)
            .ok_or_else(|| CoordinatorError::NotFound(format!("reminder {}", id)))
    }

    pub fn reminders(&self) -> Vec<Reminder> {
        self.reminders.snapshot()
    }

    pub fn is_overdue(&self, reminder: &Reminder) -> bool {
        ReminderTracker::is_overdue(reminder, self.clock.now())
    }

    /// Reminders due between now and now + `window`, earliest first.
    pub fn due_within(&self, window: Duration) -> Vec<Reminder> {
        self.reminders.due_within(window, self.clock.now())
    }

    /// Reminders due within the configured look-ahead.
    pub fn due_reminders(&self) -> Vec<Reminder> {
        self.due_within(self.config.reminder_window())
    }

    pub fn overdue_reminders(&self) -> Vec<Reminder> {
        let overdue = self.reminders.overdue(self.clock.now());
        if !overdue.is_empty() {
            debug!(count = overdue.len(), "overdue reminders");
        }
        overdue
    }

    // =========================================================================
    // Triage queue
    // =========================================================================

    /// Book an appointment for a known pet.
    pub fn book_appointment(&mut self, draft: AppointmentDraft) -> CoordinatorResult<Appointment> {
        if !draft.pet_id.trim().is_empty() {
            self.pets
                .lookup_pet(&draft.pet_id)
                .inspect_err(|e| warn!(pet_id = %draft.pet_id, error = %e, "booking rejected"))?;
        }

        let appointment = self
            .queue
            .book(self.ids.new_id("a"), draft)
            .inspect_err(|e| warn!(error = %e, "booking rejected"))?;
        info!(
            appointment_id = %appointment.id,
            pet_id = %appointment.pet_id,
            severity = %appointment.severity,
            date = %appointment.date,
            "appointment booked"
        );

        self.notify(
            "Booking Confirmed",
            format!(
                "Appointment confirmed for {}.",
                appointment.date.format("%b %-d, %Y")
            ),
            NotificationClass::Success,
            None,
        );
        Ok(appointment)
    }

    /// Register a walk-in against the first pet on the roster.
    pub fn register_walk_in(&mut self, severity: Severity) -> CoordinatorResult<Appointment> {
        let pet_id = self.pets.first_pet()?.map(|pet| pet.id);
        self.admit_walk_in(pet_id, severity)
    }

    /// Register a walk-in for a specific pet.
    pub fn register_walk_in_for_pet(
        &mut self,
        pet_id: &str,
        severity: Severity,
    ) -> CoordinatorResult<Appointment> {
        let pet = self.pets.lookup_pet(pet_id)?;
        self.admit_walk_in(Some(pet.id), severity)
    }

    fn admit_walk_in(
        &mut self,
        pet_id: Option<String>,
        severity: Severity,
    ) -> CoordinatorResult<Appointment> {
        let desk = self.config.walk_in_desk();
        let now = self.clock.now();
        let appointment = self
            .queue
            .register_walk_in(self.ids.new_id("w"), pet_id, severity, now, &desk)
            .inspect_err(|e| warn!(severity = %severity, error = %e, "walk-in rejected"))?;
        info!(
            appointment_id = %appointment.id,
            pet_id = %appointment.pet_id,
            severity = %severity,
            "walk-in registered"
        );

        self.notify(
            "New Walk-in",
            format!("A {} priority patient has been added to the queue.", severity),
            NotificationClass::Warning,
            None,
        );
        Ok(appointment)
    }

    /// Apply a status change decided by the clinic workflow.
    pub fn update_appointment_status(
        &mut self,
        id: &str,
        status: AppointmentStatus,
    ) -> CoordinatorResult<Appointment> {
        let appointment = self.queue.update_status(id, status)?;
        info!(appointment_id = %id, status = %status, "appointment status updated");
        Ok(appointment)
    }

    pub fn appointment(&self, id: &str) -> CoordinatorResult<Appointment> {
        self.queue
            .get(id)
            .ok_or_else(|| CoordinatorError::NotFound(format!("appointment {}", id)))
    }

    /// Copy of the queue in triage order.
    pub fn queue_snapshot(&self) -> Vec<Appointment> {
        self.queue.snapshot()
    }

    pub fn count_by_severity(&self, level: Severity) -> usize {
        self.queue.count_by_severity(level)
    }

    pub fn count_by_status(&self, status: AppointmentStatus) -> usize {
        self.queue.count_by_status(status)
    }

    // =========================================================================
    // Notification feed
    // =========================================================================

    /// Post a caller-requested notification (e.g., "Profile Updated").
    pub fn record_event(
        &mut self,
        title: &str,
        message: &str,
        class: NotificationClass,
        action_label: Option<String>,
    ) -> Notification {
        self.notify(title, message.to_string(), class, action_label)
    }

    /// Copy of the feed, newest first.
    pub fn feed_snapshot(&self) -> Vec<Notification> {
        self.feed.snapshot()
    }

    pub fn mark_read(&mut self, id: &str) -> CoordinatorResult<()> {
        Ok(self.feed.mark_read(id)?)
    }

    pub fn mark_all_read(&mut self) {
        let flipped = self.feed.mark_all_read();
        debug!(flipped, "all notifications marked read");
    }

    pub fn unread_count(&self) -> usize {
        self.feed.unread_count()
    }

    fn notify(
        &mut self,
        title: &str,
        message: String,
        class: NotificationClass,
        action_label: Option<String>,
    ) -> Notification {
        let id = self.ids.new_id("n");
        let now = self.clock.now();
        let notification = self.feed.emit(id, now, title, message, class, action_label);
        debug!(notification_id = %notification.id, title = %notification.title, "notification emitted");
        notification
    }
}
