//! Reminder tracker.
//!
//! Owns the medication, vaccine and checkup reminders for a session. The only
//! mutation after import is [`ReminderTracker::confirm`], which is idempotent.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::models::Reminder;

/// Reminder tracker errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    #[error("Reminder not found: {0}")]
    NotFound(String),

    #[error("Duplicate reminder id: {0}")]
    Duplicate(String),
}

pub type ReminderResult<T> = Result<T, ReminderError>;

/// Outcome of a confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderConfirmed {
    /// The reminder after confirmation
    pub reminder: Reminder,
    /// False when the reminder had already been confirmed
    pub newly_confirmed: bool,
}

/// In-memory reminder store.
#[derive(Debug, Clone, Default)]
pub struct ReminderTracker {
    reminders: Vec<Reminder>,
}

impl ReminderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed reminders. Either every record is added or none is.
    pub fn import(&mut self, reminders: Vec<Reminder>) -> ReminderResult<usize> {
        {
            let mut seen: HashSet<&str> = self.reminders.iter().map(|r| r.id.as_str()).collect();
            for reminder in &reminders {
                if !seen.insert(reminder.id.as_str()) {
                    return Err(ReminderError::Duplicate(reminder.id.clone()));
                }
            }
        }

        let count = reminders.len();
        self.reminders.extend(reminders);
        Ok(count)
    }

    /// Mark a reminder confirmed. Confirming twice changes nothing.
    pub fn confirm(&mut self, id: &str) -> ReminderResult<ReminderConfirmed> {
        let reminder = self
            .reminders
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ReminderError::NotFound(id.to_string()))?;

        let newly_confirmed = !reminder.confirmed;
        reminder.confirmed = true;

        Ok(ReminderConfirmed {
            reminder: reminder.clone(),
            newly_confirmed,
        })
    }

    pub fn get(&self, id: &str) -> Option<Reminder> {
        self.reminders.iter().find(|r| r.id == id).cloned()
    }

    /// Past due and unconfirmed.
    pub fn is_overdue(reminder: &Reminder, now: DateTime<Utc>) -> bool {
        reminder.is_overdue(now)
    }

    /// Reminders due in `[now, now + window]`, earliest first.
    ///
    /// A window reaching past the representable range is clamped to it.
    pub fn due_within(&self, window: Duration, now: DateTime<Utc>) -> Vec<Reminder> {
        let until = now
            .checked_add_signed(window)
            .unwrap_or(if window < Duration::zero() {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            });
        let mut due: Vec<Reminder> = self
            .reminders
            .iter()
            .filter(|r| r.due_at >= now && r.due_at <= until)
            .cloned()
            .collect();
        due.sort_by_key(|r| r.due_at);
        due
    }

    /// Overdue reminders, most overdue first.
    pub fn overdue(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        let mut overdue: Vec<Reminder> = self
            .reminders
            .iter()
            .filter(|r| r.is_overdue(now))
            .cloned()
            .collect();
        overdue.sort_by_key(|r| r.due_at);
        overdue
    }

    /// Copy of every reminder in import order.
    pub fn snapshot(&self) -> Vec<Reminder> {
        self.reminders.clone()
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }
}
