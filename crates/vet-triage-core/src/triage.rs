//! Triage queue.
//!
//! Holds booked and walk-in appointments in one list ordered by severity
//! weight (highest first), then date (earliest first). The list is re-sorted
//! with a stable sort after every insert, so exact ties keep the order in
//! which they were added.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{
    Appointment, AppointmentDraft, AppointmentStatus, AppointmentType, Severity,
};

/// Triage queue errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriageError {
    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("No pet on the roster to attach a walk-in to")]
    EmptyRoster,

    #[error("Invalid appointment: {0}")]
    InvalidInput(String),
}

pub type TriageResult<T> = Result<T, TriageError>;

/// Fixed details stamped onto every walk-in.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkInDesk {
    pub clinic_name: String,
    pub doctor_name: Option<String>,
    pub reason: String,
}

/// Queue order: severity weight descending, then date ascending.
pub fn triage_order(a: &Appointment, b: &Appointment) -> Ordering {
    b.severity
        .weight()
        .cmp(&a.severity.weight())
        .then_with(|| a.date.cmp(&b.date))
}

/// Ordered appointment queue.
#[derive(Debug, Clone, Default)]
pub struct TriageQueue {
    appointments: Vec<Appointment>,
}

impl TriageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Confirm a draft under `id` and insert it into the queue.
    pub fn book(&mut self, id: String, draft: AppointmentDraft) -> TriageResult<Appointment> {
        validate_draft(&draft)?;
        self.ensure_unused(&id)?;

        let appointment = Appointment::from_draft(id, draft);
        self.insert(appointment.clone());
        Ok(appointment)
    }

    /// Register a walk-in for `pet_id`, arriving at `now`.
    ///
    /// `pet_id` is `None` when there is no pet to attach the walk-in to.
    pub fn register_walk_in(
        &mut self,
        id: String,
        pet_id: Option<String>,
        severity: Severity,
        now: DateTime<Utc>,
        desk: &WalkInDesk,
    ) -> TriageResult<Appointment> {
        let pet_id = pet_id.ok_or(TriageError::EmptyRoster)?;
        self.ensure_unused(&id)?;

        let appointment = Appointment {
            id,
            pet_id,
            clinic_name: desk.clinic_name.clone(),
            doctor_name: desk.doctor_name.clone(),
            date: now,
            appointment_type: AppointmentType::for_walk_in(severity),
            severity,
            reason: desk.reason.clone(),
            symptoms: None,
            status: AppointmentStatus::Confirmed,
            prep_instructions: None,
            is_walk_in: true,
        };
        self.insert(appointment.clone());
        Ok(appointment)
    }

    /// Record a status transition decided elsewhere. Ordering keys are not
    /// touched, so the queue stays sorted.
    pub fn update_status(&mut self, id: &str, status: AppointmentStatus) -> TriageResult<Appointment> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| TriageError::NotFound(id.to_string()))?;
        appointment.status = status;
        Ok(appointment.clone())
    }

    pub fn get(&self, id: &str) -> Option<Appointment> {
        self.appointments.iter().find(|a| a.id == id).cloned()
    }

    /// Copy of the queue in triage order.
    pub fn snapshot(&self) -> Vec<Appointment> {
        self.appointments.clone()
    }

    pub fn count_by_severity(&self, level: Severity) -> usize {
        self.appointments.iter().filter(|a| a.severity == level).count()
    }

    pub fn count_by_status(&self, status: AppointmentStatus) -> usize {
        self.appointments.iter().filter(|a| a.status == status).count()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    fn insert(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
        // sort_by is stable
        self.appointments.sort_by(triage_order);
    }

    fn ensure_unused(&self, id: &str) -> TriageResult<()> {
        if self.appointments.iter().any(|a| a.id == id) {
            return Err(TriageError::InvalidInput(format!("duplicate id {}", id)));
        }
        Ok(())
    }
}

fn validate_draft(draft: &AppointmentDraft) -> TriageResult<()> {
    if draft.pet_id.trim().is_empty() {
        return Err(TriageError::InvalidInput("pet id is required".into()));
    }
    if draft.clinic_name.trim().is_empty() {
        return Err(TriageError::InvalidInput("clinic name is required".into()));
    }
    Ok(())
}
