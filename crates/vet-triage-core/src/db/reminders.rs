//! Reminder seed storage.
//!
//! Reminders are created outside the core (seed or import); the tracker
//! loads them once per session.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::params;

use super::{Database, DbError, DbResult};
use crate::models::{Reminder, ReminderKind};

impl Database {
    /// Insert a reminder seed record.
    pub fn insert_reminder(&self, reminder: &Reminder) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO reminders (
                id, pet_id, name, kind, dosage, frequency, due_at, confirmed
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                reminder.id,
                reminder.pet_id,
                reminder.name,
                reminder.kind.as_str(),
                reminder.dosage,
                reminder.frequency,
                reminder.due_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
                reminder.confirmed,
            ],
        )?;
        Ok(())
    }

    /// List all reminders, earliest due first.
    pub fn list_reminders(&self) -> DbResult<Vec<Reminder>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, pet_id, name, kind, dosage, frequency, due_at, confirmed
            FROM reminders
            ORDER BY due_at, rowid
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(ReminderRow {
                id: row.get(0)?,
                pet_id: row.get(1)?,
                name: row.get(2)?,
                kind: row.get(3)?,
                dosage: row.get(4)?,
                frequency: row.get(5)?,
                due_at: row.get(6)?,
                confirmed: row.get(7)?,
            })
        })?;

        let mut reminders = Vec::new();
        for row in rows {
            reminders.push(row?.try_into()?);
        }
        Ok(reminders)
    }
}

/// Intermediate row struct for database mapping.
struct ReminderRow {
    id: String,
    pet_id: String,
    name: String,
    kind: String,
    dosage: String,
    frequency: String,
    due_at: String,
    confirmed: bool,
}

impl TryFrom<ReminderRow> for Reminder {
    type Error = DbError;

    fn try_from(row: ReminderRow) -> Result<Self, Self::Error> {
        let kind: ReminderKind = row
            .kind
            .parse()
            .map_err(|e: crate::models::UnknownLabel| DbError::Constraint(e.to_string()))?;
        let due_at = DateTime::parse_from_rfc3339(&row.due_at)?.with_timezone(&Utc);

        Ok(Reminder {
            id: row.id,
            pet_id: row.pet_id,
            name: row.name,
            kind,
            dosage: row.dosage,
            frequency: row.frequency,
            due_at,
            confirmed: row.confirmed,
        })
    }
}
