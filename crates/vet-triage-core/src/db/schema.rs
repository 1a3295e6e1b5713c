//! SQLite schema definition.

/// Database schema for the clinic directory.
pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Pets
-- ============================================================================

CREATE TABLE IF NOT EXISTS pets (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    species TEXT NOT NULL,
    breed TEXT,
    sex TEXT,
    weight_kg REAL,
    birthday TEXT,
    food TEXT,
    owner_name TEXT,
    allergies TEXT NOT NULL DEFAULT '[]',         -- JSON array of strings
    history TEXT NOT NULL DEFAULT '[]',           -- JSON array of strings, oldest first
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_pets_name ON pets(name);

-- ============================================================================
-- Reminders (seed data for the reminder tracker)
-- ============================================================================

CREATE TABLE IF NOT EXISTS reminders (
    id TEXT PRIMARY KEY,
    pet_id TEXT NOT NULL REFERENCES pets(id),
    name TEXT NOT NULL,
    kind TEXT NOT NULL CHECK (kind IN ('Medicine', 'Vaccine', 'Checkup')),
    dosage TEXT NOT NULL DEFAULT '',
    frequency TEXT NOT NULL DEFAULT '',
    due_at TEXT NOT NULL,                         -- RFC 3339, UTC, nanosecond precision
    confirmed INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_reminders_pet ON reminders(pet_id);
CREATE INDEX IF NOT EXISTS idx_reminders_due ON reminders(due_at);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_reminder_kind_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute(
            "INSERT INTO pets (id, name, species) VALUES ('p1', 'Buddy', 'Dog')",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO reminders (id, pet_id, name, kind, due_at) VALUES ('m1', 'p1', 'X', 'Pill', '2024-05-01T09:00:00Z')",
            [],
        );
        assert!(result.is_err());

        let result = conn.execute(
            "INSERT INTO reminders (id, pet_id, name, kind, due_at) VALUES ('m1', 'p1', 'X', 'Vaccine', '2024-05-01T09:00:00Z')",
            [],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_reminder_requires_known_pet() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO reminders (id, pet_id, name, kind, due_at) VALUES ('m1', 'ghost', 'X', 'Vaccine', '2024-05-01T09:00:00Z')",
            [],
        );
        assert!(result.is_err());
    }
}
