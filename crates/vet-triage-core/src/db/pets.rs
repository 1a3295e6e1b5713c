//! Pet directory database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::directory::{DirectoryError, DirectoryResult, PetDirectory, PetRegistry};
use crate::models::Pet;

const PET_COLUMNS: &str = "id, name, species, breed, sex, weight_kg, birthday, food, owner_name, allergies, history";

impl Database {
    /// Insert a new pet.
    pub fn insert_pet(&self, pet: &Pet) -> DbResult<()> {
        let allergies_json = serde_json::to_string(&pet.allergies)?;
        let history_json = serde_json::to_string(&pet.history)?;

        self.conn.execute(
            r#"
            INSERT INTO pets (
                id, name, species, breed, sex, weight_kg,
                birthday, food, owner_name, allergies, history
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                pet.id,
                pet.name,
                pet.species,
                pet.breed,
                pet.sex,
                pet.weight_kg,
                pet.birthday,
                pet.food,
                pet.owner_name,
                allergies_json,
                history_json,
            ],
        )?;
        Ok(())
    }

    /// Get a pet by id.
    pub fn get_pet(&self, id: &str) -> DbResult<Option<Pet>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM pets WHERE id = ?", PET_COLUMNS),
                [id],
                PetRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List all pets in insertion order.
    pub fn all_pets(&self) -> DbResult<Vec<Pet>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM pets ORDER BY rowid", PET_COLUMNS))?;

        let rows = stmt.query_map([], PetRow::from_row)?;

        let mut pets = Vec::new();
        for row in rows {
            pets.push(row?.try_into()?);
        }
        Ok(pets)
    }

    /// Append an entry to a pet's clinical history.
    pub fn append_pet_history(&mut self, id: &str, entry: &str) -> DbResult<()> {
        let tx = self.conn.transaction()?;

        let history_json: String = tx
            .query_row("SELECT history FROM pets WHERE id = ?", [id], |row| row.get(0))
            .optional()?
            .ok_or_else(|| DbError::NotFound(id.to_string()))?;

        let mut history: Vec<String> = serde_json::from_str(&history_json)?;
        history.push(entry.to_string());

        tx.execute(
            "UPDATE pets SET history = ?2 WHERE id = ?1",
            params![id, serde_json::to_string(&history)?],
        )?;
        tx.commit()?;
        Ok(())
    }
}

impl PetDirectory for Database {
    fn lookup_pet(&self, id: &str) -> DirectoryResult<Pet> {
        self.get_pet(id)?
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }

    fn list_pets(&self) -> DirectoryResult<Vec<Pet>> {
        Ok(self.all_pets()?)
    }
}

impl PetRegistry for Database {
    fn register_pet(&mut self, pet: Pet) -> DirectoryResult<()> {
        if self.get_pet(&pet.id)?.is_some() {
            return Err(DirectoryError::Duplicate(pet.id));
        }
        Ok(self.insert_pet(&pet)?)
    }

    fn append_history(&mut self, pet_id: &str, entry: &str) -> DirectoryResult<()> {
        match self.append_pet_history(pet_id, entry) {
            Err(DbError::NotFound(id)) => Err(DirectoryError::NotFound(id)),
            other => Ok(other?),
        }
    }
}

/// Intermediate row struct for database mapping.
struct PetRow {
    id: String,
    name: String,
    species: String,
    breed: Option<String>,
    sex: Option<String>,
    weight_kg: Option<f64>,
    birthday: Option<String>,
    food: Option<String>,
    owner_name: Option<String>,
    allergies: String,
    history: String,
}

impl PetRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PetRow {
            id: row.get(0)?,
            name: row.get(1)?,
            species: row.get(2)?,
            breed: row.get(3)?,
            sex: row.get(4)?,
            weight_kg: row.get(5)?,
            birthday: row.get(6)?,
            food: row.get(7)?,
            owner_name: row.get(8)?,
            allergies: row.get(9)?,
            history: row.get(10)?,
        })
    }
}

impl TryFrom<PetRow> for Pet {
    type Error = DbError;

    fn try_from(row: PetRow) -> Result<Self, Self::Error> {
        Ok(Pet {
            id: row.id,
            name: row.name,
            species: row.species,
            breed: row.breed,
            sex: row.sex,
            weight_kg: row.weight_kg,
            birthday: row.birthday,
            food: row.food,
            owner_name: row.owner_name,
            allergies: serde_json::from_str(&row.allergies)?,
            history: serde_json::from_str(&row.history)?,
        })
    }
}
