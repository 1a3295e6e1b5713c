//! Pet directory seam.
//!
//! The coordinator reads pets through [`PetDirectory`] and writes history
//! notes and registrations through [`PetRegistry`]. [`InMemoryPets`] backs a
//! plain session; [`crate::db::Database`] backs a SQLite one.

use thiserror::Error;

use crate::db::DbError;
use crate::models::Pet;

/// Pet directory errors.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Pet not found: {0}")]
    NotFound(String),

    #[error("Pet already registered: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Read side of the pet directory.
pub trait PetDirectory: Send {
    /// Fetch one pet, or `NotFound`.
    fn lookup_pet(&self, id: &str) -> DirectoryResult<Pet>;

    /// All pets in registration order.
    fn list_pets(&self) -> DirectoryResult<Vec<Pet>>;

    /// The earliest-registered pet, if any.
    fn first_pet(&self) -> DirectoryResult<Option<Pet>> {
        Ok(self.list_pets()?.into_iter().next())
    }
}

/// Write side used for registrations and clinical notes.
pub trait PetRegistry: PetDirectory {
    fn register_pet(&mut self, pet: Pet) -> DirectoryResult<()>;

    /// Append one entry to a pet's clinical history.
    fn append_history(&mut self, pet_id: &str, entry: &str) -> DirectoryResult<()>;
}

/// Registration-ordered in-memory directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPets {
    pets: Vec<Pet>,
}

impl InMemoryPets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from existing records, keeping their order.
    pub fn with_pets(pets: Vec<Pet>) -> Self {
        Self { pets }
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }
}

impl PetDirectory for InMemoryPets {
    fn lookup_pet(&self, id: &str) -> DirectoryResult<Pet> {
        self.pets
            .iter()
            .find(|pet| pet.id == id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }

    fn list_pets(&self) -> DirectoryResult<Vec<Pet>> {
        Ok(self.pets.clone())
    }

    fn first_pet(&self) -> DirectoryResult<Option<Pet>> {
        Ok(self.pets.first().cloned())
    }
}

impl PetRegistry for InMemoryPets {
    fn register_pet(&mut self, pet: Pet) -> DirectoryResult<()> {
        if self.pets.iter().any(|existing| existing.id == pet.id) {
            return Err(DirectoryError::Duplicate(pet.id));
        }
        self.pets.push(pet);
        Ok(())
    }

    fn append_history(&mut self, pet_id: &str, entry: &str) -> DirectoryResult<()> {
        let pet = self
            .pets
            .iter_mut()
            .find(|pet| pet.id == pet_id)
            .ok_or_else(|| DirectoryError::NotFound(pet_id.to_string()))?;
        pet.history.push(entry.to_string());
        Ok(())
    }
}
