//! Pet models.
//!
//! Pets belong to the external directory; the triage and reminder
//! components only ever hold a pet id.

use serde::{Deserialize, Serialize};

/// Prefix prepended to clinical notes written by the vet.
pub const VET_RECORD_PREFIX: &str = "[Vet Record]";

/// A pet known to the clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Directory id
    pub id: String,
    /// Pet name
    pub name: String,
    /// Species (e.g., "Dog", "Cat", "Bird")
    pub species: String,
    /// Breed
    pub breed: Option<String>,
    /// "Male" or "Female"
    pub sex: Option<String>,
    /// Weight in kg
    pub weight_kg: Option<f64>,
    /// Birthday (YYYY-MM-DD)
    pub birthday: Option<String>,
    /// Usual food
    pub food: Option<String>,
    /// Owner name
    pub owner_name: Option<String>,
    /// Known allergies
    #[serde(default)]
    pub allergies: Vec<String>,
    /// Clinical history, oldest first
    #[serde(default)]
    pub history: Vec<String>,
}

/// Everything a caller supplies when registering a pet; the id is assigned
/// by the clinic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetProfile {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub weight_kg: Option<f64>,
    pub birthday: Option<String>,
    pub food: Option<String>,
    pub owner_name: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl PetProfile {
    /// Create a profile with only the required fields.
    pub fn new(name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            ..Default::default()
        }
    }
}

impl Pet {
    /// Create a pet with required fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, species: impl Into<String>) -> Self {
        Self::from_profile(id, PetProfile::new(name, species))
    }

    /// Create a pet from a registration profile.
    pub fn from_profile(id: impl Into<String>, profile: PetProfile) -> Self {
        Self {
            id: id.into(),
            name: profile.name,
            species: profile.species,
            breed: profile.breed,
            sex: profile.sex,
            weight_kg: profile.weight_kg,
            birthday: profile.birthday,
            food: profile.food,
            owner_name: profile.owner_name,
            allergies: profile.allergies,
            history: Vec::new(),
        }
    }

    /// Format a clinical note the way it is stored in the history. The note
    /// text is kept as written.
    pub fn vet_record(note: &str) -> String {
        format!("{} {}", VET_RECORD_PREFIX, note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pet() {
        let pet = Pet::new("p1", "Buddy", "Dog");
        assert_eq!(pet.id, "p1");
        assert_eq!(pet.name, "Buddy");
        assert!(pet.history.is_empty());
        assert!(pet.allergies.is_empty());
    }

    #[test]
    fn test_from_profile_keeps_details() {
        let mut profile = PetProfile::new("Luna", "Cat");
        profile.weight_kg = Some(4.2);
        profile.allergies = vec!["Chicken".into()];

        let pet = Pet::from_profile("p2", profile);
        assert_eq!(pet.weight_kg, Some(4.2));
        assert_eq!(pet.allergies, vec!["Chicken".to_string()]);
    }

    #[test]
    fn test_vet_record_format() {
        assert_eq!(Pet::vet_record("ate a sock"), "[Vet Record] ate a sock");
        assert_eq!(Pet::vet_record("  ate a sock "), "[Vet Record]   ate a sock ");
    }

    #[test]
    fn test_json_uses_camel_case() {
        let mut pet = Pet::new("p1", "Buddy", "Dog");
        pet.owner_name = Some("Alex".into());
        let json = serde_json::to_string(&pet).unwrap();
        assert!(json.contains("\"ownerName\":\"Alex\""));
    }
}
