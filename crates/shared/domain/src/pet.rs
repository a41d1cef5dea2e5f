use crate::constants::DEFAULT_BREED;
use crate::ids::{PetId, PhotoId};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumMessage, EnumString};

/// Sex of the animal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter, EnumMessage,
)]
#[strum(ascii_case_insensitive)]
pub enum Sex {
    #[serde(rename = "F")]
    #[strum(serialize = "F", message = "Fêmea")]
    Female,
    #[default]
    #[serde(rename = "M")]
    #[strum(serialize = "M", message = "Macho")]
    Male,
}

/// Species category shown as the "only dogs / only cats" filter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter, EnumMessage,
)]
#[strum(ascii_case_insensitive)]
pub enum Species {
    #[default]
    #[serde(rename = "C")]
    #[strum(serialize = "C", message = "Cachorro")]
    Dog,
    #[serde(rename = "G")]
    #[strum(serialize = "G", message = "Gato")]
    Cat,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter, EnumMessage,
)]
#[strum(ascii_case_insensitive)]
pub enum AgeBracket {
    #[serde(rename = "FILHOTE")]
    #[strum(serialize = "FILHOTE", message = "Filhote")]
    Puppy,
    #[default]
    #[serde(rename = "ADULTO")]
    #[strum(serialize = "ADULTO", message = "Adulto")]
    Adult,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter, EnumMessage,
)]
#[strum(ascii_case_insensitive)]
pub enum PetSize {
    #[serde(rename = "P")]
    #[strum(serialize = "P", message = "Pequeno")]
    Small,
    #[default]
    #[serde(rename = "M")]
    #[strum(serialize = "M", message = "Médio")]
    Medium,
    #[serde(rename = "G")]
    #[strum(serialize = "G", message = "Grande")]
    Large,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter, EnumMessage,
)]
#[strum(ascii_case_insensitive)]
pub enum NeuterStatus {
    #[default]
    #[serde(rename = "C")]
    #[strum(serialize = "C", message = "Castrado")]
    Neutered,
    #[serde(rename = "NC")]
    #[strum(serialize = "NC", message = "Não Castrado")]
    Intact,
}

/// Adoption state machine of a [`Pet`].
///
/// `Available -> Adopted` happens only when an adoption record is created and
/// `Adopted -> Available` only when that record is deleted. `InProcess` is a valid
/// stored value owned by manual staff edits; no automatic transition touches it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, AsRefStr, EnumIter, EnumMessage,
)]
#[strum(ascii_case_insensitive)]
pub enum AdoptionStatus {
    #[default]
    #[serde(rename = "DISPONIVEL")]
    #[strum(serialize = "DISPONIVEL", message = "Disponível para Adoção")]
    Available,
    #[serde(rename = "EM_PROCESSO")]
    #[strum(serialize = "EM_PROCESSO", message = "Em Processo de Adoção")]
    InProcess,
    #[serde(rename = "ADOTADO")]
    #[strum(serialize = "ADOTADO", message = "Adotado")]
    Adopted,
}

impl AdoptionStatus {
    /// Whether a new adoption record may still be created for a pet in this state.
    #[must_use]
    pub const fn accepts_adoption(self) -> bool {
        !matches!(self, Self::Adopted)
    }
}

/// An animal listed by the association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub breed: String,
    pub color: String,
    /// Free-text rescue story and personality.
    pub story: String,
    pub sex: Sex,
    pub species: Species,
    pub age: AgeBracket,
    pub size: PetSize,
    pub neuter: NeuterStatus,
    pub special_condition: bool,
    /// Shown on the home page; at most a fixed number of pets carry it at once.
    pub is_featured: bool,
    pub status: AdoptionStatus,
}

impl Pet {
    /// Materializes a draft into a new record in its initial state.
    #[must_use]
    pub fn from_draft(id: PetId, draft: PetDraft) -> Self {
        Self {
            id,
            name: draft.name,
            breed: draft.breed,
            color: draft.color,
            story: draft.story,
            sex: draft.sex,
            species: draft.species,
            age: draft.age,
            size: draft.size,
            neuter: draft.neuter,
            special_condition: draft.special_condition,
            is_featured: draft.is_featured,
            status: AdoptionStatus::default(),
        }
    }

    /// Overwrites the staff-editable attributes, leaving identity and status untouched.
    pub fn apply(&mut self, draft: PetDraft) {
        self.name = draft.name;
        self.breed = draft.breed;
        self.color = draft.color;
        self.story = draft.story;
        self.sex = draft.sex;
        self.species = draft.species;
        self.age = draft.age;
        self.size = draft.size;
        self.neuter = draft.neuter;
        self.special_condition = draft.special_condition;
        self.is_featured = draft.is_featured;
    }
}

/// Staff-editable attributes of a pet, as submitted by the admin form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetDraft {
    pub name: String,
    pub breed: String,
    pub color: String,
    pub story: String,
    pub sex: Sex,
    pub species: Species,
    pub age: AgeBracket,
    pub size: PetSize,
    pub neuter: NeuterStatus,
    pub special_condition: bool,
    pub is_featured: bool,
}

impl Default for PetDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            breed: DEFAULT_BREED.to_owned(),
            color: String::new(),
            story: String::new(),
            sex: Sex::default(),
            species: Species::default(),
            age: AgeBracket::default(),
            size: PetSize::default(),
            neuter: NeuterStatus::default(),
            special_condition: false,
            is_featured: false,
        }
    }
}

impl From<&Pet> for PetDraft {
    fn from(pet: &Pet) -> Self {
        Self {
            name: pet.name.clone(),
            breed: pet.breed.clone(),
            color: pet.color.clone(),
            story: pet.story.clone(),
            sex: pet.sex,
            species: pet.species,
            age: pet.age,
            size: pet.size,
            neuter: pet.neuter,
            special_condition: pet.special_condition,
            is_featured: pet.is_featured,
        }
    }
}

/// A photo owned by exactly one pet; removed together with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetPhoto {
    pub id: PhotoId,
    pub pet_id: PetId,
    /// Content path of the stored image, e.g. `img_pets/rex.png`.
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_codes_match_stored_values() {
        assert_eq!(AdoptionStatus::Adopted.as_ref(), "ADOTADO");
        assert_eq!(AdoptionStatus::from_str("em_processo").unwrap(), AdoptionStatus::InProcess);
        assert_eq!(
            serde_json::to_string(&AdoptionStatus::Available).unwrap(),
            "\"DISPONIVEL\""
        );
        assert_eq!(AdoptionStatus::Available.get_message(), Some("Disponível para Adoção"));
    }

    #[test]
    fn only_adopted_pets_refuse_adoption() {
        assert!(AdoptionStatus::Available.accepts_adoption());
        assert!(AdoptionStatus::InProcess.accepts_adoption());
        assert!(!AdoptionStatus::Adopted.accepts_adoption());
    }

    #[test]
    fn draft_defaults_follow_the_admin_form() {
        let draft = PetDraft::default();
        assert_eq!(draft.breed, "SRD");
        assert_eq!(draft.sex, Sex::Male);
        assert_eq!(draft.species, Species::Dog);
        assert_eq!(draft.size, PetSize::Medium);
        assert!(!draft.is_featured);

        let pet = Pet::from_draft(PetId(1), draft);
        assert_eq!(pet.status, AdoptionStatus::Available);
    }
}
