//! Adoption records and the pet status transitions they drive.
//!
//! Creating a record marks the pet ADOPTED and deleting it puts the pet back to AVAILABLE.
//! Each pairing runs in one transaction, so no reader ever sees a record without the matching
//! pet status or the other way round.

use crate::error::AdoptionError;
use crate::service::Adoptions;
use ampa_database::Tables;
use ampa_domain::{AdopterId, Adoption, AdoptionId, AdoptionStatus, PetId, VolunteerId};
use chrono::{DateTime, Utc};
use tracing::{info, instrument};

/// An adoption with the names staff look for in the admin list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdoptionSummary {
    pub adoption: Adoption,
    pub pet_name: String,
    pub adopter_name: String,
    pub adopter_cpf: String,
    pub volunteer_name: Option<String>,
}

/// Outcome of [`Adoptions::delete_adoption`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdoptionRemoval {
    pub adoption: Adoption,
    /// Whether the pet went from ADOPTED back to AVAILABLE. A pet edited by hand keeps its status.
    pub pet_reverted: bool,
}

impl Adoptions {
    /// Records an adoption and marks the pet ADOPTED.
    ///
    /// `adopted_at` defaults to now and cannot be changed afterwards.
    ///
    /// # Errors
    /// * [`AdoptionError::Validation`] with `PetAlreadyAdopted` when the pet is already ADOPTED.
    /// * [`AdoptionError::Domain`] when the pet, adopter or volunteer does not exist.
    ///
    /// Nothing is written in either case.
    #[instrument(skip(self))]
    pub async fn create_adoption(
        &self,
        pet: PetId,
        adopter: AdopterId,
        volunteer: Option<VolunteerId>,
        adopted_at: Option<DateTime<Utc>>,
    ) -> Result<Adoption, AdoptionError> {
        let adopted_at = adopted_at.unwrap_or_else(Utc::now);

        let (adoption, previous) = self
            .inner
            .db
            .transaction(|tables| {
                let current = tables.pets.require(pet)?;
                self.inner.validator.validate_adoptable(current)?;
                let previous = current.status;

                let adoption = tables.insert_adoption(pet, adopter, volunteer, adopted_at)?;
                tables.pets.require_mut(pet)?.status = AdoptionStatus::Adopted;
                Ok::<_, AdoptionError>((adoption, previous))
            })
            .await?;

        info!(id = %adoption.id, pet = %pet, adopter = %adopter, from = %previous, "Pet adopted");
        Ok(adoption)
    }

    /// Deletes an adoption record. A pet still marked ADOPTED goes back to AVAILABLE, whether or
    /// not other records reference it.
    #[instrument(skip(self))]
    pub async fn delete_adoption(&self, id: AdoptionId) -> Result<AdoptionRemoval, AdoptionError> {
        let (adoption, reverted) = self
            .inner
            .db
            .transaction(|tables| {
                let adoption = tables.delete_adoption(id)?;
                let pet = tables.pets.require_mut(adoption.pet_id)?;
                let reverted = pet.status == AdoptionStatus::Adopted;
                if reverted {
                    pet.status = AdoptionStatus::Available;
                }
                Ok::<_, AdoptionError>((adoption, reverted))
            })
            .await?;

        info!(id = %adoption.id, pet = %adoption.pet_id, reverted, "Adoption deleted");
        Ok(AdoptionRemoval { adoption, pet_reverted: reverted })
    }

    /// Sets or clears the volunteer of an existing adoption. The pet's eligibility is not
    /// checked again.
    #[instrument(skip(self))]
    pub async fn assign_volunteer(
        &self,
        id: AdoptionId,
        volunteer: Option<VolunteerId>,
    ) -> Result<Adoption, AdoptionError> {
        let adoption = self
            .inner
            .db
            .transaction(|tables| Ok::<_, AdoptionError>(tables.set_adoption_volunteer(id, volunteer)?))
            .await?;

        info!(id = %adoption.id, volunteer = ?adoption.volunteer_id, "Adoption volunteer changed");
        Ok(adoption)
    }

    pub fn get_adoption(&self, id: AdoptionId) -> Result<AdoptionSummary, AdoptionError> {
        self.read(|tables| {
            let adoption = tables.adoptions.require(id)?;
            Ok::<_, AdoptionError>(summarize(tables, adoption))
        })
    }

    /// Adoptions newest first.
    pub fn list_adoptions(&self) -> Vec<AdoptionSummary> {
        self.search_adoptions("")
    }

    /// Case-insensitive match on pet or adopter name, or a CPF containing the term.
    pub fn search_adoptions(&self, term: &str) -> Vec<AdoptionSummary> {
        let term = term.trim().to_lowercase();
        self.read(|tables| {
            let mut found: Vec<AdoptionSummary> = tables
                .adoptions
                .iter()
                .map(|adoption| summarize(tables, adoption))
                .filter(|s| {
                    s.pet_name.to_lowercase().contains(&term)
                        || s.adopter_name.to_lowercase().contains(&term)
                        || s.adopter_cpf.contains(&term)
                })
                .collect();
            found.sort_by(|a, b| {
                b.adoption.adopted_at.cmp(&a.adoption.adopted_at).then(b.adoption.id.cmp(&a.adoption.id))
            });
            found
        })
    }
}

/// Referenced rows always exist: pets and adopters are protected and volunteers are cleared.
fn summarize(tables: &Tables, adoption: &Adoption) -> AdoptionSummary {
    let adopter = tables.adopters.get(adoption.adopter_id);
    AdoptionSummary {
        adoption: adoption.clone(),
        pet_name: tables.pets.get(adoption.pet_id).map(|p| p.name.clone()).unwrap_or_default(),
        adopter_name: adopter.map(|a| a.name.clone()).unwrap_or_default(),
        adopter_cpf: adopter.map(|a| a.cpf.clone()).unwrap_or_default(),
        volunteer_name: adoption
            .volunteer_id
            .and_then(|v| tables.volunteers.get(v))
            .map(|v| v.name.clone()),
    }
}
