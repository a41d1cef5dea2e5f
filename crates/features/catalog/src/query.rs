//! Read-side of the catalog: admin listings and the public pages.

use crate::error::CatalogError;
use crate::service::Catalog;
use ampa_domain::{AdoptionStatus, Pet, PetId, PetPhoto, Sex, Species};

/// A pet with its photos, as shown on the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetDetail {
    pub pet: Pet,
    pub photos: Vec<PetPhoto>,
}

/// Admin list filters; `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PetFilter {
    pub status: Option<AdoptionStatus>,
    pub featured: Option<bool>,
    pub species: Option<Species>,
    pub sex: Option<Sex>,
}

impl PetFilter {
    #[must_use]
    pub fn matches(&self, pet: &Pet) -> bool {
        self.status.is_none_or(|s| pet.status == s)
            && self.featured.is_none_or(|f| pet.is_featured == f)
            && self.species.is_none_or(|s| pet.species == s)
            && self.sex.is_none_or(|s| pet.sex == s)
    }
}

impl Catalog {
    /// # Errors
    /// [`CatalogError::Domain`] when the pet does not exist.
    pub fn get_pet(&self, id: PetId) -> Result<PetDetail, CatalogError> {
        self.read(|tables| {
            let pet = tables.pets.require(id)?.clone();
            let photos = tables.photos_of(id).cloned().collect();
            Ok::<_, CatalogError>(PetDetail { pet, photos })
        })
    }

    /// Pets matching `filter`, newest first.
    pub fn list_pets(&self, filter: &PetFilter) -> Vec<Pet> {
        self.read(|tables| tables.pets.iter().rev().filter(|p| filter.matches(p)).cloned().collect())
    }

    /// Case-insensitive search over name and story, newest first.
    pub fn search_pets(&self, term: &str) -> Vec<Pet> {
        let term = term.trim().to_lowercase();
        self.read(|tables| {
            tables
                .pets
                .iter()
                .rev()
                .filter(|p| {
                    term.is_empty()
                        || p.name.to_lowercase().contains(&term)
                        || p.story.to_lowercase().contains(&term)
                })
                .cloned()
                .collect()
        })
    }

    /// The public adoption page: every available pet with its photos, in registration order.
    pub fn available_pets(&self) -> Vec<PetDetail> {
        self.read(|tables| {
            tables
                .pets
                .iter()
                .filter(|p| p.status == AdoptionStatus::Available)
                .map(|pet| PetDetail {
                    pet: pet.clone(),
                    photos: tables.photos_of(pet.id).cloned().collect(),
                })
                .collect()
        })
    }

    /// Home page showcase: the newest featured pets that are still available, or the newest
    /// available pets when none of those exist.
    pub fn home_showcase(&self) -> Vec<Pet> {
        let size = self.inner.validator.limits().showcase_size;
        self.read(|tables| {
            let available = || tables.pets.iter().rev().filter(|p| p.status == AdoptionStatus::Available);

            let featured: Vec<Pet> = available().filter(|p| p.is_featured).take(size).cloned().collect();
            if featured.is_empty() {
                available().take(size).cloned().collect()
            } else {
                featured
            }
        })
    }

    /// Pets that may be picked for a new adoption record.
    pub fn adoptable_pets(&self) -> Vec<Pet> {
        self.read(|tables| {
            tables.pets.iter().filter(|p| p.status == AdoptionStatus::Available).cloned().collect()
        })
    }

    /// Number of pets currently carrying the featured flag.
    pub fn featured_count(&self) -> usize {
        self.read(|tables| tables.pets.iter().filter(|p| p.is_featured).count())
    }
}
