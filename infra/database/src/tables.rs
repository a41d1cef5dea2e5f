use crate::table::Table;
use ampa_domain::{
    Adopter, AdopterId, Adoption, AdoptionId, DocumentId, Pet, PetId, PetPhoto, PhotoId,
    SiteConfiguration, TransparencyDocument, Volunteer, VolunteerId,
};
use ampa_kernel::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every entity table of the platform.
///
/// Fields are public for reads and plain updates. Deletes and inserts that involve a
/// relationship go through the methods below, which keep references consistent:
/// photos cascade with their pet, pets and adopters are protected while an adoption
/// references them, and deleting a volunteer clears it from adoptions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tables {
    pub pets: Table<Pet>,
    pub photos: Table<PetPhoto>,
    pub adopters: Table<Adopter>,
    pub volunteers: Table<Volunteer>,
    pub adoptions: Table<Adoption>,
    pub configuration: Table<SiteConfiguration>,
    pub documents: Table<TransparencyDocument>,
}

impl Tables {
    /// Photos of one pet in upload order.
    pub fn photos_of(&self, pet: PetId) -> impl Iterator<Item = &PetPhoto> {
        self.photos.iter().filter(move |p| p.pet_id == pet)
    }

    /// Adoption records referencing a pet.
    pub fn adoptions_of_pet(&self, pet: PetId) -> impl Iterator<Item = &Adoption> {
        self.adoptions.iter().filter(move |a| a.pet_id == pet)
    }

    pub fn adoptions_of_adopter(&self, adopter: AdopterId) -> impl Iterator<Item = &Adoption> {
        self.adoptions.iter().filter(move |a| a.adopter_id == adopter)
    }

    /// Inserts a photo for an existing pet.
    pub fn insert_photo(&mut self, pet: PetId, image: String) -> Result<PetPhoto, DomainError> {
        self.pets.require(pet)?;
        Ok(self.photos.insert_with(|id| PetPhoto { id, pet_id: pet, image }).clone())
    }

    pub fn delete_photo(&mut self, photo: PhotoId) -> Result<PetPhoto, DomainError> {
        self.photos.remove(photo)
    }

    /// Inserts an adoption record after checking every referenced row exists.
    ///
    /// Eligibility of the pet is a business rule and is checked by the caller.
    pub fn insert_adoption(
        &mut self,
        pet: PetId,
        adopter: AdopterId,
        volunteer: Option<VolunteerId>,
        adopted_at: DateTime<Utc>,
    ) -> Result<Adoption, DomainError> {
        self.pets.require(pet)?;
        self.adopters.require(adopter)?;
        if let Some(volunteer) = volunteer {
            self.volunteers.require(volunteer)?;
        }

        let adoption = self.adoptions.insert_with(|id| Adoption {
            id,
            pet_id: pet,
            adopter_id: adopter,
            volunteer_id: volunteer,
            adopted_at,
        });
        Ok(adoption.clone())
    }

    /// Points an adoption at another volunteer, or at none.
    pub fn set_adoption_volunteer(
        &mut self,
        adoption: AdoptionId,
        volunteer: Option<VolunteerId>,
    ) -> Result<Adoption, DomainError> {
        if let Some(volunteer) = volunteer {
            self.volunteers.require(volunteer)?;
        }
        let record = self.adoptions.require_mut(adoption)?;
        record.volunteer_id = volunteer;
        Ok(record.clone())
    }

    pub fn delete_adoption(&mut self, adoption: AdoptionId) -> Result<Adoption, DomainError> {
        self.adoptions.remove(adoption)
    }

    /// Deletes a pet together with its photos, which are returned so their files can be
    /// removed. Refused while an adoption references the pet.
    pub fn delete_pet(&mut self, pet: PetId) -> Result<(Pet, Vec<PetPhoto>), DomainError> {
        self.pets.require(pet)?;
        let references = self.adoptions_of_pet(pet).count();
        if references > 0 {
            return Err(DomainError::protected(pet, "adoption", references));
        }

        let mut photos = Vec::new();
        self.photos.retain(|_, photo| {
            if photo.pet_id == pet {
                photos.push(photo.clone());
                false
            } else {
                true
            }
        });
        Ok((self.pets.remove(pet)?, photos))
    }

    /// Deletes an adopter; refused while an adoption references it.
    pub fn delete_adopter(&mut self, adopter: AdopterId) -> Result<Adopter, DomainError> {
        self.adopters.require(adopter)?;
        let references = self.adoptions_of_adopter(adopter).count();
        if references > 0 {
            return Err(DomainError::protected(adopter, "adoption", references));
        }
        self.adopters.remove(adopter)
    }

    /// Deletes a volunteer and clears it from the adoptions it handled.
    ///
    /// Returns the volunteer and how many adoptions were updated.
    pub fn delete_volunteer(
        &mut self,
        volunteer: VolunteerId,
    ) -> Result<(Volunteer, usize), DomainError> {
        let removed = self.volunteers.remove(volunteer)?;
        let mut cleared = 0;
        for adoption in self.adoptions.iter_mut().filter(|a| a.volunteer_id == Some(volunteer)) {
            adoption.volunteer_id = None;
            cleared += 1;
        }
        Ok((removed, cleared))
    }

    pub fn delete_document(&mut self, document: DocumentId) -> Result<TransparencyDocument, DomainError> {
        self.documents.remove(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampa_domain::PetDraft;

    fn seeded() -> (Tables, PetId, AdopterId, VolunteerId) {
        let mut tables = Tables::default();
        let pet = tables.pets.insert_with(|id| Pet::from_draft(id, PetDraft::default())).id;
        let adopter = tables
            .adopters
            .insert_with(|id| Adopter {
                id,
                name: "Ana".to_owned(),
                cpf: "12345678909".to_owned(),
                phone: "17 99999-0000".to_owned(),
                email: "ana@ampa.org".to_owned(),
                address: None,
                registered_at: Utc::now(),
            })
            .id;
        let volunteer = tables
            .volunteers
            .insert_with(|id| Volunteer { id, name: "Bia".to_owned(), active: true })
            .id;
        (tables, pet, adopter, volunteer)
    }

    #[test]
    fn pet_delete_cascades_photos() {
        let (mut tables, pet, _, _) = seeded();
        tables.insert_photo(pet, "img_pets/a.png".to_owned()).unwrap();
        tables.insert_photo(pet, "img_pets/b.png".to_owned()).unwrap();

        let (deleted, photos) = tables.delete_pet(pet).unwrap();
        assert_eq!(deleted.id, pet);
        assert_eq!(photos.len(), 2);
        assert!(tables.photos.is_empty());
    }

    #[test]
    fn adoption_protects_pet_and_adopter() {
        let (mut tables, pet, adopter, _) = seeded();
        tables.insert_photo(pet, "img_pets/a.png".to_owned()).unwrap();
        tables.insert_adoption(pet, adopter, None, Utc::now()).unwrap();

        let err = tables.delete_pet(pet).unwrap_err();
        assert_eq!(err.kind(), "protected");
        assert_eq!(tables.photos.len(), 1, "refused delete must not cascade");

        let err = tables.delete_adopter(adopter).unwrap_err();
        assert_eq!(err.kind(), "protected");
    }

    #[test]
    fn volunteer_delete_clears_reference() {
        let (mut tables, pet, adopter, volunteer) = seeded();
        let adoption = tables.insert_adoption(pet, adopter, Some(volunteer), Utc::now()).unwrap();

        let (_, cleared) = tables.delete_volunteer(volunteer).unwrap();
        assert_eq!(cleared, 1);
        assert_eq!(tables.adoptions.require(adoption.id).unwrap().volunteer_id, None);
    }

    #[test]
    fn references_must_exist() {
        let (mut tables, pet, adopter, _) = seeded();
        assert!(tables.insert_photo(PetId(99), "img_pets/x.png".to_owned()).is_err());
        assert!(tables.insert_adoption(pet, AdopterId(99), None, Utc::now()).is_err());
        assert!(tables.insert_adoption(pet, adopter, Some(VolunteerId(99)), Utc::now()).is_err());
        assert!(tables.adoptions.is_empty());
    }
}
