use crate::error::CatalogError;
use ampa_database::{Database, Tables};
use ampa_domain::config::AmpaConfig;
use ampa_domain::constants::{
    DEFAULT_BREED, PET_BREED_MAX, PET_COLOR_MAX, PET_IMAGES, PET_NAME_MAX,
};
use ampa_domain::{AdoptionStatus, Pet, PetDraft, PetId, PetPhoto, PhotoId};
use ampa_kernel::validation::{max_chars, require};
use ampa_kernel::{FileUpload, ValidationError, Validator};
use ampa_storage::{NamespacedStorage, Storage};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug)]
pub(crate) struct CatalogInner {
    pub(crate) db: Database,
    pub(crate) photos: NamespacedStorage,
    pub(crate) validator: Validator,
}

/// Pet and photo management. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) inner: Arc<CatalogInner>,
}

impl Catalog {
    /// # Errors
    /// Returns [`CatalogError::Storage`] if the photo namespace cannot be opened.
    pub fn new(db: Database, storage: &Storage, config: &AmpaConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            inner: Arc::new(CatalogInner {
                db,
                photos: storage.namespace(PET_IMAGES)?,
                validator: Validator::new(&config.limits),
            }),
        })
    }

    /// Registers a new pet in the AVAILABLE state.
    ///
    /// # Errors
    /// [`CatalogError::Validation`] for missing or oversized text fields and when featuring
    /// the pet would exceed the featured cap.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_pet(&self, draft: PetDraft) -> Result<Pet, CatalogError> {
        let draft = check_draft(draft)?;

        let pet = self
            .inner
            .db
            .transaction(|tables| {
                self.inner.validator.validate_featured_cap(None, draft.is_featured, &tables.pets)?;
                let pet = tables.pets.insert_with(|id| Pet::from_draft(id, draft));
                Ok::<_, CatalogError>(pet.clone())
            })
            .await?;

        info!(id = %pet.id, featured = pet.is_featured, "Pet registered");
        Ok(pet)
    }

    /// Replaces the editable attributes of a pet. The adoption status is not touched.
    ///
    /// # Errors
    /// Same as [`Catalog::create_pet`], plus [`CatalogError::Domain`] for an unknown pet.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn update_pet(&self, id: PetId, draft: PetDraft) -> Result<Pet, CatalogError> {
        let draft = check_draft(draft)?;

        let pet = self
            .inner
            .db
            .transaction(|tables| {
                tables.pets.require(id)?;
                self.inner.validator.validate_featured_cap(Some(id), draft.is_featured, &tables.pets)?;
                let pet = tables.pets.require_mut(id)?;
                pet.apply(draft);
                Ok::<_, CatalogError>(pet.clone())
            })
            .await?;

        info!(id = %pet.id, "Pet updated");
        Ok(pet)
    }

    /// Toggles the home-page flag, subject to the featured cap.
    #[instrument(skip(self))]
    pub async fn set_featured(&self, id: PetId, featured: bool) -> Result<Pet, CatalogError> {
        let pet = self
            .inner
            .db
            .transaction(|tables| {
                tables.pets.require(id)?;
                self.inner.validator.validate_featured_cap(Some(id), featured, &tables.pets)?;
                let pet = tables.pets.require_mut(id)?;
                pet.is_featured = featured;
                Ok::<_, CatalogError>(pet.clone())
            })
            .await?;

        info!(id = %pet.id, featured, "Featured flag changed");
        Ok(pet)
    }

    /// Manual status edit by staff. This is the only way into or out of IN_PROCESS;
    /// ADOPTED is normally set and cleared by adoption records.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: PetId, status: AdoptionStatus) -> Result<Pet, CatalogError> {
        let pet = self
            .inner
            .db
            .transaction(|tables| {
                let pet = tables.pets.require_mut(id)?;
                pet.status = status;
                Ok::<_, CatalogError>(pet.clone())
            })
            .await?;

        info!(id = %pet.id, status = %pet.status, "Adoption status edited");
        Ok(pet)
    }

    /// Deletes a pet and its photos.
    ///
    /// # Errors
    /// [`CatalogError::Domain`] with a protected-record error while an adoption references
    /// the pet. Nothing is deleted in that case.
    #[instrument(skip(self))]
    pub async fn delete_pet(&self, id: PetId) -> Result<Pet, CatalogError> {
        let (pet, photos) = self
            .inner
            .db
            .transaction(|tables| Ok::<_, CatalogError>(tables.delete_pet(id)?))
            .await?;

        for photo in &photos {
            self.discard_file(&photo.image).await;
        }
        info!(id = %pet.id, photos = photos.len(), "Pet deleted");
        Ok(pet)
    }

    /// Validates and stores an image, then attaches it to the pet.
    ///
    /// Spaces in the file name become underscores, and a name already in use gets a random
    /// suffix.
    #[instrument(skip(self, upload), fields(file = %upload.name, size = upload.data.len()))]
    pub async fn add_photo(&self, pet: PetId, mut upload: FileUpload) -> Result<PetPhoto, CatalogError> {
        self.inner.validator.validate_image("image", &mut upload)?;
        self.inner.db.read(|tables| tables.pets.require(pet).map(|_| ()))?;

        let path = self.inner.photos.save_available(&upload.name, &upload.data).await?;

        let inserted = self
            .inner
            .db
            .transaction(|tables| Ok::<_, CatalogError>(tables.insert_photo(pet, path.clone())?))
            .await;

        match inserted {
            Ok(photo) => {
                info!(id = %photo.id, pet = %pet, image = %photo.image, "Photo added");
                Ok(photo)
            },
            Err(err) => {
                self.discard_file(&path).await;
                Err(err)
            },
        }
    }

    /// Detaches a photo and deletes its file.
    #[instrument(skip(self))]
    pub async fn remove_photo(&self, id: PhotoId) -> Result<PetPhoto, CatalogError> {
        let photo = self
            .inner
            .db
            .transaction(|tables| Ok::<_, CatalogError>(tables.delete_photo(id)?))
            .await?;

        self.discard_file(&photo.image).await;
        info!(id = %photo.id, pet = %photo.pet_id, "Photo removed");
        Ok(photo)
    }

    /// Removes a stored file once its row is gone. Failures only leave an orphan file behind.
    async fn discard_file(&self, content_path: &str) {
        if let Err(err) = self.inner.photos.delete_content(content_path).await {
            warn!(path = content_path, error = %err, kind = err.kind(), "Photo file not removed");
        }
    }

    pub(crate) fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        self.inner.db.read(f)
    }
}

/// Field checks of the pet form. Text is trimmed and a blank breed falls back to the
/// mixed-breed default.
fn check_draft(mut draft: PetDraft) -> Result<PetDraft, ValidationError> {
    for field in [&mut draft.name, &mut draft.breed, &mut draft.color, &mut draft.story] {
        *field = field.trim().to_owned();
    }
    if draft.breed.is_empty() {
        DEFAULT_BREED.clone_into(&mut draft.breed);
    }

    require("name", &draft.name)?;
    require("color", &draft.color)?;
    require("story", &draft.story)?;
    max_chars("name", &draft.name, PET_NAME_MAX)?;
    max_chars("breed", &draft.breed, PET_BREED_MAX)?;
    max_chars("color", &draft.color, PET_COLOR_MAX)?;
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PetDraft {
        PetDraft {
            name: "Rex".to_owned(),
            color: "caramelo".to_owned(),
            story: "Resgatado na estrada".to_owned(),
            ..PetDraft::default()
        }
    }

    #[test]
    fn blank_breed_becomes_default() {
        let checked = check_draft(PetDraft { breed: "  ".to_owned(), ..draft() }).unwrap();
        assert_eq!(checked.breed, "SRD");
    }

    #[test]
    fn text_fields_are_trimmed() {
        let checked = check_draft(PetDraft {
            name: "  Rex ".to_owned(),
            color: "caramelo\n".to_owned(),
            ..draft()
        })
        .unwrap();
        assert_eq!(checked.name, "Rex");
        assert_eq!(checked.color, "caramelo");

        let err = check_draft(PetDraft { name: "   ".to_owned(), ..draft() }).unwrap_err();
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn required_fields_are_named() {
        let err = check_draft(PetDraft { story: String::new(), ..draft() }).unwrap_err();
        assert_eq!(err.field(), Some("story"));

        let err = check_draft(PetDraft { color: "c".repeat(31), ..draft() }).unwrap_err();
        assert_eq!(err.field(), Some("color"));
    }
}
