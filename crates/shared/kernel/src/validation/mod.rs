//! The validation layer: pure checks that run before any write.
//!
//! Nothing here touches the store. Checks that depend on other records receive those records
//! as iterators, so slices can run them inside a transaction and tests can run them on plain
//! vectors.

mod fields;
mod upload;

pub use fields::{max_chars, require, validate_cpf_format, validate_email, validate_unique};
pub use upload::FileUpload;

use crate::error::ValidationError;
use ampa_domain::config::LimitsConfig;
use ampa_domain::constants::{IMAGE_EXTENSIONS, PDF_EXTENSION};
use ampa_domain::{Pet, PetId};
use std::borrow::Cow;
use tracing::debug;

/// Checks parameterized by the configured business limits.
#[derive(Debug, Clone)]
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    pub fn new(limits: &LimitsConfig) -> Self {
        Self { limits: limits.clone() }
    }

    #[must_use]
    pub const fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Accepts JPG/JPEG/PNG images up to the image limit, then replaces spaces in the file
    /// name with underscores.
    pub fn validate_image(
        &self,
        field: impl Into<Cow<'static, str>>,
        upload: &mut FileUpload,
    ) -> Result<(), ValidationError> {
        let field = field.into();
        let size = upload.size();
        if size > self.limits.image_max_bytes {
            return Err(ValidationError::FileTooLarge {
                field,
                size,
                max: self.limits.image_max_bytes,
                context: None,
            });
        }

        let extension = upload.extension();
        if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ValidationError::UnsupportedFileType {
                field,
                extension,
                allowed: "JPG or PNG".into(),
                context: None,
            });
        }

        if upload.name.contains(' ') {
            upload.name = upload.name.replace(' ', "_");
        }
        debug!(name = %upload.name, size, "Image accepted");
        Ok(())
    }

    /// Accepts PDF documents up to the PDF limit.
    pub fn validate_pdf(
        &self,
        field: impl Into<Cow<'static, str>>,
        upload: &FileUpload,
    ) -> Result<(), ValidationError> {
        let field = field.into();
        let extension = upload.extension();
        if extension != PDF_EXTENSION {
            return Err(ValidationError::UnsupportedFileType {
                field,
                extension,
                allowed: "PDF".into(),
                context: None,
            });
        }

        let size = upload.size();
        if size > self.limits.pdf_max_bytes {
            return Err(ValidationError::FileTooLarge {
                field,
                size,
                max: self.limits.pdf_max_bytes,
                context: None,
            });
        }
        Ok(())
    }

    /// Enforces the featured-pet cap for a pet about to be saved.
    ///
    /// `pet` is the identity of the record being edited (`None` for a new pet) and is left out
    /// of the count, so re-saving an already featured pet never blocks itself.
    pub fn validate_featured_cap<'a>(
        &self,
        pet: Option<PetId>,
        is_featured: bool,
        pets: impl IntoIterator<Item = &'a Pet>,
    ) -> Result<(), ValidationError> {
        if !is_featured {
            return Ok(());
        }

        let others = pets.into_iter().filter(|p| p.is_featured && Some(p.id) != pet).count();
        if others >= self.limits.featured_cap {
            return Err(ValidationError::FeaturedCapReached {
                cap: self.limits.featured_cap,
                context: Some("Unfeature another pet first".into()),
            });
        }
        Ok(())
    }

    /// Rejects a new adoption of a pet that is already marked adopted.
    pub fn validate_adoptable(&self, pet: &Pet) -> Result<(), ValidationError> {
        if pet.status.accepts_adoption() {
            Ok(())
        } else {
            Err(ValidationError::PetAlreadyAdopted {
                pet: pet.id,
                name: pet.name.clone(),
                context: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampa_domain::constants::MIB;
    use ampa_domain::{AdoptionStatus, PetDraft};

    fn validator() -> Validator {
        Validator::new(&LimitsConfig::default())
    }

    fn pet(id: u64, featured: bool) -> Pet {
        let draft = PetDraft { name: format!("pet-{id}"), is_featured: featured, ..PetDraft::default() };
        Pet::from_draft(PetId(id), draft)
    }

    #[test]
    fn image_limits() {
        let v = validator();

        let mut big = FileUpload::new("big.png", vec![0u8; usize::try_from(6 * MIB).unwrap()]);
        let err = v.validate_image("image", &mut big).unwrap_err();
        assert!(matches!(err, ValidationError::FileTooLarge { .. }));

        let mut ok = FileUpload::new("my dog.png", vec![0u8; usize::try_from(4 * MIB).unwrap()]);
        v.validate_image("image", &mut ok).unwrap();
        assert_eq!(ok.name, "my_dog.png");

        let mut gif = FileUpload::new("cat.gif", vec![1, 2, 3]);
        let err = v.validate_image("image", &mut gif).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedFileType { .. }));
        assert_eq!(gif.name, "cat.gif", "rejected uploads keep their name");
    }

    #[test]
    fn image_size_is_checked_before_type() {
        let mut big_gif = FileUpload::new("cat.gif", vec![0u8; usize::try_from(6 * MIB).unwrap()]);
        let err = validator().validate_image("image", &mut big_gif).unwrap_err();
        assert_eq!(err.kind(), "file_too_large");
    }

    #[test]
    fn pdf_limits() {
        let v = validator();
        assert!(v.validate_pdf("file", &FileUpload::new("r.docx", vec![0u8; 10])).is_err());
        assert!(v.validate_pdf("file", &FileUpload::new("r.PDF", vec![0u8; 2 * 1024 * 1024])).is_ok());

        let big = FileUpload::new("r.pdf", vec![0u8; usize::try_from(3 * MIB + 1).unwrap()]);
        let err = v.validate_pdf("file", &big).unwrap_err();
        assert_eq!(err.field(), Some("file"));
    }

    #[test]
    fn featured_cap_excludes_self() {
        let v = validator();
        let pets: Vec<Pet> = (1..=4).map(|id| pet(id, true)).collect();

        // Editing one of the four featured pets is fine.
        assert!(v.validate_featured_cap(Some(PetId(2)), true, &pets).is_ok());
        // A fifth featured pet is not.
        let err = v.validate_featured_cap(None, true, &pets).unwrap_err();
        assert_eq!(err.field(), Some("is_featured"));
        assert!(v.validate_featured_cap(Some(PetId(9)), true, &pets).is_err());
        // Unfeatured saves never trip the cap.
        assert!(v.validate_featured_cap(None, false, &pets).is_ok());
    }

    #[test]
    fn adopted_pets_are_not_adoptable() {
        let v = validator();
        let mut rex = pet(1, false);
        assert!(v.validate_adoptable(&rex).is_ok());

        rex.status = AdoptionStatus::InProcess;
        assert!(v.validate_adoptable(&rex).is_ok());

        rex.status = AdoptionStatus::Adopted;
        let err = v.validate_adoptable(&rex).unwrap_err();
        assert!(matches!(err, ValidationError::PetAlreadyAdopted { pet: PetId(1), .. }));
        assert_eq!(err.field(), None);
    }
}
