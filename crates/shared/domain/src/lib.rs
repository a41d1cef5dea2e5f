//! # Domain Models
//!
//! Entities of the AMPA adoption platform: pets and their photos, adopters, volunteers,
//! adoption records, the site configuration singleton and transparency documents.
//!
//! This crate contains pure data with minimal dependencies (`serde`, `strum`, `chrono`).
//! Keep it lean: no I/O and no invariants that need other records; those live in the
//! kernel's validation layer and the feature slices.

pub mod adoption;
pub mod config;
pub mod constants;
pub mod ids;
pub mod people;
pub mod pet;
pub mod settings;
pub mod transparency;

pub use adoption::Adoption;
pub use ids::{AdopterId, AdoptionId, ConfigurationId, DocumentId, PetId, PhotoId, VolunteerId};
pub use people::{Adopter, AdopterForm, Volunteer};
pub use pet::{
    AdoptionStatus, AgeBracket, NeuterStatus, Pet, PetDraft, PetPhoto, PetSize, Sex, Species,
};
pub use settings::SiteConfiguration;
pub use transparency::{DocumentCategory, TransparencyDocument};
