//! # Catalog
//!
//! Pets and their photos. Staff register and edit pets, attach photos (validated, stored
//! under `img_pets/`) and flag a handful of pets for the home page; the public pages list
//! what is available for adoption.
//!
//! At most four pets (configurable) are featured at once. The check runs inside the write
//! transaction, so two concurrent edits cannot both take the last slot.
//!
//! The adoption status is normally driven by adoption records (see the adoption slice);
//! [`Catalog::set_status`] is the manual override staff use for IN_PROCESS.

mod error;
mod query;
mod service;

pub use crate::error::{CatalogError, CatalogErrorExt};
pub use crate::query::{PetDetail, PetFilter};
pub use crate::service::Catalog;
