use ampa_database::DatabaseError;
use ampa_kernel::{DomainError, ValidationError};
use ampa_storage::StorageError;
use std::borrow::Cow;

/// A specialized [`CatalogError`] enum of this crate.
#[ampa_derive::ampa_error]
pub enum CatalogError {
    #[error("Invalid pet data{}: {source}", format_context(.context))]
    Validation { source: ValidationError, context: Option<Cow<'static, str>> },

    #[error("Catalog operation rejected{}: {source}", format_context(.context))]
    Domain { source: DomainError, context: Option<Cow<'static, str>> },

    #[error("Catalog store error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Photo storage error{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Internal catalog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CatalogError {
    /// The user-facing validation failure, if that is what this is.
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}
