use ampa_database::DatabaseError;
use ampa_kernel::{DomainError, ValidationError};
use ampa_storage::StorageError;
use std::borrow::Cow;

/// A specialized [`TransparencyError`] enum of this crate.
#[ampa_derive::ampa_error]
pub enum TransparencyError {
    #[error("Invalid document{}: {source}", format_context(.context))]
    Validation { source: ValidationError, context: Option<Cow<'static, str>> },

    #[error("Document operation rejected{}: {source}", format_context(.context))]
    Domain { source: DomainError, context: Option<Cow<'static, str>> },

    #[error("Document store error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Document storage error{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Internal transparency error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
