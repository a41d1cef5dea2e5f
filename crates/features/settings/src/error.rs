use ampa_database::DatabaseError;
use ampa_kernel::{DomainError, ValidationError};
use std::borrow::Cow;

/// A specialized [`SettingsError`] enum of this crate.
#[ampa_derive::ampa_error]
pub enum SettingsError {
    #[error("Invalid settings{}: {source}", format_context(.context))]
    Validation { source: ValidationError, context: Option<Cow<'static, str>> },

    #[error("Settings rejected{}: {source}", format_context(.context))]
    Domain { source: DomainError, context: Option<Cow<'static, str>> },

    #[error("Settings store error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Internal settings error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
