use crate::ports::PortError;
use ampa_database::DatabaseError;
use ampa_kernel::{DomainError, ValidationError};
use std::borrow::Cow;

/// A specialized [`AdoptionError`] enum of this crate.
#[ampa_derive::ampa_error]
pub enum AdoptionError {
    #[error("Invalid adoption data{}: {source}", format_context(.context))]
    Validation { source: ValidationError, context: Option<Cow<'static, str>> },

    #[error("Adoption operation rejected{}: {source}", format_context(.context))]
    Domain { source: DomainError, context: Option<Cow<'static, str>> },

    #[error("Adoption store error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    /// The CAPTCHA service or the mailer failed.
    #[error("External service failure{}: {source}", format_context(.context))]
    Port { source: PortError, context: Option<Cow<'static, str>> },

    #[error("Internal adoption error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl AdoptionError {
    /// The user-facing validation failure, if that is what this is.
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}
