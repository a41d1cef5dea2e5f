use ampa_catalog::CatalogError;
use ampa_database::DatabaseError;
use ampa_storage::StorageError;
use ampa_transparency::TransparencyError;
use std::borrow::Cow;

/// Failure while bringing the platform up.
#[ampa_derive::ampa_error]
pub enum PlatformError {
    #[error("Storage bootstrap failed{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Entity store bootstrap failed{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Catalog bootstrap failed{}: {source}", format_context(.context))]
    Catalog { source: CatalogError, context: Option<Cow<'static, str>> },

    #[error("Transparency bootstrap failed{}: {source}", format_context(.context))]
    Transparency { source: TransparencyError, context: Option<Cow<'static, str>> },

    #[error("Internal platform error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
