use std::borrow::Cow;

/// Failures of the store itself, as opposed to the domain rules it enforces.
#[ampa_derive::ampa_error]
pub enum DatabaseError {
    /// The snapshot could not be encoded or a stored snapshot is corrupt.
    #[error("Snapshot codec error{}: {source}", format_context(.context))]
    Codec { source: postcard::Error, context: Option<Cow<'static, str>> },

    #[error("Snapshot storage error{}: {source}", format_context(.context))]
    Storage { source: ampa_storage::StorageError, context: Option<Cow<'static, str>> },

    #[error("Internal database error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
