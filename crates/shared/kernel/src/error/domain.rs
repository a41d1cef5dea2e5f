use std::borrow::Cow;
use std::fmt::Display;

/// An operation the store refuses regardless of user input.
#[ampa_derive::ampa_error]
#[derive(PartialEq, Eq)]
pub enum DomainError {
    #[error("Record not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Record already exists{}: {message}", format_context(.context))]
    AlreadyExists { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Deleting the record would orphan rows that reference it.
    #[error("Record is protected{}: {message}", format_context(.context))]
    Protected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal domain error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl DomainError {
    pub fn not_found(id: impl Display) -> Self {
        Self::NotFound { message: id.to_string().into(), context: None }
    }

    pub fn already_exists(what: impl Display) -> Self {
        Self::AlreadyExists { message: what.to_string().into(), context: None }
    }

    /// `id` is still referenced by `count` rows of `table`.
    pub fn protected(id: impl Display, table: &str, count: usize) -> Self {
        Self::Protected {
            message: format!("{id} is referenced by {count} {table} record(s)").into(),
            context: None,
        }
    }
}
