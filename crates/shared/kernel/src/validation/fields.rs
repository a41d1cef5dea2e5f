//! Field-level checks shared by the admin and public forms.

use crate::error::ValidationError;
use ampa_domain::constants::CPF_DIGITS;
use std::borrow::Cow;

/// Rejects blank values (whitespace only counts as blank).
pub fn require(field: impl Into<Cow<'static, str>>, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field: field.into(), context: None });
    }
    Ok(())
}

/// Limits a value to `max` characters, counted as Unicode scalar values.
pub fn max_chars(
    field: impl Into<Cow<'static, str>>,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field: field.into(), max, actual, context: None });
    }
    Ok(())
}

/// Accepts exactly 11 ASCII digits. Check digits are not verified and masks such as
/// `123.456.789-09` are rejected.
pub fn validate_cpf_format(value: &str) -> Result<(), ValidationError> {
    if value.len() == CPF_DIGITS && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCpf { field: "cpf".into(), context: None })
    }
}

/// Accepts addresses shaped like `local@domain.tld`.
pub fn validate_email(field: impl Into<Cow<'static, str>>, value: &str) -> Result<(), ValidationError> {
    if is_plausible_email(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail { field: field.into(), value: value.to_owned(), context: None })
    }
}

fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Fails when another record already holds `value` in a unique column.
///
/// `own` is the identity of the record being saved, so an edit that keeps its value passes.
pub fn validate_unique<'a, Id>(
    field: impl Into<Cow<'static, str>>,
    value: &str,
    own: Option<Id>,
    existing: impl IntoIterator<Item = (Id, &'a str)>,
) -> Result<(), ValidationError>
where
    Id: PartialEq,
{
    let taken = existing
        .into_iter()
        .any(|(id, other)| other == value && own.as_ref() != Some(&id));

    if taken {
        return Err(ValidationError::Duplicate {
            field: field.into(),
            value: value.to_owned(),
            context: None,
        });
    }
    Ok(())
}
