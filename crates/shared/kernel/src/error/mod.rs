//! The two failure classes every slice reports.
//!
//! [`ValidationError`] is user-correctable and maps onto a form field (or the whole form);
//! [`DomainError`] is a rejected operation, such as a second site configuration or deleting
//! a pet an adoption still points at. Neither is fatal and neither leaves partial writes.

mod domain;
mod validation;

pub use domain::{DomainError, DomainErrorExt};
pub use validation::{ValidationError, ValidationErrorExt};
