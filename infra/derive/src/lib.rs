#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared across the workspace. Today this is a single attribute,
//! [`macro@ampa_error`], used by every crate to declare its error enum.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! ampa-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a workspace error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)`, implemented for `Result<T, ErrorName>` and
///   for `Result<T, Source>` of every variant that wraps a source error.
/// * `From<Source>` for each variant holding a `source` field (or a `#[source]`/`#[from]` field).
/// * `ErrorName::kind()` returning the variant name in `snake_case`, handy as a log field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant is present.
/// * A module-private `format_context` helper for the `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums with named-field variants are accepted.
/// 2. A `context` field must be typed `Option<Cow<'static, str>>`.
/// 3. Variants with a source must also carry a `context` field.
/// 4. One annotated enum per module, since the `format_context` helper is module-level.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[ampa_derive::ampa_error]
/// pub enum StoreError {
///     #[error("Snapshot codec failure{}: {source}", format_context(.context))]
///     Codec { source: postcard::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn decode(bytes: &[u8]) -> Result<Tables, StoreError> {
///     postcard::from_bytes(bytes).context("Decoding snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn ampa_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
