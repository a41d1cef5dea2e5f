//! Business rules shared by every slice.
//!
//! * [`validation`]: the validation layer, pure pre-write checks returning [`ValidationError`].
//! * [`error`]: the two failure classes, user-correctable [`ValidationError`] and
//!   [`DomainError`] for operations the store refuses.
//! * [`config`]: layered configuration loading (TOML file plus `AMPA__` environment variables).
//!
//! ```rust
//! use ampa_domain::config::LimitsConfig;
//! use ampa_kernel::validation::{FileUpload, Validator};
//!
//! let validator = Validator::new(&LimitsConfig::default());
//! let mut photo = FileUpload::new("rex at the park.jpg", vec![0u8; 1024]);
//! validator.validate_image("image", &mut photo).unwrap();
//! assert_eq!(photo.name, "rex_at_the_park.jpg");
//! ```

pub mod config;
pub mod error;
pub mod validation;

pub use ampa_domain as domain;
pub use error::{DomainError, DomainErrorExt, ValidationError, ValidationErrorExt};
pub use validation::{FileUpload, Validator};
