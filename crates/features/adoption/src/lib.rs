//! # Adoption
//!
//! Everything between "someone is interested" and "the pet went home":
//!
//! - the public interest form ([`Adoptions::register_interest`]), gated by a CAPTCHA and
//!   followed by an alert to the staff inbox resolved by the settings slice;
//! - adopter and volunteer records for the admin screens;
//! - adoption records, which drive the pet's adoption status.
//!
//! ## Status lifecycle
//!
//! ```text
//!  AVAILABLE ──create_adoption──▶ ADOPTED ──delete_adoption──▶ AVAILABLE
//!  IN_PROCESS ─create_adoption──▶ ADOPTED
//! ```
//!
//! IN_PROCESS is only entered and left through the catalog's manual status edit.
//!
//! The CAPTCHA service and the mailer are reached through the [`CaptchaVerifier`] and
//! [`Notifier`] ports; [`TrustedCaptcha`] and [`LogNotifier`] are the local adapters.

mod adopters;
mod error;
mod interest;
mod lifecycle;
mod ports;
mod service;
mod volunteers;

pub use crate::error::{AdoptionError, AdoptionErrorExt};
pub use crate::lifecycle::{AdoptionRemoval, AdoptionSummary};
pub use crate::ports::{
    CaptchaVerifier, LogNotifier, Notification, Notifier, PortError, PortErrorExt, TrustedCaptcha,
};
pub use crate::service::Adoptions;
