//! Outbound collaborators of the interest form.

use async_trait::async_trait;
use std::borrow::Cow;
use tracing::info;

/// Failure reported by an outbound adapter.
#[ampa_derive::ampa_error]
pub enum PortError {
    #[error("Service unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal port error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Verifies the CAPTCHA token submitted with a public form.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync + std::fmt::Debug {
    /// `Ok(false)` means the token was checked and rejected.
    async fn verify(&self, token: &str) -> Result<bool, PortError>;
}

/// Delivers staff alerts.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    async fn send(&self, notification: &Notification) -> Result<(), PortError>;
}

/// A plain-text e-mail to the staff inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Accepts every token. For staff tooling, where no public form is involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustedCaptcha;

#[async_trait]
impl CaptchaVerifier for TrustedCaptcha {
    async fn verify(&self, _token: &str) -> Result<bool, PortError> {
        Ok(true)
    }
}

/// Writes notifications to the log instead of sending them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), PortError> {
        info!(
            to = %notification.recipient,
            from = %notification.sender,
            subject = %notification.subject,
            body = %notification.body,
            "Notification logged"
        );
        Ok(())
    }
}
