//! # Settings
//!
//! The site configuration is a singleton: at most one row ever exists. It is created once,
//! edited in place afterwards, and names the inbox that receives new-interest alerts. When
//! no row exists yet the configured fallback recipient is used.

mod error;

pub use crate::error::{SettingsError, SettingsErrorExt};

use ampa_database::Database;
use ampa_domain::config::AmpaConfig;
use ampa_domain::{ConfigurationId, SiteConfiguration};
use ampa_kernel::DomainError;
use ampa_kernel::validation::validate_email;
use std::sync::Arc;
use tracing::{debug, info, instrument};

const EMAIL_FIELD: &str = "notification_email";

#[derive(Debug)]
struct SettingsInner {
    db: Database,
    fallback_recipient: String,
}

/// Settings service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Settings {
    inner: Arc<SettingsInner>,
}

impl Settings {
    pub fn new(db: Database, config: &AmpaConfig) -> Self {
        Self {
            inner: Arc::new(SettingsInner {
                db,
                fallback_recipient: config.notifications.fallback_recipient.clone(),
            }),
        }
    }

    /// Creates the configuration row.
    ///
    /// # Errors
    /// [`SettingsError::Validation`] for a malformed address and [`SettingsError::Domain`]
    /// with [`DomainError::AlreadyExists`] when a row already exists; the existing row is left
    /// untouched.
    #[instrument(skip(self))]
    pub async fn create_configuration(&self, email: &str) -> Result<SiteConfiguration, SettingsError> {
        validate_email(EMAIL_FIELD, email)?;

        let created = self
            .inner
            .db
            .transaction(|tables| {
                if !tables.configuration.is_empty() {
                    return Err(DomainError::already_exists(ConfigurationId::TABLE).into());
                }
                let row = tables.configuration.insert_with(|id| SiteConfiguration {
                    id,
                    notification_email: email.to_owned(),
                });
                Ok::<_, SettingsError>(row.clone())
            })
            .await?;

        info!(id = %created.id, "Site configuration created");
        Ok(created)
    }

    /// The configuration row, if it has been created.
    pub fn get_configuration(&self) -> Option<SiteConfiguration> {
        self.inner.db.read(|tables| tables.configuration.iter().next().cloned())
    }

    /// Changes the notification address of the existing row.
    ///
    /// # Errors
    /// [`SettingsError::Validation`] for a malformed address and [`DomainError::NotFound`]
    /// when no row has been created yet.
    #[instrument(skip(self))]
    pub async fn update_configuration(&self, email: &str) -> Result<SiteConfiguration, SettingsError> {
        validate_email(EMAIL_FIELD, email)?;

        let updated = self
            .inner
            .db
            .transaction(|tables| {
                let row = tables
                    .configuration
                    .iter()
                    .next()
                    .map(|row| row.id)
                    .ok_or_else(|| DomainError::not_found(ConfigurationId::TABLE))?;
                let row = tables.configuration.require_mut(row)?;
                row.notification_email = email.to_owned();
                Ok::<_, SettingsError>(row.clone())
            })
            .await?;

        info!(id = %updated.id, "Notification address changed");
        Ok(updated)
    }

    /// Address new-interest alerts go to: the configured row, else the fallback.
    pub fn notification_recipient(&self) -> String {
        let recipient = self
            .get_configuration()
            .map_or_else(|| self.inner.fallback_recipient.clone(), |c| c.notification_email);
        debug!(%recipient, "Resolved notification recipient");
        recipient
    }
}
