//! Facade crate for the AMPA platform.
//! Re-exports domain/kernel primitives and the feature slices, and wires them from one
//! [`AmpaConfig`](domain::config::AmpaConfig).
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Load the configuration with [`kernel::config::load_config`].
//! - Call [`Platform::init`] with the CAPTCHA and notification adapters to use.

mod error;

pub use crate::error::{PlatformError, PlatformErrorExt};
pub use ampa_domain as domain;
pub use ampa_kernel as kernel;

/// Feature slices.
pub mod features {
    pub use ampa_adoption as adoption;
    pub use ampa_catalog as catalog;
    pub use ampa_settings as settings;
    pub use ampa_transparency as transparency;
}

use ampa_adoption::{Adoptions, CaptchaVerifier, Notifier};
use ampa_catalog::Catalog;
use ampa_database::Database;
use ampa_domain::config::AmpaConfig;
use ampa_domain::constants::DATABASE_NAMESPACE;
use ampa_settings::Settings;
use ampa_storage::{Compression, Storage};
use ampa_transparency::Transparency;
use std::sync::Arc;
use tracing::{info, instrument};

/// Every service of the platform, sharing one entity store and one storage root.
#[derive(Debug, Clone)]
pub struct Platform {
    pub storage: Storage,
    pub database: Database,
    pub catalog: Catalog,
    pub adoptions: Adoptions,
    pub settings: Settings,
    pub transparency: Transparency,
}

impl Platform {
    /// Connects the storage root, restores the entity snapshot and builds the slices.
    ///
    /// # Errors
    /// Returns an error if the storage root cannot be opened or the snapshot cannot be read.
    #[instrument(skip_all, fields(data_dir = %config.storage.data_dir.display()))]
    pub async fn init(
        config: &AmpaConfig,
        captcha: Arc<dyn CaptchaVerifier>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, PlatformError> {
        let storage = Storage::builder()
            .root(&config.storage.data_dir)
            .create(config.storage.create)
            .connect()
            .await?;

        let mut builder = Database::builder();
        if config.database.persist {
            let compression =
                if config.database.compress { Compression::Lz4 } else { Compression::None };
            let namespace = storage.namespace_with(DATABASE_NAMESPACE, compression)?;
            builder = builder.snapshot(namespace, config.database.snapshot.clone());
        }
        let database = builder.init().await?;

        let settings = Settings::new(database.clone(), config);
        let platform = Self {
            catalog: Catalog::new(database.clone(), &storage, config)?,
            adoptions: Adoptions::new(database.clone(), settings.clone(), captcha, notifier, config),
            transparency: Transparency::new(database.clone(), &storage, config)?,
            settings,
            database,
            storage,
        };

        info!(durable = platform.database.is_durable(), "Platform ready");
        Ok(platform)
    }
}
