use crate::constants::{
    DEFAULT_NOTIFICATION_EMAIL, FEATURED_CAP, IMAGE_MAX_BYTES, PDF_MAX_BYTES, SHOWCASE_SIZE,
};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by every slice.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AmpaConfigInner {
    pub storage: StorageConfig,
    pub database: DatabaseConfig,
    pub limits: LimitsConfig,
    pub notifications: NotificationConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into services.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AmpaConfig {
    #[serde(flatten, default)]
    inner: Arc<AmpaConfigInner>,
}

impl Deref for AmpaConfig {
    type Target = AmpaConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AmpaConfig {
    fn deref_mut(&mut self) -> &mut AmpaConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Root directory for uploaded media and the entity snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub create: bool,
}

/// Entity store durability.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Write a snapshot after every committed transaction.
    pub persist: bool,
    pub snapshot: String,
    /// LZ4-compress the snapshot file.
    pub compress: bool,
}

/// Business limits enforced by the validation layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub featured_cap: usize,
    pub showcase_size: usize,
    pub image_max_bytes: u64,
    pub pdf_max_bytes: u64,
}

/// Staff alert settings used when a new adopter registers interest.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Used when no site configuration row names a recipient.
    pub fallback_recipient: String,
    pub sender: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub env_filter: Option<String>,
}

// --- Default ---

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("data"), create: true }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { persist: true, snapshot: "entities.bin".to_owned(), compress: true }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            featured_cap: FEATURED_CAP,
            showcase_size: SHOWCASE_SIZE,
            image_max_bytes: IMAGE_MAX_BYTES,
            pdf_max_bytes: PDF_MAX_BYTES,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            fallback_recipient: DEFAULT_NOTIFICATION_EMAIL.to_owned(),
            sender: "nao-responda@ampa.org.br".to_owned(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false, env_filter: None }
    }
}
