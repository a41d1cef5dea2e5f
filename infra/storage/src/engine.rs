//! Storage engine: the sandbox root plus the atomic file primitives namespaces build on.

use crate::builder::StorageBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance;
use crate::namespace::{NamespaceName, NamespacedStorage};
use crate::security;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Marker embedded in temporary file names; anything carrying it is disposable.
pub(crate) const TMP_MARKER: &str = ".ampatmp.";

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Compression {
    #[default]
    None,
    Lz4,
}

impl Compression {
    fn compress(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::None => data.to_vec(),
            Self::Lz4 => lz4_flex::compress_prepend_size(data),
        }
    }

    fn decompress(self, data: Vec<u8>) -> Result<Vec<u8>, StorageError> {
        match self {
            Self::None => Ok(data),
            Self::Lz4 => {
                lz4_flex::decompress_size_prepended(&data).context("Lz4 decompression failed")
            },
        }
    }
}

/// The internal shared state of a [`Storage`] instance.
#[derive(Debug)]
pub struct StorageInner {
    /// Canonicalized physical root; every resolved path must stay below it.
    pub(crate) root: PathBuf,
    pub(crate) tmp_counter: AtomicU64,
}

/// A thread-safe handle to the content storage root.
///
/// All access goes through a [`NamespacedStorage`] obtained from [`Storage::namespace`];
/// the handle itself is reference-counted and cheap to clone.
#[derive(Debug, Clone)]
pub struct Storage {
    pub(crate) inner: Arc<StorageInner>,
}

impl Deref for Storage {
    type Target = StorageInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Storage {
    #[must_use = "The storage engine is not initialized until you call .connect()"]
    pub fn builder() -> StorageBuilder {
        StorageBuilder::new()
    }

    /// Physical root directory of the sandbox.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns an uncompressed view over one content namespace.
    ///
    /// # Errors
    /// Returns [`StorageError::PathTraversalAttempt`] if the name is empty or contains
    /// characters other than ASCII alphanumerics and underscores.
    pub fn namespace<N>(&self, name: N) -> Result<NamespacedStorage, StorageError>
    where
        N: TryInto<NamespaceName, Error = StorageError>,
    {
        self.namespace_with(name, Compression::None)
    }

    /// Returns a view over one content namespace with the given compression.
    ///
    /// # Errors
    /// Same as [`Storage::namespace`].
    pub fn namespace_with<N>(
        &self,
        name: N,
        compression: Compression,
    ) -> Result<NamespacedStorage, StorageError>
    where
        N: TryInto<NamespaceName, Error = StorageError>,
    {
        Ok(NamespacedStorage::new(self.clone(), name.try_into()?, compression))
    }

    /// Resolves a relative path to a physical path inside the sandbox.
    ///
    /// # Errors
    /// Returns [`StorageError::PathTraversalAttempt`] if the path is absolute or escapes the
    /// root, and [`StorageError::Io`] if an existing ancestor cannot be canonicalized.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
        security::resolve_path(&self.root, path)
    }

    pub(crate) async fn read_file(
        &self,
        resolved: &Path,
        compression: Compression,
    ) -> Result<Vec<u8>, StorageError> {
        let data = match fs::read(resolved).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::FileNotFound {
                    message: resolved.display().to_string().into(),
                    context: None,
                });
            },
            Err(err) => {
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", resolved.display()).into()),
                });
            },
        };

        compression.decompress(data)
    }

    /// Writes through a unique temp file, syncs it and renames it over the target.
    pub(crate) async fn write_file(
        &self,
        resolved: &Path,
        data: &[u8],
        compression: Compression,
    ) -> Result<(), StorageError> {
        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create directory for {}", resolved.display()))?;
        }

        let temp = self.tmp_path(resolved);
        let payload = compression.compress(data);

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&payload).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, resolved).await {
            if err.kind() != std::io::ErrorKind::AlreadyExists {
                let _ = fs::remove_file(&temp).await;
                return Err(StorageError::Io {
                    source: err,
                    context: Some(
                        format!("Atomic swap failed: {} -> {}", temp.display(), resolved.display())
                            .into(),
                    ),
                });
            }
            // Platforms without atomic replace: remove, then rename.
            fs::remove_file(resolved)
                .await
                .context(format!("Failed to replace existing file: {}", resolved.display()))?;
            fs::rename(&temp, resolved).await.context(format!(
                "Atomic swap failed: {} -> {}",
                temp.display(),
                resolved.display()
            ))?;
        }

        if let Some(parent) = resolved.parent() {
            sync_dir(parent).await;
        }

        debug!(path = %resolved.display(), bytes = data.len(), "File saved atomically");
        Ok(())
    }

    /// Creates `resolved` holding `data` unless a file of that name already exists.
    ///
    /// Returns `Ok(false)` without touching the existing file when the name is taken. The
    /// name is claimed by the `create_new` open, so concurrent callers never share it.
    pub(crate) async fn create_file(
        &self,
        resolved: &Path,
        data: &[u8],
        compression: Compression,
    ) -> Result<bool, StorageError> {
        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create directory for {}", resolved.display()))?;
        }

        let mut file = match fs::OpenOptions::new().create_new(true).write(true).open(resolved).await {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
            Err(err) => {
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Create failed: {}", resolved.display()).into()),
                });
            },
        };

        let payload = compression.compress(data);
        let written = async {
            file.write_all(&payload).await?;
            file.sync_all().await
        }
        .await;
        drop(file);

        if let Err(err) = written {
            let _ = fs::remove_file(resolved).await;
            return Err(StorageError::Io {
                source: err,
                context: Some(format!("Write failed: {}", resolved.display()).into()),
            });
        }

        if let Some(parent) = resolved.parent() {
            sync_dir(parent).await;
        }

        debug!(path = %resolved.display(), bytes = data.len(), "File created");
        Ok(true)
    }

    pub(crate) async fn delete_file(&self, resolved: &Path) -> Result<(), StorageError> {
        match fs::remove_file(resolved).await {
            Ok(()) => {
                debug!(path = %resolved.display(), "File deleted");
                Ok(())
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::FileNotFound {
                    message: resolved.display().to_string().into(),
                    context: None,
                })
            },
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Failed to delete: {}", resolved.display()).into()),
            }),
        }
    }

    /// Removes temp files older than five minutes left behind by interrupted writes and
    /// returns how many were deleted.
    pub async fn purge_tmp(&self) -> usize {
        maintenance::purge_tmp(&self.root).await.removed
    }

    fn tmp_path(&self, target: &Path) -> PathBuf {
        let counter = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("content");
        target.with_file_name(format!("{file_name}{TMP_MARKER}{counter}"))
    }
}

async fn sync_dir(path: &Path) {
    match fs::File::open(path).await {
        Ok(dir) => {
            if let Err(err) = dir.sync_all().await {
                tracing::warn!(path = %path.display(), error = %err, "Directory sync failed");
            }
        },
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Directory open failed");
        },
    }
}
