use crate::engine::{Compression, Storage};
use crate::error::StorageError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Characters used for the suffix that disambiguates colliding upload names.
const SUFFIX_ALPHABET: [char; 36] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];
const SUFFIX_LEN: usize = 7;
const MAX_NAME_ATTEMPTS: usize = 16;

/// Validated namespace name: lowercase ASCII alphanumerics and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceName(pub String);

impl TryFrom<String> for NamespaceName {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, StorageError> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<&str> for NamespaceName {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, StorageError> {
        let name = value.to_lowercase();

        if name.is_empty() {
            return Err(StorageError::PathTraversalAttempt {
                message: "EMPTY".into(),
                context: Some("Namespace cannot be empty".into()),
            });
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(StorageError::PathTraversalAttempt {
                message: name.into(),
                context: Some("Namespace contains illegal characters".into()),
            });
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for NamespaceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scoped view of the storage root, one directory per content namespace.
///
/// Files are addressed either by bare file name (`rex.png`) or by the content path
/// records persist (`img_pets/rex.png`); the latter is checked to belong to this namespace.
#[derive(Debug, Clone)]
pub struct NamespacedStorage {
    storage: Storage,
    name: Arc<NamespaceName>,
    compression: Compression,
}

impl NamespacedStorage {
    pub(crate) fn new(storage: Storage, name: NamespaceName, compression: Compression) -> Self {
        Self { storage, name: Arc::new(name), compression }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name.0
    }

    /// Content path a record stores for `file_name`.
    #[must_use]
    pub fn content_path(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.name)
    }

    /// Resolves a file name of this namespace to its physical path.
    ///
    /// # Errors
    /// Returns [`StorageError::PathTraversalAttempt`] if the name escapes the namespace.
    pub fn resolve(&self, file_name: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
        let relative = Path::new(self.name()).join(file_name.as_ref());
        let resolved = self.storage.resolve(relative)?;
        let namespace_root = self.storage.root().join(self.name());
        if resolved.starts_with(&namespace_root) && resolved != namespace_root {
            Ok(resolved)
        } else {
            Err(StorageError::PathTraversalAttempt {
                message: resolved.display().to_string().into(),
                context: Some(format!("Path left namespace '{}'", self.name).into()),
            })
        }
    }

    /// Extracts the file name from a content path of this namespace.
    ///
    /// # Errors
    /// Returns [`StorageError::ForeignPath`] when the path names another namespace.
    pub fn file_name_of<'a>(&self, content_path: &'a str) -> Result<&'a str, StorageError> {
        content_path
            .strip_prefix(self.name())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|rest| !rest.is_empty())
            .ok_or_else(|| StorageError::ForeignPath {
                message: content_path.to_owned().into(),
                context: Some(format!("Expected a '{}/' path", self.name).into()),
            })
    }

    /// Reads a file, decompressing it when the namespace is compressed.
    ///
    /// # Errors
    /// Returns [`StorageError::FileNotFound`] if the file does not exist.
    pub async fn read(&self, file_name: impl AsRef<Path>) -> Result<Vec<u8>, StorageError> {
        let resolved = self.resolve(file_name)?;
        self.storage.read_file(&resolved, self.compression).await
    }

    /// Writes a file atomically, replacing any previous content.
    ///
    /// # Errors
    /// Returns [`StorageError::PathTraversalAttempt`] for names escaping the namespace and
    /// [`StorageError::Io`] on disk failures.
    pub async fn write(&self, file_name: impl AsRef<Path>, data: &[u8]) -> Result<(), StorageError> {
        let resolved = self.resolve(file_name)?;
        self.storage.write_file(&resolved, data, self.compression).await
    }

    /// # Errors
    /// Returns [`StorageError::FileNotFound`] if the file does not exist.
    pub async fn delete(&self, file_name: impl AsRef<Path>) -> Result<(), StorageError> {
        let resolved = self.resolve(file_name)?;
        self.storage.delete_file(&resolved).await
    }

    /// Deletes the file a record points at.
    ///
    /// # Errors
    /// Returns [`StorageError::ForeignPath`] for paths of another namespace and
    /// [`StorageError::FileNotFound`] if the file is already gone.
    pub async fn delete_content(&self, content_path: &str) -> Result<(), StorageError> {
        let file_name = self.file_name_of(content_path)?;
        self.delete(file_name).await
    }

    /// # Errors
    /// Returns an error only when path resolution fails.
    pub fn exists(&self, file_name: impl AsRef<Path>) -> Result<bool, StorageError> {
        Ok(self.resolve(file_name)?.exists())
    }

    /// Stores an upload under `file_name`, or under `stem_<suffix>.ext` when that name is
    /// already taken, and returns the content path to persist.
    ///
    /// # Errors
    /// Returns [`StorageError::PathTraversalAttempt`] if `file_name` is not a plain file
    /// name and [`StorageError::Io`] on disk failures or when no free name is found.
    pub async fn save_available(&self, file_name: &str, data: &[u8]) -> Result<String, StorageError> {
        let plain = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| *n == file_name)
            .ok_or_else(|| StorageError::PathTraversalAttempt {
                message: file_name.to_owned().into(),
                context: Some("Upload name must be a plain file name".into()),
            })?;

        let mut candidate = plain.to_owned();
        for _ in 0..MAX_NAME_ATTEMPTS {
            let resolved = self.resolve(&candidate)?;
            if self.storage.create_file(&resolved, data, self.compression).await? {
                return Ok(self.content_path(&candidate));
            }
            candidate = with_suffix(plain);
        }

        Err(StorageError::Io {
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("no free name derived from {plain}"),
            ),
            context: Some(format!("Namespace '{}'", self.name).into()),
        })
    }
}

fn with_suffix(file_name: &str) -> String {
    let suffix = nanoid::nanoid!(SUFFIX_LEN, &SUFFIX_ALPHABET);
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_{suffix}.{ext}"),
        _ => format!("{file_name}_{suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_names_are_restricted() {
        assert!(NamespaceName::try_from("img_pets").is_ok());
        assert_eq!(NamespaceName::try_from("IMG_Pets").unwrap().0, "img_pets");
        assert!(NamespaceName::try_from("").is_err());
        assert!(NamespaceName::try_from("img/pets").is_err());
        assert!(NamespaceName::try_from("..").is_err());
    }

    #[test]
    fn suffix_keeps_extension() {
        let renamed = with_suffix("rex.png");
        assert!(renamed.starts_with("rex_"));
        assert!(renamed.ends_with(".png"));
        assert_eq!(renamed.len(), "rex_.png".len() + SUFFIX_LEN);

        let bare = with_suffix("README");
        assert!(bare.starts_with("README_"));
    }
}
