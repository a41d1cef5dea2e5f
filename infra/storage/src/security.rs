use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

/// Folds `.` and `..` lexically; a `..` that would climb above the root is rejected.
fn normalize_relative(path: &Path) -> Result<PathBuf, StorageError> {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::Normal(segment) => out.push(segment),
            Component::ParentDir => {
                if !out.pop() {
                    return Err(StorageError::PathTraversalAttempt {
                        message: path.display().to_string().into(),
                        context: Some("Path climbs above the storage root".into()),
                    });
                }
            },
            Component::RootDir | Component::Prefix(_) => {
                return Err(StorageError::PathTraversalAttempt {
                    message: path.display().to_string().into(),
                    context: Some("Absolute paths are not accepted".into()),
                });
            },
        }
    }

    Ok(out)
}

/// Joins a relative path onto `root` and checks the result stays inside it.
///
/// Existing targets are canonicalized, so symlinks pointing outside the root are caught.
/// Targets that do not exist yet are checked through their nearest existing ancestor.
pub(crate) fn resolve_path(root: &Path, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
    let path = path.as_ref();

    if path.is_absolute() {
        return Err(StorageError::PathTraversalAttempt {
            message: path.display().to_string().into(),
            context: Some("Absolute paths are not accepted".into()),
        });
    }

    let joined = root.join(normalize_relative(path)?);

    match joined.canonicalize() {
        Ok(canonical) => inside_root(root, canonical),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            check_ancestors(root, &joined)
        },
        Err(err) => Err(StorageError::Io {
            source: err,
            context: Some(format!("Failed to canonicalize {}", joined.display()).into()),
        }),
    }
}

fn inside_root(root: &Path, canonical: PathBuf) -> Result<PathBuf, StorageError> {
    if canonical.starts_with(root) {
        Ok(canonical)
    } else {
        Err(StorageError::PathTraversalAttempt {
            message: canonical.display().to_string().into(),
            context: Some("Resolved path lies outside the storage root".into()),
        })
    }
}

/// Walks up from a not-yet-existing path to the first ancestor on disk and verifies it.
fn check_ancestors(root: &Path, joined: &Path) -> Result<PathBuf, StorageError> {
    if !joined.starts_with(root) {
        return Err(StorageError::PathTraversalAttempt {
            message: joined.display().to_string().into(),
            context: Some("Path lies outside the storage root".into()),
        });
    }

    let mut current = Some(joined);

    while let Some(path) = current {
        if path == root {
            return Ok(joined.to_path_buf());
        }

        if path.exists() {
            return match path.canonicalize() {
                Ok(canonical) if canonical.starts_with(root) => Ok(joined.to_path_buf()),
                Ok(canonical) => Err(StorageError::PathTraversalAttempt {
                    message: canonical.display().to_string().into(),
                    context: Some("An existing ancestor links outside the storage root".into()),
                }),
                Err(err) => Err(StorageError::Io {
                    source: err,
                    context: Some("Failed to verify ancestor directory".into()),
                }),
            };
        }

        current = path.parent();
    }

    Err(StorageError::PathTraversalAttempt {
        message: joined.display().to_string().into(),
        context: Some("No ancestor inside the storage root".into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_folds_dots() {
        let out = normalize_relative(Path::new("img_pets/./a/../rex.png")).unwrap();
        assert_eq!(out, PathBuf::from("img_pets/rex.png"));
    }

    #[test]
    fn normalization_rejects_escape() {
        assert!(normalize_relative(Path::new("img_pets/../../etc")).is_err());
        assert!(normalize_relative(Path::new("/etc/passwd")).is_err());
    }
}
