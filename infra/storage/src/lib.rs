//! Sandboxed content storage for uploaded media and the entity snapshot.
//!
//! Files live under one root directory and are addressed by *content paths* of the form
//! `<namespace>/<file name>` (for example `img_pets/rex.png` or `transparencia_pdfs/2024-01.pdf`),
//! which is exactly what records persist and what a static file server exposes.
//!
//! # Core Features
//!
//! - **Sandbox Security**: Path traversal protection using lexical normalization plus physical
//!   canonicalization of existing ancestors.
//! - **Atomic Writes**: Unique temp file + `fsync` + `rename`, so readers never see a torn file.
//! - **Collision-free Uploads**: [`NamespacedStorage::save_available`] keeps the submitted name
//!   when free and appends a short random suffix otherwise.
//! - **Optional Compression**: LZ4 per namespace, used for the snapshot and never for media.
//! - **Self-Healing**: Orphaned temp files from crashed writes are purged on connect.
//!
//! # Examples
//!
//! ```rust
//! use ampa_storage::{Storage, StorageError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     # let root = tmp.path().join("data");
//!     let storage = Storage::builder().root(&root).create(true).connect().await?;
//!
//!     let photos = storage.namespace("img_pets")?;
//!     let path = photos.save_available("rex.png", b"\x89PNG").await?;
//!     assert_eq!(path, "img_pets/rex.png");
//!
//!     // A second upload with the same name gets a distinct content path.
//!     let other = photos.save_available("rex.png", b"\x89PNG").await?;
//!     assert_ne!(path, other);
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;
mod namespace;
mod security;

pub use builder::StorageBuilder;
pub use engine::{Compression, Storage};
pub use error::{StorageError, StorageErrorExt};
pub use namespace::{NamespaceName, NamespacedStorage};
