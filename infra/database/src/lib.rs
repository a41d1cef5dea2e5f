//! # Entity Store
//!
//! All records of the platform live in one set of in-memory [`Tables`] guarded by a
//! reader/writer lock. Reads see a consistent view; writes run as transactions against a
//! working copy that replaces the live tables only when the closure succeeds, so a reader
//! can never observe half of a multi-row change (an adoption without its pet status update,
//! say).
//!
//! ## Durability
//! With a snapshot namespace configured, every commit is encoded with `postcard` and written
//! atomically through [`ampa_storage`] *before* it becomes visible. A failed write aborts the
//! transaction, so the file on disk and the live tables never disagree. Writers are
//! serialized, which also keeps snapshots in commit order.
//!
//! ## Example
//!
//! ```rust
//! use ampa_database::{Database, DatabaseError};
//! use ampa_domain::{Pet, PetDraft};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder().init().await?;
//!
//!     let pet = db
//!         .transaction(|tables| {
//!             let draft = PetDraft { name: "Rex".to_owned(), ..PetDraft::default() };
//!             Ok::<_, DatabaseError>(tables.pets.insert_with(|id| Pet::from_draft(id, draft)).id)
//!         })
//!         .await?;
//!
//!     assert_eq!(db.read(|tables| tables.pets.len()), 1);
//!     assert_eq!(pet.get(), 1);
//!     Ok(())
//! }
//! ```

mod error;
mod table;
mod tables;

pub use error::{DatabaseError, DatabaseErrorExt};
pub use table::{Record, Table};
pub use tables::Tables;

use ampa_storage::{NamespacedStorage, StorageError};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Where committed state is written.
#[derive(Debug)]
struct Snapshot {
    namespace: NamespacedStorage,
    file: String,
}

#[derive(Debug)]
struct DatabaseInner {
    tables: RwLock<Tables>,
    /// Held for the whole of a write transaction, including the snapshot write.
    writer: Mutex<()>,
    snapshot: Option<Snapshot>,
    version: AtomicU64,
}

/// Handle to the entity store. Cheap to clone; all clones share the same tables.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Runs `f` against a consistent view of the tables.
    ///
    /// The closure runs under a read lock; keep it short and never await inside it.
    pub fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        f(&self.inner.tables.read())
    }

    /// Runs `f` as one atomic unit of work.
    ///
    /// The closure mutates a private copy of the tables. On `Ok` the copy is persisted (when
    /// durable) and then swapped in; on `Err`, or if persisting fails, it is dropped and the
    /// store is left exactly as it was.
    pub async fn transaction<T, E>(&self, f: impl FnOnce(&mut Tables) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DatabaseError>,
    {
        let _writer = self.inner.writer.lock().await;

        let mut working = self.inner.tables.read().clone();
        let value = f(&mut working)?;

        let version = self.inner.version.load(Ordering::Acquire) + 1;
        if let Some(snapshot) = &self.inner.snapshot {
            let bytes = postcard::to_stdvec(&working).context("Encoding snapshot")?;
            snapshot
                .namespace
                .write(&snapshot.file, &bytes)
                .await
                .context(format!("Writing snapshot version {version}"))?;
            debug!(version, bytes = bytes.len(), "Snapshot written");
        }

        *self.inner.tables.write() = working;
        self.inner.version.store(version, Ordering::Release);
        Ok(value)
    }

    /// Number of transactions committed since the store was opened.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    /// Whether commits are written to a snapshot file.
    pub fn is_durable(&self) -> bool {
        self.inner.snapshot.is_some()
    }
}

/// Builder for a [`Database`]; without a snapshot the store is memory-only.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    snapshot: Option<Snapshot>,
}

impl DatabaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persists commits to `file` inside `namespace`, loading it on init when present.
    pub fn snapshot(mut self, namespace: NamespacedStorage, file: impl Into<String>) -> Self {
        self.snapshot = Some(Snapshot { namespace, file: file.into() });
        self
    }

    /// Opens the store, restoring the last snapshot if one exists.
    ///
    /// # Errors
    /// * [`DatabaseError::Storage`] if the snapshot exists but cannot be read.
    /// * [`DatabaseError::Codec`] if the snapshot is corrupt.
    #[instrument(skip(self), fields(durable = self.snapshot.is_some()))]
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let tables = match &self.snapshot {
            Some(snapshot) => load(snapshot).await?,
            None => Tables::default(),
        };

        info!(
            pets = tables.pets.len(),
            adopters = tables.adopters.len(),
            adoptions = tables.adoptions.len(),
            documents = tables.documents.len(),
            "Entity store ready"
        );

        Ok(Database {
            inner: Arc::new(DatabaseInner {
                tables: RwLock::new(tables),
                writer: Mutex::new(()),
                snapshot: self.snapshot,
                version: AtomicU64::new(0),
            }),
        })
    }
}

async fn load(snapshot: &Snapshot) -> Result<Tables, DatabaseError> {
    match snapshot.namespace.read(&snapshot.file).await {
        Ok(bytes) => {
            let tables = postcard::from_bytes(&bytes).context("Decoding snapshot")?;
            info!(file = %snapshot.file, bytes = bytes.len(), "Snapshot restored");
            Ok(tables)
        },
        Err(StorageError::FileNotFound { .. }) => {
            info!(file = %snapshot.file, "No snapshot yet, starting empty");
            Ok(Tables::default())
        },
        Err(err) => Err(DatabaseError::Storage { source: err, context: Some("Loading snapshot".into()) }),
    }
}
