//! # Transparency
//!
//! Accountability PDFs published by the association: monthly and annual statements, bylaws,
//! activity reports and certificates. Files are stored under `transparencia_pdfs/`; the
//! record keeps the content path.

mod error;
mod report;

pub use crate::error::{TransparencyError, TransparencyErrorExt};
pub use crate::report::AccountabilityReport;

use ampa_database::Database;
use ampa_domain::config::AmpaConfig;
use ampa_domain::constants::{DOCUMENT_TITLE_MAX, TRANSPARENCY_PDFS};
use ampa_domain::{DocumentCategory, DocumentId, TransparencyDocument};
use ampa_kernel::validation::{max_chars, require};
use ampa_kernel::{FileUpload, Validator};
use ampa_storage::{NamespacedStorage, Storage};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug)]
struct TransparencyInner {
    db: Database,
    files: NamespacedStorage,
    validator: Validator,
}

/// Transparency document service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Transparency {
    inner: Arc<TransparencyInner>,
}

impl Transparency {
    /// # Errors
    /// Returns [`TransparencyError::Storage`] if the document namespace cannot be opened.
    pub fn new(db: Database, storage: &Storage, config: &AmpaConfig) -> Result<Self, TransparencyError> {
        Ok(Self {
            inner: Arc::new(TransparencyInner {
                db,
                files: storage.namespace(TRANSPARENCY_PDFS)?,
                validator: Validator::new(&config.limits),
            }),
        })
    }

    /// Validates and stores a PDF, then records it. The publication date defaults to today.
    #[instrument(skip(self, upload), fields(file = %upload.name, size = upload.data.len()))]
    pub async fn publish_document(
        &self,
        title: &str,
        category: DocumentCategory,
        published_on: Option<NaiveDate>,
        upload: FileUpload,
    ) -> Result<TransparencyDocument, TransparencyError> {
        let title = title.trim().to_owned();
        require("title", &title)?;
        max_chars("title", &title, DOCUMENT_TITLE_MAX)?;
        self.inner.validator.validate_pdf("file", &upload)?;

        let published_on = published_on.unwrap_or_else(|| Local::now().date_naive());
        let file = self.inner.files.save_available(&upload.name, &upload.data).await?;

        let inserted = self
            .inner
            .db
            .transaction(|tables| {
                let document = tables.documents.insert_with(|id| TransparencyDocument {
                    id,
                    title,
                    file: file.clone(),
                    category,
                    published_on,
                });
                Ok::<_, TransparencyError>(document.clone())
            })
            .await;

        match inserted {
            Ok(document) => {
                info!(id = %document.id, category = %document.category, file = %document.file, "Document published");
                Ok(document)
            },
            Err(err) => {
                self.discard_file(&file).await;
                Err(err)
            },
        }
    }

    /// Removes the record, then its file.
    #[instrument(skip(self))]
    pub async fn delete_document(&self, id: DocumentId) -> Result<TransparencyDocument, TransparencyError> {
        let document = self
            .inner
            .db
            .transaction(|tables| Ok::<_, TransparencyError>(tables.delete_document(id)?))
            .await?;

        self.discard_file(&document.file).await;
        info!(id = %document.id, "Document deleted");
        Ok(document)
    }

    pub fn get_document(&self, id: DocumentId) -> Result<TransparencyDocument, TransparencyError> {
        Ok(self.inner.db.read(|tables| tables.documents.require(id).cloned())?)
    }

    /// All documents, newest publication date first.
    pub fn list_documents(&self) -> Vec<TransparencyDocument> {
        let mut documents: Vec<TransparencyDocument> =
            self.inner.db.read(|tables| tables.documents.iter().cloned().collect());
        documents.sort_by(|a, b| b.published_on.cmp(&a.published_on).then(b.id.cmp(&a.id)));
        documents
    }

    /// The accountability page for an optional year and month selection.
    pub fn accountability_report(&self, year: Option<i32>, month: Option<u32>) -> AccountabilityReport {
        AccountabilityReport::build(&self.list_documents(), year, month)
    }

    async fn discard_file(&self, content_path: &str) {
        if let Err(err) = self.inner.files.delete_content(content_path).await {
            warn!(path = content_path, error = %err, kind = err.kind(), "Document file not removed");
        }
    }
}
