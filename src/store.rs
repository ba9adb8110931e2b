//! Application state store.
//!
//! [`BriefStore`] holds the client-side cache of what the user is looking
//! at (the brief list, plus one brief with its sections and documents) and
//! orchestrates the API call sequences that keep it filled.
//!
//! # Failure policy
//!
//! | Action | On failure |
//! |--------|------------|
//! | `fetch_briefs` | record message in `error`, return normally |
//! | `fetch_brief` | record message, return [`LoadReport::Failed`] |
//! | `create_brief` / `update_brief` / `delete_brief` | record message and return the error |
//! | `fetch_sections` / `fetch_documents` | log only; state left as it was |
//! | `update_section` / `upload_document` / `delete_document` / `export_brief` | log and return the error |
//!
//! # Concurrency
//!
//! The store is a cheap `Clone` handle over one shared state cell, so
//! several actions may run at once. The lock is only taken to read or
//! write state, never across a request: two actions racing on the same
//! field leave whichever response resolved last. There is no version check.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::api::{DEFAULT_EXPORT_FORMAT, DEFAULT_LIMIT};
use crate::http::{ApiClient, ApiError};
use crate::models::{
    Brief, BriefChanges, BriefStatus, Document, NewBrief, Section, SectionChanges, Upload,
};

/// Everything the store holds. Obtain a copy with [`BriefStore::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub briefs: Vec<Brief>,
    pub current_brief: Option<Brief>,
    pub current_sections: Vec<Section>,
    pub current_documents: Vec<Document>,
    pub loading: bool,
    pub error: Option<String>,
}

impl StoreState {
    pub fn briefs_with_status(&self, status: BriefStatus) -> Vec<&Brief> {
        self.briefs.iter().filter(|b| b.status == status).collect()
    }

    /// Briefs that are `in_progress`.
    pub fn active_briefs(&self) -> Vec<&Brief> {
        self.briefs_with_status(BriefStatus::InProgress)
    }

    pub fn completed_briefs(&self) -> Vec<&Brief> {
        self.briefs_with_status(BriefStatus::Completed)
    }

    pub fn draft_briefs(&self) -> Vec<&Brief> {
        self.briefs_with_status(BriefStatus::Draft)
    }
}

/// Outcome of [`BriefStore::fetch_brief`].
///
/// Separates "the brief itself failed" from "the brief loaded but one of
/// its collections did not", which the store would otherwise only log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// Brief, sections and documents all loaded.
    Complete,
    /// The brief loaded; the named collections kept their previous contents.
    Partial {
        sections_error: Option<String>,
        documents_error: Option<String>,
    },
    /// The brief could not be fetched.
    Failed(String),
}

impl LoadReport {
    fn from_secondary(sections_error: Option<String>, documents_error: Option<String>) -> Self {
        if sections_error.is_none() && documents_error.is_none() {
            LoadReport::Complete
        } else {
            LoadReport::Partial {
                sections_error,
                documents_error,
            }
        }
    }

    pub fn brief_loaded(&self) -> bool {
        !matches!(self, LoadReport::Failed(_))
    }
}

/// Failure of [`BriefStore::export_brief`].
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to write export file at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File name an export is saved under: `brief_<id>.<format>`.
pub fn export_file_name(id: &str, format: &str) -> String {
    format!("brief_{}.{}", id, format)
}

/// Shared handle to the application state and its actions.
#[derive(Debug, Clone)]
pub struct BriefStore {
    api: ApiClient,
    state: Arc<RwLock<StoreState>>,
}

impl BriefStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(StoreState::default())),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Copy of the current state for rendering.
    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn finish(&self) {
        self.state.write().await.loading = false;
    }

    /// Log, record the message and end the loading phase.
    async fn fail(&self, action: &str, err: &ApiError) {
        tracing::error!("Error {}: {}", action, err);
        let mut state = self.state.write().await;
        state.error = Some(err.to_string());
        state.loading = false;
    }

    /// Replace the brief list, optionally filtered by status.
    pub async fn fetch_briefs(&self, status: Option<BriefStatus>) {
        self.begin().await;
        match self.api.briefs().list(status, 0, DEFAULT_LIMIT).await {
            Ok(briefs) => {
                let mut state = self.state.write().await;
                state.briefs = briefs;
                state.loading = false;
            }
            Err(e) => self.fail("fetching briefs", &e).await,
        }
    }

    /// Load one brief, then its sections, then its documents.
    pub async fn fetch_brief(&self, id: &str) -> LoadReport {
        self.begin().await;

        let brief = match self.api.briefs().get(id).await {
            Ok(brief) => brief,
            Err(e) => {
                self.fail("fetching brief", &e).await;
                return LoadReport::Failed(e.to_string());
            }
        };
        self.state.write().await.current_brief = Some(brief);

        let sections_error = self.fetch_sections(id).await.err().map(|e| e.to_string());
        let documents_error = self.fetch_documents(id).await.err().map(|e| e.to_string());

        self.finish().await;
        LoadReport::from_secondary(sections_error, documents_error)
    }

    /// Create a brief, make it current and load the sections the backend
    /// initialized for it.
    pub async fn create_brief(&self, data: &NewBrief) -> Result<Brief, ApiError> {
        self.begin().await;
        match self.api.briefs().create(data).await {
            Ok(brief) => {
                self.state.write().await.current_brief = Some(brief.clone());
                let _ = self.fetch_sections(&brief.id).await;
                self.finish().await;
                Ok(brief)
            }
            Err(e) => {
                self.fail("creating brief", &e).await;
                Err(e)
            }
        }
    }

    pub async fn update_brief(&self, id: &str, data: &BriefChanges) -> Result<Brief, ApiError> {
        self.begin().await;
        match self.api.briefs().update(id, data).await {
            Ok(brief) => {
                let mut state = self.state.write().await;
                state.current_brief = Some(brief.clone());
                state.loading = false;
                Ok(brief)
            }
            Err(e) => {
                self.fail("updating brief", &e).await;
                Err(e)
            }
        }
    }

    /// Delete a brief and drop exactly that id from the list.
    pub async fn delete_brief(&self, id: &str) -> Result<(), ApiError> {
        self.begin().await;
        match self.api.briefs().delete(id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.briefs.retain(|b| b.id != id);
                state.loading = false;
                Ok(())
            }
            Err(e) => {
                self.fail("deleting brief", &e).await;
                Err(e)
            }
        }
    }

    /// Replace the current sections. Failures are logged and leave the
    /// previous sections in place.
    pub async fn fetch_sections(&self, brief_id: &str) -> Result<(), ApiError> {
        match self.api.sections().list_by_brief(brief_id).await {
            Ok(sections) => {
                self.state.write().await.current_sections = sections;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error fetching sections: {}", e);
                Err(e)
            }
        }
    }

    /// Replace the current documents. Failures are logged only.
    pub async fn fetch_documents(&self, brief_id: &str) -> Result<(), ApiError> {
        match self.api.documents().list_by_brief(brief_id).await {
            Ok(documents) => {
                self.state.write().await.current_documents = documents;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error fetching documents: {}", e);
                Err(e)
            }
        }
    }

    /// Update a section and patch it in place if it is currently loaded.
    /// A section that is not in the current list is not inserted.
    pub async fn update_section(
        &self,
        section_id: &str,
        data: &SectionChanges,
    ) -> Result<Section, ApiError> {
        match self.api.sections().update(section_id, data).await {
            Ok(section) => {
                let mut state = self.state.write().await;
                if let Some(slot) = state
                    .current_sections
                    .iter_mut()
                    .find(|s| s.id == section_id)
                {
                    *slot = section.clone();
                }
                Ok(section)
            }
            Err(e) => {
                tracing::error!("Error updating section: {}", e);
                Err(e)
            }
        }
    }

    /// Upload a file and append the new record to the current documents.
    pub async fn upload_document(
        &self,
        brief_id: &str,
        upload: Upload,
    ) -> Result<Document, ApiError> {
        match self.api.documents().upload(brief_id, upload).await {
            Ok(document) => {
                self.state
                    .write()
                    .await
                    .current_documents
                    .push(document.clone());
                Ok(document)
            }
            Err(e) => {
                tracing::error!("Error uploading document: {}", e);
                Err(e)
            }
        }
    }

    pub async fn delete_document(&self, document_id: &str) -> Result<(), ApiError> {
        match self.api.documents().delete(document_id).await {
            Ok(()) => {
                self.state
                    .write()
                    .await
                    .current_documents
                    .retain(|d| d.id != document_id);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error deleting document: {}", e);
                Err(e)
            }
        }
    }

    /// Download a brief export and save it as `brief_<id>.<format>` in
    /// `dir`. Returns the written path. State is not touched.
    pub async fn export_brief(
        &self,
        id: &str,
        format: Option<&str>,
        dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        let format = format.unwrap_or(DEFAULT_EXPORT_FORMAT);
        let bytes = match self.api.briefs().export(id, Some(format)).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Error exporting brief: {}", e);
                return Err(e.into());
            }
        };

        let path = dir.join(export_file_name(id, format));
        let written = match tokio::fs::create_dir_all(dir).await {
            Ok(()) => tokio::fs::write(&path, &bytes).await,
            Err(e) => Err(e),
        };
        if let Err(source) = written {
            tracing::error!("Error exporting brief: {}", source);
            return Err(ExportError::Write { path, source });
        }
        Ok(path)
    }
}
