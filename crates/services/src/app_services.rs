use std::path::PathBuf;
use std::sync::Arc;

use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::report_service::ReportService;
use crate::session_store::SessionStore;

/// Assembles app-facing services on top of a storage backend.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<SessionStore>,
    reports: Arc<ReportService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or loading the
    /// persisted session fails.
    pub async fn new_sqlite(
        db_url: &str,
        export_dir: impl Into<PathBuf>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, export_dir).await
    }

    /// Build services on an already constructed storage backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Session` if the persisted session cannot be loaded.
    pub async fn from_storage(
        storage: &Storage,
        export_dir: impl Into<PathBuf>,
    ) -> Result<Self, AppServicesError> {
        let session = Arc::new(SessionStore::open(Arc::clone(&storage.kv)).await?);
        let reports = Arc::new(ReportService::new(export_dir));
        Ok(Self { session, reports })
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn reports(&self) -> Arc<ReportService> {
        Arc::clone(&self.reports)
    }
}
