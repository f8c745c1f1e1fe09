//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `SessionStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("stored {key} blob is not valid JSON")]
    Malformed {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode {key} blob")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Catalog(#[from] weekend_core::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ReportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    #[error("could not write report to {path}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
