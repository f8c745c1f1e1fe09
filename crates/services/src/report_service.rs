use std::fs;
use std::path::{Path, PathBuf};

use weekend_core::model::{SessionState, phases};
use weekend_core::report::{Report, compile_report};

use crate::error::ReportError;

/// Compiles the session into a report and writes it out for the user.
#[derive(Clone, Debug)]
pub struct ReportService {
    export_dir: PathBuf,
}

impl ReportService {
    #[must_use]
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    #[must_use]
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Compile the report for the full phase catalog.
    #[must_use]
    pub fn compile(&self, state: &SessionState) -> Report {
        compile_report(phases(), state.answers(), state.flags())
    }

    /// Write `report` as `saas-weekend-report.txt` into the export directory.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Export` if the directory or file cannot be written.
    pub fn export(&self, report: &Report) -> Result<PathBuf, ReportError> {
        export_to(report, &self.export_dir.join(Report::DEFAULT_FILE_NAME))
    }
}

/// Write `report` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns `ReportError::Export` on any I/O failure.
pub fn export_to(report: &Report, path: &Path) -> Result<PathBuf, ReportError> {
    let to_err = |source| ReportError::Export {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    fs::write(path, report.as_bytes()).map_err(to_err)?;
    tracing::info!(path = %path.display(), bytes = report.as_bytes().len(), "report exported");
    Ok(path.to_path_buf())
}
