use std::sync::Arc;

use services::{ReportService, SessionStore};

pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<SessionStore>;
    fn reports(&self) -> Arc<ReportService>;
}

#[derive(Clone)]
pub struct AppContext {
    session: Arc<SessionStore>,
    reports: Arc<ReportService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            reports: app.reports(),
        }
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
