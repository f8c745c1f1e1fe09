#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod report_service;
pub mod session_store;

pub use app_services::AppServices;
pub use error::{AppServicesError, ReportError, SessionError};
pub use report_service::ReportService;
pub use session_store::{ANSWERS_KEY, FLAGS_KEY, SessionStore};
