#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod navigator;
pub mod report;

pub use error::Error;
pub use model::{AnswerBook, CompletionFlags, Phase, SessionState, ToolLink};
pub use navigator::{Navigator, Position};
pub use report::{Report, compile_report};
