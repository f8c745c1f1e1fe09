mod answers;
mod catalog;
mod flags;
mod session;

pub use answers::{AnswerBook, PhaseAnswers};
pub use catalog::{Phase, ToolLink, phase_at, phase_count, phase_named, phases};
pub use flags::CompletionFlags;
pub use session::SessionState;
