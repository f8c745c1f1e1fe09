use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("question {question:?} is not part of phase {phase:?}")]
    UnknownQuestion { phase: String, question: String },
}
