use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Answers for a single phase, keyed by question text.
pub type PhaseAnswers = BTreeMap<String, String>;

/// Free-text answers keyed by phase name, then question text.
///
/// Each phase's map sits behind an `Arc` and is updated copy-on-write, so
/// editing one question never replaces the map of any other phase. Keys that
/// no longer match the catalog are carried along untouched.
///
/// Serializes as `{ "<phase>": { "<question>": "<answer>" } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerBook(BTreeMap<String, Arc<PhaseAnswers>>);

impl AnswerBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored answer, if any.
    #[must_use]
    pub fn get(&self, phase: &str, question: &str) -> Option<&str> {
        self.0
            .get(phase)
            .and_then(|answers| answers.get(question))
            .map(String::as_str)
    }

    /// The stored answer, or `""` when nothing was typed yet.
    #[must_use]
    pub fn answer(&self, phase: &str, question: &str) -> &str {
        self.get(phase, question).unwrap_or_default()
    }

    /// Replace the answer for `(phase, question)`.
    pub fn set(&mut self, phase: &str, question: &str, value: impl Into<String>) {
        let answers = self.0.entry(phase.to_owned()).or_default();
        Arc::make_mut(answers).insert(question.to_owned(), value.into());
    }

    /// Shared handle to one phase's answers.
    #[must_use]
    pub fn phase(&self, phase: &str) -> Option<&Arc<PhaseAnswers>> {
        self.0.get(phase)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|answers| answers.is_empty())
    }
}
