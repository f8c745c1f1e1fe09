use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-phase "done" markers keyed by phase name.
///
/// An absent entry means not complete. Serializes as `{ "<phase>": bool }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionFlags(BTreeMap<String, bool>);

impl CompletionFlags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_complete(&self, phase: &str) -> bool {
        self.0.get(phase).copied().unwrap_or(false)
    }

    pub fn set(&mut self, phase: &str, complete: bool) {
        self.0.insert(phase.to_owned(), complete);
    }

    /// Number of phases currently marked complete.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.0.values().filter(|done| **done).count()
    }
}
