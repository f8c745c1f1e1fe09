use std::num::NonZeroUsize;

use crate::model::Phase;

//
// ─── POSITION ──────────────────────────────────────────────────────────────────
//

/// Where the user is in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Filling in the phase at this 0-based index.
    Step(usize),
    /// Looking at the compiled report.
    Preview,
}

//
// ─── NAVIGATOR ─────────────────────────────────────────────────────────────────
//

/// Forward-only walk through the phases, ending in a report preview.
///
/// The only way back is leaving the preview, which lands on the last phase.
/// Disallowed transitions are no-ops and report `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    len: NonZeroUsize,
    position: Position,
}

impl Navigator {
    /// Start at the first of `len` phases.
    #[must_use]
    pub fn new(len: NonZeroUsize) -> Self {
        Self {
            len,
            position: Position::Step(0),
        }
    }

    /// Navigator over the compiled-in phase catalog.
    #[must_use]
    pub fn for_catalog() -> Self {
        Self::new(crate::model::phase_count())
    }

    /// Navigator for a phase list. Returns `None` for an empty list.
    #[must_use]
    pub fn for_phases(phases: &[Phase]) -> Option<Self> {
        NonZeroUsize::new(phases.len()).map(Self::new)
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Index of the phase currently shown, or `None` while previewing.
    #[must_use]
    pub fn step(&self) -> Option<usize> {
        match self.position {
            Position::Step(index) => Some(index),
            Position::Preview => None,
        }
    }

    #[must_use]
    pub fn phase_count(&self) -> usize {
        self.len.get()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.len.get() - 1
    }

    #[must_use]
    pub fn is_previewing(&self) -> bool {
        self.position == Position::Preview
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        matches!(self.position, Position::Step(index) if index < self.last_index())
    }

    #[must_use]
    pub fn can_enter_preview(&self) -> bool {
        self.position == Position::Step(self.last_index())
    }

    /// Move to the next phase.
    pub fn advance(&mut self) -> bool {
        match self.position {
            Position::Step(index) if index < self.last_index() => {
                self.position = Position::Step(index + 1);
                true
            }
            _ => false,
        }
    }

    /// Switch to the report preview. Only allowed from the last phase.
    pub fn enter_preview(&mut self) -> bool {
        if !self.can_enter_preview() {
            return false;
        }
        self.position = Position::Preview;
        true
    }

    /// Leave the preview and return to the last phase.
    pub fn exit_preview(&mut self) -> bool {
        if !self.is_previewing() {
            return false;
        }
        self.position = Position::Step(self.last_index());
        true
    }
}
