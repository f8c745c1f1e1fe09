use weekend_core::model::{Phase, SessionState, ToolLink, phase_at, phases};
use weekend_core::navigator::Navigator;
use weekend_core::report::{Report, compile_report};

use crate::views::ViewError;

/// User actions the wizard view reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WizardIntent {
    Answer {
        question: &'static str,
        value: String,
    },
    SetComplete(bool),
    Advance,
    EnterPreview,
    ExitPreview,
    Download,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepAction {
    Next,
    Preview,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub question: &'static str,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepVm {
    pub phase: &'static Phase,
    pub heading: String,
    pub questions: Vec<QuestionVm>,
    pub tools: &'static [ToolLink],
    pub complete: bool,
    pub action: StepAction,
}

/// Local copy of the session plus the navigation position.
///
/// Edits land here first so inputs re-render immediately; the `SessionStore`
/// persists them in the background.
#[derive(Clone, Debug, PartialEq)]
pub struct WizardVm {
    navigator: Navigator,
    state: SessionState,
}

impl WizardVm {
    #[must_use]
    pub fn new(state: SessionState) -> Self {
        Self {
            navigator: Navigator::for_catalog(),
            state,
        }
    }

    #[must_use]
    pub fn with_navigator(mut self, navigator: Navigator) -> Self {
        self.navigator = navigator;
        self
    }

    #[must_use]
    pub fn navigator(&self) -> Navigator {
        self.navigator
    }

    #[must_use]
    pub fn is_previewing(&self) -> bool {
        self.navigator.is_previewing()
    }

    #[must_use]
    pub fn current_phase(&self) -> Option<&'static Phase> {
        self.navigator.step().and_then(phase_at)
    }

    #[must_use]
    pub fn step(&self) -> Option<StepVm> {
        let index = self.navigator.step()?;
        let phase = phase_at(index)?;
        let questions = phase
            .questions()
            .iter()
            .copied()
            .map(|question| QuestionVm {
                question,
                answer: self.state.answer(phase, question).to_owned(),
            })
            .collect();
        let action = if self.navigator.can_advance() {
            StepAction::Next
        } else {
            StepAction::Preview
        };

        Some(StepVm {
            phase,
            heading: format!("Step {}: {}", index + 1, phase.name()),
            questions,
            tools: phase.tools(),
            complete: self.state.is_complete(phase),
            action,
        })
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if there is no current phase or the
    /// question does not belong to it.
    pub fn set_answer(&mut self, question: &str, value: String) -> Result<(), ViewError> {
        let phase = self.current_phase().ok_or(ViewError::Unknown)?;
        self.state
            .set_answer(phase, question, value)
            .map_err(|_| ViewError::Unknown)
    }

    pub fn set_complete(&mut self, complete: bool) {
        if let Some(phase) = self.current_phase() {
            self.state.set_complete(phase, complete);
        }
    }

    pub fn advance(&mut self) -> bool {
        self.navigator.advance()
    }

    pub fn enter_preview(&mut self) -> bool {
        self.navigator.enter_preview()
    }

    pub fn exit_preview(&mut self) -> bool {
        self.navigator.exit_preview()
    }

    #[must_use]
    pub fn report(&self) -> Report {
        compile_report(phases(), self.state.answers(), self.state.flags())
    }
}
