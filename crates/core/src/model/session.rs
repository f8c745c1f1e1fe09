use crate::error::Error;
use crate::model::answers::AnswerBook;
use crate::model::catalog::Phase;
use crate::model::flags::CompletionFlags;

/// Everything the user has entered: answers plus completion flags.
///
/// Mutations go through catalog phases and reject questions the phase does
/// not ask, so the application never creates orphan keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    answers: AnswerBook,
    flags: CompletionFlags,
}

impl SessionState {
    #[must_use]
    pub fn new(answers: AnswerBook, flags: CompletionFlags) -> Self {
        Self { answers, flags }
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerBook {
        &self.answers
    }

    #[must_use]
    pub fn flags(&self) -> &CompletionFlags {
        &self.flags
    }

    #[must_use]
    pub fn answer(&self, phase: &Phase, question: &str) -> &str {
        self.answers.answer(phase.name(), question)
    }

    /// # Errors
    ///
    /// Returns `Error::UnknownQuestion` if `question` is not part of `phase`.
    pub fn set_answer(
        &mut self,
        phase: &Phase,
        question: &str,
        value: impl Into<String>,
    ) -> Result<(), Error> {
        if !phase.has_question(question) {
            return Err(Error::UnknownQuestion {
                phase: phase.name().to_owned(),
                question: question.to_owned(),
            });
        }
        self.answers.set(phase.name(), question, value);
        Ok(())
    }

    #[must_use]
    pub fn is_complete(&self, phase: &Phase) -> bool {
        self.flags.is_complete(phase.name())
    }

    pub fn set_complete(&mut self, phase: &Phase, complete: bool) {
        self.flags.set(phase.name(), complete);
    }
}
