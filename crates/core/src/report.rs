use std::fmt::{self, Write as _};

use crate::model::{AnswerBook, CompletionFlags, Phase};

const TITLE: &str = "SaaS Weekend Report";
const NO_ANSWER: &str = "(none)";

/// Compiled plain-text report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report(String);

impl Report {
    pub const MIME_TYPE: &'static str = "text/plain";
    pub const DEFAULT_FILE_NAME: &'static str = "saas-weekend-report.txt";

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flatten every phase, flag, and answer into the report text.
///
/// Every phase and question of `phases` appears exactly once, in order,
/// whether or not it was answered. Answer keys outside `phases` are ignored.
#[must_use]
pub fn compile_report(phases: &[Phase], answers: &AnswerBook, flags: &CompletionFlags) -> Report {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push_str("\n\n");

    for (index, phase) in phases.iter().enumerate() {
        let fulfilled = if flags.is_complete(phase.name()) {
            "Yes"
        } else {
            "No"
        };
        // Writing into a `String` cannot fail.
        let _ = writeln!(out, "Step {}: {}", index + 1, phase.name());
        let _ = writeln!(out, "- Fulfilled: {fulfilled}");
        for question in phase.questions() {
            let answer = match answers.answer(phase.name(), question) {
                "" => NO_ANSWER,
                answer => answer,
            };
            let _ = writeln!(out, "  - {question}: {answer}");
        }
        out.push('\n');
    }

    Report(out)
}
