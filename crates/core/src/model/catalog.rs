use std::num::NonZeroUsize;

use url::Url;

//
// ─── TOOL LINKS ────────────────────────────────────────────────────────────────
//

/// An external reference shown alongside a phase.
///
/// Display-only; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolLink {
    label: &'static str,
    url: &'static str,
}

impl ToolLink {
    const fn new(label: &'static str, url: &'static str) -> Self {
        Self { label, url }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn url(&self) -> &'static str {
        self.url
    }

    /// Parse the link target.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the compiled-in URL is not valid.
    pub fn parsed_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.url)
    }
}

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// One stage of the guided workflow.
///
/// Phases only exist as entries of the compiled-in catalog, so holding a
/// `&Phase` is proof the phase is known.
#[derive(Debug, PartialEq, Eq)]
pub struct Phase {
    name: &'static str,
    questions: &'static [&'static str],
    tools: &'static [ToolLink],
}

impl Phase {
    const fn new(
        name: &'static str,
        questions: &'static [&'static str],
        tools: &'static [ToolLink],
    ) -> Self {
        Self {
            name,
            questions,
            tools,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Questions in display order.
    #[must_use]
    pub fn questions(&self) -> &'static [&'static str] {
        self.questions
    }

    #[must_use]
    pub fn tools(&self) -> &'static [ToolLink] {
        self.tools
    }

    #[must_use]
    pub fn has_question(&self, question: &str) -> bool {
        self.questions.contains(&question)
    }
}

const PHASE_TOTAL: usize = 7;

const PHASE_COUNT: NonZeroUsize = match NonZeroUsize::new(PHASE_TOTAL) {
    Some(count) => count,
    None => panic!("phase catalog cannot be empty"),
};

static PHASES: [Phase; PHASE_TOTAL] = [
    Phase::new(
        "Idea Generation",
        &[
            "What are 3 problems you’ve personally faced recently?",
            "Which communities (e.g., Reddit) have users facing similar issues?",
            "Can this be solved with software?",
        ],
        &[
            ToolLink::new("Reddit Search", "https://www.reddit.com/search"),
            ToolLink::new("Google Trends", "https://trends.google.com"),
            ToolLink::new("ChatGPT", "https://chat.openai.com"),
        ],
    ),
    Phase::new(
        "Competition Analysis",
        &[
            "Who is already solving this problem?",
            "How do they position their product?",
            "What do users like/dislike about them?",
        ],
        &[
            ToolLink::new("Google Search", "https://google.com"),
            ToolLink::new("Product Hunt", "https://www.producthunt.com"),
            ToolLink::new("Exploding Topics", "https://explodingtopics.com"),
        ],
    ),
    Phase::new(
        "Idea Roasting",
        &[
            "Why do you believe this idea will work?",
            "What makes this idea unique or different?",
            "Would someone pay for this today?",
        ],
        &[
            ToolLink::new("ChatGPT", "https://chat.openai.com"),
            ToolLink::new("Indie Hackers", "https://www.indiehackers.com"),
            ToolLink::new("Twitter (X)", "https://twitter.com"),
        ],
    ),
    Phase::new(
        "Planning",
        &[
            "List Must, Should, Could features.",
            "Write a 1-paragraph PRD (Product Requirements Document).",
            "What’s the user journey from signup to first success?",
        ],
        &[
            ToolLink::new("Notion", "https://notion.so"),
            ToolLink::new("Miro", "https://miro.com"),
            ToolLink::new("ChatGPT", "https://chat.openai.com"),
        ],
    ),
    Phase::new(
        "Landing Page",
        &[
            "What is your value proposition in one sentence?",
            "What is your primary CTA (Call to Action)?",
            "What style or design inspiration do you want to follow?",
        ],
        &[
            ToolLink::new("Framer", "https://framer.com"),
            ToolLink::new("Carrd", "https://carrd.co"),
            ToolLink::new("Dribbble", "https://dribbble.com"),
        ],
    ),
    Phase::new(
        "MVP Development",
        &[
            "Which features are you building this weekend only?",
            "Which no-code or code tools will you use?",
            "How will you test that the product actually works?",
        ],
        &[
            ToolLink::new("Softr", "https://softr.io"),
            ToolLink::new("Bubble", "https://bubble.io"),
            ToolLink::new("Tally Forms", "https://tally.so"),
        ],
    ),
    Phase::new(
        "Launch & Iteration",
        &[
            "Where will you post your MVP?",
            "What feedback do you want to collect?",
            "What is the next thing you’ll improve post-launch?",
        ],
        &[
            ToolLink::new("Product Hunt", "https://www.producthunt.com"),
            ToolLink::new("Reddit", "https://reddit.com"),
            ToolLink::new("Google Forms", "https://forms.google.com"),
        ],
    ),
];

/// The full phase catalog in workflow order.
#[must_use]
pub fn phases() -> &'static [Phase] {
    &PHASES
}

/// Number of phases in the catalog.
#[must_use]
pub fn phase_count() -> NonZeroUsize {
    PHASE_COUNT
}

/// Look up a phase by its 0-based position.
#[must_use]
pub fn phase_at(index: usize) -> Option<&'static Phase> {
    PHASES.get(index)
}

/// Look up a phase by its unique name.
#[must_use]
pub fn phase_named(name: &str) -> Option<&'static Phase> {
    PHASES.iter().find(|phase| phase.name == name)
}
