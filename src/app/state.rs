use crate::catalog::{Design, MatchResult};

/// Per-design pitch flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PitchFlow {
    #[default]
    Idle,
    Loading,
    Done(String),
    Errored(String),
}

impl PitchFlow {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Single-slot match flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MatchFlow {
    #[default]
    Idle,
    Analyzing,
    Done(MatchOutcome),
    Errored(String),
}

impl MatchFlow {
    pub fn is_analyzing(&self) -> bool {
        matches!(self, Self::Analyzing)
    }
}

/// A validated match together with the design it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub result: MatchResult,
    pub design: Design,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchSource {
    Cached,
    Generated,
}

/// Result of a pitch request: the design carrying its pitch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchOutcome {
    pub design: Design,
    pub source: PitchSource,
}

impl PitchOutcome {
    pub fn pitch(&self) -> &str {
        self.design.pitch.as_deref().unwrap_or_default()
    }
}

/// Global, single-slot, dismissible error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBanner {
    message: Option<String>,
}

impl ErrorBanner {
    /// Replace whatever was showing.
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
