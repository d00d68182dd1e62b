/// Import pipeline state definitions
///
/// One import walks through these states exactly once; there is no retry
/// transition.
use std::fmt;

/// Represents the current stage of a single import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportState {
    // ===== Active States =====
    /// URL accepted by the caller, not yet validated
    Pending,

    /// Page request in flight
    Fetching,

    /// Building the HTML document
    Parsing,

    /// Reading JSON-LD blocks
    ExtractingStructured,

    /// Filling remaining fields from selectors and meta tags
    ExtractingFallback,

    // ===== Terminal States =====
    /// Record assembled and returned
    Assembled,

    /// Validation or fetch failed
    Failed,
}

impl ImportState {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Assembled | Self::Failed)
    }

    /// Returns true if this is the successful terminal state
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Assembled)
    }

    /// Checks whether the pipeline may move from `self` to `next`
    ///
    /// `Failed` is only reachable before the page body is obtained: once
    /// HTML exists, extraction degrades instead of failing.
    pub fn can_transition_to(&self, next: ImportState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Pending, Self::Failed)
                | (Self::Fetching, Self::Parsing)
                | (Self::Fetching, Self::Failed)
                | (Self::Parsing, Self::ExtractingStructured)
                | (Self::ExtractingStructured, Self::ExtractingFallback)
                | (Self::ExtractingFallback, Self::Assembled)
        )
    }

    /// Snake-case name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::ExtractingStructured => "extracting_structured",
            Self::ExtractingFallback => "extracting_fallback",
            Self::Assembled => "assembled",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible states in pipeline order
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Pending,
            Self::Fetching,
            Self::Parsing,
            Self::ExtractingStructured,
            Self::ExtractingFallback,
            Self::Assembled,
            Self::Failed,
        ]
    }
}

impl fmt::Display for ImportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
