use crate::state::ImportState;
use std::time::Instant;

/// Walks one import through its states
///
/// Illegal transitions are rejected and logged rather than applied, so a
/// bug in the orchestrator shows up in the logs without aborting the import.
#[derive(Debug)]
pub struct StateTracker {
    url: String,
    state: ImportState,
    history: Vec<ImportState>,
    started: Instant,
}

impl StateTracker {
    /// Starts tracking an import in the `Pending` state
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: ImportState::Pending,
            history: vec![ImportState::Pending],
            started: Instant::now(),
        }
    }

    /// Starts tracking an import whose page body is already in hand
    pub fn fetched(url: impl Into<String>) -> Self {
        let mut tracker = Self::new(url);
        tracker.state = ImportState::Fetching;
        tracker.history.push(ImportState::Fetching);
        tracker
    }

    /// Current state
    pub fn state(&self) -> ImportState {
        self.state
    }

    /// Every state entered so far, in order
    pub fn history(&self) -> &[ImportState] {
        &self.history
    }

    /// Moves to `next` if the transition is legal
    ///
    /// Returns `false` and keeps the current state otherwise.
    pub fn advance(&mut self, next: ImportState) -> bool {
        if !self.state.can_transition_to(next) {
            tracing::error!(
                "Invalid import state transition for {}: {} -> {}",
                self.url,
                self.state,
                next
            );
            return false;
        }

        tracing::trace!("Import {}: {} -> {}", self.url, self.state, next);
        self.state = next;
        self.history.push(next);

        if next.is_terminal() {
            tracing::debug!(
                "Import {} finished as {} in {}ms",
                self.url,
                next,
                self.started.elapsed().as_millis()
            );
        }

        true
    }

    /// Moves to `Failed`, logging the reason
    pub fn fail(&mut self, reason: &dyn std::fmt::Display) -> bool {
        tracing::warn!("Import {} failed during {}: {}", self.url, self.state, reason);
        self.advance(ImportState::Failed)
    }
}
