//! Search policy types.

use crate::error::SearchError;

/// Search configuration.
///
/// None of these options changes the answer: the best plan and its cost are
/// the same under every valid policy. They only change traversal order and
/// how much of the run is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Start on the diagonal (same relative slot across pieces) before
    /// falling back to scanning. Default: `true`.
    pub diagonal_alignment: bool,
    /// Whether per-expansion events are recorded. Default: `Off`.
    pub trace: TraceModeV1,
    /// Cap on recorded events; later events are dropped and flagged.
    pub max_trace_events: u64,
}

impl SearchPolicyV1 {
    /// Policy that records every expansion event up to the default cap.
    #[must_use]
    pub fn with_events() -> Self {
        Self {
            trace: TraceModeV1::Events,
            ..Self::default()
        }
    }

    /// Validate option combinations before a search starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if event recording is requested
    /// with a zero event cap.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.trace == TraceModeV1::Events && self.max_trace_events == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "TraceModeV1::Events requires max_trace_events > 0".into(),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            diagonal_alignment: true,
            trace: TraceModeV1::Off,
            max_trace_events: 10_000,
        }
    }
}

/// How much of a run is written to the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceModeV1 {
    /// Aggregate counters only.
    Off,
    /// Counters plus one event per popped work item.
    Events,
}
