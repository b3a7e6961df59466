//! `SearchTraceV1`: audit trail of one search run.
//!
//! Aggregate counters are always kept. Per-expansion events are recorded only
//! under [`TraceModeV1::Events`](crate::policy::TraceModeV1::Events). Costs are
//! generic and never appear in the trace; it records decisions, not values.

use sha2::{Digest, Sha256};

use crate::policy::{SearchPolicyV1, TraceModeV1};
use crate::stack::SiblingPlacementV1;

/// Domain prefix for trace digests.
pub const DOMAIN_SEARCH_TRACE: &[u8] = b"PLANPICK::SEARCH_TRACE::V1\0";

/// The complete trace of a search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTraceV1 {
    /// Ordered expansion events (empty unless events were requested).
    pub events: Vec<ExpandEventV1>,
    /// Aggregate counters and policy echo.
    pub metadata: SearchTraceMetadataV1,
}

/// One popped work item and what became of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandEventV1 {
    /// Total order of stack pops.
    pub expansion_order: u64,
    /// Piece decided by this expansion.
    pub piece: u64,
    /// Slot taken from the piece's choice set.
    pub slot: u64,
    /// Whether untried slots remained after the extraction.
    pub alternatives_remaining: bool,
    /// Placement of the retry sibling, if one was queued.
    pub sibling: Option<SiblingPlacementV1>,
    /// What happened to the extended plan.
    pub outcome: ExpandOutcomeV1,
}

/// Fate of the plan extended during an expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcomeV1 {
    /// Every piece decided; `improved` if it became the new best.
    Completed { improved: bool },
    /// Partial cost already met or exceeded the best; branch dropped.
    Pruned,
    /// Continuation queued for the next piece.
    Continued,
}

/// Aggregate counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTraceMetadataV1 {
    pub piece_count: u64,
    pub total_expansions: u64,
    pub plans_completed: u64,
    pub improvements: u64,
    pub branches_pruned: u64,
    pub siblings_eager: u64,
    pub siblings_deferred: u64,
    pub stack_high_water: u64,
    /// Expansion that produced the final best plan (`None` for zero pieces).
    pub best_found_at: Option<u64>,
    /// True if events were dropped at `max_trace_events`.
    pub events_truncated: bool,

    // Policy echo
    pub trace_mode: TraceModeV1,
    pub diagonal_alignment: bool,
}

/// Collects events and counters while the loop runs.
pub(crate) struct TraceRecorder {
    events: Vec<ExpandEventV1>,
    metadata: SearchTraceMetadataV1,
    max_events: u64,
}

impl TraceRecorder {
    pub(crate) fn new(policy: &SearchPolicyV1, piece_count: usize) -> Self {
        Self {
            events: Vec::new(),
            metadata: SearchTraceMetadataV1 {
                piece_count: piece_count as u64,
                total_expansions: 0,
                plans_completed: 0,
                improvements: 0,
                branches_pruned: 0,
                siblings_eager: 0,
                siblings_deferred: 0,
                stack_high_water: 0,
                best_found_at: None,
                events_truncated: false,
                trace_mode: policy.trace,
                diagonal_alignment: policy.diagonal_alignment,
            },
            max_events: policy.max_trace_events,
        }
    }

    /// Expansion order the next recorded expansion will carry.
    pub(crate) fn next_order(&self) -> u64 {
        self.metadata.total_expansions
    }

    pub(crate) fn record(&mut self, event: ExpandEventV1) {
        let m = &mut self.metadata;
        m.total_expansions += 1;
        match event.sibling {
            Some(SiblingPlacementV1::Eager { .. }) => m.siblings_eager += 1,
            Some(SiblingPlacementV1::Deferred) => m.siblings_deferred += 1,
            None => {}
        }
        match event.outcome {
            ExpandOutcomeV1::Completed { improved } => {
                m.plans_completed += 1;
                if improved {
                    m.improvements += 1;
                    m.best_found_at = Some(event.expansion_order);
                }
            }
            ExpandOutcomeV1::Pruned => m.branches_pruned += 1,
            ExpandOutcomeV1::Continued => {}
        }

        if m.trace_mode == TraceModeV1::Events {
            if (self.events.len() as u64) < self.max_events {
                self.events.push(event);
            } else {
                m.events_truncated = true;
            }
        }
    }

    /// Count a complete plan that did not come from an expansion (zero pieces).
    pub(crate) fn record_initial_plan(&mut self) {
        self.metadata.plans_completed += 1;
        self.metadata.improvements += 1;
    }

    pub(crate) fn finish(mut self, stack_high_water: u64) -> SearchTraceV1 {
        self.metadata.stack_high_water = stack_high_water;
        SearchTraceV1 {
            events: self.events,
            metadata: self.metadata,
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchTraceV1 {
    /// Serialize the trace to canonical JSON bytes.
    ///
    /// Compact separators, object keys in sorted order (`serde_json`'s default
    /// map is ordered), integers only.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.to_json_value())
    }

    /// Content digest: `"sha256:<hex>"` over the domain prefix and the
    /// canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if serialization fails.
    pub fn digest(&self) -> Result<String, serde_json::Error> {
        let bytes = self.to_canonical_json_bytes()?;
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN_SEARCH_TRACE);
        hasher.update(&bytes);
        Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
    }

    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "events": self.events.iter().map(event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
        })
    }
}

fn event_to_json(e: &ExpandEventV1) -> serde_json::Value {
    serde_json::json!({
        "alternatives_remaining": e.alternatives_remaining,
        "expansion_order": e.expansion_order,
        "outcome": outcome_to_json(e.outcome),
        "piece": e.piece,
        "sibling": e.sibling.map(sibling_to_json),
        "slot": e.slot,
    })
}

fn outcome_to_json(o: ExpandOutcomeV1) -> serde_json::Value {
    match o {
        ExpandOutcomeV1::Completed { improved } => {
            serde_json::json!({"improved": improved, "type": "completed"})
        }
        ExpandOutcomeV1::Pruned => serde_json::json!({"type": "pruned"}),
        ExpandOutcomeV1::Continued => serde_json::json!({"type": "continued"}),
    }
}

fn sibling_to_json(s: SiblingPlacementV1) -> serde_json::Value {
    match s {
        SiblingPlacementV1::Eager { preferred } => {
            serde_json::json!({"preferred": preferred, "type": "eager"})
        }
        SiblingPlacementV1::Deferred => serde_json::json!({"type": "deferred"}),
    }
}

fn trace_mode_str(t: TraceModeV1) -> &'static str {
    match t {
        TraceModeV1::Off => "off",
        TraceModeV1::Events => "events",
    }
}

fn metadata_to_json(m: &SearchTraceMetadataV1) -> serde_json::Value {
    serde_json::json!({
        "best_found_at": m.best_found_at,
        "branches_pruned": m.branches_pruned,
        "diagonal_alignment": m.diagonal_alignment,
        "events_truncated": m.events_truncated,
        "improvements": m.improvements,
        "piece_count": m.piece_count,
        "plans_completed": m.plans_completed,
        "siblings_deferred": m.siblings_deferred,
        "siblings_eager": m.siblings_eager,
        "stack_high_water": m.stack_high_water,
        "total_expansions": m.total_expansions,
        "trace_mode": trace_mode_str(m.trace_mode),
    })
}
