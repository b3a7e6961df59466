//! Typed search errors.
//!
//! Every variant is a contract violation by the caller (a malformed policy or
//! choice list) or a broken internal invariant. None of them is transient:
//! there is no retry path, and a search that reports one produced no result.

/// Typed failure for plan search.
///
/// `InvalidPolicy` and `EmptyChoiceSet` are raised pre-flight, before any work
/// item is popped. The remaining variants are raised from inside the loop and
/// indicate a choice set reached the selector or extractor in a state the
/// search never produces from a well-formed choice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The policy combines options that cannot be honored.
    InvalidPolicy { detail: String },
    /// The caller supplied a choice set with no populated slot.
    EmptyChoiceSet { piece: usize },
    /// A choice set with no populated slot reached slot selection or extraction.
    NoPopulatedSlot,
    /// A preferred or extracted slot index names an empty slot.
    SlotNotPopulated { index: usize },
    /// The work stack drained without recording any complete plan.
    NoBestPlan,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::EmptyChoiceSet { piece } => {
                write!(f, "choice set for piece {piece} has no populated slot")
            }
            Self::NoPopulatedSlot => write!(f, "choice set has no populated slot"),
            Self::SlotNotPopulated { index } => {
                write!(f, "slot {index} is not populated")
            }
            Self::NoBestPlan => write!(f, "search finished without a complete plan"),
        }
    }
}

impl std::error::Error for SearchError {}
