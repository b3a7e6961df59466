//! Choice sets, slot selection, and candidate extraction.
//!
//! A [`ChoiceSetV1`] holds the mutually exclusive candidates for one piece of
//! a plan. Slots are positionally stable: clearing slot `i` never moves any
//! other slot, so an index recorded on one visit stays valid on the next.

use crate::error::SearchError;

/// The candidates for a single piece, as a fixed-length row of optional slots.
///
/// Construct from a `Vec<E>` (every slot populated). Slots only become empty
/// through [`ChoiceSetV1::extract`], which consumes the set and hands back the
/// cleared copy, so a set observed by one work item is never mutated under
/// another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSetV1<E> {
    slots: Vec<Option<E>>,
}

/// Result of taking one candidate out of a choice set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotExtractionV1<E> {
    /// The candidate that occupied the extracted slot.
    pub candidate: E,
    /// The same set with the extracted slot cleared.
    pub remaining: ChoiceSetV1<E>,
    /// True exactly when every other slot was already empty.
    pub exhausted: bool,
}

impl<E> ChoiceSetV1<E> {
    /// Build a set with one populated slot per candidate, in order.
    #[must_use]
    pub fn new(candidates: Vec<E>) -> Self {
        Self {
            slots: candidates.into_iter().map(Some).collect(),
        }
    }

    /// Number of slots, populated or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the set has no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of populated slots.
    #[must_use]
    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Index of the lowest populated slot.
    #[must_use]
    pub fn first_populated(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_some)
    }

    /// Whether `index` is in range and populated.
    #[must_use]
    pub fn is_populated(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    /// The candidate at `index`, if populated.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&E> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Take the candidate at `index`, clearing that slot.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoPopulatedSlot`] if the set has no populated
    /// slot at all, and [`SearchError::SlotNotPopulated`] if `index` is out
    /// of range or already empty.
    pub fn extract(mut self, index: usize) -> Result<SlotExtractionV1<E>, SearchError> {
        if self.first_populated().is_none() {
            return Err(SearchError::NoPopulatedSlot);
        }
        let candidate = self
            .slots
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(SearchError::SlotNotPopulated { index })?;
        let exhausted = self.first_populated().is_none();
        Ok(SlotExtractionV1 {
            candidate,
            remaining: self,
            exhausted,
        })
    }
}

impl<E> From<Vec<E>> for ChoiceSetV1<E> {
    fn from(candidates: Vec<E>) -> Self {
        Self::new(candidates)
    }
}

impl<E> FromIterator<E> for ChoiceSetV1<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().map(Some).collect(),
        }
    }
}

/// Resolve an optional preferred index to a concrete populated slot.
///
/// With no preference, or a preference past the end of this set, scans from
/// slot 0 and returns the first populated slot. An in-range preference is
/// returned unchanged and must name a populated slot.
///
/// # Errors
///
/// Returns [`SearchError::NoPopulatedSlot`] when a scan finds nothing, and
/// [`SearchError::SlotNotPopulated`] when an in-range preference names an
/// empty slot.
pub fn select_slot<E>(
    preferred: Option<usize>,
    choices: &ChoiceSetV1<E>,
) -> Result<usize, SearchError> {
    match preferred {
        Some(index) if index < choices.len() => {
            if choices.is_populated(index) {
                Ok(index)
            } else {
                Err(SearchError::SlotNotPopulated { index })
            }
        }
        _ => choices.first_populated().ok_or(SearchError::NoPopulatedSlot),
    }
}
