//! Explicit work stack with eager/deferred ordering.
//!
//! Uses a `VecDeque` so both ends are O(1): the back is the retrieval end,
//! indexed items are appended there, and unindexed items are parked at the
//! front where they surface only after every indexed item is exhausted.

use std::collections::VecDeque;

use crate::choice::ChoiceSetV1;

/// One unit of pending work: a partial plan and the piece it decides next.
///
/// The not-yet-decided choice list is `current` followed by the caller's
/// untouched choice sets for pieces `piece + 1 ..`. Only `current` can have
/// cleared slots, so the tail is never copied until a continuation reaches it.
#[derive(Debug, Clone)]
pub struct WorkItemV1<P, E> {
    /// Accumulated plan for pieces `0 .. piece`.
    pub plan: P,
    /// Index of the piece `current` belongs to.
    pub piece: usize,
    /// Choice set for `piece`, possibly with slots already consumed.
    pub current: ChoiceSetV1<E>,
    /// Still walking the first piece's diagonal.
    pub diagonal: bool,
    /// Slot hint for `current`; `None` means scan from slot 0.
    pub preferred: Option<usize>,
}

/// Where the ordering policy placed a sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingPlacementV1 {
    /// Appended at the retrieval end (depth-first).
    Eager { preferred: usize },
    /// Parked at the far end until no indexed item remains.
    Deferred,
}

/// Preferred index for a sibling that retries the same piece.
///
/// During the diagonal phase the hint walks one slot to the right while a
/// slot remains to its right; otherwise the sibling falls back to scanning.
#[must_use]
pub fn sibling_preference(
    diagonal: bool,
    previous: Option<usize>,
    piece_len: usize,
) -> Option<usize> {
    match previous {
        Some(index) if diagonal && index + 1 < piece_len => Some(index + 1),
        _ => None,
    }
}

/// Work stack driven by the search loop.
pub struct WorkStackV1<P, E> {
    items: VecDeque<WorkItemV1<P, E>>,
    high_water: u64,
}

impl<P, E> WorkStackV1<P, E> {
    /// Create a new empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            high_water: 0,
        }
    }

    /// Push onto the retrieval end regardless of the item's index.
    pub fn push(&mut self, item: WorkItemV1<P, E>) {
        self.items.push_back(item);
        self.note_size();
    }

    /// Place an item according to the ordering policy.
    ///
    /// Items with a preferred index go on the retrieval end; items without one
    /// go on the opposite end.
    pub fn submit(&mut self, item: WorkItemV1<P, E>) -> SiblingPlacementV1 {
        let placement = match item.preferred {
            Some(preferred) => {
                self.items.push_back(item);
                SiblingPlacementV1::Eager { preferred }
            }
            None => {
                self.items.push_front(item);
                SiblingPlacementV1::Deferred
            }
        };
        self.note_size();
        placement
    }

    /// Pop from the retrieval end.
    #[must_use]
    pub fn pop(&mut self) -> Option<WorkItemV1<P, E>> {
        self.items.pop_back()
    }

    /// Current stack size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// High-water mark of stack size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    fn note_size(&mut self) {
        let size = self.items.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }
}

impl<P, E> Default for WorkStackV1<P, E> {
    fn default() -> Self {
        Self::new()
    }
}
