//! Search entry points and the branch-and-bound loop.

use tracing::{debug, trace};

use crate::choice::{select_slot, ChoiceSetV1, SlotExtractionV1};
use crate::contract::{FnComposer, PlanComposerV1, PlanObserverV1};
use crate::error::SearchError;
use crate::policy::SearchPolicyV1;
use crate::stack::{sibling_preference, SiblingPlacementV1, WorkItemV1, WorkStackV1};
use crate::trace::{ExpandEventV1, ExpandOutcomeV1, SearchTraceV1, TraceRecorder};

/// Result of a search execution.
#[derive(Debug)]
pub struct SearchResult<P, C> {
    /// The cheapest complete plan found (first found among equal costs).
    pub best_plan: P,
    /// Cost of `best_plan`.
    pub best_cost: C,
    /// Counters, and events if requested by the policy.
    pub trace: SearchTraceV1,
}

/// Find the cheapest way to complete `initial` by picking exactly one
/// candidate from every choice set, in choice-list order.
///
/// Runs a depth-first branch-and-bound over an explicit work stack. The first
/// dive follows the diagonal (slot `i` of every piece, for increasing `i`, on
/// the first piece's siblings) to establish a bound early; every later
/// partial plan whose cost already meets the bound is dropped. That cut is
/// sound only if the composer's cost is monotone under `combine`.
///
/// The observer sees every complete plan, in discovery order, together with
/// the best cost known before it. An empty choice list means `initial` is
/// already complete: it is costed, observed once, and returned.
///
/// # Errors
///
/// Pre-flight: [`SearchError::InvalidPolicy`] for a rejected policy and
/// [`SearchError::EmptyChoiceSet`] for a choice set without candidates.
/// In-loop invariant violations surface as the other [`SearchError`]
/// variants. Collaborator errors from `combine` or `cost` are returned
/// unchanged. Every error is converted into the composer's error type.
pub fn search<Z, O>(
    initial: Z::Plan,
    choices: Vec<ChoiceSetV1<Z::Candidate>>,
    composer: &mut Z,
    observer: &mut O,
    policy: &SearchPolicyV1,
) -> Result<SearchResult<Z::Plan, Z::Cost>, Z::Error>
where
    Z: PlanComposerV1,
    O: PlanObserverV1<Z::Plan, Z::Cost>,
{
    policy.validate()?;
    if let Some(piece) = choices.iter().position(|c| c.first_populated().is_none()) {
        return Err(SearchError::EmptyChoiceSet { piece }.into());
    }

    let mut trace = TraceRecorder::new(policy, choices.len());
    debug!(
        pieces = choices.len(),
        combinations = combination_count(&choices),
        diagonal_alignment = policy.diagonal_alignment,
        "starting plan search"
    );

    let Some(first) = choices.first() else {
        let cost = composer.cost(&initial)?;
        observer.on_plan(&initial, cost, None);
        trace.record_initial_plan();
        return Ok(SearchResult {
            best_plan: initial,
            best_cost: cost,
            trace: trace.finish(0),
        });
    };

    let mut stack = WorkStackV1::new();
    stack.push(WorkItemV1 {
        plan: initial,
        piece: 0,
        current: first.clone(),
        diagonal: true,
        preferred: policy.diagonal_alignment.then_some(0),
    });

    let mut best: Option<(Z::Plan, Z::Cost)> = None;

    while let Some(item) = stack.pop() {
        let WorkItemV1 {
            plan,
            piece,
            current,
            diagonal,
            preferred,
        } = item;
        let expansion_order = trace.next_order();

        let slot = select_slot(preferred, &current)?;
        let piece_len = current.len();
        let SlotExtractionV1 {
            candidate,
            remaining,
            exhausted,
        } = current.extract(slot)?;

        let extended = composer.combine(&plan, candidate)?;

        // Retry this piece later without the slot just taken. The sibling
        // owns the unextended plan; the extended one continues below.
        let sibling = if exhausted {
            None
        } else {
            let placement = stack.submit(WorkItemV1 {
                plan,
                piece,
                current: remaining,
                diagonal,
                preferred: sibling_preference(diagonal, preferred, piece_len),
            });
            if placement == SiblingPlacementV1::Deferred {
                trace!(piece, slot, "sibling deferred to scan phase");
            }
            Some(placement)
        };

        let outcome = match choices.get(piece + 1) {
            None => {
                let cost = composer.cost(&extended)?;
                let previous = best.as_ref().map(|(_, c)| *c);
                observer.on_plan(&extended, cost, previous);
                let improved = match previous {
                    Some(best_cost) => cost < best_cost,
                    None => true,
                };
                if improved {
                    debug!(expansion_order, "new best plan");
                    best = Some((extended, cost));
                }
                ExpandOutcomeV1::Completed { improved }
            }
            Some(next) => {
                let pruned = match &best {
                    Some((_, best_cost)) => composer.cost(&extended)? >= *best_cost,
                    None => false,
                };
                if pruned {
                    trace!(expansion_order, piece, "partial plan pruned");
                    ExpandOutcomeV1::Pruned
                } else {
                    stack.push(WorkItemV1 {
                        plan: extended,
                        piece: piece + 1,
                        current: next.clone(),
                        diagonal: false,
                        preferred,
                    });
                    ExpandOutcomeV1::Continued
                }
            }
        };

        trace.record(ExpandEventV1 {
            expansion_order,
            piece: piece as u64,
            slot: slot as u64,
            alternatives_remaining: !exhausted,
            sibling,
            outcome,
        });
    }

    let trace = trace.finish(stack.high_water());
    let Some((best_plan, best_cost)) = best else {
        return Err(SearchError::NoBestPlan.into());
    };
    debug!(
        expansions = trace.metadata.total_expansions,
        plans_completed = trace.metadata.plans_completed,
        branches_pruned = trace.metadata.branches_pruned,
        "plan search complete"
    );

    Ok(SearchResult {
        best_plan,
        best_cost,
        trace,
    })
}

/// Closure form of [`search`] with infallible collaborators and the default
/// policy. Returns the best plan and its cost.
///
/// Pass [`NoopObserver`](crate::contract::NoopObserver) when no observation
/// is needed.
///
/// # Errors
///
/// Any [`SearchError`] raised by [`search`].
pub fn find_best_plan<P, E, C, O>(
    initial: P,
    choices: Vec<ChoiceSetV1<E>>,
    mut combine: impl FnMut(&P, E) -> P,
    mut cost: impl FnMut(&P) -> C,
    observer: O,
) -> Result<(P, C), SearchError>
where
    E: Clone,
    C: Copy + PartialOrd,
    O: PlanObserverV1<P, C>,
{
    try_find_best_plan(
        initial,
        choices,
        |plan: &P, candidate: E| Ok::<P, SearchError>(combine(plan, candidate)),
        |plan: &P| Ok::<C, SearchError>(cost(plan)),
        observer,
    )
}

/// Closure form of [`search`] with fallible collaborators and the default
/// policy.
///
/// # Errors
///
/// Collaborator errors unchanged, and any [`SearchError`] converted via
/// `X: From<SearchError>`.
pub fn try_find_best_plan<P, E, C, X, O>(
    initial: P,
    choices: Vec<ChoiceSetV1<E>>,
    combine: impl FnMut(&P, E) -> Result<P, X>,
    cost: impl FnMut(&P) -> Result<C, X>,
    mut observer: O,
) -> Result<(P, C), X>
where
    E: Clone,
    C: Copy + PartialOrd,
    X: From<SearchError>,
    O: PlanObserverV1<P, C>,
{
    let mut composer = FnComposer::new(combine, cost);
    let result = search(
        initial,
        choices,
        &mut composer,
        &mut observer,
        &SearchPolicyV1::default(),
    )?;
    Ok((result.best_plan, result.best_cost))
}

/// Size of the full cartesian product, saturating at `u64::MAX`.
fn combination_count<E>(choices: &[ChoiceSetV1<E>]) -> u64 {
    choices
        .iter()
        .fold(1u64, |acc, c| acc.saturating_mul(c.populated() as u64))
}
