//! Collaborator contracts: plan composition, costing, and observation.

use std::marker::PhantomData;

use crate::error::SearchError;

/// Supplies the two operations the search threads plans through.
///
/// The search never inspects `Plan` or `Candidate`; it only hands them to
/// [`combine`](PlanComposerV1::combine) and [`cost`](PlanComposerV1::cost).
///
/// # Contract
///
/// - `combine` must be pure as far as the search can observe, and consistent
///   regardless of the order pieces are folded in.
/// - `cost` must be monotone: `cost(combine(p, e)) >= cost(p)` for every plan
///   `p` and candidate `e`. The pruning cut is only sound under this
///   assumption, and a violation yields a non-optimal answer with no error.
/// - `cost` must return values that are totally ordered among themselves.
///   An incomparable value (a NaN float) compares false both ways: it is
///   never pruned against, and once it is the best no later plan can
///   replace it, so the search returns it.
/// - Errors returned by either operation abort the search unchanged.
pub trait PlanComposerV1 {
    /// Accumulated plan value.
    type Plan;
    /// One candidate resolution for a piece.
    type Candidate: Clone;
    /// Plan cost. Lower is better.
    type Cost: Copy + PartialOrd;
    /// Failure type shared by the collaborator and the search itself.
    type Error: From<SearchError>;

    /// Merge one candidate into a plan, producing a new plan.
    ///
    /// # Errors
    ///
    /// Any collaborator failure; the search propagates it as-is.
    fn combine(
        &mut self,
        plan: &Self::Plan,
        candidate: Self::Candidate,
    ) -> Result<Self::Plan, Self::Error>;

    /// Cost of a (partial or complete) plan.
    ///
    /// # Errors
    ///
    /// Any collaborator failure; the search propagates it as-is.
    fn cost(&mut self, plan: &Self::Plan) -> Result<Self::Cost, Self::Error>;
}

/// Receives every complete plan the search produces.
///
/// Observation only: implementations must not influence the search. Closures
/// of shape `FnMut(&P, C, Option<C>)` implement this trait directly.
pub trait PlanObserverV1<P, C> {
    /// Called once per complete plan with its cost and the best cost known
    /// before this plan was considered.
    fn on_plan(&mut self, plan: &P, cost: C, previous_best: Option<C>);
}

impl<P, C, F> PlanObserverV1<P, C> for F
where
    F: FnMut(&P, C, Option<C>),
{
    fn on_plan(&mut self, plan: &P, cost: C, previous_best: Option<C>) {
        self(plan, cost, previous_best);
    }
}

/// Default observer: ignores every plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<P, C> PlanObserverV1<P, C> for NoopObserver {
    fn on_plan(&mut self, _plan: &P, _cost: C, _previous_best: Option<C>) {}
}

/// Adapts a pair of fallible closures into a [`PlanComposerV1`].
pub struct FnComposer<P, E, C, X, F, G> {
    combine: F,
    cost: G,
    _types: PhantomData<fn(&P, E) -> (C, X)>,
}

impl<P, E, C, X, F, G> FnComposer<P, E, C, X, F, G>
where
    F: FnMut(&P, E) -> Result<P, X>,
    G: FnMut(&P) -> Result<C, X>,
{
    /// Wrap `combine` and `cost`.
    #[must_use]
    pub fn new(combine: F, cost: G) -> Self {
        Self {
            combine,
            cost,
            _types: PhantomData,
        }
    }
}

impl<P, E, C, X, F, G> PlanComposerV1 for FnComposer<P, E, C, X, F, G>
where
    E: Clone,
    C: Copy + PartialOrd,
    X: From<SearchError>,
    F: FnMut(&P, E) -> Result<P, X>,
    G: FnMut(&P) -> Result<C, X>,
{
    type Plan = P;
    type Candidate = E;
    type Cost = C;
    type Error = X;

    fn combine(&mut self, plan: &P, candidate: E) -> Result<P, X> {
        (self.combine)(plan, candidate)
    }

    fn cost(&mut self, plan: &P) -> Result<C, X> {
        (self.cost)(plan)
    }
}
