//! Property tests: the search agrees with brute-force enumeration on every
//! instance small enough to enumerate, and its bookkeeping stays consistent.

use lock_tests::fixtures::{
    combinations, exhaustive_min, instance, CostModel, PickComposer, PickPlan,
};
use planpick_search::contract::NoopObserver;
use planpick_search::policy::SearchPolicyV1;
use planpick_search::search::{search, SearchResult};
use proptest::prelude::*;

/// Up to 5 pieces of up to 4 candidates each: at most 1024 complete plans.
fn arb_weights() -> impl Strategy<Value = Vec<Vec<u32>>> {
    prop::collection::vec(prop::collection::vec(0u32..20, 1..=4), 0..=5)
}

fn arb_model() -> impl Strategy<Value = CostModel> {
    prop_oneof![Just(CostModel::Sum), Just(CostModel::Max)]
}

fn run(
    model: CostModel,
    weights: &[Vec<u32>],
    policy: &SearchPolicyV1,
) -> SearchResult<PickPlan, u64> {
    search(
        PickPlan::default(),
        instance(weights),
        &mut PickComposer::new(model),
        &mut NoopObserver,
        policy,
    )
    .unwrap()
}

proptest! {
    /// The returned cost equals the minimum over the full cartesian product.
    #[test]
    fn best_cost_matches_exhaustive_enumeration(
        model in arb_model(),
        weights in arb_weights()
    ) {
        let result = run(model, &weights, &SearchPolicyV1::default());
        let expected = exhaustive_min(model, 0, &weights);
        prop_assert_eq!(Some(result.best_cost), expected);
    }

    /// The returned plan picks exactly one candidate per piece, in order,
    /// and its own cost is the reported cost.
    #[test]
    fn best_plan_is_complete_and_consistent(
        model in arb_model(),
        weights in arb_weights()
    ) {
        let result = run(model, &weights, &SearchPolicyV1::default());
        let pieces: Vec<usize> = result.best_plan.picks.iter().map(|p| p.piece).collect();
        prop_assert_eq!(pieces, (0..weights.len()).collect::<Vec<_>>());
        for pick in &result.best_plan.picks {
            prop_assert_eq!(pick.weight, weights[pick.piece][pick.slot]);
        }
        prop_assert_eq!(model.evaluate(0, &result.best_plan.picks), result.best_cost);
    }

    /// Two runs on the same input produce the same plan and identical traces.
    #[test]
    fn repeated_runs_are_identical(
        model in arb_model(),
        weights in arb_weights()
    ) {
        let policy = SearchPolicyV1::with_events();
        let first = run(model, &weights, &policy);
        let second = run(model, &weights, &policy);
        prop_assert_eq!(&first.best_plan, &second.best_plan);
        prop_assert_eq!(first.best_cost, second.best_cost);
        prop_assert_eq!(first.trace.digest().unwrap(), second.trace.digest().unwrap());
    }

    /// Turning the diagonal heuristic off changes traversal, not the answer.
    #[test]
    fn diagonal_alignment_does_not_change_best_cost(
        model in arb_model(),
        weights in arb_weights()
    ) {
        let with = run(model, &weights, &SearchPolicyV1::default());
        let without = run(
            model,
            &weights,
            &SearchPolicyV1 { diagonal_alignment: false, ..SearchPolicyV1::default() },
        );
        prop_assert_eq!(with.best_cost, without.best_cost);
    }

    /// Observed costs: one call per completion, and each improvement is
    /// strictly below the previous best.
    #[test]
    fn observer_sees_every_completion_and_improvements_decrease(
        model in arb_model(),
        weights in arb_weights()
    ) {
        let mut seen: Vec<(u64, Option<u64>)> = Vec::new();
        let mut observer = |_: &PickPlan, cost: u64, previous: Option<u64>| {
            seen.push((cost, previous));
        };
        let result = search(
            PickPlan::default(),
            instance(&weights),
            &mut PickComposer::new(model),
            &mut observer,
            &SearchPolicyV1::default(),
        )
        .unwrap();

        let m = &result.trace.metadata;
        prop_assert_eq!(seen.len() as u64, m.plans_completed);
        prop_assert!(m.plans_completed <= combinations(&weights));
        prop_assert_eq!(seen.first().map(|s| s.1), Some(None));

        let mut best: Option<u64> = None;
        let mut improvements = 0u64;
        for &(cost, previous) in &seen {
            prop_assert_eq!(previous, best);
            let improved = match best {
                Some(b) => cost < b,
                None => true,
            };
            if improved {
                best = Some(cost);
                improvements += 1;
            }
        }
        prop_assert_eq!(improvements, m.improvements);
        prop_assert_eq!(best, Some(result.best_cost));
    }

    /// Each expansion combines exactly once and events account for every pop.
    #[test]
    fn trace_counters_are_consistent(
        weights in arb_weights()
    ) {
        let mut composer = PickComposer::new(CostModel::Sum);
        let result = search(
            PickPlan::default(),
            instance(&weights),
            &mut composer,
            &mut NoopObserver,
            &SearchPolicyV1::with_events(),
        )
        .unwrap();

        let m = &result.trace.metadata;
        prop_assert_eq!(composer.combine_calls, m.total_expansions);
        prop_assert_eq!(result.trace.events.len() as u64, m.total_expansions);
        prop_assert!(!m.events_truncated);
        let orders: Vec<u64> = result.trace.events.iter().map(|e| e.expansion_order).collect();
        prop_assert_eq!(orders, (0..m.total_expansions).collect::<Vec<_>>());
    }
}
