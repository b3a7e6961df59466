//! Golden lock for the search trace wire format.
//!
//! Proves:
//! 1. The trace domain prefix follows the `PLANPICK::*::V1\0` convention
//! 2. The three-piece scenario serializes to exactly the pinned bytes
//! 3. Its digest is the pinned value
//! 4. Event recording does not change counters or the answer
//!
//! If the traversal order or the JSON shape changes on purpose, regenerate
//! both constants together.

use lock_tests::fixtures::{instance, CostModel, PickComposer, PickPlan};
use planpick_search::contract::NoopObserver;
use planpick_search::policy::SearchPolicyV1;
use planpick_search::search::{search, SearchResult};
use planpick_search::trace::DOMAIN_SEARCH_TRACE;

const GOLDEN_JSON: &str = concat!(
    r#"{"events":["#,
    r#"{"alternatives_remaining":true,"expansion_order":0,"outcome":{"type":"continued"},"piece":0,"sibling":{"preferred":1,"type":"eager"},"slot":0},"#,
    r#"{"alternatives_remaining":true,"expansion_order":1,"outcome":{"type":"continued"},"piece":1,"sibling":{"type":"deferred"},"slot":0},"#,
    r#"{"alternatives_remaining":false,"expansion_order":2,"outcome":{"improved":true,"type":"completed"},"piece":2,"sibling":null,"slot":0},"#,
    r#"{"alternatives_remaining":false,"expansion_order":3,"outcome":{"type":"pruned"},"piece":0,"sibling":null,"slot":1},"#,
    r#"{"alternatives_remaining":false,"expansion_order":4,"outcome":{"type":"continued"},"piece":1,"sibling":null,"slot":1},"#,
    r#"{"alternatives_remaining":false,"expansion_order":5,"outcome":{"improved":true,"type":"completed"},"piece":2,"sibling":null,"slot":0}"#,
    r#"],"metadata":{"best_found_at":5,"branches_pruned":1,"diagonal_alignment":true,"#,
    r#""events_truncated":false,"improvements":2,"piece_count":3,"plans_completed":2,"#,
    r#""siblings_deferred":1,"siblings_eager":1,"stack_high_water":3,"total_expansions":6,"#,
    r#""trace_mode":"events"}}"#,
);

const GOLDEN_DIGEST: &str =
    "sha256:e79c5f2ecace28948cea487703e0dda8ecffdfa08571f3013631e85a5c922bd2";

fn three_piece(policy: &SearchPolicyV1) -> SearchResult<PickPlan, u64> {
    search(
        PickPlan::default(),
        instance(&[vec![1, 5], vec![2, 1], vec![0]]),
        &mut PickComposer::new(CostModel::Sum),
        &mut NoopObserver,
        policy,
    )
    .expect("search run")
}

// ---------------------------------------------------------------------------
// 1. Domain prefix
// ---------------------------------------------------------------------------

#[test]
fn trace_domain_follows_naming_convention() {
    assert!(DOMAIN_SEARCH_TRACE.starts_with(b"PLANPICK::"));
    assert!(DOMAIN_SEARCH_TRACE.ends_with(b"::V1\0"));
    assert_eq!(
        DOMAIN_SEARCH_TRACE.iter().filter(|&&b| b == 0).count(),
        1,
        "exactly one null byte, at the end"
    );
}

// ---------------------------------------------------------------------------
// 2-3. Golden bytes and digest
// ---------------------------------------------------------------------------

#[test]
fn three_piece_trace_matches_golden_bytes() {
    let result = three_piece(&SearchPolicyV1::with_events());
    let bytes = result.trace.to_canonical_json_bytes().expect("serialize");
    let text = String::from_utf8(bytes).expect("utf-8");
    assert_eq!(text, GOLDEN_JSON);
}

#[test]
fn three_piece_trace_matches_golden_digest() {
    let result = three_piece(&SearchPolicyV1::with_events());
    assert_eq!(result.trace.digest().expect("digest"), GOLDEN_DIGEST);
}

// ---------------------------------------------------------------------------
// 4. Event recording is observation only
// ---------------------------------------------------------------------------

#[test]
fn trace_mode_does_not_change_counters_or_answer() {
    let off = three_piece(&SearchPolicyV1::default());
    let on = three_piece(&SearchPolicyV1::with_events());

    assert_eq!(off.best_plan, on.best_plan);
    assert_eq!(off.best_cost, on.best_cost);
    assert!(off.trace.events.is_empty());

    let mut off_meta = off.trace.metadata.clone();
    off_meta.trace_mode = on.trace.metadata.trace_mode;
    assert_eq!(off_meta, on.trace.metadata);
    assert_ne!(off.trace.digest().expect("digest"), GOLDEN_DIGEST);
}
