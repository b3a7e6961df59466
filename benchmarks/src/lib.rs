//! Shared helpers for planpick benchmark suites.
//!
//! A [`Regime`] is a named weight table plus a policy. Each regime stresses a
//! different part of the search: how early the bound tightens, how much is
//! pruned, and how deep the deferred queue grows.

use planpick_search::choice::ChoiceSetV1;
use planpick_search::contract::{NoopObserver, PlanComposerV1};
use planpick_search::error::SearchError;
use planpick_search::policy::SearchPolicyV1;
use planpick_search::search::{search, SearchResult};

/// A benchmark instance.
pub struct Regime {
    /// One row of candidate weights per piece.
    pub weights: Vec<Vec<u64>>,
    /// Policy the instance is searched under.
    pub policy: SearchPolicyV1,
}

impl Regime {
    /// Choice sets for this regime. Candidates are plain weights.
    #[must_use]
    pub fn choices(&self) -> Vec<ChoiceSetV1<u64>> {
        self.weights.iter().map(|row| row.iter().copied().collect()).collect()
    }

    /// Same instance with the diagonal heuristic switched off.
    #[must_use]
    pub fn without_diagonal(&self) -> Self {
        Self {
            weights: self.weights.clone(),
            policy: SearchPolicyV1 {
                diagonal_alignment: false,
                ..self.policy.clone()
            },
        }
    }
}

/// Diagonal slots are free, everything else is expensive. The first dive is
/// optimal, so almost every other branch is cut at its first piece.
#[must_use]
pub fn regime_diagonal_cheap() -> Regime {
    let width = 6;
    Regime {
        weights: (0..10)
            .map(|_| (0..width).map(|slot| if slot == 0 { 0 } else { 50 }).collect())
            .collect(),
        policy: SearchPolicyV1::default(),
    }
}

/// Diagonal slots are the most expensive, so the first bound is loose and
/// the best plan is improved many times before the cut becomes effective.
#[must_use]
pub fn regime_diagonal_expensive() -> Regime {
    let width: u64 = 5;
    Regime {
        weights: (0..8)
            .map(|_| (0..width).map(|slot| width - slot).collect())
            .collect(),
        policy: SearchPolicyV1::default(),
    }
}

/// Every candidate costs the same non-zero weight. No partial plan ever
/// reaches the bound, so the full product is enumerated.
#[must_use]
pub fn regime_exhaustive() -> Regime {
    Regime {
        weights: vec![vec![1; 4]; 6],
        policy: SearchPolicyV1::default(),
    }
}

/// Scattered weights from a fixed linear congruence.
#[must_use]
pub fn regime_scattered() -> Regime {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) % 100
    };
    Regime {
        weights: (0..12).map(|_| (0..5).map(|_| next()).collect()).collect(),
        policy: SearchPolicyV1::default(),
    }
}

/// All regimes, by name.
#[must_use]
pub fn all_regimes() -> Vec<(&'static str, Regime)> {
    vec![
        ("diagonal_cheap", regime_diagonal_cheap()),
        ("diagonal_expensive", regime_diagonal_expensive()),
        ("exhaustive", regime_exhaustive()),
        ("scattered", regime_scattered()),
    ]
}

/// Composer whose plan is the running weight sum.
///
/// Carries no history, so the benchmark measures the search loop rather
/// than plan copying.
pub struct SumComposer;

impl PlanComposerV1 for SumComposer {
    type Plan = u64;
    type Candidate = u64;
    type Cost = u64;
    type Error = SearchError;

    fn combine(&mut self, plan: &u64, candidate: u64) -> Result<u64, SearchError> {
        Ok(plan + candidate)
    }

    fn cost(&mut self, plan: &u64) -> Result<u64, SearchError> {
        Ok(*plan)
    }
}

/// Run `search()` on a regime with the summing composer.
///
/// # Panics
///
/// Panics if `search()` returns an error. Benchmark runs are expected to succeed.
#[must_use]
pub fn run_regime(regime: &Regime) -> SearchResult<u64, u64> {
    search(
        0,
        regime.choices(),
        &mut SumComposer,
        &mut NoopObserver,
        &regime.policy,
    )
    .expect("search should succeed in benchmarks")
}
