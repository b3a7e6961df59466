//! Planpick Search: branch-and-bound selection of one candidate per piece.
//!
//! Given an initial plan and an ordered list of choice sets (one per piece of
//! a query), finds the combination of candidates whose merged plan has the
//! lowest cost, without necessarily enumerating the cartesian product.
//!
//! # Flow
//!
//! ```text
//! WorkStackV1::pop ─▶ select_slot ─▶ ChoiceSetV1::extract ─▶ combine ─┬▶ WorkStackV1::submit (retry sibling)
//!                                                                    └▶ complete | prune | continue
//! ```
//!
//! # Key types
//!
//! - [`ChoiceSetV1`] — positionally stable candidate slots for one piece
//! - [`WorkStackV1`] — explicit stack with eager/deferred ordering
//! - [`PlanComposerV1`] — caller-supplied `combine` and `cost`
//! - [`PlanObserverV1`] — receives every complete plan
//! - [`SearchPolicyV1`] — traversal and trace configuration
//! - [`SearchTraceV1`] — counters and per-expansion audit events
//!
//! [`ChoiceSetV1`]: choice::ChoiceSetV1
//! [`WorkStackV1`]: stack::WorkStackV1
//! [`PlanComposerV1`]: contract::PlanComposerV1
//! [`PlanObserverV1`]: contract::PlanObserverV1
//! [`SearchPolicyV1`]: policy::SearchPolicyV1
//! [`SearchTraceV1`]: trace::SearchTraceV1

#![forbid(unsafe_code)]

pub mod choice;
pub mod contract;
pub mod error;
pub mod policy;
pub mod search;
pub mod stack;
pub mod trace;
