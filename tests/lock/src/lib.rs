//! Lock-test support for the plan search workspace.
