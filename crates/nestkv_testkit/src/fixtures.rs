//! Test fixtures.
//!
//! Scripted scenarios with the outcome expected after every step.

use crate::ops::{apply, Operation, Outcome};
use nestkv_core::Store;

/// A named sequence of operations and their expected outcomes.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario name, used in assertion messages.
    pub name: &'static str,
    /// Steps in order.
    pub steps: Vec<(Operation, Outcome)>,
}

impl Scenario {
    /// Creates an empty scenario.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    /// Appends a step.
    #[must_use]
    pub fn step(mut self, op: Operation, expected: Outcome) -> Self {
        self.steps.push((op, expected));
        self
    }

    /// Appends a step that is expected to succeed with no result.
    #[must_use]
    pub fn done(self, op: Operation) -> Self {
        self.step(op, Outcome::Done)
    }

    /// Returns the operations without their expectations.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.steps.iter().map(|(op, _)| op)
    }

    /// Runs the scenario on a fresh store, panicking on the first mismatch.
    ///
    /// Returns the store so callers can make further assertions.
    pub fn run(&self) -> Store {
        let mut store = Store::new();
        self.run_on(&mut store);
        store
    }

    /// Runs the scenario on an existing store.
    pub fn run_on(&self, store: &mut Store) {
        for (i, (op, expected)) in self.steps.iter().enumerate() {
            let actual = apply(store, op);
            assert_eq!(
                &actual, expected,
                "scenario `{}` step {} (`{}`)",
                self.name, i, op
            );
        }
    }
}

/// The canonical transaction scenarios.
pub mod scenarios {
    use super::*;

    /// Set then get outside any transaction.
    pub fn set_then_get() -> Scenario {
        Scenario::new("set_then_get")
            .done(Operation::set("k", "v1"))
            .step(Operation::get("k"), Outcome::Value("v1".into()))
    }

    /// A rolled-back write leaves the earlier value visible.
    pub fn rollback_restores_value() -> Scenario {
        Scenario::new("rollback_restores_value")
            .done(Operation::set("k", "v1"))
            .done(Operation::Begin)
            .done(Operation::set("k", "v2"))
            .step(Operation::get("k"), Outcome::Value("v2".into()))
            .done(Operation::Rollback)
            .step(Operation::get("k"), Outcome::Value("v1".into()))
    }

    /// A delete in a nested transaction survives both commits.
    pub fn nested_delete_committed() -> Scenario {
        Scenario::new("nested_delete_committed")
            .done(Operation::set("k", "v1"))
            .done(Operation::Begin)
            .done(Operation::set("k", "v2"))
            .done(Operation::Begin)
            .done(Operation::delete("k"))
            .done(Operation::Commit)
            .step(Operation::get("k"), Outcome::NotFound)
            .done(Operation::Commit)
            .step(Operation::get("k"), Outcome::NotFound)
    }

    /// A delete in a rolled-back nested transaction is undone.
    pub fn nested_delete_rolled_back() -> Scenario {
        Scenario::new("nested_delete_rolled_back")
            .done(Operation::set("k", "v1"))
            .done(Operation::Begin)
            .done(Operation::set("k", "v2"))
            .done(Operation::Begin)
            .done(Operation::delete("k"))
            .done(Operation::Rollback)
            .step(Operation::get("k"), Outcome::Value("v2".into()))
            .done(Operation::Commit)
            .step(Operation::get("k"), Outcome::Value("v2".into()))
    }

    /// Commit and rollback on a fresh store are rejected.
    pub fn unmatched_control_calls() -> Scenario {
        Scenario::new("unmatched_control_calls")
            .step(Operation::Commit, Outcome::NoActiveTransaction)
            .step(Operation::Rollback, Outcome::NoActiveTransaction)
    }

    /// All canonical scenarios.
    pub fn all() -> Vec<Scenario> {
        vec![
            set_then_get(),
            rollback_restores_value(),
            nested_delete_committed(),
            nested_delete_rolled_back(),
            unmatched_control_calls(),
        ]
    }
}
