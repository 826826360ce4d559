//! Reference model of nested transactions.
//!
//! The model keeps a full copy of the visible state per open transaction:
//! starting a transaction clones the current state, committing replaces the
//! parent copy with the child copy, and rolling back drops the child copy.
//! It is slow but has no tombstones or folding, which makes it a useful
//! oracle for the overlay engine.

use crate::ops::{Operation, Outcome};
use std::collections::HashMap;

/// Copy-per-scope model of the store.
#[derive(Debug, Clone)]
pub struct Model {
    /// `scopes[0]` is the base state; the last element is the visible state.
    scopes: Vec<HashMap<String, String>>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Returns the visible value of a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.visible().get(key).map(String::as_str)
    }

    /// Returns the committed base state.
    #[must_use]
    pub fn base(&self) -> &HashMap<String, String> {
        &self.scopes[0]
    }

    /// Returns the visible state.
    #[must_use]
    pub fn visible(&self) -> &HashMap<String, String> {
        // `scopes` is never empty.
        &self.scopes[self.scopes.len() - 1]
    }

    /// Applies an operation and returns the outcome the store should produce.
    pub fn apply(&mut self, op: &Operation) -> Outcome {
        match op {
            Operation::Get { key } => self
                .get(key)
                .map_or(Outcome::NotFound, |v| Outcome::Value(v.to_string())),
            Operation::Set { key, value } => {
                self.visible_mut().insert(key.clone(), value.clone());
                Outcome::Done
            }
            Operation::Delete { key } => {
                self.visible_mut().remove(key);
                Outcome::Done
            }
            Operation::Begin => {
                let copy = self.visible().clone();
                self.scopes.push(copy);
                Outcome::Done
            }
            Operation::Commit => {
                if self.depth() == 0 {
                    return Outcome::NoActiveTransaction;
                }
                if let Some(child) = self.scopes.pop() {
                    *self.visible_mut() = child;
                }
                Outcome::Done
            }
            Operation::Rollback => {
                if self.depth() == 0 {
                    return Outcome::NoActiveTransaction;
                }
                self.scopes.pop();
                Outcome::Done
            }
        }
    }

    fn visible_mut(&mut self) -> &mut HashMap<String, String> {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_follows_nested_rollback() {
        let mut model = Model::new();
        model.apply(&Operation::set("k", "v1"));
        model.apply(&Operation::Begin);
        model.apply(&Operation::set("k", "v2"));
        model.apply(&Operation::Begin);
        model.apply(&Operation::delete("k"));
        assert_eq!(model.get("k"), None);

        model.apply(&Operation::Rollback);
        assert_eq!(model.get("k"), Some("v2"));
        assert_eq!(model.base().get("k").map(String::as_str), Some("v1"));

        model.apply(&Operation::Commit);
        assert_eq!(model.depth(), 0);
        assert_eq!(model.get("k"), Some("v2"));
    }

    #[test]
    fn model_rejects_unmatched_control_calls() {
        let mut model = Model::new();
        assert_eq!(model.apply(&Operation::Commit), Outcome::NoActiveTransaction);
        assert_eq!(model.apply(&Operation::Rollback), Outcome::NoActiveTransaction);
        assert_eq!(model.depth(), 0);
    }
}
