//! Canonical transaction scenarios run against the real store.

use nestkv_core::{SharedStore, Store, StoreError};
use nestkv_testkit::{scenarios, Operation, Outcome, Scenario};

#[test]
fn set_then_get() {
    scenarios::set_then_get().run();
}

#[test]
fn rollback_restores_value() {
    scenarios::rollback_restores_value().run();
}

#[test]
fn nested_delete_committed() {
    let store = scenarios::nested_delete_committed().run();
    assert_eq!(store.base_len(), 0);
}

#[test]
fn nested_delete_rolled_back() {
    let store = scenarios::nested_delete_rolled_back().run();
    assert_eq!(store.base_len(), 1);
}

#[test]
fn unmatched_control_calls() {
    let store = scenarios::unmatched_control_calls().run();
    assert_eq!(store.depth(), 0);
    assert_eq!(store.stats().rejected_control_calls, 2);
}

#[test]
fn value_committed_from_depth_three_reaches_base() {
    let mut store = Store::new();
    for _ in 0..3 {
        store.start_transaction();
    }
    store.set("deep", "v");

    store.commit().unwrap();
    assert_eq!(store.depth(), 2);
    assert_eq!(store.get("deep").unwrap(), "v");
    assert_eq!(store.base_len(), 0);

    store.commit().unwrap();
    store.commit().unwrap();
    assert_eq!(store.depth(), 0);
    assert_eq!(store.base_len(), 1);
    assert_eq!(store.get("deep").unwrap(), "v");
}

#[test]
fn inner_rollback_keeps_outer_writes() {
    Scenario::new("inner_rollback_keeps_outer_writes")
        .done(Operation::Begin)
        .done(Operation::set("a", "outer"))
        .done(Operation::Begin)
        .done(Operation::set("a", "inner"))
        .done(Operation::set("b", "inner"))
        .done(Operation::delete("c"))
        .step(Operation::get("a"), Outcome::Value("inner".into()))
        .done(Operation::Rollback)
        .step(Operation::get("a"), Outcome::Value("outer".into()))
        .step(Operation::get("b"), Outcome::NotFound)
        .done(Operation::Commit)
        .step(Operation::get("a"), Outcome::Value("outer".into()))
        .run();
}

#[test]
fn delete_then_set_in_same_scope() {
    Scenario::new("delete_then_set_in_same_scope")
        .done(Operation::set("k", "v1"))
        .done(Operation::Begin)
        .done(Operation::delete("k"))
        .done(Operation::set("k", "v2"))
        .done(Operation::Commit)
        .step(Operation::get("k"), Outcome::Value("v2".into()))
        .run();
}

#[test]
fn values_are_never_confused_with_tombstones() {
    let mut store = Store::new();
    store.start_transaction();
    store.set("k", "<deleted>");
    store.set("empty", "");
    store.commit().unwrap();

    assert_eq!(store.get("k").unwrap(), "<deleted>");
    assert_eq!(store.get("empty").unwrap(), "");
}

#[test]
fn shared_store_runs_scenarios() {
    let shared = SharedStore::new();
    shared.with_write(|store| scenarios::nested_delete_rolled_back().run_on(store));

    assert_eq!(shared.get("k").unwrap(), "v2");
    assert_eq!(shared.rollback(), Err(StoreError::NoActiveTransaction));
}
