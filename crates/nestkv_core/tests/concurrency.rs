//! Shared-store behaviour under concurrent callers.

use nestkv_core::{SharedStore, StoreConfig};
use nestkv_testkit::{
    stress_mixed_operations, stress_transactional_increments, StressConfig, COUNTER_KEY,
};
use std::sync::Barrier;
use std::sync::Arc;
use std::thread;

#[test]
fn transactional_increments_are_serialized() {
    let store = SharedStore::new();
    let config = StressConfig {
        operations: 500,
        threads: 8,
        key_count: 1,
    };

    let result = stress_transactional_increments(&store, &config);

    assert_eq!(result.failed_ops, 0);
    assert_eq!(store.get(COUNTER_KEY).unwrap(), "4000");
    let stats = store.stats();
    assert_eq!(stats.transactions_started, 4000);
    assert_eq!(stats.transactions_committed, 4000);
    assert_eq!(stats.open_transactions(), 0);
}

#[test]
fn mixed_operations_leave_store_at_depth_zero() {
    let store = SharedStore::with_config(StoreConfig::new().base_capacity(64));
    let result = stress_mixed_operations(&store, &StressConfig::default());

    assert_eq!(result.total_ops, 4000);
    assert_eq!(store.depth(), 0);
    assert!(store.with_read(|s| s.base_len()) <= 64);
}

#[test]
fn readers_never_observe_a_half_applied_transaction() {
    let store = SharedStore::new();
    store.set("a", "0");
    store.set("b", "0");

    let barrier = Arc::new(Barrier::new(2));

    let writer = {
        let store = store.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for i in 1..=200 {
                store.with_write(|s| {
                    s.start_transaction();
                    s.set("a", i.to_string());
                    s.set("b", i.to_string());
                    s.commit()
                })
                .unwrap();
            }
        })
    };

    let reader = {
        let store = store.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..200 {
                let (a, b) = store.with_read(|s| (s.get("a").unwrap(), s.get("b").unwrap()));
                assert_eq!(a, b);
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(store.get("a").unwrap(), "200");
}
