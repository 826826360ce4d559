//! Stress tests for NestKV.
//!
//! These helpers drive a [`SharedStore`] from several threads at once.

use nestkv_core::{SharedStore, StoreResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Successful operations.
    pub successful_ops: usize,
    /// Failed operations.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of operations per thread.
    pub operations: usize,
    /// Number of concurrent threads.
    pub threads: usize,
    /// Number of distinct keys.
    pub key_count: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            operations: 1_000,
            threads: 4,
            key_count: 64,
        }
    }
}

/// Key used by [`stress_transactional_increments`].
pub const COUNTER_KEY: &str = "counter";

/// Each thread repeatedly increments one shared counter inside its own
/// transaction, holding the write lock from start to commit.
///
/// On success the counter equals `threads * operations`.
pub fn stress_transactional_increments(
    store: &SharedStore,
    config: &StressConfig,
) -> StressTestResult {
    let successful = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|_| {
            let store = store.clone();
            let successful = Arc::clone(&successful);
            let failed = Arc::clone(&failed);
            let operations = config.operations;

            thread::spawn(move || {
                for _ in 0..operations {
                    let result: StoreResult<()> = store.with_write(|s| {
                        s.start_transaction();
                        let current = s
                            .get(COUNTER_KEY)
                            .ok()
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(0);
                        s.set(COUNTER_KEY, (current + 1).to_string());
                        s.commit()
                    });

                    match result {
                        Ok(()) => successful.fetch_add(1, Ordering::Relaxed),
                        Err(_) => failed.fetch_add(1, Ordering::Relaxed),
                    };
                }
            })
        })
        .collect();

    join_all(handles);

    StressTestResult::new(
        successful.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed),
        start.elapsed(),
    )
}

/// Threads interleave point writes, deletes and reads over a shared key range
/// at depth 0.
pub fn stress_mixed_operations(store: &SharedStore, config: &StressConfig) -> StressTestResult {
    let successful = Arc::new(AtomicUsize::new(0));
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let store = store.clone();
            let successful = Arc::clone(&successful);
            let operations = config.operations;
            let key_count = config.key_count.max(1);

            thread::spawn(move || {
                for i in 0..operations {
                    let key = format!("key{}", (i + t) % key_count);
                    match i % 3 {
                        0 => store.set(key, format!("t{t}:{i}")),
                        1 => {
                            // NotFound is still a successful read.
                            let _ = store.get(&key);
                        }
                        _ => store.delete(key),
                    }
                    successful.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    join_all(handles);

    StressTestResult::new(successful.load(Ordering::Relaxed), 0, start.elapsed())
}

fn join_all(handles: Vec<thread::JoinHandle<()>>) {
    for handle in handles {
        if let Err(panic) = handle.join() {
            std::panic::resume_unwind(panic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> StressConfig {
        StressConfig {
            operations: 200,
            threads: 4,
            key_count: 8,
        }
    }

    #[test]
    fn increments_are_not_lost() {
        let store = SharedStore::new();
        let config = small();
        let result = stress_transactional_increments(&store, &config);

        assert_eq!(result.failed_ops, 0);
        assert_eq!(result.successful_ops, 800);
        assert_eq!(store.get(COUNTER_KEY).unwrap(), "800");
        assert_eq!(store.depth(), 0);
    }

    #[test]
    fn mixed_operations_complete() {
        let store = SharedStore::new();
        let result = stress_mixed_operations(&store, &small());

        let stats = store.stats();
        assert_eq!(result.total_ops, 800);
        assert_eq!(stats.reads + stats.writes + stats.deletes, 800);
    }
}
