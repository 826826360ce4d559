//! Benchmark utilities.

#![warn(missing_docs)]

use nestkv_core::Store;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random alphanumeric string of the specified length.
pub fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key:{i:08}")).collect()
}

/// Build a store whose base mapping holds `count` keys with values of
/// `value_len` bytes.
pub fn populated_store(count: usize, value_len: usize) -> Store {
    let mut store = Store::new();
    for key in generate_keys(count) {
        store.set(key, random_string(value_len));
    }
    store
}

/// Open `depth` nested transactions, each writing `writes_per_level` keys.
pub fn stack_transactions(store: &mut Store, depth: usize, writes_per_level: usize) {
    let keys = generate_keys(writes_per_level);
    for level in 0..depth {
        store.start_transaction();
        for (i, key) in keys.iter().enumerate() {
            if (i + level) % 4 == 0 {
                store.delete(key.as_str());
            } else {
                store.set(key.as_str(), level.to_string());
            }
        }
    }
}
