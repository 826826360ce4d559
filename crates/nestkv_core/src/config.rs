//! Store configuration.

/// Configuration for creating a store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Whether to maintain operation counters.
    pub track_stats: bool,

    /// Initial capacity of the base mapping.
    pub base_capacity: usize,

    /// Initial capacity of each newly started overlay.
    pub overlay_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            track_stats: true,
            base_capacity: 0,
            overlay_capacity: 0,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to maintain operation counters.
    #[must_use]
    pub const fn track_stats(mut self, value: bool) -> Self {
        self.track_stats = value;
        self
    }

    /// Sets the initial capacity of the base mapping.
    #[must_use]
    pub const fn base_capacity(mut self, capacity: usize) -> Self {
        self.base_capacity = capacity;
        self
    }

    /// Sets the initial capacity of each new overlay.
    #[must_use]
    pub const fn overlay_capacity(mut self, capacity: usize) -> Self {
        self.overlay_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert!(config.track_stats);
        assert_eq!(config.base_capacity, 0);
        assert_eq!(config.overlay_capacity, 0);
    }

    #[test]
    fn builder_pattern() {
        let config = StoreConfig::new()
            .track_stats(false)
            .base_capacity(1024)
            .overlay_capacity(16);

        assert!(!config.track_stats);
        assert_eq!(config.base_capacity, 1024);
        assert_eq!(config.overlay_capacity, 16);
    }
}
