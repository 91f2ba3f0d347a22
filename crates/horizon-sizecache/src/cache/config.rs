//! Configuration types for size caches.

/// When a cache compares its shape against its data source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeCheck {
    /// Never check.
    Off,
    /// Check after the outermost `end_batch`, and after every mutation applied
    /// while no batch is open.
    OnBatchEnd,
    /// Check after every mutation, including mutations inside a batch.
    ///
    /// Only useful when each mutation is applied in step with the source, as
    /// a bound adapter does.
    EveryOperation,
}

impl Default for ShapeCheck {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::OnBatchEnd
        } else {
            Self::Off
        }
    }
}

/// Behavior switches for a [`SizeCache`](super::SizeCache).
#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// When to verify the cache shape against the source.
    pub shape_check: ShapeCheck,
    /// Assert that every mutation happens on the thread that created the cache.
    pub thread_checks: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            shape_check: ShapeCheck::default(),
            thread_checks: cfg!(debug_assertions),
        }
    }
}

impl CacheConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set when the shape is verified.
    pub fn shape_check(mut self, shape_check: ShapeCheck) -> Self {
        self.shape_check = shape_check;
        self
    }

    /// Disable shape verification.
    pub fn no_shape_check(mut self) -> Self {
        self.shape_check = ShapeCheck::Off;
        self
    }

    /// Enable or disable thread affinity assertions.
    pub fn thread_checks(mut self, enabled: bool) -> Self {
        self.thread_checks = enabled;
        self
    }
}
