//! Logging facilities for Horizon SizeCache.
//!
//! Horizon SizeCache uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_sizecache=debug")
//!     .init();
//! ```
//!
//! # Levels
//!
//! - `trace`: every structural edit applied to a cache, every signal emission
//! - `debug`: full invalidation passes, batch open/close, binding lifecycle
//! - `warn`: ignored, unbalanced, or failed change notifications
//! - `error`: a cache whose shape disagrees with its data source

/// Span names used throughout Horizon SizeCache for tracing.
pub mod span_names {
    /// Full invalidation pass.
    pub const INVALIDATE: &str = "horizon_sizecache::invalidate";
    /// One change notification being applied.
    pub const NOTIFICATION: &str = "horizon_sizecache::notification";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Cache facade and section store target.
    pub const CACHE: &str = "horizon_sizecache::cache";
    /// Change adapter and binding target.
    pub const ADAPTER: &str = "horizon_sizecache::adapter";
    /// Reference data source target.
    pub const MODEL: &str = "horizon_sizecache::model";
    /// Signal dispatch target.
    pub const SIGNAL: &str = "horizon_sizecache::signal";
    /// Performance spans target.
    pub const PERF: &str = "horizon_sizecache::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_sizecache::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level event on the cache target.
#[macro_export]
macro_rules! sizecache_trace {
    ($($arg:tt)*) => {
        $crate::tracing::trace!(target: "horizon_sizecache::cache", $($arg)*)
    };
}

/// Debug-level event on the cache target.
#[macro_export]
macro_rules! sizecache_debug {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "horizon_sizecache::cache", $($arg)*)
    };
}

/// Warn-level event on the cache target.
#[macro_export]
macro_rules! sizecache_warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: "horizon_sizecache::cache", $($arg)*)
    };
}

/// Error-level event on the cache target.
#[macro_export]
macro_rules! sizecache_error {
    ($($arg:tt)*) => {
        $crate::tracing::error!(target: "horizon_sizecache::cache", $($arg)*)
    };
}
