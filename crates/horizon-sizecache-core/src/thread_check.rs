//! Thread affinity verification for Horizon SizeCache.
//!
//! Caches are single-threaded structures: every mutation, and the delivery of
//! every change notification, must happen on one designated thread (normally
//! the thread that owns the data source). [`ThreadAffinity`] records that
//! thread and lets owners assert it on each operation.
//!
//! # Thread Safety Checks
//!
//! Two levels of checking are provided:
//!
//! - **Debug assertions** ([`ThreadAffinity::debug_assert_same_thread`]): only
//!   active in debug builds, and only while checks are globally enabled.
//!
//! - **Runtime assertions** ([`ThreadAffinity::assert_same_thread`]): always
//!   active.
//!
//! ```
//! use horizon_sizecache_core::thread_check::ThreadAffinity;
//!
//! struct Counter {
//!     affinity: ThreadAffinity,
//!     value: std::cell::Cell<i32>,
//! }
//!
//! impl Counter {
//!     fn bump(&self) {
//!         self.affinity.debug_assert_same_thread("Counter::bump");
//!         self.value.set(self.value.get() + 1);
//!     }
//! }
//!
//! let counter = Counter { affinity: ThreadAffinity::current(), value: Default::default() };
//! counter.bump();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::ThreadId;

/// Flag to enable/disable runtime thread checks globally.
static THREAD_CHECKS_ENABLED: AtomicBool = AtomicBool::new(cfg!(debug_assertions));

/// Enable or disable debug thread checks.
///
/// By default, thread checks are enabled in debug builds and disabled in
/// release builds. [`ThreadAffinity::assert_same_thread`] ignores this flag.
pub fn set_thread_checks_enabled(enabled: bool) {
    THREAD_CHECKS_ENABLED.store(enabled, Ordering::SeqCst);
}

/// Check if debug thread checks are currently enabled.
#[inline]
pub fn are_thread_checks_enabled() -> bool {
    THREAD_CHECKS_ENABLED.load(Ordering::Relaxed)
}

/// Thread affinity tracker.
///
/// Records the thread on which an owner was created and verifies that
/// subsequent operations occur on the same thread.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create a new thread affinity tracker for the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Get the thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Panics if not called from the bound thread.
    ///
    /// `context` names the operation and is included in the panic message.
    #[inline]
    pub fn assert_same_thread(&self, context: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(context);
        }
    }

    /// Debug-only assertion that we are on the bound thread.
    ///
    /// This is a no-op in release builds and while checks are disabled via
    /// [`set_thread_checks_enabled`].
    #[inline]
    pub fn debug_assert_same_thread(&self, context: &str) {
        #[cfg(debug_assertions)]
        if are_thread_checks_enabled() {
            self.assert_same_thread(context);
        }
        #[cfg(not(debug_assertions))]
        let _ = context;
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self, context: &str) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");
        let current_id = current.id();

        panic!(
            "\n\
            ══════════════════════════════════════════════════════════════════════\n\
            THREAD AFFINITY VIOLATION\n\
            ══════════════════════════════════════════════════════════════════════\n\
            \n\
            {context}\n\
            \n\
            Owner was created on thread: {:?}\n\
            Current thread: \"{current_name}\" (ID: {current_id:?})\n\
            \n\
            Size caches are not internally synchronized. Mutations and change\n\
            notifications must be delivered on the thread that created the cache,\n\
            in the order the data source emitted them.\n\
            \n\
            POSSIBLE SOLUTIONS:\n\
            \n\
            1. Mutate the data source on the thread that owns the cache\n\
            2. Create the cache on the thread that delivers notifications\n\
            3. Disable checks with CacheConfig::thread_checks(false) if access\n\
               is serialized by other means\n\
            \n\
            ══════════════════════════════════════════════════════════════════════",
            self.thread_id
        )
    }
}
