//! Core plumbing for Horizon SizeCache.
//!
//! This crate provides the building blocks the cache crate is assembled from:
//!
//! - **Signal/Slot System**: Synchronous, type-safe change notification
//! - **Thread Affinity**: Assertions backing the single-thread access contract
//! - **Logging**: `tracing` targets, span names and wrapper macros
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_sizecache_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;
pub mod thread_check;

pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use thread_check::{ThreadAffinity, are_thread_checks_enabled, set_thread_checks_enabled};

#[doc(hidden)]
pub use tracing;
