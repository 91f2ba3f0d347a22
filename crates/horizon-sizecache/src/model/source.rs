//! Traits that sectioned data sources implement.
//!
//! A cache never owns the data it mirrors. It binds to a source through
//! [`SectionedSource`], which is enough to query the current shape and to
//! subscribe to change notifications. Rendering code that needs the objects
//! themselves uses the [`ObjectSource`] extension.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use horizon_sizecache_core::Signal;

use super::change::SourceNotification;
use super::index_path::IndexPath;

/// A global counter for generating unique source IDs.
static SOURCE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a data source.
///
/// Every notification carries the ID of the source that emitted it. Adapters
/// compare it against the source they are bound to and discard the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(u64);

impl SourceId {
    /// Allocates a fresh ID that no other source in this process shares.
    pub fn next() -> Self {
        Self(SOURCE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

/// The shape and change stream of a sectioned collection.
///
/// # Notification Contract
///
/// - Each burst of edits is bracketed by `WillChange` and `DidChange`.
/// - Events inside a burst are delivered in the order the edits were made;
///   positions in each event are relative to the shape produced by all
///   preceding events.
/// - Notifications are delivered on a single thread.
///
/// # Example
///
/// ```
/// use horizon_sizecache::model::{SectionedSource, SourceId, SourceNotification};
/// use horizon_sizecache_core::Signal;
///
/// struct Fixed {
///     id: SourceId,
///     counts: Vec<usize>,
///     changes: Signal<SourceNotification>,
/// }
///
/// impl SectionedSource for Fixed {
///     fn source_id(&self) -> SourceId {
///         self.id
///     }
///
///     fn section_count(&self) -> usize {
///         self.counts.len()
///     }
///
///     fn item_count(&self, section: usize) -> usize {
///         self.counts.get(section).copied().unwrap_or(0)
///     }
///
///     fn changes(&self) -> &Signal<SourceNotification> {
///         &self.changes
///     }
/// }
/// ```
pub trait SectionedSource: Send + Sync {
    /// Returns the identity stamped on every notification from this source.
    fn source_id(&self) -> SourceId;

    /// Returns the number of sections.
    fn section_count(&self) -> usize;

    /// Returns the number of items in `section`.
    ///
    /// Returns 0 for a section that does not exist.
    fn item_count(&self, section: usize) -> usize;

    /// Returns the signal on which change notifications are emitted.
    fn changes(&self) -> &Signal<SourceNotification>;

    /// Returns the item count of every section, in order.
    fn shape(&self) -> Vec<usize> {
        (0..self.section_count())
            .map(|section| self.item_count(section))
            .collect()
    }
}

/// Positional access to the objects behind a sectioned source.
///
/// Caches never call this; it exists for the rendering layer that measures
/// objects and stores the results in a cache.
pub trait ObjectSource: SectionedSource {
    /// The object type stored at each position.
    type Object;

    /// Returns the object at `at`, or `None` if the position does not exist.
    fn object(&self, at: IndexPath) -> Option<Self::Object>;
}
