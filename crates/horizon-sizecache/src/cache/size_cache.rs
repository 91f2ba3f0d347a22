//! The cache facade.
//!
//! [`SizeCache`] stores one optional measured [`Size`] per `(section, item)`
//! position of a [`SectionedSource`]. Its shape (the number of sections and
//! the item count of each) mirrors the source: a full [`invalidate`] pass
//! rebuilds it from the source's counts, and the structural mutations keep it
//! in step as the source changes.
//!
//! Values belong to positions, not to items. When an item moves, its slot is
//! moved along with it; when an item is reloaded, its slot is cleared and the
//! caller re-measures on the next miss.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_sizecache::cache::{Size, SizeCache};
//! use horizon_sizecache::model::{IndexPath, SectionedModel};
//!
//! let model = Arc::new(SectionedModel::new(vec![vec!["a", "b", "c"]]));
//! let mut cache = SizeCache::new(&model);
//!
//! cache.set(IndexPath::new(0, 1), Size::new(100.0, 24.0)).unwrap();
//!
//! // Mirror a removal made on the source.
//! model.remove_item(IndexPath::new(0, 0)).unwrap();
//! cache.delete_item(IndexPath::new(0, 0)).unwrap();
//!
//! assert_eq!(cache.get(IndexPath::new(0, 0)), Some(Size::new(100.0, 24.0)));
//! ```
//!
//! [`invalidate`]: SizeCache::invalidate

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use horizon_sizecache_core::logging::span_names;
use horizon_sizecache_core::{
    PerfSpan, ThreadAffinity, are_thread_checks_enabled, sizecache_debug, sizecache_error,
    sizecache_trace, sizecache_warn,
};

use super::batch::{BatchEnd, BatchState};
use super::config::{CacheConfig, ShapeCheck};
use super::slot::{Size, Slot};
use super::store::SectionStore;
use crate::error::{Error, Result};
use crate::model::{IndexPath, SectionedSource, SourceId};

/// A size cache shared between its owner and a change adapter.
///
/// The mutex is not reentrant. Do not edit a bound source while holding the
/// lock on the same thread: the adapter locks it again to apply the change.
pub type SharedSizeCache = Arc<Mutex<SizeCache>>;

/// Positional cache of measured sizes for a sectioned data source.
///
/// The cache holds its source weakly. Once the source is dropped,
/// [`invalidate`](Self::invalidate) produces an empty cache and shape checks
/// are skipped.
///
/// # Thread Safety
///
/// The cache is `Send + Sync` but not internally synchronized: all mutations
/// must be serialized by the caller, in the order the source emitted them.
/// With [`CacheConfig::thread_checks`] enabled, mutations from a thread other
/// than the creating one panic.
#[derive(Debug)]
pub struct SizeCache {
    source: Weak<dyn SectionedSource>,
    source_id: SourceId,
    store: SectionStore<Slot>,
    batch: BatchState,
    config: CacheConfig,
    affinity: ThreadAffinity,
}

impl SizeCache {
    /// Creates a cache bound to `source` and shaped after it, with every slot
    /// empty.
    pub fn new<S: SectionedSource + 'static>(source: &Arc<S>) -> Self {
        Self::with_config(source, CacheConfig::default())
    }

    /// Creates a cache with a custom configuration.
    pub fn with_config<S: SectionedSource + 'static>(source: &Arc<S>, config: CacheConfig) -> Self {
        let weak: Weak<S> = Arc::downgrade(source);
        let mut cache = Self {
            source: weak,
            source_id: source.source_id(),
            store: SectionStore::new(),
            batch: BatchState::new(),
            config,
            affinity: ThreadAffinity::current(),
        };
        cache.invalidate();
        cache
    }

    /// Wraps the cache for sharing with a [`ChangeAdapter`](super::ChangeAdapter).
    pub fn into_shared(self) -> SharedSizeCache {
        Arc::new(Mutex::new(self))
    }

    /// Returns the identity of the bound source.
    pub fn source_id(&self) -> SourceId {
        self.source_id
    }

    /// Returns the bound source, if it is still alive.
    pub fn source(&self) -> Option<Arc<dyn SectionedSource>> {
        self.source.upgrade()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Values
    // -------------------------------------------------------------------------

    /// Discards every section and rebuilds the shape from the source, with
    /// every slot empty.
    ///
    /// If the source has been dropped the cache ends up with no sections.
    pub fn invalidate(&mut self) {
        let _perf = PerfSpan::new(span_names::INVALIDATE);
        self.check_thread("SizeCache::invalidate");

        let shape = self
            .source
            .upgrade()
            .map(|source| source.shape())
            .unwrap_or_default();
        let discarded = self.store.len();
        self.store = SectionStore::with_shape(shape, || Slot::EMPTY);

        sizecache_debug!(
            source = %self.source_id,
            sections = self.store.section_count(),
            items = self.store.len(),
            discarded,
            "cache invalidated"
        );
    }

    /// Returns the cached size at `at`.
    ///
    /// A position outside the current shape reads as a miss.
    #[inline]
    pub fn get(&self, at: IndexPath) -> Option<Size> {
        self.store.get(at).and_then(Slot::value)
    }

    /// Stores `value` at `at`. Pass `None::<Size>` to forget the cached size.
    ///
    /// Fails without changing anything if `at` is outside the current shape.
    pub fn set(&mut self, at: IndexPath, value: impl Into<Option<Size>>) -> Result<()> {
        self.check_thread("SizeCache::set");
        self.store.try_get_mut(at)?.set(value.into());
        Ok(())
    }

    /// Returns the cached size at `at`, measuring and storing it first on a
    /// miss.
    pub fn get_or_insert_with(&mut self, at: IndexPath, measure: impl FnOnce() -> Size) -> Result<Size> {
        self.check_thread("SizeCache::get_or_insert_with");
        let slot = self.store.try_get_mut(at)?;
        match slot.value() {
            Some(size) => Ok(size),
            None => {
                let size = measure();
                slot.set(Some(size));
                Ok(size)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    /// Returns the number of sections.
    pub fn section_count(&self) -> usize {
        self.store.section_count()
    }

    /// Returns the number of slots in `section`, or `None` if it does not exist.
    pub fn item_count(&self, section: usize) -> Option<usize> {
        self.store.item_count(section)
    }

    /// Returns the slot count of every section, in order.
    pub fn shape(&self) -> Vec<usize> {
        self.store.shape()
    }

    /// Returns the number of slots holding a size.
    pub fn cached_count(&self) -> usize {
        self.store.iter().filter(|(_, slot)| slot.is_cached()).count()
    }

    /// Compares the cache shape with the source's current counts.
    ///
    /// Succeeds without comparing anything once the source has been dropped.
    pub fn verify_shape(&self) -> Result<()> {
        let Some(source) = self.source.upgrade() else {
            return Ok(());
        };

        let cached = self.store.section_count();
        let reported = source.section_count();
        if cached != reported {
            sizecache_error!(source = %self.source_id, cached, reported, "section count mismatch");
            return Err(Error::SectionCountMismatch { cached, reported });
        }

        for section in 0..cached {
            let cached = self.store.item_count(section).unwrap_or(0);
            let reported = source.item_count(section);
            if cached != reported {
                sizecache_error!(
                    source = %self.source_id,
                    section,
                    cached,
                    reported,
                    "item count mismatch"
                );
                return Err(Error::ItemCountMismatch {
                    section,
                    cached,
                    reported,
                });
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Item mutations
    // -------------------------------------------------------------------------

    /// Inserts an empty slot at `at`, shifting later slots of the section up.
    ///
    /// `at.item()` may equal the section's slot count (append).
    ///
    /// An out-of-range error means nothing changed. A shape mismatch error
    /// means the edit was applied and the cache now disagrees with the source;
    /// do not retry it.
    pub fn insert_item(&mut self, at: IndexPath) -> Result<()> {
        self.check_thread("SizeCache::insert_item");
        self.store.insert(at, Slot::EMPTY)?;
        sizecache_trace!(%at, "insert item");
        self.after_structural_edit()
    }

    /// Removes the slot at `at`, shifting later slots of the section down.
    ///
    /// An out-of-range error means nothing changed. A shape mismatch error
    /// means the edit was applied and the cache now disagrees with the source;
    /// do not retry it.
    pub fn delete_item(&mut self, at: IndexPath) -> Result<()> {
        self.check_thread("SizeCache::delete_item");
        self.store.remove(at)?;
        sizecache_trace!(%at, "delete item");
        self.after_structural_edit()
    }

    /// Clears the slot at `at` without changing the shape.
    pub fn reload_item(&mut self, at: IndexPath) -> Result<()> {
        self.check_thread("SizeCache::reload_item");
        let cleared = self.store.try_get_mut(at)?.clear();
        sizecache_trace!(%at, cleared, "reload item");
        Ok(())
    }

    /// Moves the slot at `from`, value included, to `to`.
    ///
    /// The slot is removed first and `to.item()` then indexes the destination
    /// section as it is after that removal.
    ///
    /// An out-of-range error means nothing changed. A shape mismatch error
    /// means the edit was applied and the cache now disagrees with the source;
    /// do not retry it.
    pub fn move_item(&mut self, from: IndexPath, to: IndexPath) -> Result<()> {
        self.check_thread("SizeCache::move_item");
        self.store.move_item(from, to)?;
        sizecache_trace!(%from, %to, "move item");
        self.after_structural_edit()
    }

    // -------------------------------------------------------------------------
    // Section mutations
    // -------------------------------------------------------------------------

    /// Inserts an empty section at `index`, shifting later sections up.
    ///
    /// `index` may equal the section count (append).
    ///
    /// An out-of-range error means nothing changed. A shape mismatch error
    /// means the edit was applied and the cache now disagrees with the source;
    /// do not retry it.
    pub fn insert_section(&mut self, index: usize) -> Result<()> {
        self.check_thread("SizeCache::insert_section");
        self.store.insert_section(index, Vec::new())?;
        sizecache_trace!(section = index, "insert section");
        self.after_structural_edit()
    }

    /// Removes the section at `index` and all its slots.
    ///
    /// An out-of-range error means nothing changed. A shape mismatch error
    /// means the edit was applied and the cache now disagrees with the source;
    /// do not retry it.
    pub fn remove_section(&mut self, index: usize) -> Result<()> {
        self.check_thread("SizeCache::remove_section");
        let removed = self.store.remove_section(index)?;
        sizecache_trace!(section = index, slots = removed.len(), "remove section");
        self.after_structural_edit()
    }

    /// Clears every slot of the section at `index` without changing its
    /// slot count.
    pub fn reload_section(&mut self, index: usize) -> Result<()> {
        self.check_thread("SizeCache::reload_section");
        let cleared = self
            .store
            .section_slice_mut(index)?
            .iter_mut()
            .map(Slot::clear)
            .filter(|&cleared| cleared)
            .count();
        sizecache_trace!(section = index, cleared, "reload section");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Batching
    // -------------------------------------------------------------------------

    /// Opens a batch bracket. Brackets nest.
    ///
    /// Mutations are still applied immediately; the bracket only marks that a
    /// multi-operation replay is in progress.
    pub fn begin_batch(&mut self) {
        self.check_thread("SizeCache::begin_batch");
        if self.batch.begin() {
            sizecache_debug!(source = %self.source_id, "batch opened");
        } else {
            sizecache_trace!(depth = self.batch.depth(), "nested batch opened");
        }
    }

    /// Closes the innermost batch bracket.
    ///
    /// Closing the outermost bracket verifies the shape unless shape checks
    /// are off. Closing with no open bracket logs a warning and does nothing.
    pub fn end_batch(&mut self) -> Result<()> {
        self.check_thread("SizeCache::end_batch");
        match self.batch.end() {
            BatchEnd::Outermost => {
                sizecache_debug!(source = %self.source_id, "batch closed");
                if self.config.shape_check != ShapeCheck::Off {
                    self.verify_shape()?;
                }
            }
            BatchEnd::Nested => {
                sizecache_trace!(depth = self.batch.depth(), "nested batch closed");
            }
            BatchEnd::Unbalanced => {
                sizecache_warn!(source = %self.source_id, "end_batch without an open batch ignored");
            }
        }
        Ok(())
    }

    /// Returns `true` while a batch bracket is open.
    #[inline]
    pub fn is_batching(&self) -> bool {
        self.batch.is_batching()
    }

    /// Returns the number of open batch brackets.
    #[inline]
    pub fn batch_depth(&self) -> usize {
        self.batch.depth()
    }

    fn after_structural_edit(&self) -> Result<()> {
        match self.config.shape_check {
            ShapeCheck::Off => Ok(()),
            ShapeCheck::OnBatchEnd if self.batch.is_batching() => Ok(()),
            ShapeCheck::OnBatchEnd | ShapeCheck::EveryOperation => self.verify_shape(),
        }
    }

    #[inline]
    fn check_thread(&self, operation: &str) {
        if self.config.thread_checks && are_thread_checks_enabled() {
            self.affinity.assert_same_thread(operation);
        }
    }
}

static_assertions::assert_impl_all!(SizeCache: Send, Sync);
