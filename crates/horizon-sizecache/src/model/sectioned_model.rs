//! In-memory sectioned data source.
//!
//! `SectionedModel<T>` stores items in a section store and emits the change
//! notifications described on [`SectionedSource`]. It is the reference source
//! for caches: every edit is applied before its notification is emitted, so a
//! bound cache matches the model after each individual notification.

use parking_lot::{Mutex, RwLock};

use horizon_sizecache_core::Signal;
use horizon_sizecache_core::logging::targets;

use super::change::{ChangeEvent, ChangeKind, ItemChange, SectionChange, SourceNotification};
use super::index_path::IndexPath;
use super::source::{ObjectSource, SectionedSource, SourceId};
use crate::cache::SectionStore;
use crate::error::Result;

/// Tracks the change burst currently being reported.
#[derive(Debug, Default)]
struct Burst {
    /// Nesting depth of `perform_batch` / standalone edits.
    depth: usize,
    /// Whether `WillChange` has been emitted for the current burst.
    open: bool,
}

impl Burst {
    /// Leaves one nesting level. Returns `true` if this closed an open burst.
    fn leave(&mut self) -> bool {
        self.depth = self.depth.saturating_sub(1);
        if self.depth > 0 {
            return false;
        }
        std::mem::take(&mut self.open)
    }
}

/// Leaves the burst level entered by `bracket`, also when a listener panics.
///
/// On unwind the level is left without emitting `DidChange`, so the next edit
/// starts a fresh burst.
struct BurstGuard<'a> {
    burst: &'a Mutex<Burst>,
    left: bool,
}

impl<'a> BurstGuard<'a> {
    fn enter(burst: &'a Mutex<Burst>) -> Self {
        burst.lock().depth += 1;
        Self { burst, left: false }
    }

    fn leave(mut self) -> bool {
        self.left = true;
        self.burst.lock().leave()
    }
}

impl Drop for BurstGuard<'_> {
    fn drop(&mut self) {
        if !self.left {
            self.burst.lock().leave();
        }
    }
}

/// A sectioned collection of items that reports its edits.
///
/// Standalone edits are reported as a burst of their own. Edits made inside
/// [`perform_batch`](Self::perform_batch) share one burst. A burst in which
/// nothing changed emits nothing.
///
/// # Example
///
/// ```
/// use horizon_sizecache::model::{IndexPath, SectionedModel, SectionedSource};
///
/// let model = SectionedModel::new(vec![vec!["a", "b"], vec!["c"]]);
/// model.perform_batch(|m| {
///     m.insert_item(IndexPath::new(1, 1), "d").unwrap();
///     m.remove_item(IndexPath::new(0, 0)).unwrap();
/// });
/// assert_eq!(model.shape(), vec![1, 2]);
/// ```
pub struct SectionedModel<T> {
    id: SourceId,
    sections: RwLock<SectionStore<T>>,
    changes: Signal<SourceNotification>,
    burst: Mutex<Burst>,
}

impl<T: Send + Sync> SectionedModel<T> {
    /// Creates a model holding the given sections.
    ///
    /// No notifications are emitted for the initial contents.
    pub fn new(sections: Vec<Vec<T>>) -> Self {
        Self {
            id: SourceId::next(),
            sections: RwLock::new(SectionStore::from(sections)),
            changes: Signal::new(),
            burst: Mutex::new(Burst::default()),
        }
    }

    /// Creates a model with no sections.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns `true` if the model has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.read().section_count() == 0
    }

    /// Calls `f` with the items of `section`, if it exists.
    pub fn with_section<R>(&self, section: usize, f: impl FnOnce(&[T]) -> R) -> Option<R> {
        self.sections.read().section(section).map(f)
    }

    /// Calls `f` with the item at `at`, if it exists.
    pub fn with_item<R>(&self, at: IndexPath, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.sections.read().get(at).map(f)
    }

    /// Reports every edit made by `f` as a single burst.
    ///
    /// Nested calls join the outermost burst.
    pub fn perform_batch<R>(&self, f: impl FnOnce(&Self) -> R) -> R {
        self.bracket(|| f(self))
    }

    // -------------------------------------------------------------------------
    // Item edits
    // -------------------------------------------------------------------------

    /// Inserts `item` at `at`, shifting later items in the section up.
    ///
    /// `at.item()` may equal the section's item count (append).
    pub fn insert_item(&self, at: IndexPath, item: T) -> Result<()> {
        self.bracket(|| {
            self.sections.write().insert(at, item)?;
            self.emit(ChangeEvent::Item(ItemChange::insert(at)));
            Ok(())
        })
    }

    /// Appends `item` to `section` and returns its position.
    pub fn push_item(&self, section: usize, item: T) -> Result<IndexPath> {
        let at = IndexPath::new(section, self.item_count(section));
        self.insert_item(at, item)?;
        Ok(at)
    }

    /// Removes and returns the item at `at`.
    pub fn remove_item(&self, at: IndexPath) -> Result<T> {
        self.bracket(|| {
            let removed = self.sections.write().remove(at)?;
            self.emit(ChangeEvent::Item(ItemChange::delete(at)));
            Ok(removed)
        })
    }

    /// Moves the item at `from` to `to`.
    ///
    /// `to` is interpreted against the sections as they are after the item has
    /// been removed from `from`.
    pub fn move_item(&self, from: IndexPath, to: IndexPath) -> Result<()> {
        self.bracket(|| {
            self.sections.write().move_item(from, to)?;
            self.emit(ChangeEvent::Item(ItemChange::moved(from, to)));
            Ok(())
        })
    }

    /// Modifies the item at `at` in place and reports it as updated.
    pub fn update_item<R>(&self, at: IndexPath, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        self.bracket(|| {
            let result = f(self.sections.write().try_get_mut(at)?);
            self.emit(ChangeEvent::Item(ItemChange::update(at)));
            Ok(result)
        })
    }

    /// Reports the item at `at` as updated without modifying it.
    pub fn reload_item(&self, at: IndexPath) -> Result<()> {
        self.update_item(at, |_| ())
    }

    // -------------------------------------------------------------------------
    // Section edits
    // -------------------------------------------------------------------------

    /// Inserts a section holding `items` at `index`.
    ///
    /// Reported as a section insert followed by one item insert per item, so
    /// listeners only ever see the new section grow from empty.
    pub fn insert_section(&self, index: usize, items: Vec<T>) -> Result<()> {
        self.bracket(|| {
            self.sections
                .write()
                .insert_section(index, Vec::with_capacity(items.len()))?;
            self.emit(ChangeEvent::Section(SectionChange::new(ChangeKind::Insert, index)));

            for (item_index, item) in items.into_iter().enumerate() {
                let at = IndexPath::new(index, item_index);
                self.sections.write().insert(at, item)?;
                self.emit(ChangeEvent::Item(ItemChange::insert(at)));
            }
            Ok(())
        })
    }

    /// Appends a section holding `items` and returns its index.
    pub fn push_section(&self, items: Vec<T>) -> usize {
        let index = self.section_count();
        // Appending is always in range.
        let _ = self.insert_section(index, items);
        index
    }

    /// Removes the section at `index` and returns its items.
    pub fn remove_section(&self, index: usize) -> Result<Vec<T>> {
        self.bracket(|| {
            let removed = self.sections.write().remove_section(index)?;
            self.emit(ChangeEvent::Section(SectionChange::new(ChangeKind::Delete, index)));
            Ok(removed)
        })
    }

    /// Modifies the items of a section in place and reports the section as
    /// updated. The item count cannot change.
    pub fn update_section<R>(&self, index: usize, f: impl FnOnce(&mut [T]) -> R) -> Result<R> {
        self.bracket(|| {
            let result = f(self.sections.write().section_slice_mut(index)?);
            self.emit(ChangeEvent::Section(SectionChange::new(ChangeKind::Update, index)));
            Ok(result)
        })
    }

    /// Reports the section at `index` as updated without modifying it.
    pub fn reload_section(&self, index: usize) -> Result<()> {
        self.update_section(index, |_| ())
    }

    // -------------------------------------------------------------------------
    // Notification plumbing
    // -------------------------------------------------------------------------

    fn bracket<R>(&self, f: impl FnOnce() -> R) -> R {
        let guard = BurstGuard::enter(&self.burst);
        let result = f();
        if guard.leave() {
            self.changes
                .emit(SourceNotification::new(self.id, ChangeEvent::DidChange));
        }
        result
    }

    /// Emits `event`, opening the burst with `WillChange` first if needed.
    fn emit(&self, event: ChangeEvent) {
        let open_burst = {
            let mut burst = self.burst.lock();
            let needs_open = !burst.open;
            burst.open = true;
            needs_open
        };
        if open_burst {
            self.changes
                .emit(SourceNotification::new(self.id, ChangeEvent::WillChange));
        }
        tracing::trace!(target: targets::MODEL, source = %self.id, ?event, "model change");
        self.changes.emit(SourceNotification::new(self.id, event));
    }
}

impl<T: Send + Sync> SectionedSource for SectionedModel<T> {
    fn source_id(&self) -> SourceId {
        self.id
    }

    fn section_count(&self) -> usize {
        self.sections.read().section_count()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections.read().item_count(section).unwrap_or(0)
    }

    fn changes(&self) -> &Signal<SourceNotification> {
        &self.changes
    }
}

impl<T: Clone + Send + Sync> ObjectSource for SectionedModel<T> {
    type Object = T;

    fn object(&self, at: IndexPath) -> Option<T> {
        self.with_item(at, T::clone)
    }
}

static_assertions::assert_impl_all!(SectionedModel<String>: Send, Sync);
