//! Change notifications emitted by sectioned data sources.
//!
//! A source reports each burst of edits as:
//!
//! ```text
//! WillChange, (Item | Section)*, DidChange
//! ```
//!
//! Every event is tagged with the [`SourceId`] of the emitting source so that
//! listeners sharing one dispatch channel can tell sources apart.

use super::index_path::IndexPath;
use super::source::SourceId;

/// The kind of edit a change event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// A new item or section was inserted.
    Insert,
    /// An item or section was deleted.
    Delete,
    /// An item moved to another position.
    Move,
    /// An item or section changed in place.
    Update,
}

/// A change to a single item.
///
/// Which positions are present depends on the kind:
///
/// | kind     | `old`    | `new`    |
/// |----------|----------|----------|
/// | `Insert` | -        | required |
/// | `Delete` | required | -        |
/// | `Move`   | required | required |
/// | `Update` | used     | fallback |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemChange {
    /// The kind of edit.
    pub kind: ChangeKind,
    /// The position before the edit.
    pub old: Option<IndexPath>,
    /// The position after the edit.
    pub new: Option<IndexPath>,
}

impl ItemChange {
    /// An item was inserted at `at`.
    pub fn insert(at: IndexPath) -> Self {
        Self {
            kind: ChangeKind::Insert,
            old: None,
            new: Some(at),
        }
    }

    /// The item at `at` was deleted.
    pub fn delete(at: IndexPath) -> Self {
        Self {
            kind: ChangeKind::Delete,
            old: Some(at),
            new: None,
        }
    }

    /// The item at `from` moved to `to`.
    pub fn moved(from: IndexPath, to: IndexPath) -> Self {
        Self {
            kind: ChangeKind::Move,
            old: Some(from),
            new: Some(to),
        }
    }

    /// The item at `at` changed in place.
    pub fn update(at: IndexPath) -> Self {
        Self {
            kind: ChangeKind::Update,
            old: Some(at),
            new: None,
        }
    }
}

/// A change to a whole section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionChange {
    /// The kind of edit. `Move` is not meaningful for sections.
    pub kind: ChangeKind,
    /// The section index the edit applies to.
    pub index: usize,
}

impl SectionChange {
    /// Creates a section change.
    pub fn new(kind: ChangeKind, index: usize) -> Self {
        Self { kind, index }
    }
}

/// One event in a source's change stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The source is about to report a burst of changes.
    WillChange,
    /// An item changed.
    Item(ItemChange),
    /// A section changed.
    Section(SectionChange),
    /// The burst is complete.
    DidChange,
}

/// A change event together with the identity of the source that emitted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceNotification {
    /// The emitting source.
    pub source: SourceId,
    /// What happened.
    pub event: ChangeEvent,
}

impl SourceNotification {
    /// Creates a notification.
    pub fn new(source: SourceId, event: ChangeEvent) -> Self {
        Self { source, event }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_change_constructors() {
        let a = IndexPath::new(0, 1);
        let b = IndexPath::new(1, 0);

        assert_eq!(ItemChange::insert(a).new, Some(a));
        assert_eq!(ItemChange::insert(a).old, None);
        assert_eq!(ItemChange::delete(a).old, Some(a));

        let moved = ItemChange::moved(a, b);
        assert_eq!(moved.kind, ChangeKind::Move);
        assert_eq!((moved.old, moved.new), (Some(a), Some(b)));

        assert_eq!(ItemChange::update(b).kind, ChangeKind::Update);
    }

    #[test]
    fn test_notification_carries_source() {
        let id = SourceId::next();
        let note = SourceNotification::new(id, ChangeEvent::WillChange);
        assert_eq!(note.source, id);
        assert_eq!(note.event, ChangeEvent::WillChange);
    }
}
