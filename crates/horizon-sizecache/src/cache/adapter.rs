//! Replays a source's change notifications onto a size cache.

use std::sync::Arc;

use horizon_sizecache_core::logging::{span_names, targets};
use horizon_sizecache_core::{ConnectionId, Signal};

use super::size_cache::{SharedSizeCache, SizeCache};
use crate::error::{Error, Result};
use crate::model::{ChangeEvent, ChangeKind, IndexPath, ItemChange, SectionChange, SourceId, SourceNotification};

/// Forwards the notifications of exactly one source to a cache.
///
/// | Notification        | Cache call                                  |
/// |---------------------|---------------------------------------------|
/// | `WillChange`        | `begin_batch`                               |
/// | item `Insert`       | `insert_item(new)`                          |
/// | item `Delete`       | `delete_item(old)`                          |
/// | item `Move`         | `move_item(old, new)`                       |
/// | item `Update`       | `reload_item(old)`, or `new` if `old` is absent |
/// | section `Insert`    | `insert_section(index)`                     |
/// | section `Delete`    | `remove_section(index)`                     |
/// | section `Update`    | `reload_section(index)`                     |
/// | `DidChange`         | `end_batch`                                 |
///
/// Section `Move` notifications are ignored. Notifications stamped with any
/// other source ID are discarded, so several adapters can listen on one
/// shared channel.
#[derive(Debug, Clone)]
pub struct ChangeAdapter {
    source_id: SourceId,
    cache: SharedSizeCache,
}

impl ChangeAdapter {
    /// Creates an adapter feeding `cache`, bound to the cache's source.
    pub fn new(cache: SharedSizeCache) -> Self {
        let source_id = cache.lock().source_id();
        Self { source_id, cache }
    }

    /// Returns the ID of the source whose notifications are honored.
    pub fn source_id(&self) -> SourceId {
        self.source_id
    }

    /// Returns the cache being fed.
    pub fn cache(&self) -> &SharedSizeCache {
        &self.cache
    }

    /// Applies `note` to the cache if it came from the bound source.
    ///
    /// Returns `Ok(false)` for a notification from another source.
    pub fn handle(&self, note: &SourceNotification) -> Result<bool> {
        if note.source != self.source_id {
            tracing::trace!(
                target: targets::ADAPTER,
                bound = %self.source_id,
                sender = %note.source,
                "foreign notification discarded"
            );
            return Ok(false);
        }

        let _span = tracing::trace_span!(
            target: targets::ADAPTER,
            span_names::NOTIFICATION,
            source = %note.source
        )
        .entered();

        let mut cache = self.cache.lock();
        apply_event(&mut cache, &note.event)?;
        Ok(true)
    }

    /// Connects the adapter to `channel`, logging failed notifications.
    ///
    /// The connection keeps the adapter alive until it is disconnected.
    pub fn listen(self: &Arc<Self>, channel: &Signal<SourceNotification>) -> ConnectionId {
        self.listen_with(channel, |error| {
            tracing::warn!(target: targets::ADAPTER, %error, "notification could not be applied");
        })
    }

    /// Connects the adapter to `channel`, passing failed notifications to
    /// `on_error`.
    pub fn listen_with<F>(self: &Arc<Self>, channel: &Signal<SourceNotification>, on_error: F) -> ConnectionId
    where
        F: Fn(Error) + Send + Sync + 'static,
    {
        let adapter = Arc::clone(self);
        let id = channel.connect(move |note: &SourceNotification| {
            if let Err(error) = adapter.handle(note) {
                on_error(error);
            }
        });
        tracing::debug!(
            target: targets::ADAPTER,
            source = %self.source_id,
            "adapter connected"
        );
        id
    }
}

fn apply_event(cache: &mut SizeCache, event: &ChangeEvent) -> Result<()> {
    match event {
        ChangeEvent::WillChange => {
            cache.begin_batch();
            Ok(())
        }
        ChangeEvent::Item(change) => apply_item(cache, change),
        ChangeEvent::Section(change) => apply_section(cache, change),
        ChangeEvent::DidChange => cache.end_batch(),
    }
}

fn apply_item(cache: &mut SizeCache, change: &ItemChange) -> Result<()> {
    match change.kind {
        ChangeKind::Insert => cache.insert_item(required(change.new, change.kind, "missing new position")?),
        ChangeKind::Delete => cache.delete_item(required(change.old, change.kind, "missing old position")?),
        ChangeKind::Move => {
            let from = required(change.old, change.kind, "missing old position")?;
            let to = required(change.new, change.kind, "missing new position")?;
            cache.move_item(from, to)
        }
        ChangeKind::Update => cache.reload_item(required(
            change.old.or(change.new),
            change.kind,
            "missing position",
        )?),
    }
}

fn apply_section(cache: &mut SizeCache, change: &SectionChange) -> Result<()> {
    match change.kind {
        ChangeKind::Insert => cache.insert_section(change.index),
        ChangeKind::Delete => cache.remove_section(change.index),
        ChangeKind::Update => cache.reload_section(change.index),
        ChangeKind::Move => {
            tracing::debug!(
                target: targets::ADAPTER,
                section = change.index,
                "section move notification ignored"
            );
            Ok(())
        }
    }
}

fn required(position: Option<IndexPath>, kind: ChangeKind, reason: &'static str) -> Result<IndexPath> {
    position.ok_or(Error::MalformedNotification { kind, reason })
}

static_assertions::assert_impl_all!(ChangeAdapter: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, Size};
    use crate::model::{SectionedModel, SectionedSource};
    use parking_lot::Mutex;

    const S: Size = Size::new(1.0, 2.0);

    fn at(section: usize, item: usize) -> IndexPath {
        IndexPath::new(section, item)
    }

    fn adapter_for(model: &Arc<SectionedModel<u32>>) -> ChangeAdapter {
        ChangeAdapter::new(SizeCache::with_config(model, CacheConfig::new().no_shape_check()).into_shared())
    }

    fn note(model: &SectionedModel<u32>, event: ChangeEvent) -> SourceNotification {
        SourceNotification::new(model.source_id(), event)
    }

    #[test]
    fn test_item_events_map_to_cache_calls() {
        let model = Arc::new(SectionedModel::new(vec![vec![1, 2, 3]]));
        let adapter = adapter_for(&model);
        adapter.cache().lock().set(at(0, 2), S).unwrap();

        adapter
            .handle(&note(&model, ChangeEvent::Item(ItemChange::delete(at(0, 0)))))
            .unwrap();
        assert_eq!(adapter.cache().lock().get(at(0, 1)), Some(S));

        adapter
            .handle(&note(&model, ChangeEvent::Item(ItemChange::moved(at(0, 1), at(0, 0)))))
            .unwrap();
        assert_eq!(adapter.cache().lock().get(at(0, 0)), Some(S));

        adapter
            .handle(&note(&model, ChangeEvent::Item(ItemChange::insert(at(0, 0)))))
            .unwrap();
        assert_eq!(adapter.cache().lock().get(at(0, 1)), Some(S));

        adapter
            .handle(&note(&model, ChangeEvent::Item(ItemChange::update(at(0, 1)))))
            .unwrap();
        assert_eq!(adapter.cache().lock().get(at(0, 1)), None);
    }

    #[test]
    fn test_update_falls_back_to_new_position() {
        let model = Arc::new(SectionedModel::new(vec![vec![1]]));
        let adapter = adapter_for(&model);
        adapter.cache().lock().set(at(0, 0), S).unwrap();

        let change = ItemChange {
            kind: ChangeKind::Update,
            old: None,
            new: Some(at(0, 0)),
        };
        adapter.handle(&note(&model, ChangeEvent::Item(change))).unwrap();
        assert_eq!(adapter.cache().lock().get(at(0, 0)), None);
    }

    #[test]
    fn test_malformed_item_change() {
        let model = Arc::new(SectionedModel::new(vec![vec![1]]));
        let adapter = adapter_for(&model);

        let change = ItemChange {
            kind: ChangeKind::Move,
            old: Some(at(0, 0)),
            new: None,
        };
        let err = adapter.handle(&note(&model, ChangeEvent::Item(change))).unwrap_err();
        assert_eq!(
            err,
            Error::MalformedNotification {
                kind: ChangeKind::Move,
                reason: "missing new position"
            }
        );
        assert_eq!(adapter.cache().lock().shape(), vec![1]);
    }

    #[test]
    fn test_section_events() {
        let model = Arc::new(SectionedModel::new(vec![vec![1], vec![2]]));
        let adapter = adapter_for(&model);
        adapter.cache().lock().set(at(1, 0), S).unwrap();

        let section = |kind, index| note(&model, ChangeEvent::Section(SectionChange::new(kind, index)));

        adapter.handle(&section(ChangeKind::Insert, 1)).unwrap();
        assert_eq!(adapter.cache().lock().shape(), vec![1, 0, 1]);
        assert_eq!(adapter.cache().lock().get(at(2, 0)), Some(S));

        adapter.handle(&section(ChangeKind::Update, 2)).unwrap();
        assert_eq!(adapter.cache().lock().get(at(2, 0)), None);

        adapter.handle(&section(ChangeKind::Move, 0)).unwrap();
        assert_eq!(adapter.cache().lock().shape(), vec![1, 0, 1]);

        adapter.handle(&section(ChangeKind::Delete, 0)).unwrap();
        assert_eq!(adapter.cache().lock().shape(), vec![0, 1]);
    }

    #[test]
    fn test_brackets_map_to_batch() {
        let model = Arc::new(SectionedModel::new(vec![vec![1]]));
        let adapter = adapter_for(&model);

        adapter.handle(&note(&model, ChangeEvent::WillChange)).unwrap();
        assert!(adapter.cache().lock().is_batching());
        adapter.handle(&note(&model, ChangeEvent::DidChange)).unwrap();
        assert!(!adapter.cache().lock().is_batching());
    }

    #[test]
    fn test_foreign_notifications_are_discarded() {
        let model = Arc::new(SectionedModel::new(vec![vec![1]]));
        let other = SectionedModel::new(vec![vec![1]]);
        let adapter = adapter_for(&model);

        let foreign = note(&other, ChangeEvent::Item(ItemChange::insert(at(0, 0))));
        assert_eq!(adapter.handle(&foreign), Ok(false));
        assert_eq!(adapter.cache().lock().shape(), vec![1]);
    }

    #[test]
    fn test_listen_with_reports_errors() {
        let model = Arc::new(SectionedModel::new(vec![vec![1]]));
        let adapter = Arc::new(adapter_for(&model));
        let errors = Arc::new(Mutex::new(Vec::new()));
        let errors_clone = errors.clone();

        let id = adapter.listen_with(model.changes(), move |error| errors_clone.lock().push(error));

        // The cache is missing the section the model now reports changes for.
        adapter.cache().lock().remove_section(0).unwrap();
        model.push_item(0, 2).unwrap();
        assert_eq!(errors.lock().len(), 1);
        assert!(errors.lock()[0].is_out_of_range());

        assert!(model.changes().disconnect(id));
    }

    #[test]
    fn test_listen_keeps_cache_in_step() {
        let model = Arc::new(SectionedModel::new(vec![vec![1, 2]]));
        let adapter = Arc::new(adapter_for(&model));
        let id = adapter.listen(model.changes());

        model.insert_section(0, vec![7, 8, 9]).unwrap();
        model.remove_item(at(1, 0)).unwrap();

        assert_eq!(adapter.cache().lock().shape(), model.shape());
        model.changes().disconnect(id);
    }
}
