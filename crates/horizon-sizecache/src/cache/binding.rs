//! Scoped connection between a source's change signal and a cache.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use horizon_sizecache_core::ConnectionId;
use horizon_sizecache_core::logging::targets;

use super::adapter::ChangeAdapter;
use super::config::CacheConfig;
use super::size_cache::{SharedSizeCache, SizeCache};
use crate::error::Error;
use crate::model::SectionedSource;

/// Keeps a cache in step with its source for as long as the binding lives.
///
/// Dropping the binding disconnects the adapter from the source. Errors raised
/// while applying notifications cannot be returned to whoever edited the
/// source, so they are collected here and read back with
/// [`take_errors`](Self::take_errors).
///
/// # Deadlocks
///
/// Notifications are applied synchronously, on the thread that edits the
/// source, by locking [`cache`](Self::cache). That lock is a
/// `parking_lot::Mutex` and is not reentrant, so editing the source while
/// holding it on the same thread deadlocks. Release the guard first:
///
/// ```ignore
/// let cache = binding.cache().lock();
/// model.push_item(0, item); // deadlock: the adapter waits for `cache`
/// ```
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_sizecache::cache::{CacheBinding, CacheConfig, Size};
/// use horizon_sizecache::model::{IndexPath, SectionedModel};
///
/// let model = Arc::new(SectionedModel::new(vec![vec![1, 2, 3]]));
/// let binding = CacheBinding::attach(&model, CacheConfig::default());
///
/// binding.cache().lock().set(IndexPath::new(0, 2), Size::new(50.0, 20.0)).unwrap();
/// model.remove_item(IndexPath::new(0, 0)).unwrap();
///
/// assert_eq!(binding.cache().lock().get(IndexPath::new(0, 1)), Some(Size::new(50.0, 20.0)));
/// assert!(binding.take_errors().is_empty());
/// ```
pub struct CacheBinding {
    adapter: Arc<ChangeAdapter>,
    source: Weak<dyn SectionedSource>,
    connection: ConnectionId,
    errors: Arc<Mutex<Vec<Error>>>,
}

impl CacheBinding {
    /// Connects `cache` to the change signal of `source`.
    ///
    /// `cache` should have been created for `source`; notifications carrying
    /// any other source ID are discarded.
    pub fn connect<S: SectionedSource + 'static>(source: &Arc<S>, cache: SharedSizeCache) -> Self {
        let adapter = Arc::new(ChangeAdapter::new(cache));
        if adapter.source_id() != source.source_id() {
            tracing::warn!(
                target: targets::ADAPTER,
                cache_source = %adapter.source_id(),
                source = %source.source_id(),
                "binding a cache to a source it was not created for"
            );
        }

        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&errors);
        let connection = adapter.listen_with(source.changes(), move |error: Error| {
            tracing::warn!(target: targets::ADAPTER, %error, "notification could not be applied");
            sink.lock().push(error);
        });

        let weak: Weak<S> = Arc::downgrade(source);
        Self {
            adapter,
            source: weak,
            connection,
            errors,
        }
    }

    /// Creates a cache for `source` and binds it.
    pub fn attach<S: SectionedSource + 'static>(source: &Arc<S>, config: CacheConfig) -> Self {
        let cache = SizeCache::with_config(source, config).into_shared();
        Self::connect(source, cache)
    }

    /// Returns the bound cache.
    pub fn cache(&self) -> &SharedSizeCache {
        self.adapter.cache()
    }

    /// Returns the adapter applying notifications.
    pub fn adapter(&self) -> &ChangeAdapter {
        &self.adapter
    }

    /// Returns `true` while the source is alive and the adapter is connected.
    pub fn is_connected(&self) -> bool {
        self.source
            .upgrade()
            .is_some_and(|source| source.changes().is_connected(self.connection))
    }

    /// Returns and clears the errors collected since the last call.
    pub fn take_errors(&self) -> Vec<Error> {
        std::mem::take(&mut *self.errors.lock())
    }
}

impl Drop for CacheBinding {
    fn drop(&mut self) {
        if let Some(source) = self.source.upgrade() {
            source.changes().disconnect(self.connection);
        }
        tracing::debug!(
            target: targets::ADAPTER,
            source = %self.adapter.source_id(),
            "binding dropped"
        );
    }
}

impl std::fmt::Debug for CacheBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheBinding")
            .field("source_id", &self.adapter.source_id())
            .field("connection", &self.connection)
            .field("pending_errors", &self.errors.lock().len())
            .finish()
    }
}

static_assertions::assert_impl_all!(CacheBinding: Send, Sync);
