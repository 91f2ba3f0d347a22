//! Positional size memoization for sectioned collections.
//!
//! A list or grid that measures its cells wants to measure each cell once.
//! This crate keeps one optional measured [`Size`](cache::Size) per
//! `(section, item)` position of a data source and keeps that table shaped
//! like the source as items and sections are inserted, removed, moved and
//! reloaded.
//!
//! - **Model boundary**: [`IndexPath`](model::IndexPath) positions, the
//!   [`SectionedSource`](model::SectionedSource) trait, typed change
//!   notifications and the in-memory [`SectionedModel`](model::SectionedModel)
//! - **Cache**: the [`SizeCache`](cache::SizeCache) facade over a
//!   bounds-checked section store, with nestable batch brackets and optional
//!   shape verification
//! - **Synchronization**: [`ChangeAdapter`](cache::ChangeAdapter) and
//!   [`CacheBinding`](cache::CacheBinding) replay a source's notifications
//!   onto its cache
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_sizecache::prelude::*;
//!
//! let model = Arc::new(SectionedModel::new(vec![vec!["a", "b", "c"]]));
//! let binding = CacheBinding::attach(&model, CacheConfig::default());
//!
//! let size = binding
//!     .cache()
//!     .lock()
//!     .get_or_insert_with(IndexPath::new(0, 2), || Size::new(120.0, 44.0))
//!     .unwrap();
//!
//! model.move_item(IndexPath::new(0, 2), IndexPath::new(0, 0)).unwrap();
//! assert_eq!(binding.cache().lock().get(IndexPath::new(0, 0)), Some(size));
//! ```
//!
//! # Threading
//!
//! Caches are `Send + Sync` but expect every mutation, and every notification
//! delivery, to happen on one thread in source order. See
//! [`CacheConfig::thread_checks`](cache::CacheConfig::thread_checks).

pub mod cache;
pub mod model;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::cache::{
        CacheBinding, CacheConfig, ChangeAdapter, ShapeCheck, SharedSizeCache, Size, SizeCache,
    };
    pub use crate::model::{
        ChangeEvent, ChangeKind, IndexPath, ItemChange, ObjectSource, SectionChange,
        SectionedModel, SectionedSource, SourceId, SourceNotification,
    };
    pub use crate::Error;
}
