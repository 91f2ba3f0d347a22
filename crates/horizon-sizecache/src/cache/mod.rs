//! Positional size cache.
//!
//! - [`Slot`]: one optional [`Size`] per position
//! - [`SectionStore`]: bounds-checked nested storage the cache is built on
//! - [`SizeCache`]: the facade callers read, write and mutate
//! - [`ChangeAdapter`]: turns source notifications into facade calls
//! - [`CacheBinding`]: keeps an adapter connected for a scope
//!
//! # Replaying a change burst by hand
//!
//! ```
//! use std::sync::Arc;
//! use horizon_sizecache::cache::{Size, SizeCache};
//! use horizon_sizecache::model::{IndexPath, SectionedModel};
//!
//! let model = Arc::new(SectionedModel::new(vec![vec![1, 2], vec![3]]));
//! let mut cache = SizeCache::new(&model);
//! cache.set(IndexPath::new(1, 0), Size::new(10.0, 10.0)).unwrap();
//!
//! model.insert_section(1, Vec::new()).unwrap();
//!
//! cache.begin_batch();
//! cache.insert_section(1).unwrap();
//! cache.end_batch().unwrap();
//!
//! assert_eq!(cache.get(IndexPath::new(2, 0)), Some(Size::new(10.0, 10.0)));
//! ```

mod adapter;
mod batch;
mod binding;
mod config;
mod size_cache;
mod slot;
mod store;

pub use adapter::ChangeAdapter;
pub use batch::{BatchEnd, BatchState};
pub use binding::CacheBinding;
pub use config::{CacheConfig, ShapeCheck};
pub use size_cache::{SharedSizeCache, SizeCache};
pub use slot::{Size, Slot};
pub use store::SectionStore;
