//! The data-source boundary of Horizon SizeCache.
//!
//! Caches mirror the shape of an externally owned collection. This module
//! defines how that collection is addressed and how it reports changes:
//!
//! - `IndexPath`: a `(section, item)` position
//! - `SectionedSource`: shape queries plus a change signal
//! - `ObjectSource`: positional object access for the rendering layer
//! - `SourceNotification`: one event of a source's change stream
//! - `SectionedModel`: an in-memory source that emits those events
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐  WillChange / Item / Section / DidChange  ┌───────────────┐
//! │ SectionedSource │──────────────────────────────────────────>│ ChangeAdapter │
//! └─────────────────┘                                           └───────────────┘
//!         ^                                                             │
//!         │ section_count / item_count                                  v
//!         └──────────────────────────────────────────────────────  SizeCache
//! ```

mod change;
mod index_path;
mod sectioned_model;
mod source;

pub use change::{ChangeEvent, ChangeKind, ItemChange, SectionChange, SourceNotification};
pub use index_path::IndexPath;
pub use sectioned_model::SectionedModel;
pub use source::{ObjectSource, SectionedSource, SourceId};
