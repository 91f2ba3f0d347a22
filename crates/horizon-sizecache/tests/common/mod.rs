//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use horizon_sizecache::cache::Size;
use horizon_sizecache::model::IndexPath;

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber so logs show up under `--nocapture`.
///
/// Filtered by `RUST_LOG`; silent by default.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn at(section: usize, item: usize) -> IndexPath {
    IndexPath::new(section, item)
}

/// A size that identifies the item it was measured for.
pub fn size_of(id: u32) -> Size {
    Size::new(id as f32, 1.0)
}
