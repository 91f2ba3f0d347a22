//! Tests for the cache facade driven by hand, without an adapter.

mod common;

use std::sync::Arc;

use common::{at, init_tracing};
use horizon_sizecache::cache::{CacheConfig, ShapeCheck, Size, SizeCache};
use horizon_sizecache::model::{ObjectSource, SectionedModel};

const S: Size = Size::new(64.0, 32.0);
const T: Size = Size::new(16.0, 8.0);

#[test]
fn test_delete_first_item_shifts_cached_value() {
    init_tracing();
    let model = Arc::new(SectionedModel::new(vec![vec!['a', 'b', 'c']]));
    let mut cache = SizeCache::new(&model);
    assert_eq!(cache.cached_count(), 0);

    cache.set(at(0, 1), S).unwrap();
    model.remove_item(at(0, 0)).unwrap();
    cache.delete_item(at(0, 0)).unwrap();

    assert_eq!(cache.get(at(0, 0)), Some(S));
    assert_eq!(cache.item_count(0), Some(2));
}

#[test]
fn test_insert_section_keeps_neighbours() {
    init_tracing();
    let model = Arc::new(SectionedModel::new(vec![vec![1, 2], vec![3]]));
    let mut cache = SizeCache::new(&model);
    cache.set(at(0, 0), S).unwrap();
    cache.set(at(0, 1), T).unwrap();
    cache.set(at(1, 0), T).unwrap();

    model.insert_section(1, Vec::new()).unwrap();
    cache.insert_section(1).unwrap();

    assert_eq!(cache.section_count(), 3);
    assert_eq!(cache.item_count(1), Some(0));
    assert_eq!(cache.get(at(0, 0)), Some(S));
    assert_eq!(cache.get(at(0, 1)), Some(T));
    assert_eq!(cache.get(at(2, 0)), Some(T));
}

#[test]
fn test_positional_isolation() {
    init_tracing();
    let model = Arc::new(SectionedModel::new(vec![vec![1, 2, 3, 4], vec![5, 6]]));
    let mut cache = SizeCache::new(&model);
    cache.set(at(0, 1), S).unwrap();

    // Edits after the position or in another section leave it alone.
    model.remove_item(at(0, 3)).unwrap();
    cache.delete_item(at(0, 3)).unwrap();
    model.insert_item(at(1, 0), 7).unwrap();
    cache.insert_item(at(1, 0)).unwrap();
    model.move_item(at(1, 2), at(1, 0)).unwrap();
    cache.move_item(at(1, 2), at(1, 0)).unwrap();
    assert_eq!(cache.get(at(0, 1)), Some(S));

    // An insert before it shifts its index.
    model.insert_item(at(0, 0), 8).unwrap();
    cache.insert_item(at(0, 0)).unwrap();
    assert_eq!(cache.get(at(0, 1)), None);
    assert_eq!(cache.get(at(0, 2)), Some(S));
}

#[test]
fn test_move_preserves_value_and_shifts_neighbours() {
    init_tracing();
    let model = Arc::new(SectionedModel::new(vec![vec![1, 2, 3, 4]]));
    let mut cache = SizeCache::new(&model);
    cache.set(at(0, 1), S).unwrap();
    cache.set(at(0, 2), T).unwrap();

    model.move_item(at(0, 1), at(0, 3)).unwrap();
    cache.move_item(at(0, 1), at(0, 3)).unwrap();

    assert_eq!(cache.get(at(0, 3)), Some(S));
    // The slot that followed the moved one now occupies its old index.
    assert_eq!(cache.get(at(0, 1)), Some(T));
    assert_eq!(model.object(at(0, 3)), Some(2));
}

#[test]
fn test_reload_clears_one_without_reshaping() {
    init_tracing();
    let model = Arc::new(SectionedModel::new(vec![vec![1, 2], vec![3]]));
    let mut cache = SizeCache::new(&model);
    cache.set(at(0, 0), S).unwrap();
    cache.set(at(0, 1), T).unwrap();

    cache.reload_item(at(0, 1)).unwrap();

    assert_eq!(cache.get(at(0, 1)), None);
    assert_eq!(cache.get(at(0, 0)), Some(S));
    assert_eq!(cache.shape(), vec![2, 1]);
}

#[test]
fn test_invalidate_after_unreported_edits() {
    init_tracing();
    let model = Arc::new(SectionedModel::new(vec![vec![1]]));
    let mut cache = SizeCache::with_config(&model, CacheConfig::new().no_shape_check());
    cache.set(at(0, 0), S).unwrap();

    model.push_section(vec![2, 3]);
    model.push_item(0, 4).unwrap();
    assert!(cache.verify_shape().unwrap_err().is_shape_mismatch());

    cache.invalidate();
    assert!(cache.verify_shape().is_ok());
    assert_eq!(cache.shape(), vec![2, 2]);
    assert_eq!(cache.cached_count(), 0);
}

#[test]
fn test_batch_end_reports_mismatch() {
    init_tracing();
    let model = Arc::new(SectionedModel::new(vec![vec![1, 2]]));
    let mut cache =
        SizeCache::with_config(&model, CacheConfig::new().shape_check(ShapeCheck::OnBatchEnd));

    cache.begin_batch();
    cache.delete_item(at(0, 0)).unwrap();
    cache.delete_item(at(0, 0)).unwrap();
    assert_eq!(cache.item_count(0), Some(0));

    let err = cache.end_batch().unwrap_err();
    assert!(err.is_shape_mismatch());
    assert!(!cache.is_batching());
}
