use super::*;

#[test]
fn test_lookup_unseen_key_is_empty() {
    let idx = HashIndex::new(16);
    assert!(idx.lookup(999).is_empty());
}

#[test]
fn test_single_insert_then_lookup() {
    let mut idx = HashIndex::new(16);
    idx.insert(7, 101, 0);
    let got = idx.lookup(7);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].order_id, 101);
    assert_eq!(got[0].file_offset, 0);
}

/// Universal property #4: a key inserted `n` times under the same
/// `product_id` is returned exactly `n` times by `lookup`.
#[test]
fn test_multi_valued_lookup_returns_exact_count() {
    let mut idx = HashIndex::new(16);
    for i in 0..5 {
        idx.insert(42, 1000 + i, i * 150);
    }
    idx.insert(43, 2000, 999);

    let got = idx.lookup(42);
    assert_eq!(got.len(), 5);
    let order_ids: Vec<i64> = got.iter().map(|e| e.order_id).collect();
    // Chain order is most-recently-inserted first.
    assert_eq!(order_ids, vec![1004, 1003, 1002, 1001, 1000]);

    assert_eq!(idx.lookup(43).len(), 1);
}

#[test]
fn test_collision_count_increments_only_on_shared_bucket() {
    let mut idx = HashIndex::new(1); // single bucket forces every insert to collide
    assert_eq!(idx.collision_count(), 0);
    idx.insert(1, 10, 0);
    assert_eq!(idx.collision_count(), 0);
    idx.insert(2, 20, 1);
    assert_eq!(idx.collision_count(), 1);
    idx.insert(3, 30, 2);
    assert_eq!(idx.collision_count(), 2);
}

#[test]
fn test_remove_does_not_decrement_collision_count() {
    let mut idx = HashIndex::new(1);
    idx.insert(1, 10, 0);
    idx.insert(1, 11, 1);
    assert_eq!(idx.collision_count(), 1);
    let removed = idx.remove(1);
    assert_eq!(removed, 2);
    assert_eq!(idx.collision_count(), 1, "collision_count is historical, not live occupancy");
    assert!(idx.lookup(1).is_empty());
}

#[test]
fn test_remove_only_unlinks_matching_key_in_shared_bucket() {
    let mut idx = HashIndex::new(1);
    idx.insert(1, 10, 0);
    idx.insert(2, 20, 1);
    idx.insert(1, 11, 2);

    let removed = idx.remove(1);
    assert_eq!(removed, 2);
    assert!(idx.lookup(1).is_empty());
    let remaining = idx.lookup(2);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].order_id, 20);
}

#[test]
fn test_remove_missing_key_returns_zero() {
    let mut idx = HashIndex::new(16);
    idx.insert(1, 10, 0);
    assert_eq!(idx.remove(999), 0);
    assert_eq!(idx.lookup(1).len(), 1);
}

#[test]
fn test_stats_report_occupancy_and_longest_chain() {
    let mut idx = HashIndex::new(4);
    for i in 0..10 {
        idx.insert(i, i, i);
    }
    let stats = idx.stats();
    assert_eq!(stats.bucket_count, 4);
    assert_eq!(stats.element_count, 10);
    assert!(stats.occupied_buckets <= 4);
    assert!(stats.longest_chain >= 3); // pigeonhole: 10 keys into 4 buckets
    assert!((stats.load_factor - 2.5).abs() < 1e-9);
}

#[test]
fn test_stats_overflow_bin_catches_long_chains() {
    let mut idx = HashIndex::new(1);
    for i in 0..15 {
        idx.insert(i, i, i);
    }
    let stats = idx.stats();
    assert_eq!(stats.longest_chain, 15);
    assert_eq!(stats.overflow_bin, 1);
    assert_eq!(stats.chain_histogram.iter().sum::<usize>(), 0);
}
