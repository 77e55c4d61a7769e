use tempfile::tempdir;

use super::*;

#[test]
fn test_scan_start_narrows_to_largest_entry_leq_target() {
    let mut idx = SparseIndex::new();
    idx.push(10, 0);
    idx.push(30, 200);
    idx.push(50, 400);

    assert_eq!(idx.scan_start(9), None);
    assert_eq!(idx.scan_start(10), Some(0));
    assert_eq!(idx.scan_start(25), Some(0));
    assert_eq!(idx.scan_start(30), Some(200));
    assert_eq!(idx.scan_start(999), Some(400));
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("idx.dat");

    let mut idx = SparseIndex::new();
    for i in 0..7 {
        idx.push(i * 10, i * 1000);
    }
    idx.save(&path).unwrap();

    let loaded = SparseIndex::load(&path).unwrap();
    assert_eq!(loaded.len(), idx.len());
    assert_eq!(loaded.entries(), idx.entries());
}

#[test]
fn test_s2_scenario_entries_at_expected_offsets() {
    // S2: G=2, 7 sorted order records, record_size known by the caller.
    const RECORD_SIZE: i64 = 150;
    let mut idx = SparseIndex::new();
    let gap = 2;
    for i in 0..7i64 {
        if i % gap == 0 {
            idx.push(i, i * RECORD_SIZE);
        }
    }
    let offsets: Vec<i64> = idx.entries().iter().map(|e| e.offset).collect();
    assert_eq!(offsets, vec![0, 2 * RECORD_SIZE, 4 * RECORD_SIZE, 6 * RECORD_SIZE]);
}
