use super::*;

fn min_max_key(tree: &BPlusTree, idx: usize) -> (i64, i64) {
    let node = tree.node_at(idx);
    if node.is_leaf {
        (*node.keys.first().unwrap(), *node.keys.last().unwrap())
    } else {
        let (first_min, _) = min_max_key(tree, node.children[0]);
        let (_, last_max) = min_max_key(tree, *node.children.last().unwrap());
        (first_min, last_max)
    }
}

fn assert_invariants(tree: &BPlusTree, idx: usize, depth: usize, leaf_depth: &mut Option<usize>) {
    let node = tree.node_at(idx);
    if node.is_leaf {
        match leaf_depth {
            None => *leaf_depth = Some(depth),
            Some(d) => assert_eq!(*d, depth, "all leaves must be at equal depth"),
        }
        assert!(node.keys.windows(2).all(|w| w[0] <= w[1]), "leaf keys must be ascending");
        return;
    }
    assert_eq!(node.children.len(), node.keys.len() + 1);
    assert!(node.keys.windows(2).all(|w| w[0] < w[1]), "internal keys must be strictly ascending");
    for (i, &key) in node.keys.iter().enumerate() {
        let (_, left_max) = min_max_key(tree, node.children[i]);
        let (right_min, _) = min_max_key(tree, node.children[i + 1]);
        assert!(key > left_max, "keys[i] must exceed max-key(children[i])");
        assert!(key <= right_min, "keys[i] must not exceed min-key(children[i+1])");
    }
    for &child in &node.children {
        assert_invariants(tree, child, depth + 1, leaf_depth);
    }
}

#[test]
fn test_search_missing_key_returns_none() {
    let tree = BPlusTree::new(4);
    assert_eq!(tree.search(42), None);
}

#[test]
fn test_insert_then_search_small_tree() {
    let mut tree = BPlusTree::new(4);
    for k in [10, 30, 20, 40, 5] {
        tree.insert(k, k * 100);
    }
    for k in [10, 30, 20, 40, 5] {
        assert_eq!(tree.search(k), Some(k * 100));
    }
    assert_eq!(tree.search(99), None);
}

#[test]
fn test_duplicate_key_returns_first_inserted() {
    let mut tree = BPlusTree::new(4);
    tree.insert(7, 111);
    tree.insert(7, 222);
    assert_eq!(tree.search(7), Some(111));
}

#[test]
fn test_s3_scenario_height_and_search_and_leaf_order() {
    let mut tree = BPlusTree::new(4);
    for k in 1..=250i64 {
        tree.insert(k, k * 10);
    }

    let stats = tree.stats();
    assert_eq!(stats.height, 5);
    assert_eq!(tree.search(137), Some(1370));

    let keys = tree.leaf_keys_in_order();
    let expected: Vec<i64> = (1..=250).collect();
    assert_eq!(keys, expected);
}

#[test]
fn test_invariants_hold_after_many_inserts() {
    let mut tree = BPlusTree::new(4);
    for k in (1..=250i64).rev() {
        tree.insert(k, k);
    }
    let mut leaf_depth = None;
    assert_invariants(&tree, tree.root_idx(), 0, &mut leaf_depth);
}

#[test]
fn test_stats_report_key_and_node_counts() {
    let mut tree = BPlusTree::new(4);
    for k in 1..=20i64 {
        tree.insert(k, k);
    }
    let stats = tree.stats();
    assert_eq!(stats.key_count, 20);
    assert!(stats.node_count > 1);
    assert!(stats.memory_estimate > 0);
}
