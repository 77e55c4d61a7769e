//! B+ tree node storage. Nodes live in an arena (`Vec<Node>` in
//! [super::BPlusTree]) addressed by `usize` handles rather than owning
//! pointers, per the Design Note in §9 that calls out pointer-based
//! trees and leaf-next back-pointers as worth re-architecting onto an
//! arena.

#[derive(Debug, Clone)]
pub struct Node {
    pub is_leaf: bool,
    pub keys: Vec<i64>,
    /// Leaf only: offset into the products file, parallel to `keys`.
    pub values: Vec<i64>,
    /// Internal only: `children.len() == keys.len() + 1`.
    pub children: Vec<usize>,
    /// Leaf only: handle of the right-sibling leaf.
    pub next: Option<usize>,
}

impl Node {
    pub fn new_leaf() -> Node {
        Node { is_leaf: true, keys: Vec::new(), values: Vec::new(), children: Vec::new(), next: None }
    }

    pub fn new_internal(keys: Vec<i64>, children: Vec<usize>) -> Node {
        Node { is_leaf: false, keys, values: Vec::new(), children, next: None }
    }
}
