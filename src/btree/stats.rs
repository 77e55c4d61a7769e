use std::fmt;

/// Statistics for a [super::BPlusTree], grounded on the teacher's
/// `llrb::Stats` (`src/llrb/stats.rs`): a plain data struct with a
/// human-readable `Display`.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub height: usize,
    pub node_count: usize,
    pub key_count: usize,
    pub memory_estimate: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "btree = {{ height={}, node_count={}, key_count={} }}", self.height, self.node_count, self.key_count)?;
        writeln!(f, "btree.memory_estimate = {} bytes", self.memory_estimate)
    }
}
