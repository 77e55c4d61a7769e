use std::fmt;

/// Statistics for a [super::HashIndex], grounded on the teacher's
/// `llrb::Stats` (`src/llrb/stats.rs`).
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub bucket_count: usize,
    pub element_count: usize,
    pub occupied_buckets: usize,
    pub load_factor: f64,
    /// `chain_histogram[n]` = number of buckets with exactly `n` entries,
    /// for `n` in `1..=10`. `chain_histogram[0]` is unused.
    pub chain_histogram: [usize; 11],
    /// Buckets with 11 or more entries, collapsed into one overflow bin.
    pub overflow_bin: usize,
    pub longest_chain: usize,
    pub collision_count: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "hashindex = {{ buckets={}, elements={}, occupied={}, load_factor={:.4} }}",
            self.bucket_count, self.element_count, self.occupied_buckets, self.load_factor
        )?;
        writeln!(f, "hashindex.longest_chain = {}", self.longest_chain)?;
        writeln!(f, "hashindex.collision_count = {}", self.collision_count)?;
        write!(f, "hashindex.chain_histogram = {:?} (>=11: {})", &self.chain_histogram[1..], self.overflow_bin)
    }
}
