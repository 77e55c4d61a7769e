//! Chained hash index from `product_id` to order-record locations, per
//! §4.5. Multi-valued by design: one product may have many orders.
//! Grounded on the teacher's `hash::CityHasher` (`src/hash/mod.rs`) for
//! the idea of a small dedicated hashing type, though here the
//! multiplicative hash is specified exactly by the spec rather than
//! delegated to a `Hasher` impl, so a free function is more direct.

mod stats;

pub use stats::Stats;

/// Knuth's multiplicative hash constant, per §4.5.
const HASH_MULTIPLIER: u64 = 2_654_435_761;

fn hash_bucket(product_id: i64, buckets: usize) -> usize {
    let k = product_id as u64;
    (k.wrapping_mul(HASH_MULTIPLIER) % buckets as u64) as usize
}

/// One entry in a bucket chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashEntry {
    pub product_id: i64,
    pub order_id: i64,
    pub file_offset: i64,
    next: Option<usize>,
}

/// Fixed bucket-array chained hash index.
pub struct HashIndex {
    buckets: Vec<Option<usize>>,
    entries: Vec<HashEntry>,
    collision_count: usize,
}

impl HashIndex {
    pub fn new(bucket_count: usize) -> HashIndex {
        HashIndex { buckets: vec![None; bucket_count], entries: Vec::new(), collision_count: 0 }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn collision_count(&self) -> usize {
        self.collision_count
    }

    /// Prepend a new entry to the bucket's chain. `collision_count` is
    /// incremented iff the bucket was already occupied.
    pub fn insert(&mut self, product_id: i64, order_id: i64, file_offset: i64) {
        let b = hash_bucket(product_id, self.buckets.len());
        if self.buckets[b].is_some() {
            self.collision_count += 1;
        }
        let idx = self.entries.len();
        self.entries.push(HashEntry { product_id, order_id, file_offset, next: self.buckets[b] });
        self.buckets[b] = Some(idx);
    }

    /// Walk the bucket's chain, collecting all entries matching
    /// `product_id` in chain order (most-recently-inserted first).
    pub fn lookup(&self, product_id: i64) -> Vec<HashEntry> {
        let b = hash_bucket(product_id, self.buckets.len());
        let mut out = Vec::new();
        let mut cur = self.buckets[b];
        while let Some(idx) = cur {
            let e = &self.entries[idx];
            if e.product_id == product_id {
                out.push(e.clone());
            }
            cur = e.next;
        }
        out
    }

    /// Unlink every entry in `product_id`'s bucket whose key matches,
    /// returning the count removed. Does not touch `collision_count`,
    /// which is a historical counter by design — see the Design Notes.
    pub fn remove(&mut self, product_id: i64) -> usize {
        let b = hash_bucket(product_id, self.buckets.len());
        let mut kept = Vec::new();
        let mut removed = 0;
        let mut cur = self.buckets[b];
        while let Some(idx) = cur {
            let e = self.entries[idx].clone();
            cur = e.next;
            if e.product_id == product_id {
                removed += 1;
            } else {
                kept.push(idx);
            }
        }
        // Relink the surviving entries, preserving their relative order.
        let mut next = None;
        for idx in kept.into_iter().rev() {
            self.entries[idx].next = next;
            next = Some(idx);
        }
        self.buckets[b] = next;
        removed
    }

    pub fn stats(&self) -> Stats {
        let mut occupied = 0usize;
        let mut histogram = [0usize; 11]; // [0]=empty unused, [1..=10] exact, index 10 is the ">=11" bin stored separately
        let mut overflow = 0usize;
        let mut longest = 0usize;

        for head in &self.buckets {
            let mut len = 0usize;
            let mut cur = *head;
            while let Some(idx) = cur {
                len += 1;
                cur = self.entries[idx].next;
            }
            if len > 0 {
                occupied += 1;
            }
            longest = longest.max(len);
            if len >= 11 {
                overflow += 1;
            } else if len > 0 {
                histogram[len] += 1;
            }
        }

        Stats {
            bucket_count: self.buckets.len(),
            element_count: self.entries.len(),
            occupied_buckets: occupied,
            load_factor: self.entries.len() as f64 / self.buckets.len() as f64,
            chain_histogram: histogram,
            overflow_bin: overflow,
            longest_chain: longest,
            collision_count: self.collision_count,
        }
    }
}

#[cfg(test)]
mod hashindex_test;
