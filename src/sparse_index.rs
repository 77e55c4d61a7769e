//! Sparse file index, per §4.2: one `(key, offset)` entry every `G`
//! records of a data file sorted ascending by primary key. Lookup
//! binary-searches the index for the largest entry whose key is
//! `<= target`, then the caller linearly scans at most `G` records
//! starting at that offset.
//!
//! Grounded on the teacher's `robt::config::to_index_location` file
//! naming convention and its read/write-the-whole-thing persistence
//! style (`util::files::load_toml`): unlike `robt`'s multi-level CBOR
//! block index, this index is a single flat, fully in-memory sorted
//! array — true to the specified "sparse index" contract.

use std::convert::TryInto;

use crate::{err_at, util, Error, Result};

/// One `(key, offset)` pair. Offsets are byte positions in the
/// matching `.dat` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub key: i64,
    pub offset: i64,
}

/// A sparse index over a sorted, fixed-record data file.
#[derive(Debug, Clone, Default)]
pub struct SparseIndex {
    entries: Vec<IndexEntry>,
}

impl SparseIndex {
    pub fn new() -> SparseIndex {
        SparseIndex { entries: Vec::new() }
    }

    /// Append an entry. Callers (the bulk loader) are responsible for
    /// calling this with strictly ascending keys, one every `G` records.
    pub fn push(&mut self, key: i64, offset: i64) {
        self.entries.push(IndexEntry { key, offset });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Persist as a sequence of `(i64, i64)` pairs, native endianness.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let mut fd = util::create_file_w(path)?;
        let mut buf = Vec::with_capacity(self.entries.len() * 16);
        for e in &self.entries {
            buf.extend_from_slice(&e.key.to_ne_bytes());
            buf.extend_from_slice(&e.offset.to_ne_bytes());
        }
        util::sync_write(&mut fd, &buf, "sparse index save")
    }

    /// Load a previously persisted index file in full.
    pub fn load(path: &std::path::Path) -> Result<SparseIndex> {
        let mut fd = util::open_file_r(path)?;
        let len = util::file_len(&fd)?;
        let data = util::seek_read(&mut fd, 0, len as usize, "sparse index load")?;
        if data.len() % 16 != 0 {
            return err_at!(
                InvalidFile, msg: "sparse index file size {} not a multiple of 16", data.len()
            );
        }
        let mut entries = Vec::with_capacity(data.len() / 16);
        for chunk in data.chunks_exact(16) {
            let key = i64::from_ne_bytes(chunk[0..8].try_into().unwrap());
            let offset = i64::from_ne_bytes(chunk[8..16].try_into().unwrap());
            entries.push(IndexEntry { key, offset });
        }
        Ok(SparseIndex { entries })
    }

    /// Return the byte offset at which a linear scan for `target`
    /// should begin, i.e. the offset of the largest entry whose key is
    /// `<= target`. `None` means `target` is smaller than every key in
    /// the index (guaranteed absent).
    pub fn scan_start(&self, target: i64) -> Option<i64> {
        match self.entries.binary_search_by_key(&target, |e| e.key) {
            Ok(i) => Some(self.entries[i].offset),
            Err(0) => None,
            Err(i) => Some(self.entries[i - 1].offset),
        }
    }
}

#[cfg(test)]
mod sparse_index_test;
