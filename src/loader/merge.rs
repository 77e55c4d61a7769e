//! Phase 2/3 k-way merge, generic over [Sortable] so the order merge
//! (no dedup) and the product merge (dedup-by-key) share one
//! implementation, per §4.3. Front-record array: `O(k)` minimum-pick
//! per step: for large `k`, §9 calls out swapping this for a priority
//! queue without changing the tie-break semantics (lower run index
//! wins), a further step not taken here since run counts stay small
//! for this workload.

use std::path::{Path, PathBuf};

use crate::loader::run::RunReader;
use crate::loader::sortable::Sortable;
use crate::sparse_index::SparseIndex;
use crate::util;
use crate::Result;

/// Merge `run_paths` (assumed individually sorted by key) into
/// `out_path`, emitting a sparse index entry every `index_gap` records.
/// When `dedupe` is set, a record is written only if its key differs
/// from the previously written record's key (Phase 3's product dedup).
pub fn merge_runs<T: Sortable>(run_paths: &[PathBuf], out_path: &Path, index_gap: usize, dedupe: bool) -> Result<(usize, SparseIndex)> {
    let mut readers: Vec<RunReader<T>> = Vec::with_capacity(run_paths.len());
    for p in run_paths {
        readers.push(RunReader::open(p)?);
    }
    let mut fronts: Vec<Option<T>> = Vec::with_capacity(readers.len());
    for r in readers.iter_mut() {
        fronts.push(r.next()?);
    }

    let mut out = util::create_file_w(out_path)?;
    let mut index = SparseIndex::new();
    let mut last_key: Option<i64> = None;
    let mut written = 0usize;

    loop {
        let mut min_idx: Option<usize> = None;
        for (i, front) in fronts.iter().enumerate() {
            if let Some(rec) = front {
                let better = match min_idx {
                    None => true,
                    Some(m) => rec.key() < fronts[m].as_ref().unwrap().key(),
                };
                if better {
                    min_idx = Some(i);
                }
            }
        }

        let i = match min_idx {
            Some(i) => i,
            None => break,
        };
        let rec = fronts[i].take().expect("min_idx only points at a populated front");

        let skip = dedupe && last_key == Some(rec.key());
        if !skip {
            if written % index_gap == 0 {
                index.push(rec.key(), (written * T::SIZE) as i64);
            }
            util::write_all(&mut out, &rec.encode(), "merge output")?;
            last_key = Some(rec.key());
            written += 1;
        }

        fronts[i] = readers[i].next()?;
    }

    util::sync_write(&mut out, &[], "merge output sync")?;
    Ok((written, index))
}
