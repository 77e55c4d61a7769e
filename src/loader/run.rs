//! Run-file read/write, shared by Phase 1 (write) and Phase 2/3
//! (k-way merge read), generic over [Sortable] so orders and products
//! reuse the same code path.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::loader::sortable::Sortable;
use crate::util;
use crate::{err_at, Result};

/// Sort `items` by key and write them to `path` as back-to-back
/// fixed-size encoded records.
pub fn write_run<T: Sortable>(items: &mut Vec<T>, path: &Path) -> Result<()> {
    items.sort_by_key(|t| t.key());
    let mut fd = util::create_file_w(path)?;
    let mut buf = Vec::with_capacity(items.len() * T::SIZE);
    for item in items.iter() {
        buf.extend_from_slice(&item.encode());
    }
    util::sync_write(&mut fd, &buf, "run flush")
}

/// Sequential reader over one run file, yielding one decoded record at
/// a time. A short, non-zero read is fatal (§4.3 failure policy); a
/// zero-byte read is treated as this run's EOF.
pub struct RunReader<T: Sortable> {
    fd: fs::File,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Sortable> RunReader<T> {
    pub fn open(path: &Path) -> Result<RunReader<T>> {
        let fd = util::open_file_r(path)?;
        Ok(RunReader { fd, _marker: std::marker::PhantomData })
    }

    /// Read the next record, or `None` at this run's end.
    pub fn next(&mut self) -> Result<Option<T>> {
        let mut buf = vec![0u8; T::SIZE];
        let mut read = 0;
        while read < buf.len() {
            let n = err_at!(IOError, self.fd.read(&mut buf[read..]))?;
            if n == 0 {
                break;
            }
            read += n;
        }
        if read == 0 {
            return Ok(None);
        }
        if read != buf.len() {
            return err_at!(IOError, msg: "run file short read {}/{} before EOF", read, buf.len());
        }
        Ok(Some(T::decode(&buf)?))
    }
}
