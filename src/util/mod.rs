//! Common file and buffer helpers shared by the loader, indices and the
//! protection pipeline. Grounded on the teacher's `util::files` module:
//! files are opened in the narrowest scope and every short read/write is
//! treated as fatal via [crate::err_at].

use std::{
    ffi, fs,
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use crate::{err_at, Error, Result};

/// Read exactly `n` bytes starting at `seek`; a short read is fatal.
#[macro_export]
macro_rules! read_exact_at {
    ($fd:expr, $seek:expr, $n:expr, $msg:expr) => {{
        use std::io::{Read, Seek};
        match $fd.seek($seek) {
            Ok(_) => {
                let mut buf = vec![0u8; $n];
                match $fd.read(&mut buf) {
                    Ok(n) if n == buf.len() => Ok(buf),
                    Ok(n) => $crate::err_at!(
                        IOError, msg: "{} short read {}/{} at {:?}", $msg, n, buf.len(), $seek
                    ),
                    Err(err) => $crate::err_at!(IOError, Err(err)),
                }
            }
            Err(err) => $crate::err_at!(IOError, Err(err)),
        }
    }};
}

/// Write the full buffer or fail; does not sync (callers batch writes
/// and sync once at the end of a phase).
pub fn write_all(fd: &mut fs::File, buf: &[u8], msg: &str) -> Result<()> {
    let n = err_at!(IOError, fd.write(buf))?;
    if n != buf.len() {
        return err_at!(IOError, msg: "{} partial write {}/{}", msg, n, buf.len());
    }
    Ok(())
}

pub fn sync_write(fd: &mut fs::File, buf: &[u8], msg: &str) -> Result<()> {
    write_all(fd, buf, msg)?;
    err_at!(IOError, fd.sync_all())?;
    Ok(())
}

/// Open a file for reading only. Scoped to the caller's operation.
pub fn open_file_r<P: AsRef<Path>>(path: P) -> Result<fs::File> {
    err_at!(FileOpenError, fs::OpenOptions::new().read(true).open(path.as_ref()))
}

/// Open (or create) a file for writing from scratch, truncating any
/// previous contents.
pub fn create_file_w<P: AsRef<Path>>(path: P) -> Result<fs::File> {
    if let Some(parent) = path.as_ref().parent() {
        err_at!(IOError, fs::create_dir_all(parent))?;
    }
    err_at!(
        FileOpenError,
        fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_ref())
    )
}

/// Open a file for reading and writing in place, without truncation —
/// used for the tombstone in-place mutation.
pub fn open_file_rw<P: AsRef<Path>>(path: P) -> Result<fs::File> {
    err_at!(
        FileOpenError,
        fs::OpenOptions::new().read(true).write(true).open(path.as_ref())
    )
}

/// Append-mode open, used when new orders are appended to the
/// unsorted tail per §3 Lifecycles.
pub fn open_file_a<P: AsRef<Path>>(path: P) -> Result<fs::File> {
    err_at!(FileOpenError, fs::OpenOptions::new().append(true).open(path.as_ref()))
}

pub fn remove_file_best_effort<P: AsRef<Path>>(path: P) {
    // Cleanup of merge-sort temporaries is best-effort: a failure here
    // must not mask the success/failure of the phase that produced them.
    fs::remove_file(path).ok();
}

pub fn file_len(fd: &fs::File) -> Result<u64> {
    Ok(err_at!(IOError, fd.metadata())?.len())
}

pub fn seek_read(fd: &mut fs::File, offset: u64, n: usize, msg: &str) -> Result<Vec<u8>> {
    err_at!(IOError, fd.seek(SeekFrom::Start(offset)))?;
    let mut buf = vec![0u8; n];
    let got = err_at!(IOError, fd.read(&mut buf))?;
    if got != n {
        return err_at!(IOError, msg: "{} short read {}/{} at {}", msg, got, n, offset);
    }
    Ok(buf)
}

/// Compose `<data_dir>/<name>` the way `robt::config::to_index_location`
/// composes its file locations.
pub fn data_path(dir: &ffi::OsStr, name: &str) -> PathBuf {
    let mut p = PathBuf::from(dir);
    p.push(name);
    p
}

pub fn temp_run_path(dir: &ffi::OsStr, prefix: &str, n: usize) -> PathBuf {
    data_path(dir, &format!("{}_{}.dat", prefix, n))
}
