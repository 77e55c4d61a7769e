//! Protection pipeline and integrity verifier, per §4.8. Composes
//! [crate::huffman] and [crate::transposition]; grounded on the
//! teacher's `util::files` scoped-open-then-close idiom for the
//! temporary-file handling.

use std::path::Path;

use crate::util;
use crate::{err_at, huffman, transposition, Result};

/// Compress `input_path` then encrypt the result to `output_path` under
/// `key`. The intermediate compressed file is removed on both the
/// success and the failure path.
pub fn protect<P: AsRef<Path>>(input_path: P, output_path: P, key: &str) -> Result<()> {
    let tmp_path = tmp_sibling(output_path.as_ref(), "huff");
    let result = protect_inner(input_path.as_ref(), output_path.as_ref(), &tmp_path, key);
    util::remove_file_best_effort(&tmp_path);
    result
}

fn protect_inner(input_path: &Path, output_path: &Path, tmp_path: &Path, key: &str) -> Result<()> {
    let input = err_at!(IOError, std::fs::read(input_path))?;
    let frame = huffman::encode(&input)?;
    err_at!(IOError, std::fs::write(tmp_path, &frame))?;

    let compressed = err_at!(IOError, std::fs::read(tmp_path))?;
    let encrypted = transposition::encrypt(&compressed, key)?;
    err_at!(IOError, std::fs::write(output_path, &encrypted))?;
    Ok(())
}

/// Decrypt then decompress `input_path` to `output_path`. The reverse
/// of [protect].
pub fn restore<P: AsRef<Path>>(input_path: P, output_path: P, key: &str) -> Result<()> {
    let tmp_path = tmp_sibling(output_path.as_ref(), "desc");
    let result = restore_inner(input_path.as_ref(), output_path.as_ref(), &tmp_path, key);
    util::remove_file_best_effort(&tmp_path);
    result
}

fn restore_inner(input_path: &Path, output_path: &Path, tmp_path: &Path, key: &str) -> Result<()> {
    let encrypted = err_at!(IOError, std::fs::read(input_path))?;
    let decrypted = transposition::decrypt(&encrypted, key)?;
    err_at!(IOError, std::fs::write(tmp_path, &decrypted))?;

    let compressed = err_at!(IOError, std::fs::read(tmp_path))?;
    let output = huffman::decode(&compressed)?;
    err_at!(IOError, std::fs::write(output_path, &output))?;
    Ok(())
}

fn tmp_sibling(output_path: &Path, suffix: &str) -> std::path::PathBuf {
    let mut name = output_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".tmp.{}", suffix));
    output_path.with_file_name(name)
}

/// Open two paths, compare sizes; if equal, byte-compare streaming.
/// Reports either "identical" or the first differing offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Identical,
    SizeMismatch { left: u64, right: u64 },
    DifferAt { offset: u64 },
}

pub fn verify<P: AsRef<Path>>(left_path: P, right_path: P) -> Result<Verification> {
    let left = err_at!(FileOpenError, std::fs::File::open(left_path))?;
    let right = err_at!(FileOpenError, std::fs::File::open(right_path))?;

    let left_len = util::file_len(&left)?;
    let right_len = util::file_len(&right)?;
    if left_len != right_len {
        return Ok(Verification::SizeMismatch { left: left_len, right: right_len });
    }

    use std::io::{BufReader, Read};
    let mut left = BufReader::new(left);
    let mut right = BufReader::new(right);
    let mut lbuf = [0u8; 8192];
    let mut rbuf = [0u8; 8192];
    let mut offset = 0u64;

    loop {
        let ln = err_at!(IOError, left.read(&mut lbuf))?;
        let rn = err_at!(IOError, right.read(&mut rbuf))?;
        if ln == 0 && rn == 0 {
            return Ok(Verification::Identical);
        }
        if ln != rn {
            return Ok(Verification::DifferAt { offset: offset + ln.min(rn) as u64 });
        }
        if let Some(i) = lbuf[..ln].iter().zip(&rbuf[..rn]).position(|(a, b)| a != b) {
            return Ok(Verification::DifferAt { offset: offset + i as u64 });
        }
        offset += ln as u64;
    }
}

#[cfg(test)]
mod protect_test;
