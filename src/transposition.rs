//! Columnar-transposition permuter, per §4.7. Grounded on
//! `examples/original_source/isam2.c`'s `calcularOrdemColunas` /
//! `criptografarTransposicao` / `descriptografarTransposicao` for the
//! exact column-order derivation and row/column walk.

use crate::{err_at, Result};

/// Validate that `key` has no repeated characters — a repeated
/// character makes the stable-sort column order ambiguous and the
/// pipeline non-invertible, so this is rejected at configuration time
/// rather than producing a silently broken permutation (§9 Design Notes).
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return err_at!(InvalidFile, msg: "transposition key must not be empty");
    }
    let bytes = key.as_bytes();
    for i in 0..bytes.len() {
        for j in (i + 1)..bytes.len() {
            if bytes[i] == bytes[j] {
                return err_at!(InvalidFile, msg: "transposition key {:?} has a repeated character at positions {} and {}", key, i, j);
            }
        }
    }
    Ok(())
}

/// Stable-sort the key's character positions by character value
/// ascending. `column_order()[0]` is the column read first.
fn column_order(key: &str) -> Vec<usize> {
    let bytes = key.as_bytes();
    let mut order: Vec<usize> = (0..bytes.len()).collect();
    order.sort_by_key(|&i| bytes[i]);
    order
}

/// Encrypt `data` under `key`, returning a `u64 N` + permuted-bytes frame.
pub fn encrypt(data: &[u8], key: &str) -> Result<Vec<u8>> {
    validate_key(key)?;
    let order = column_order(key);
    let k = order.len();
    let rows = (data.len() + k - 1) / k.max(1);

    let mut out = Vec::with_capacity(8 + data.len());
    out.extend_from_slice(&(data.len() as u64).to_be_bytes());

    for &col in &order {
        for row in 0..rows {
            let pos = row * k + col;
            if pos < data.len() {
                out.push(data[pos]);
            }
        }
    }
    Ok(out)
}

/// Decrypt a frame produced by [encrypt].
pub fn decrypt(frame: &[u8], key: &str) -> Result<Vec<u8>> {
    validate_key(key)?;
    if frame.len() < 8 {
        return err_at!(ParseError, msg: "transposition frame shorter than header");
    }
    let n = u64::from_be_bytes(frame[0..8].try_into().unwrap()) as usize;
    let payload = &frame[8..];
    if payload.len() != n {
        return err_at!(ParseError, msg: "transposition frame payload length {} does not match declared N {}", payload.len(), n);
    }

    let order = column_order(key);
    let k = order.len();
    let rows = (n + k - 1) / k.max(1);

    let mut out = vec![0u8; n];
    let mut pos_in = 0usize;
    for &col in &order {
        for row in 0..rows {
            let pos_out = row * k + col;
            if pos_out < n {
                out[pos_out] = payload[pos_in];
                pos_in += 1;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod transposition_test;
