//! Huffman entropy coding, per §4.6. Self-describing frames: the
//! 256-entry frequency table travels with the payload so decoding needs
//! no side channel. Grounded on the teacher's codec modules (e.g.
//! `robt::entry` encode/decode pairs) for the encode-to-`Vec<u8>` /
//! decode-from-`&[u8]` shape, though the bit-packing itself has no
//! teacher analogue and is written directly from §4.6.

mod tree;

use crate::{err_at, Result};
use tree::DecodeTree;

/// `u64` original length + `256 * i32` frequency table, per §4.6.
const HEADER_LEN: usize = 8 + 256 * 4;

/// Encode `input` into a self-describing Huffman frame. Empty input is
/// rejected explicitly rather than silently producing a trivial frame.
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    if input.is_empty() {
        return err_at!(EmptyInput, msg: "huffman encode requires non-empty input");
    }

    let mut freq = [0u64; 256];
    for &b in input {
        freq[b as usize] += 1;
    }

    let codes = tree::build_codes(&freq);

    let mut frame = Vec::with_capacity(HEADER_LEN + input.len());
    frame.extend_from_slice(&(input.len() as u64).to_ne_bytes());
    for &f in &freq {
        frame.extend_from_slice(&(f as i32).to_ne_bytes());
    }

    let mut writer = BitWriter::new();
    for &b in input {
        let code = codes.get(&b).expect("every input byte has an assigned code");
        for &bit in code {
            writer.push(bit);
        }
    }
    frame.extend_from_slice(&writer.finish());

    Ok(frame)
}

/// Decode a frame produced by [encode].
pub fn decode(frame: &[u8]) -> Result<Vec<u8>> {
    if frame.len() < HEADER_LEN {
        return err_at!(ParseError, msg: "huffman frame shorter than header");
    }

    let length = u64::from_ne_bytes(frame[0..8].try_into().unwrap()) as usize;

    let mut freq = [0u64; 256];
    for i in 0..256 {
        let start = 8 + i * 4;
        let v = i32::from_ne_bytes(frame[start..start + 4].try_into().unwrap());
        freq[i] = v as u64;
    }

    if length == 0 {
        return Ok(Vec::new());
    }

    let decode_tree = DecodeTree::build(&freq);
    let payload = &frame[HEADER_LEN..];
    let bits = BitReader::new(payload).collect::<Vec<bool>>();

    let mut out = Vec::with_capacity(length);
    let mut pos = 0;
    while out.len() < length {
        if pos >= bits.len() {
            return err_at!(ParseError, msg: "huffman payload truncated before declared length reached");
        }
        let (symbol, consumed) = decode_tree.decode_one(&bits[pos..]);
        out.push(symbol);
        pos += consumed;
    }

    Ok(out)
}

struct BitWriter {
    bytes: Vec<u8>,
    cur: u8,
    filled: u8,
}

impl BitWriter {
    fn new() -> BitWriter {
        BitWriter { bytes: Vec::new(), cur: 0, filled: 0 }
    }

    fn push(&mut self, bit: bool) {
        self.cur <<= 1;
        if bit {
            self.cur |= 1;
        }
        self.filled += 1;
        if self.filled == 8 {
            self.bytes.push(self.cur);
            self.cur = 0;
            self.filled = 0;
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.filled > 0 {
            self.cur <<= 8 - self.filled;
            self.bytes.push(self.cur);
        }
        self.bytes
    }
}

struct BitReader<'a> {
    bytes: &'a [u8],
    byte_pos: usize,
    bit_pos: u8,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8]) -> BitReader<'a> {
        BitReader { bytes, byte_pos: 0, bit_pos: 0 }
    }
}

impl<'a> Iterator for BitReader<'a> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.byte_pos >= self.bytes.len() {
            return None;
        }
        let byte = self.bytes[self.byte_pos];
        let bit = (byte >> (7 - self.bit_pos)) & 1 == 1;
        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.bit_pos = 0;
            self.byte_pos += 1;
        }
        Some(bit)
    }
}
