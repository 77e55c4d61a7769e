//! A single-node, file-backed record-management engine for jewelry
//! products and purchase orders: external merge-sort bulk load, sparse
//! file indices, an in-memory B+ tree and chained hash index, and an
//! optional Huffman + columnar-transposition at-rest protection
//! pipeline. Grounded throughout on the teacher's module layout
//! (`robt`, `llrb`, `util`) — see `DESIGN.md` for the per-module
//! grounding ledger.

pub mod config;
pub mod error;
pub mod util;

pub mod btree;
pub mod hashindex;
pub mod huffman;
pub mod loader;
pub mod protect;
pub mod record;
pub mod sparse_index;
pub mod transposition;

pub use config::Config;
pub use error::{Error, Result};
pub use record::{Order, Product};
