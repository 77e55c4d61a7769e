//! Runtime configuration, grounded on `robt::Config`'s `new()` +
//! `set_*()` builder-method convention. Seeds itself from the
//! compile-time defaults of §6, but — unlike the original C tool —
//! lets a deployment override them without a rebuild.

use std::ffi;

use serde::{Deserialize, Serialize};

use crate::{err_at, util, Error, Result};

/// One sparse-index entry per this many records. Default for [Config::index_gap].
pub const INDEX_GAP: usize = 1000;
/// Records buffered in memory per run during bulk load. Default for [Config::run_budget].
pub const RUN_BUDGET: usize = 10_000;
/// B+ tree fan-out. Default for [Config::btree_fanout].
pub const B_TREE_FANOUT: usize = 100;
/// Chained hash index bucket count. Default for [Config::hash_buckets].
pub const HASH_BUCKETS: usize = 50_000;
/// Columnar-transposition key. Default for [Config::transposition_key].
pub const TRANSPOSITION_KEY: &str = "UNCOPYRIGHTABLE";
/// Huffman code length cap (tree height bound). Default for [Config::max_code_len].
pub const MAX_CODE_LEN: usize = 256;
/// Remove-counter threshold past which callers should rebuild indices.
pub const REBUILD_THRESHOLD: usize = 100;

/// Tunables for one working data directory. Construct with
/// [Config::new] for the documented defaults, then adjust with the
/// `set_*` methods.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub dir: ffi::OsString,
    pub index_gap: usize,
    pub run_budget: usize,
    pub btree_fanout: usize,
    pub hash_buckets: usize,
    pub transposition_key: String,
    pub max_code_len: usize,
}

impl Config {
    pub fn new(dir: &ffi::OsStr) -> Config {
        Config {
            dir: dir.to_os_string(),
            index_gap: INDEX_GAP,
            run_budget: RUN_BUDGET,
            btree_fanout: B_TREE_FANOUT,
            hash_buckets: HASH_BUCKETS,
            transposition_key: TRANSPOSITION_KEY.to_string(),
            max_code_len: MAX_CODE_LEN,
        }
    }

    pub fn set_index_gap(&mut self, g: usize) -> &mut Self {
        self.index_gap = g;
        self
    }

    pub fn set_run_budget(&mut self, l: usize) -> &mut Self {
        self.run_budget = l;
        self
    }

    pub fn set_btree_fanout(&mut self, b: usize) -> &mut Self {
        self.btree_fanout = b;
        self
    }

    pub fn set_hash_buckets(&mut self, t: usize) -> &mut Self {
        self.hash_buckets = t;
        self
    }

    pub fn set_transposition_key(&mut self, key: &str) -> &mut Self {
        self.transposition_key = key.to_string();
        self
    }

    pub fn path(&self, name: &str) -> std::path::PathBuf {
        util::data_path(&self.dir, name)
    }

    /// Load overrides from a `jewelry-store.toml` sidecar, falling
    /// back to defaults for any field the file omits.
    pub fn load_toml(dir: &ffi::OsStr, path: &std::path::Path) -> Result<Config> {
        let mut cfg = Config::new(dir);
        if !path.exists() {
            return Ok(cfg);
        }
        let data = err_at!(IOError, std::fs::read_to_string(path))?;
        let file_cfg: Config = err_at!(ParseError, toml::from_str(&data))?;
        cfg.index_gap = file_cfg.index_gap;
        cfg.run_budget = file_cfg.run_budget;
        cfg.btree_fanout = file_cfg.btree_fanout;
        cfg.hash_buckets = file_cfg.hash_buckets;
        cfg.transposition_key = file_cfg.transposition_key;
        cfg.max_code_len = file_cfg.max_code_len;
        Ok(cfg)
    }
}

pub mod paths {
    pub const CSV: &str = "jewelry.csv";
    pub const PRODUCTS_DAT: &str = "jewelryRegister.dat";
    pub const ORDERS_DAT: &str = "orderHistory.dat";
    pub const PRODUCTS_IDX: &str = "jewelryIndex.dat";
    pub const ORDERS_IDX: &str = "orderIndex.dat";

    pub fn order_run(n: usize) -> String {
        format!("temp_order_run_{}.dat", n)
    }

    pub fn product_run(n: usize) -> String {
        format!("temp_jewelry_run_{}.dat", n)
    }
}

#[cfg(test)]
mod config_test;
