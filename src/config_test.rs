use std::ffi::OsString;

use super::*;

#[test]
fn test_defaults_match_documented_values() {
    let cfg = Config::new(&OsString::from("/tmp/x"));
    assert_eq!(cfg.index_gap, 1000);
    assert_eq!(cfg.run_budget, 10_000);
    assert_eq!(cfg.btree_fanout, 100);
    assert_eq!(cfg.hash_buckets, 50_000);
    assert_eq!(cfg.transposition_key, "UNCOPYRIGHTABLE");
    assert_eq!(cfg.max_code_len, 256);
}

#[test]
fn test_path_joins_dir_and_name() {
    let cfg = Config::new(&OsString::from("/tmp/data"));
    assert_eq!(cfg.path(paths::PRODUCTS_DAT), std::path::PathBuf::from("/tmp/data/jewelryRegister.dat"));
}

#[test]
fn test_set_methods_chain() {
    let mut cfg = Config::new(&OsString::from("/tmp/x"));
    cfg.set_index_gap(500).set_run_budget(2000).set_btree_fanout(4);
    assert_eq!(cfg.index_gap, 500);
    assert_eq!(cfg.run_budget, 2000);
    assert_eq!(cfg.btree_fanout, 4);
}

#[test]
fn test_load_toml_missing_file_falls_back_to_defaults() {
    let cfg = Config::load_toml(&OsString::from("/tmp/x"), std::path::Path::new("/nonexistent/jewelry-store.toml")).unwrap();
    assert_eq!(cfg.index_gap, INDEX_GAP);
}
