use super::*;
use crate::config::Config;
use crate::sparse_index::SparseIndex;
use std::io::Write as _;

fn write_sample_csv(path: &std::path::Path) {
    let mut f = std::fs::File::create(path).unwrap();
    writeln!(f, "timestamp,order_id,product_id,quantity,category_id,category_alias,brand_id,price_usd,user_id,gender,color,metal,gem").unwrap();
    // order_id / product_id pairs: (30,7) (10,7) (20,8) (10,7) (40,9)
    writeln!(f, "2024-01-01T00:00:00,30,7,1,100,rings,5,99.99,1000,M,gold,gold,ruby").unwrap();
    writeln!(f, "2024-01-02T00:00:00,10,7,2,100,rings,5,99.99,1001,F,gold,gold,ruby").unwrap();
    writeln!(f, "2024-01-03T00:00:00,20,8,1,101,bracelets,6,49.99,1002,M,silver,silver,emerald").unwrap();
    writeln!(f, "2024-01-04T00:00:00,10,7,3,100,rings,5,99.99,1003,U,gold,gold,ruby").unwrap();
    writeln!(f, "2024-01-05T00:00:00,40,9,1,102,necklaces,7,199.99,1004,F,platinum,platinum,diamond").unwrap();
}

fn read_orders(path: &std::path::Path) -> Vec<Order> {
    let data = std::fs::read(path).unwrap();
    data.chunks_exact(Order::SIZE).map(|c| Order::decode(c).unwrap()).collect()
}

fn read_products(path: &std::path::Path) -> Vec<Product> {
    let data = std::fs::read(path).unwrap();
    data.chunks_exact(Product::SIZE).map(|c| Product::decode(c).unwrap()).collect()
}

/// S1 scenario: 5-row CSV with orders `{30,10,20,10,40}` and matching
/// products `{7,7,8,7,9}`; expect sorted orders `[10,10,20,30,40]` and
/// 3 unique products `[7,8,9]`. `run_budget` is set small so Phase 1
/// genuinely produces multiple runs for Phase 2/3 to merge.
#[test]
fn test_s1_scenario_sorted_orders_and_deduped_products() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("jewelry.csv");
    write_sample_csv(&csv_path);

    let mut cfg = Config::new(dir.path().as_os_str());
    cfg.set_run_budget(2);

    let stats = load_csv(&csv_path, &cfg).unwrap();
    assert_eq!(stats.rows_skipped, 0);
    assert_eq!(stats.orders_written, 5);
    assert_eq!(stats.products_written, 3);

    let orders = read_orders(&cfg.path(crate::config::paths::ORDERS_DAT));
    let order_ids: Vec<i64> = orders.iter().map(|o| o.order_id).collect();
    assert_eq!(order_ids, vec![10, 10, 20, 30, 40]);

    let products = read_products(&cfg.path(crate::config::paths::PRODUCTS_DAT));
    let product_ids: Vec<i64> = products.iter().map(|p| p.product_id).collect();
    assert_eq!(product_ids, vec![7, 8, 9]);
}

#[test]
fn test_rows_with_too_few_fields_are_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("jewelry.csv");
    let mut f = std::fs::File::create(&csv_path).unwrap();
    writeln!(f, "timestamp,order_id,product_id,quantity,category_id,category_alias,brand_id,price_usd,user_id,gender,color,metal,gem").unwrap();
    writeln!(f, "2024-01-01T00:00:00,1,2,1,100").unwrap(); // too short, skipped
    writeln!(f, "2024-01-02T00:00:00,5,6,1,100,rings,5,99.99,1000,M,gold,gold,ruby").unwrap();
    drop(f);

    let cfg = Config::new(dir.path().as_os_str());
    let stats = load_csv(&csv_path, &cfg).unwrap();
    assert_eq!(stats.rows_skipped, 1);
    assert_eq!(stats.orders_written, 1);
}

#[test]
fn test_sparse_index_written_alongside_data_files() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("jewelry.csv");
    write_sample_csv(&csv_path);

    let mut cfg = Config::new(dir.path().as_os_str());
    cfg.set_index_gap(2);
    load_csv(&csv_path, &cfg).unwrap();

    let order_index = SparseIndex::load(&cfg.path(crate::config::paths::ORDERS_IDX)).unwrap();
    assert!(!order_index.is_empty());
    assert_eq!(order_index.entries()[0].offset, 0);
}
