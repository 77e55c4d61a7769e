//! Owns the two in-memory indices for one run of the program, per the
//! "Global mutable state" Design Note in §9: rather than process
//! singletons, a small session container is constructed at startup and
//! passed the explicit `load`/destroy lifecycle.

use jewelry_store::btree::BPlusTree;
use jewelry_store::config::{paths, Config};
use jewelry_store::hashindex::HashIndex;
use jewelry_store::record::{Order, Product};
use jewelry_store::{err_at, util, Result};

pub struct Session {
    pub cfg: Config,
    pub btree: Option<BPlusTree>,
    pub hash: Option<HashIndex>,
}

impl Session {
    pub fn new(cfg: Config) -> Session {
        Session { cfg, btree: None, hash: None }
    }

    /// (Re)build both in-memory indices by scanning the on-disk files
    /// sequentially, per §3 Lifecycles. Destroys any previously built
    /// indices wholesale.
    pub fn load_indices(&mut self) -> Result<()> {
        let mut tree = BPlusTree::new(self.cfg.btree_fanout);
        let products_path = self.cfg.path(paths::PRODUCTS_DAT);
        if products_path.exists() {
            let data = err_at!(IOError, std::fs::read(&products_path))?;
            for (i, chunk) in data.chunks_exact(Product::SIZE).enumerate() {
                let product = Product::decode(chunk)?;
                tree.insert(product.product_id, (i * Product::SIZE) as i64);
            }
        }

        let mut hash = HashIndex::new(self.cfg.hash_buckets);
        let orders_path = self.cfg.path(paths::ORDERS_DAT);
        if orders_path.exists() {
            let data = err_at!(IOError, std::fs::read(&orders_path))?;
            for (i, chunk) in data.chunks_exact(Order::SIZE).enumerate() {
                let order = Order::decode(chunk)?;
                if order.is_tombstone() {
                    continue;
                }
                hash.insert(order.product_id, order.order_id, (i * Order::SIZE) as i64);
            }
        }

        self.btree = Some(tree);
        self.hash = Some(hash);
        Ok(())
    }

    pub fn read_order_at(&self, offset: i64) -> Result<Order> {
        let mut fd = util::open_file_r(self.cfg.path(paths::ORDERS_DAT))?;
        let buf = util::seek_read(&mut fd, offset as u64, Order::SIZE, "read order")?;
        Order::decode(&buf)
    }

    pub fn read_product_at(&self, offset: i64) -> Result<Product> {
        let mut fd = util::open_file_r(self.cfg.path(paths::PRODUCTS_DAT))?;
        let buf = util::seek_read(&mut fd, offset as u64, Product::SIZE, "read product")?;
        Product::decode(&buf)
    }
}
