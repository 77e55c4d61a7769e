//! A tiny trait so Phase 2 (orders) and Phase 3 (products) share one
//! k-way merge implementation instead of two near-identical copies.

use crate::record::{Order, Product};
use crate::Result;

pub trait Sortable: Sized {
    const SIZE: usize;
    fn key(&self) -> i64;
    fn encode(&self) -> Vec<u8>;
    fn decode(buf: &[u8]) -> Result<Self>;
}

impl Sortable for Order {
    const SIZE: usize = Order::SIZE;
    fn key(&self) -> i64 {
        self.order_id
    }
    fn encode(&self) -> Vec<u8> {
        Order::encode(self)
    }
    fn decode(buf: &[u8]) -> Result<Self> {
        Order::decode(buf)
    }
}

impl Sortable for Product {
    const SIZE: usize = Product::SIZE;
    fn key(&self) -> i64 {
        self.product_id
    }
    fn encode(&self) -> Vec<u8> {
        Product::encode(self)
    }
    fn decode(buf: &[u8]) -> Result<Self> {
        Product::decode(buf)
    }
}
