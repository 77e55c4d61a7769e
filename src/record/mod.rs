//! Fixed-layout binary record codec for [Product] and [Order], per
//! the data model in §3 of the specification. Records are packed in
//! native endianness with explicit field widths; fixed-width ASCII
//! fields are NUL-padded and always read/written at their full
//! declared width.

use std::convert::TryInto;

use crate::{err_at, Error, Result};

pub const TOMBSTONE_FLAG: u8 = b'*';

fn write_fixed(dst: &mut Vec<u8>, s: &str, width: usize) {
    let bytes = s.as_bytes();
    let n = bytes.len().min(width);
    dst.extend_from_slice(&bytes[..n]);
    dst.resize(dst.len() + (width - n), 0u8);
}

fn read_fixed(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

/// A jewelry product, the row of `jewelryRegister.dat`. Primary key is
/// `product_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: i64,
    pub category_id: i64,
    pub brand_id: i32,
    pub price_usd: f32,
    pub gender: u8,
    pub color: String,
    pub metal: String,
    pub gem: String,
}

impl Product {
    pub const COLOR_WIDTH: usize = 10;
    pub const METAL_WIDTH: usize = 10;
    pub const GEM_WIDTH: usize = 25;
    /// 8 + 8 + 4 + 4 + 1 + 10 + 10 + 25
    pub const SIZE: usize = 70;

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::SIZE);
        buf.extend_from_slice(&self.product_id.to_ne_bytes());
        buf.extend_from_slice(&self.category_id.to_ne_bytes());
        buf.extend_from_slice(&self.brand_id.to_ne_bytes());
        buf.extend_from_slice(&self.price_usd.to_ne_bytes());
        buf.push(self.gender);
        write_fixed(&mut buf, &self.color, Self::COLOR_WIDTH);
        write_fixed(&mut buf, &self.metal, Self::METAL_WIDTH);
        write_fixed(&mut buf, &self.gem, Self::GEM_WIDTH);
        debug_assert_eq!(buf.len(), Self::SIZE);
        buf
    }

    pub fn decode(buf: &[u8]) -> Result<Product> {
        if buf.len() < Self::SIZE {
            return err_at!(
                ParseError, msg: "product record short {}/{}", buf.len(), Self::SIZE
            );
        }
        let mut off = 0;
        let product_id = i64::from_ne_bytes(buf[off..off + 8].try_into().unwrap());
        off += 8;
        let category_id = i64::from_ne_bytes(buf[off..off + 8].try_into().unwrap());
        off += 8;
        let brand_id = i32::from_ne_bytes(buf[off..off + 4].try_into().unwrap());
        off += 4;
        let price_usd = f32::from_ne_bytes(buf[off..off + 4].try_into().unwrap());
        off += 4;
        let gender = buf[off];
        off += 1;
        let color = read_fixed(&buf[off..off + Self::COLOR_WIDTH]);
        off += Self::COLOR_WIDTH;
        let metal = read_fixed(&buf[off..off + Self::METAL_WIDTH]);
        off += Self::METAL_WIDTH;
        let gem = read_fixed(&buf[off..off + Self::GEM_WIDTH]);

        Ok(Product { product_id, category_id, brand_id, price_usd, gender, color, metal, gem })
    }
}

/// A purchase order, the row of `orderHistory.dat`. Primary key is
/// `order_id`. The first byte of `timestamp` doubles as the tombstone
/// flag; [Order::is_tombstone] and [Order::tombstone] are the only
/// functions allowed to read or write it, per the Design Notes.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub timestamp: String,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub category_id: i64,
    pub category_alias: String,
    pub brand_id: i32,
    pub price_usd: f32,
    pub user_id: i64,
    pub gender: u8,
    pub color: String,
    pub metal: String,
    pub gem: String,
}

impl Order {
    pub const TIMESTAMP_WIDTH: usize = 30;
    pub const CATEGORY_ALIAS_WIDTH: usize = 30;
    pub const COLOR_WIDTH: usize = 10;
    pub const METAL_WIDTH: usize = 10;
    pub const GEM_WIDTH: usize = 25;
    /// 30 + 8 + 8 + 4 + 8 + 30 + 4 + 4 + 8 + 1 + 10 + 10 + 25
    pub const SIZE: usize = 150;

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::SIZE);
        write_fixed(&mut buf, &self.timestamp, Self::TIMESTAMP_WIDTH);
        buf.extend_from_slice(&self.order_id.to_ne_bytes());
        buf.extend_from_slice(&self.product_id.to_ne_bytes());
        buf.extend_from_slice(&self.quantity.to_ne_bytes());
        buf.extend_from_slice(&self.category_id.to_ne_bytes());
        write_fixed(&mut buf, &self.category_alias, Self::CATEGORY_ALIAS_WIDTH);
        buf.extend_from_slice(&self.brand_id.to_ne_bytes());
        buf.extend_from_slice(&self.price_usd.to_ne_bytes());
        buf.extend_from_slice(&self.user_id.to_ne_bytes());
        buf.push(self.gender);
        write_fixed(&mut buf, &self.color, Self::COLOR_WIDTH);
        write_fixed(&mut buf, &self.metal, Self::METAL_WIDTH);
        write_fixed(&mut buf, &self.gem, Self::GEM_WIDTH);
        debug_assert_eq!(buf.len(), Self::SIZE);
        buf
    }

    pub fn decode(buf: &[u8]) -> Result<Order> {
        if buf.len() < Self::SIZE {
            return err_at!(
                ParseError, msg: "order record short {}/{}", buf.len(), Self::SIZE
            );
        }
        let mut off = 0;
        let timestamp = read_fixed(&buf[off..off + Self::TIMESTAMP_WIDTH]);
        off += Self::TIMESTAMP_WIDTH;
        let order_id = i64::from_ne_bytes(buf[off..off + 8].try_into().unwrap());
        off += 8;
        let product_id = i64::from_ne_bytes(buf[off..off + 8].try_into().unwrap());
        off += 8;
        let quantity = i32::from_ne_bytes(buf[off..off + 4].try_into().unwrap());
        off += 4;
        let category_id = i64::from_ne_bytes(buf[off..off + 8].try_into().unwrap());
        off += 8;
        let category_alias = read_fixed(&buf[off..off + Self::CATEGORY_ALIAS_WIDTH]);
        off += Self::CATEGORY_ALIAS_WIDTH;
        let brand_id = i32::from_ne_bytes(buf[off..off + 4].try_into().unwrap());
        off += 4;
        let price_usd = f32::from_ne_bytes(buf[off..off + 4].try_into().unwrap());
        off += 4;
        let user_id = i64::from_ne_bytes(buf[off..off + 8].try_into().unwrap());
        off += 8;
        let gender = buf[off];
        off += 1;
        let color = read_fixed(&buf[off..off + Self::COLOR_WIDTH]);
        off += Self::COLOR_WIDTH;
        let metal = read_fixed(&buf[off..off + Self::METAL_WIDTH]);
        off += Self::METAL_WIDTH;
        let gem = read_fixed(&buf[off..off + Self::GEM_WIDTH]);

        Ok(Order {
            timestamp,
            order_id,
            product_id,
            quantity,
            category_id,
            category_alias,
            brand_id,
            price_usd,
            user_id,
            gender,
            color,
            metal,
            gem,
        })
    }

    /// True when this order has been logically deleted.
    pub fn is_tombstone(&self) -> bool {
        self.timestamp.as_bytes().first().copied() == Some(TOMBSTONE_FLAG)
    }

    /// Mark this order as logically deleted, in place. This is the
    /// only mutation permitted on a persisted order record.
    pub fn tombstone(&mut self) {
        let mut bytes = self.timestamp.as_bytes().to_vec();
        bytes.resize(Self::TIMESTAMP_WIDTH.max(1), 0);
        bytes[0] = TOMBSTONE_FLAG;
        self.timestamp = String::from_utf8_lossy(&bytes).trim_end_matches('\0').to_string();
    }

    /// Synthesize the [Product] row denormalized into this order, the
    /// way Phase 1 of the loader derives a product from an order row.
    pub fn to_product(&self) -> Product {
        Product {
            product_id: self.product_id,
            category_id: self.category_id,
            brand_id: self.brand_id,
            price_usd: self.price_usd,
            gender: self.gender,
            color: self.color.clone(),
            metal: self.metal.clone(),
            gem: self.gem.clone(),
        }
    }
}
