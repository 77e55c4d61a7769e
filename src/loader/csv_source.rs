//! CSV row -> [Order] parsing, per §6: a header line then comma-separated
//! fields in a fixed order. Field parsing specifics beyond the field
//! list are out of scope; this module only turns a row into an `Order`
//! or decides the row is too short to use.

use crate::record::Order;

/// `timestamp, order_id, product_id, quantity, category_id,
/// category_alias, brand_id, price_usd, user_id, gender, color, metal,
/// gem`. Only the first 11 are mandatory; `metal`/`gem` default empty.
const MIN_FIELDS: usize = 11;

/// Parse one CSV record into an `Order`. Returns `None` for rows with
/// fewer than [MIN_FIELDS] fields or unparsable numeric fields — both
/// are non-fatal per §7, the row is simply skipped.
pub fn parse_row(record: &csv::StringRecord) -> Option<Order> {
    if record.len() < MIN_FIELDS {
        return None;
    }
    let get = |i: usize| record.get(i).unwrap_or("");

    let order_id = get(1).trim().parse::<i64>().ok()?;
    let product_id = get(2).trim().parse::<i64>().ok()?;
    let quantity = get(3).trim().parse::<i32>().ok()?;
    let category_id = get(4).trim().parse::<i64>().ok()?;
    let brand_id = get(6).trim().parse::<i32>().ok()?;
    let price_usd = get(7).trim().parse::<f32>().ok()?;
    let user_id = get(8).trim().parse::<i64>().ok()?;
    let gender = get(9).trim().as_bytes().first().copied().unwrap_or(b'U');

    Some(Order {
        timestamp: get(0).trim().to_string(),
        order_id,
        product_id,
        quantity,
        category_id,
        category_alias: get(5).trim().to_string(),
        brand_id,
        price_usd,
        user_id,
        gender,
        color: get(10).trim().to_string(),
        metal: get(11).trim().to_string(),
        gem: get(12).trim().to_string(),
    })
}
