//! Search filter over the in-memory catalog.

use crate::models::ShoeRecord;

/// Case-insensitive substring match of `query` against name or brand.
///
/// An empty query matches everything. Results keep the input order. Pure and cheap enough
/// to run on every render.
pub fn filter<'a>(shoes: &'a [ShoeRecord], query: &str) -> Vec<&'a ShoeRecord> {
    if query.is_empty() {
        return shoes.iter().collect();
    }

    let needle = query.to_lowercase();
    shoes
        .iter()
        .filter(|shoe| matches(shoe, &needle))
        .collect()
}

fn matches(shoe: &ShoeRecord, needle: &str) -> bool {
    shoe.name.to_lowercase().contains(needle) || shoe.brand.to_lowercase().contains(needle)
}
