//! Derived cart totals.

use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::config::FieldNames;
use crate::quantity::is_valid_quantity;

/// Count and subtotal derived from the cart's current state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Number of line items (not the sum of quantities).
    pub count: usize,
    /// Sum of `price * quantity` over items with a valid positive quantity.
    pub subtotal: f64,
}

/// Compute totals for the given item sequence.
///
/// Items whose quantity is missing, non-numeric, or not strictly positive
/// contribute zero to the subtotal, as do items whose price cannot be read
/// as a number. Recomputed from scratch on every call.
pub fn compute_totals(items: &[LineItem], names: &FieldNames) -> CartTotals {
    let subtotal = items
        .iter()
        .filter_map(|item| {
            let quantity = item.quantity(names)?;
            if !is_valid_quantity(quantity) {
                return None;
            }
            let price = item.price(names)?;
            Some(price * quantity)
        })
        .sum();

    CartTotals {
        count: items.len(),
        subtotal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> FieldNames {
        FieldNames::default()
    }

    fn item(price: f64, quantity: f64) -> LineItem {
        LineItem::new()
            .with_field("product_price", price)
            .with_field("product_quantity", quantity)
    }

    #[test]
    fn test_empty_cart() {
        let totals = compute_totals(&[], &names());
        assert_eq!(totals.count, 0);
        assert_eq!(totals.subtotal, 0.0);
    }

    #[test]
    fn test_count_is_entries_not_quantities() {
        let items = [item(10.0, 2.0), item(5.0, 4.0)];
        let totals = compute_totals(&items, &names());
        assert_eq!(totals.count, 2);
        assert_eq!(totals.subtotal, 40.0);
    }

    #[test]
    fn test_invalid_quantity_contributes_zero() {
        let items = [item(10.0, 2.0), item(5.0, -1.0)];
        let totals = compute_totals(&items, &names());
        assert_eq!(totals.count, 2);
        assert_eq!(totals.subtotal, 20.0);
    }

    #[test]
    fn test_string_values_coerce() {
        let items = [LineItem::new()
            .with_field("product_price", "2.50")
            .with_field("product_quantity", "4")];
        assert_eq!(compute_totals(&items, &names()).subtotal, 10.0);
    }

    #[test]
    fn test_unreadable_price_contributes_zero() {
        let items = [item(10.0, 1.0), LineItem::new()
            .with_field("product_price", "call us")
            .with_field("product_quantity", 3)];
        assert_eq!(compute_totals(&items, &names()).subtotal, 10.0);
    }
}
