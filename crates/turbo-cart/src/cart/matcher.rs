//! Structural product matching for combine mode.

use serde_json::Value;

use crate::cart::LineItem;
use crate::config::{FieldNames, UNIQUE_KEY_FIELD};

/// Whether two line items describe the same product.
///
/// Items match when they have the same number of fields and every field of
/// `a` other than the unique key and the quantity field compares equal in
/// `b`. The field-count rule is deliberate and strict: an item carrying an
/// extra optional field never matches one without it, even when all shared
/// fields agree.
///
/// Numbers compare by numeric value; values of different JSON types are
/// never equal (the string `"1"` does not match the number `1`).
pub fn is_same_product(a: &LineItem, b: &LineItem, names: &FieldNames) -> bool {
    if a.len() != b.len() {
        return false;
    }
    for (field, left) in a.iter() {
        if field == UNIQUE_KEY_FIELD || *field == names.quantity {
            continue;
        }
        match b.get(field) {
            Some(right) if values_equal(left, right) => {}
            _ => return false,
        }
    }
    true
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}
