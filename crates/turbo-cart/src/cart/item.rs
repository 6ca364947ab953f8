//! Line items: free-form field maps with a few engine-interpreted fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{FieldNames, QuantityBounds, UNIQUE_KEY_FIELD};
use crate::ids::ItemKey;

/// One product entry in the cart.
///
/// A line item is a mapping from field name to value. The engine interprets
/// the price, quantity, and bounds fields (named by [`FieldNames`]) and the
/// reserved `unique_key` field; everything else (name, id, description,
/// image, ...) is identity data it carries along untouched. The transparent
/// representation keeps the persisted shape a plain JSON object, so a cart
/// serializes to the same array-of-mappings it accepts as seed state.
///
/// Values sourced from form elements arrive as strings; numeric accessors
/// coerce numeric strings the same way they accept numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItem {
    fields: Map<String, Value>,
}

impl LineItem {
    /// Create an empty line item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line item from an existing field map.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Set a field, returning the previous value if any.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Get a field's raw value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether a field is present.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields, the unique key included once assigned.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the item has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all fields.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Get a field coerced to a number, if it holds one.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(coerce_number)
    }

    /// The item's unique key, if assigned.
    ///
    /// Numeric key values are accepted for compatibility with seed data that
    /// persisted keys as numbers.
    pub fn key(&self) -> Option<ItemKey> {
        match self.fields.get(UNIQUE_KEY_FIELD)? {
            Value::String(s) => Some(ItemKey::new(s.clone())),
            Value::Number(n) => Some(ItemKey::new(n.to_string())),
            _ => None,
        }
    }

    pub(crate) fn set_key(&mut self, key: &ItemKey) {
        self.fields
            .insert(UNIQUE_KEY_FIELD.to_string(), Value::from(key.as_str()));
    }

    /// The item's price, coerced to a number.
    pub fn price(&self, names: &FieldNames) -> Option<f64> {
        self.number(&names.price)
    }

    /// The item's quantity, coerced to a number.
    pub fn quantity(&self, names: &FieldNames) -> Option<f64> {
        self.number(&names.quantity)
    }

    pub(crate) fn set_quantity(&mut self, names: &FieldNames, value: Value) {
        self.fields.insert(names.quantity.clone(), value);
    }

    /// The item's own quantity bounds, unset where the item carries no
    /// override.
    pub fn bounds(&self, names: &FieldNames) -> QuantityBounds {
        QuantityBounds {
            min: self.number(&names.quantity_min),
            max: self.number(&names.quantity_max),
            step: self.number(&names.quantity_step),
        }
    }
}

/// Coerce a JSON value to a number: numbers pass through, numeric strings
/// parse, anything else is `None`.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// A number value, kept integral in the JSON representation when it is one.
pub(crate) fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < (i64::MAX as f64) {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> FieldNames {
        FieldNames::default()
    }

    #[test]
    fn test_field_round_trip() {
        let item = LineItem::new()
            .with_field("product_name", "Espresso Cup")
            .with_field("product_price", 9.99);
        assert_eq!(item.get("product_name"), Some(&Value::from("Espresso Cup")));
        assert_eq!(item.price(&names()), Some(9.99));
        assert_eq!(item.len(), 2);
    }

    #[test]
    fn test_numeric_strings_coerce() {
        let item = LineItem::new()
            .with_field("product_price", "12.50")
            .with_field("product_quantity", " 3 ");
        assert_eq!(item.price(&names()), Some(12.5));
        assert_eq!(item.quantity(&names()), Some(3.0));
    }

    #[test]
    fn test_non_numeric_values_do_not_coerce() {
        let item = LineItem::new()
            .with_field("product_price", "twelve")
            .with_field("product_quantity", true);
        assert_eq!(item.price(&names()), None);
        assert_eq!(item.quantity(&names()), None);
    }

    #[test]
    fn test_numeric_key_is_accepted() {
        let item = LineItem::new().with_field(UNIQUE_KEY_FIELD, 1483537519102_u64);
        assert_eq!(item.key(), Some(ItemKey::new("1483537519102")));
    }

    #[test]
    fn test_set_key_overwrites() {
        let mut item = LineItem::new();
        assert_eq!(item.key(), None);
        item.set_key(&ItemKey::new("k-1"));
        assert_eq!(item.key(), Some(ItemKey::new("k-1")));
        assert_eq!(item.len(), 1);
    }

    #[test]
    fn test_bounds_reads_per_item_overrides() {
        let item = LineItem::new()
            .with_field("product_quantity_min", 2)
            .with_field("product_quantity_step", "0.5");
        let bounds = item.bounds(&names());
        assert_eq!(bounds.min, Some(2.0));
        assert_eq!(bounds.max, None);
        assert_eq!(bounds.step, Some(0.5));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let item = LineItem::new()
            .with_field("product_name", "Mug")
            .with_field("product_price", 4.5);
        let json = serde_json::to_string(&item).unwrap();
        let back: LineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
        assert!(json.starts_with('{'));
    }

    #[test]
    fn test_number_value_keeps_integers_integral() {
        assert_eq!(number_value(2.0), Value::from(2));
        assert_eq!(number_value(2.5), Value::from(2.5));
    }
}
