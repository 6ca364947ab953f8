//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Reserved field name holding an item's unique key.
///
/// Unlike the engine-interpreted fields in [`FieldNames`], the key field name
/// is fixed: it is part of the persisted cart shape.
pub const UNIQUE_KEY_FIELD: &str = "unique_key";

/// Names of the item fields the engine gives meaning to.
///
/// Items are free-form field maps; which field holds the price, the quantity,
/// and the per-item quantity bounds is configurable here and resolved once at
/// engine construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    /// Price field (required on every added item).
    pub price: String,
    /// Quantity field.
    pub quantity: String,
    /// Per-item minimum quantity override.
    pub quantity_min: String,
    /// Per-item maximum quantity override.
    pub quantity_max: String,
    /// Per-item quantity step override.
    pub quantity_step: String,
    /// Display name field.
    pub name: String,
    /// Product id field.
    pub id: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            price: "product_price".to_string(),
            quantity: "product_quantity".to_string(),
            quantity_min: "product_quantity_min".to_string(),
            quantity_max: "product_quantity_max".to_string(),
            quantity_step: "product_quantity_step".to_string(),
            name: "product_name".to_string(),
            id: "product_id".to_string(),
        }
    }
}

/// Quantity bounds used for normalization.
///
/// `None` means unset: no upper clamp for `max`, a clamp floor of 1 for
/// `min`, and a step of 1 for `step` (see [`crate::quantity::normalize`]).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuantityBounds {
    /// Minimum quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Step between valid quantities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl QuantityBounds {
    /// Create fully-specified bounds.
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            step: Some(step),
        }
    }

    /// Bounds with nothing set.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Fill unset fields from `defaults`.
    pub fn or(self, defaults: &QuantityBounds) -> Self {
        Self {
            min: self.min.or(defaults.min),
            max: self.max.or(defaults.max),
            step: self.step.or(defaults.step),
        }
    }
}

/// Configuration for a cart engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Merge structurally-identical additions into the existing entry.
    pub combine_products: bool,
    /// Global quantity bounds, overridable per item.
    pub quantity_bounds: QuantityBounds,
    /// Field-name mapping for engine-interpreted fields.
    pub field_names: FieldNames,
    /// Emit diagnostic log entries. No behavioral effect.
    pub debug: bool,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            combine_products: true,
            quantity_bounds: QuantityBounds::new(0.0, 1000.0, 1.0),
            field_names: FieldNames::default(),
            debug: false,
        }
    }
}

impl CartConfig {
    /// Create a configuration with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set combine mode.
    pub fn with_combine_products(mut self, combine: bool) -> Self {
        self.combine_products = combine;
        self
    }

    /// Set the global quantity bounds.
    pub fn with_quantity_bounds(mut self, bounds: QuantityBounds) -> Self {
        self.quantity_bounds = bounds;
        self
    }

    /// Set the field-name mapping.
    pub fn with_field_names(mut self, names: FieldNames) -> Self {
        self.field_names = names;
        self
    }

    /// Enable or disable diagnostic logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert!(config.combine_products);
        assert!(!config.debug);
        assert_eq!(config.quantity_bounds, QuantityBounds::new(0.0, 1000.0, 1.0));
        assert_eq!(config.field_names.price, "product_price");
        assert_eq!(config.field_names.quantity, "product_quantity");
    }

    #[test]
    fn test_builder_methods() {
        let config = CartConfig::new()
            .with_combine_products(false)
            .with_quantity_bounds(QuantityBounds::new(1.0, 10.0, 0.5))
            .with_debug(true);
        assert!(!config.combine_products);
        assert!(config.debug);
        assert_eq!(config.quantity_bounds.step, Some(0.5));
    }

    #[test]
    fn test_bounds_or_fills_unset_fields() {
        let overrides = QuantityBounds {
            max: Some(5.0),
            ..QuantityBounds::unset()
        };
        let defaults = QuantityBounds::new(0.0, 1000.0, 1.0);
        let effective = overrides.or(&defaults);
        assert_eq!(effective.min, Some(0.0));
        assert_eq!(effective.max, Some(5.0));
        assert_eq!(effective.step, Some(1.0));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: CartConfig = serde_json::from_str("{\"debug\":true}").unwrap();
        assert!(config.debug);
        assert!(config.combine_products);
        assert_eq!(config.field_names, FieldNames::default());
    }
}
