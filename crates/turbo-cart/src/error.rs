//! Cart error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// Only [`CartError::MissingPrice`] is ever returned from a mutation; lookups
/// that miss (remove or quantity update on an unknown key) degrade to silent
/// no-ops so hosts do not have to pre-check existence against stale state.
#[derive(Error, Debug)]
pub enum CartError {
    /// The required price field is absent on an item being added.
    #[error("price field `{0}` is not set for the item")]
    MissingPrice(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_price_names_the_field() {
        let err = CartError::MissingPrice("product_price".to_string());
        assert_eq!(
            err.to_string(),
            "price field `product_price` is not set for the item"
        );
    }
}
