//! Embeddable shopping-cart state engine.
//!
//! This crate is the state core of an in-page shopping cart. It owns the
//! ordered set of line items and nothing else: rendering, transport, and
//! currency formatting stay in the hosting layer, which feeds user intents
//! in and reacts to lifecycle events coming back out.
//!
//! - **Engine**: ordered line-item store with add/remove/update/clear/submit
//! - **Matching**: structural merge of identical products (combine mode)
//! - **Quantities**: clamp + step-snap normalization, drift-free for
//!   fractional steps
//! - **Events**: synchronous typed notifications with prevent-default and
//!   return-value semantics
//! - **Totals**: count and subtotal derived on demand
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_cart::prelude::*;
//!
//! let mut cart = CartEngine::new("storefront", CartConfig::default());
//!
//! cart.on(EventKind::ItemAdded, |event: &CartEvent<'_>, _ctx: &mut EventContext| {
//!     if let CartEvent::ItemAdded { cart, .. } = event {
//!         println!("{} item(s) in cart", cart.len());
//!     }
//! });
//!
//! let added = cart.add_item(
//!     LineItem::new()
//!         .with_field("product_name", "Rust Programming Book")
//!         .with_field("product_price", 49.99),
//! )?;
//!
//! // Adding the same product again merges instead of inserting.
//! cart.add_item(
//!     LineItem::new()
//!         .with_field("product_name", "Rust Programming Book")
//!         .with_field("product_price", 49.99),
//! )?;
//!
//! assert_eq!(cart.len(), 1);
//! println!("subtotal: {}", cart.totals().subtotal);
//!
//! cart.remove_item(&added.key);
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod quantity;

pub mod cart;

pub use cart::{AddOutcome, CartEngine, CartTotals, LineItem};
pub use config::CartConfig;
pub use error::CartError;
pub use events::{CartEvent, CartObserver, EventContext, EventKind, NotifyOutcome};
pub use ids::{EngineId, ItemKey};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{
        compute_totals, is_same_product, AddOutcome, CartEngine, CartTotals, LineItem,
    };
    pub use crate::config::{CartConfig, FieldNames, QuantityBounds, UNIQUE_KEY_FIELD};
    pub use crate::error::CartError;
    pub use crate::events::{
        CartEvent, CartObserver, EventContext, EventKind, NotifyOutcome,
    };
    pub use crate::ids::{EngineId, ItemKey};
    pub use crate::quantity::{decimal_places, is_valid_quantity, normalize};
}
