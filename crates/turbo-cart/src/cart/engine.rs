//! The cart engine: ordered line-item store and mutation surface.

use serde_json::Value;
use tracing::debug;

use crate::cart::item::{coerce_number, number_value};
use crate::cart::matcher::is_same_product;
use crate::cart::totals::{compute_totals, CartTotals};
use crate::cart::LineItem;
use crate::config::{CartConfig, QuantityBounds};
use crate::error::CartError;
use crate::events::{CartEvent, CartObserver, EventKind, Notifier, NotifyOutcome};
use crate::ids::{EngineId, ItemKey};
use crate::quantity::{is_valid_quantity, normalize};

/// Result of an add: which entry was affected and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Key of the affected entry.
    pub key: ItemKey,
    /// `true` when a new entry was appended, `false` when the addition
    /// merged into an existing entry.
    pub inserted: bool,
}

/// A shopping-cart state engine.
///
/// The engine is the single owner of its cart: an ordered sequence of
/// [`LineItem`]s, mutated only through the methods here. Insertion order is
/// the display order and survives merges (a merge updates the existing entry
/// in place). Every mutation runs to completion and notifies subscribers on
/// the same call stack before control returns to the caller.
///
/// Hosts obtain an engine from [`CartEngine::new`] with an explicit
/// [`EngineId`] and hold the handle themselves; the id also tags diagnostic
/// log lines when [`CartConfig::debug`] is set.
#[derive(Debug)]
pub struct CartEngine {
    id: EngineId,
    config: CartConfig,
    items: Vec<LineItem>,
    notifier: Notifier,
}

impl CartEngine {
    /// Create an empty cart engine.
    pub fn new(id: impl Into<EngineId>, config: CartConfig) -> Self {
        Self {
            id: id.into(),
            config,
            items: Vec::new(),
            notifier: Notifier::new(),
        }
    }

    /// Create an engine seeded with initial items.
    ///
    /// Seed entries run through the regular add pipeline: quantities default
    /// to 1, keys are assigned where absent, and structurally-identical
    /// entries merge when combine mode is on. Entries without a price are
    /// skipped, with a diagnostic when `debug` is set.
    pub fn with_items(
        id: impl Into<EngineId>,
        config: CartConfig,
        seed: impl IntoIterator<Item = LineItem>,
    ) -> Self {
        let mut engine = Self::new(id, config);
        for item in seed {
            if let Err(err) = engine.add_item(item) {
                if engine.config.debug {
                    debug!(engine = %engine.id, %err, "skipping seed item");
                }
            }
        }
        engine
    }

    /// The engine's identifier.
    pub fn id(&self) -> &EngineId {
        &self.id
    }

    /// The engine's configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// The ordered item sequence.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of entries in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an entry by its key.
    pub fn get(&self, key: &ItemKey) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| item.key().as_ref() == Some(key))
    }

    /// Subscribe an observer to one event kind.
    pub fn on(&mut self, kind: EventKind, observer: impl CartObserver + 'static) {
        self.notifier.on(kind, observer);
    }

    /// Add an item to the cart.
    ///
    /// The candidate must carry a price field; without one the cart is left
    /// untouched and [`CartError::MissingPrice`] is returned. A missing
    /// quantity defaults to 1 and a missing unique key is assigned fresh.
    ///
    /// With combine mode on, a candidate matching an existing entry (see
    /// [`is_same_product`]) merges into it: the entry's quantity grows by
    /// the candidate's and `itemUpdated` fires. Otherwise the candidate is
    /// appended and `itemAdded` fires.
    pub fn add_item(&mut self, mut candidate: LineItem) -> Result<AddOutcome, CartError> {
        if !candidate.contains(&self.config.field_names.price) {
            if self.config.debug {
                debug!(engine = %self.id, "price is not set for the item");
            }
            return Err(CartError::MissingPrice(self.config.field_names.price.clone()));
        }

        if !candidate.contains(&self.config.field_names.quantity) {
            if self.config.debug {
                debug!(engine = %self.id, "quantity not found, default to 1");
            }
            candidate.insert(self.config.field_names.quantity.clone(), 1);
        }

        if candidate.key().is_none() {
            candidate.set_key(&ItemKey::generate());
        }

        if self.config.combine_products {
            let names = &self.config.field_names;
            if let Some(index) = self
                .items
                .iter()
                .position(|item| is_same_product(item, &candidate, names))
            {
                let existing = self.items[index].quantity(names).unwrap_or(0.0);
                let added = candidate.quantity(names).unwrap_or(0.0);
                self.items[index].set_quantity(names, number_value(existing + added));

                let key = self.items[index]
                    .key()
                    .expect("cart entries always carry a unique key");
                if self.config.debug {
                    debug!(engine = %self.id, key = %key, "combined into existing entry");
                }
                self.notifier.notify(&CartEvent::ItemUpdated {
                    item: &self.items[index],
                    cart: &self.items,
                });
                return Ok(AddOutcome {
                    key,
                    inserted: false,
                });
            }
        }

        let key = candidate
            .key()
            .expect("key assigned before insertion");
        self.items.push(candidate);
        let index = self.items.len() - 1;
        self.notifier.notify(&CartEvent::ItemAdded {
            item: &self.items[index],
            cart: &self.items,
        });
        Ok(AddOutcome {
            key,
            inserted: true,
        })
    }

    /// Remove the entry with the given key.
    ///
    /// An unknown key is a silent no-op. On removal `itemRemoved` fires
    /// with the removed entry, then `cartEmpty` if nothing is left.
    pub fn remove_item(&mut self, key: &ItemKey) -> Option<LineItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.key().as_ref() == Some(key));
        let Some(index) = index else {
            if self.config.debug {
                debug!(engine = %self.id, key = %key, "remove: no entry with this key");
            }
            return None;
        };

        let removed = self.items.remove(index);
        self.notifier.notify(&CartEvent::ItemRemoved {
            item: &removed,
            cart: &self.items,
        });
        if self.items.is_empty() {
            self.notifier.notify(&CartEvent::CartEmpty);
        }
        Some(removed)
    }

    /// Overwrite an entry's quantity with a raw value.
    ///
    /// An unknown key is a silent no-op returning `false`. When the raw
    /// value is a positive finite number (numeric strings count), it is
    /// stored exactly as passed; otherwise the previous quantity is kept.
    /// Either way `quantityUpdated` fires with the raw value, so hosts can
    /// refresh stale inputs back to the retained state.
    ///
    /// This method does not normalize; callers run raw input through
    /// [`normalized_quantity`](Self::normalized_quantity) (or
    /// [`normalize`]) first when they want clamp and step-snap behavior.
    pub fn set_quantity(&mut self, key: &ItemKey, raw: impl Into<Value>) -> bool {
        let raw = raw.into();
        let index = self
            .items
            .iter()
            .position(|item| item.key().as_ref() == Some(key));
        let Some(index) = index else {
            if self.config.debug {
                debug!(engine = %self.id, key = %key, "quantity update: no entry with this key");
            }
            return false;
        };

        let valid = coerce_number(&raw).is_some_and(is_valid_quantity);
        if valid {
            self.items[index].set_quantity(&self.config.field_names, raw.clone());
        } else if self.config.debug {
            debug!(engine = %self.id, key = %key, "invalid quantity, keeping previous value");
        }

        self.notifier.notify(&CartEvent::QuantityUpdated {
            item: &self.items[index],
            raw: &raw,
            cart: &self.items,
        });
        true
    }

    /// Empty the cart unconditionally.
    ///
    /// Fires `cartCleared`, then `cartEmpty`.
    pub fn clear(&mut self) {
        self.items.clear();
        self.notifier.notify(&CartEvent::CartCleared);
        self.notifier.notify(&CartEvent::CartEmpty);
    }

    /// Announce submission of the cart's current state.
    ///
    /// The cart itself is not mutated; hosts that want an empty cart after a
    /// successful hand-off call [`clear`](Self::clear) themselves. The
    /// outcome carries a subscriber's veto of the default follow-up and any
    /// return value.
    pub fn submit(&mut self) -> NotifyOutcome {
        self.notifier
            .notify(&CartEvent::CartSubmitted { cart: &self.items })
    }

    /// Totals derived from the current state.
    pub fn totals(&self) -> CartTotals {
        compute_totals(&self.items, &self.config.field_names)
    }

    /// Effective quantity bounds for an item: its own overrides where
    /// present, the configured defaults elsewhere.
    pub fn bounds_for(&self, item: &LineItem) -> QuantityBounds {
        item.bounds(&self.config.field_names)
            .or(&self.config.quantity_bounds)
    }

    /// Normalize a raw quantity against an entry's effective bounds.
    ///
    /// Returns `None` for an unknown key. This is the value a host writes
    /// back into its input element before calling
    /// [`set_quantity`](Self::set_quantity).
    pub fn normalized_quantity(&self, key: &ItemKey, raw: f64) -> Option<f64> {
        let item = self.get(key)?;
        let bounds = self.bounds_for(item);
        Some(normalize(raw, bounds.min, bounds.max, bounds.step))
    }

    /// Serialize the cart to a JSON array of item mappings.
    ///
    /// The output is the same shape [`with_items`](Self::with_items)
    /// accepts as seed state.
    pub fn to_json(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string(&self.items)?)
    }
}
