//! Lifecycle events and the notification mechanism.
//!
//! Every mutation of a cart engine is announced to subscribers synchronously,
//! on the same call stack, after the mutation has been applied. Notification
//! is advisory: a subscriber can mark the default follow-up action as
//! prevented (e.g. to skip a UI refresh), but it cannot veto the mutation
//! itself.

use std::fmt;

use serde_json::Value;

use crate::cart::LineItem;

/// The lifecycle events a cart engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A new entry was appended to the cart.
    ItemAdded,
    /// An addition merged into an existing entry.
    ItemUpdated,
    /// An entry was removed.
    ItemRemoved,
    /// An entry's quantity field was edited.
    QuantityUpdated,
    /// The cart was emptied.
    CartCleared,
    /// A mutation left the cart with zero items.
    CartEmpty,
    /// The cart was submitted.
    CartSubmitted,
}

impl EventKind {
    /// The event's wire name, as hosts historically bound to it.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::ItemAdded => "itemAdded",
            EventKind::ItemUpdated => "itemUpdated",
            EventKind::ItemRemoved => "itemRemoved",
            EventKind::QuantityUpdated => "quantityUpdated",
            EventKind::CartCleared => "cartCleared",
            EventKind::CartEmpty => "cartEmpty",
            EventKind::CartSubmitted => "cartSubmitted",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A lifecycle notification with its payload.
///
/// Payloads borrow from the engine: `cart` is a read-only view of the
/// ordered item sequence at notification time.
#[derive(Debug, Clone, Copy)]
pub enum CartEvent<'a> {
    /// Payload: the appended item and the cart snapshot.
    ItemAdded {
        item: &'a LineItem,
        cart: &'a [LineItem],
    },
    /// Payload: the merged-into item and the cart snapshot.
    ItemUpdated {
        item: &'a LineItem,
        cart: &'a [LineItem],
    },
    /// Payload: the removed item and the cart snapshot (without it).
    ItemRemoved {
        item: &'a LineItem,
        cart: &'a [LineItem],
    },
    /// Payload: the edited item, the raw value the caller passed (valid or
    /// not), and the cart snapshot.
    QuantityUpdated {
        item: &'a LineItem,
        raw: &'a Value,
        cart: &'a [LineItem],
    },
    CartCleared,
    CartEmpty,
    /// Payload: the cart snapshot being submitted.
    CartSubmitted { cart: &'a [LineItem] },
}

impl CartEvent<'_> {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            CartEvent::ItemAdded { .. } => EventKind::ItemAdded,
            CartEvent::ItemUpdated { .. } => EventKind::ItemUpdated,
            CartEvent::ItemRemoved { .. } => EventKind::ItemRemoved,
            CartEvent::QuantityUpdated { .. } => EventKind::QuantityUpdated,
            CartEvent::CartCleared => EventKind::CartCleared,
            CartEvent::CartEmpty => EventKind::CartEmpty,
            CartEvent::CartSubmitted { .. } => EventKind::CartSubmitted,
        }
    }
}

/// Mutable dispatch state shared by the subscribers of one notification.
#[derive(Debug, Default)]
pub struct EventContext {
    default_prevented: bool,
    return_value: Option<Value>,
}

impl EventContext {
    /// Mark the default follow-up action as prevented.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a subscriber has prevented the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Set the notification's return value. A later subscriber's value
    /// replaces an earlier one.
    pub fn set_return_value(&mut self, value: impl Into<Value>) {
        self.return_value = Some(value.into());
    }
}

/// What came back from dispatching one notification.
///
/// When the default was prevented no return value is reported, mirroring the
/// all-or-nothing result hosts already handle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NotifyOutcome {
    /// A subscriber prevented the default follow-up action.
    pub default_prevented: bool,
    /// The last return value a subscriber set, unless prevented.
    pub return_value: Option<Value>,
}

/// Observer of cart lifecycle events.
///
/// Implemented for any `FnMut(&CartEvent, &mut EventContext)` closure, so
/// most hosts never implement the trait by hand.
pub trait CartObserver {
    /// Called once per matching notification, in subscription order.
    fn on_event(&mut self, event: &CartEvent<'_>, ctx: &mut EventContext);
}

impl<F> CartObserver for F
where
    F: FnMut(&CartEvent<'_>, &mut EventContext),
{
    fn on_event(&mut self, event: &CartEvent<'_>, ctx: &mut EventContext) {
        self(event, ctx)
    }
}

/// Dispatches events to subscribers, synchronously and in subscription order.
pub(crate) struct Notifier {
    subscribers: Vec<(EventKind, Box<dyn CartObserver>)>,
}

impl Notifier {
    pub(crate) fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register an observer for one event kind.
    pub(crate) fn on(&mut self, kind: EventKind, observer: impl CartObserver + 'static) {
        self.subscribers.push((kind, Box::new(observer)));
    }

    /// Deliver `event` to every subscriber of its kind.
    pub(crate) fn notify(&mut self, event: &CartEvent<'_>) -> NotifyOutcome {
        let kind = event.kind();
        let mut ctx = EventContext::default();
        for (subscribed, observer) in &mut self.subscribers {
            if *subscribed == kind {
                observer.on_event(event, &mut ctx);
            }
        }
        if ctx.default_prevented {
            NotifyOutcome {
                default_prevented: true,
                return_value: None,
            }
        } else {
            NotifyOutcome {
                default_prevented: false,
                return_value: ctx.return_value,
            }
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
