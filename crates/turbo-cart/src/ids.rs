//! Newtype identifiers for engines and line items.
//!
//! Newtypes keep the two identifier spaces apart: an engine handle id is
//! never a valid item key and vice versa.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident) => {
        /// An opaque identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from an existing string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh, process-unique ID.
            pub fn generate() -> Self {
                Self(generate_id())
            }

            /// View the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(EngineId);
define_id!(ItemKey);

/// Generate a unique ID from a timestamp and a monotonic counter.
///
/// The counter component guarantees distinct IDs even when two are created
/// within the same clock tick, so keys are never reused for the lifetime of
/// the process.
fn generate_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);

    format!("{timestamp:x}-{counter:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_creation() {
        let key = ItemKey::new("k-123");
        assert_eq!(key.as_str(), "k-123");
    }

    #[test]
    fn test_generated_keys_never_collide() {
        let keys: HashSet<ItemKey> = (0..1000).map(|_| ItemKey::generate()).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_key_from_string() {
        let key: ItemKey = "k-456".into();
        assert_eq!(key.as_str(), "k-456");
    }

    #[test]
    fn test_engine_id_display() {
        let id = EngineId::new("main-cart");
        assert_eq!(format!("{}", id), "main-cart");
    }

    #[test]
    fn test_key_equality() {
        assert_eq!(ItemKey::new("same"), ItemKey::new("same"));
        assert_ne!(ItemKey::new("same"), ItemKey::new("different"));
    }
}
