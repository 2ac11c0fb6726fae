//! Strongly-typed identifiers for domain entities.
//!
//! Orders, accounts and products live in separate lifecycles, so each gets
//! its own id type and they can never be swapped by accident.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(
    OrderId,
    "Human-facing order identifier (e.g. `ORD-1718000000000-K3J9QX2LA`)."
);
define_id!(UserId, "Identifier of the account that submitted an order.");
define_id!(ProductId, "Identifier of a catalog product.");
define_id!(NotificationId, "Identifier of a dispatched customer notification.");
define_id!(InvoiceId, "Identifier of an issued invoice.");

const BASE36_UPPER: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ORDER_SUFFIX_LEN: usize = 9;

impl OrderId {
    /// Generate a fresh order id of the form `ORD-{unix_millis}-{suffix}`.
    ///
    /// The suffix is nine random uppercase base-36 characters.
    #[must_use]
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let mut rng = rand::rng();
        let suffix: String = (0..ORDER_SUFFIX_LEN)
            .map(|_| char::from(BASE36_UPPER[rng.random_range(0..BASE36_UPPER.len())]))
            .collect();
        Self(format!("ORD-{millis}-{suffix}"))
    }
}

impl InvoiceId {
    /// Generate a fresh invoice id of the form `INV-{uuid}`.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("INV-{}", uuid::Uuid::new_v4().simple()))
    }
}

impl NotificationId {
    /// Generate a new unique identifier using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}
