use std::fmt;

use serde::{Deserialize, Serialize};

/// Currency amount in base units
pub type Amount = u128;

/// Number of asset units covered by an order
pub type Quantity = u64;

/// Timestamp in seconds
pub type Timestamp = u64;

/// Chain identifier for the settlement currency
pub type ChainId = u64;

/// Asset identifier within a collection
pub type TokenId = u64;

/// Scalar applied to unit prices so fungible orders can be compared and
/// settled with integer division only
pub const PRICE_PRECISION: u128 = 100_000_000;

/// Schema version stamped on order content and every emitted event.
/// Consumers must treat a version bump as a breaking change.
pub const ORDER_SCHEMA_VERSION: u32 = 1;

/// On-chain account address (participant, collection, currency or broker)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deterministic content hash identifying an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderHash([u8; 32]);

/// Canonical identifier for a (collection, token id) pair, or collection-only
/// for fungible/collection-scoped orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetHash([u8; 32]);

impl OrderHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AssetHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for OrderHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Display for AssetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
