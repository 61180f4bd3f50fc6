//! Canonical order and asset hashing.
//!
//! Hashes are SHA-256 over a fixed-order, length-prefixed field encoding, so
//! two contents hash equal if and only if every field is equal. The encoding
//! is part of the wire contract: changing it is a breaking change and must be
//! accompanied by an `ORDER_SCHEMA_VERSION` bump.

use sha2::{Digest, Sha256};

use crate::entities::OrderContent;
use crate::values::{Address, AssetHash, OrderHash, TokenId};

struct CanonicalHasher {
    inner: Sha256,
}

impl CanonicalHasher {
    fn new(domain: &str) -> Self {
        let mut inner = Sha256::new();
        inner.update(domain.as_bytes());
        Self { inner }
    }

    fn put_u8(&mut self, value: u8) {
        self.inner.update([value]);
    }

    fn put_u32(&mut self, value: u32) {
        self.inner.update(value.to_le_bytes());
    }

    fn put_u64(&mut self, value: u64) {
        self.inner.update(value.to_le_bytes());
    }

    fn put_u128(&mut self, value: u128) {
        self.inner.update(value.to_le_bytes());
    }

    fn put_address(&mut self, address: &Address) {
        // Length prefix keeps adjacent string fields unambiguous
        let bytes = address.as_str().as_bytes();
        self.put_u64(bytes.len() as u64);
        self.inner.update(bytes);
    }

    fn put_opt_u64(&mut self, value: Option<u64>) {
        match value {
            Some(v) => {
                self.put_u8(1);
                self.put_u64(v);
            }
            None => self.put_u8(0),
        }
    }

    fn finish(self) -> [u8; 32] {
        self.inner.finalize().into()
    }
}

/// Deterministic content hash identifying an order
pub fn compute_order_hash(content: &OrderContent) -> OrderHash {
    let mut hasher = CanonicalHasher::new("bazaar.order.v1");
    hasher.put_address(&content.offerer);
    hasher.put_address(&content.collection);
    hasher.put_opt_u64(content.token_id);
    hasher.put_u64(content.quantity);
    hasher.put_u128(content.start_amount);
    hasher.put_u128(content.end_amount);
    hasher.put_address(&content.currency);
    hasher.put_u64(content.chain_id);
    hasher.put_address(&content.broker);
    hasher.put_u64(content.start_time);
    hasher.put_u64(content.end_time);
    hasher.put_u8(content.route.tag());
    hasher.put_u32(content.version);
    OrderHash::from_bytes(hasher.finish())
}

/// Canonical hash of a (collection, token id) pair; collection-only when the
/// token id is absent
pub fn compute_asset_hash(collection: &Address, token_id: Option<TokenId>) -> AssetHash {
    let mut hasher = CanonicalHasher::new("bazaar.asset.v1");
    hasher.put_address(collection);
    hasher.put_opt_u64(token_id);
    AssetHash::from_bytes(hasher.finish())
}
