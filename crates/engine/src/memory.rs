//! In-memory order store backed by concurrent maps.

use bazaar_core::{OrderContent, OrderHash, OrderStatus, OrderType};
use bazaar_ports::OrderStore;
use dashmap::DashMap;

/// Default `OrderStore` for embedding and tests.
///
/// Three maps keyed by the content hash; entries are only ever overwritten,
/// never removed, so terminal statuses keep rejecting replays.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    contents: DashMap<OrderHash, OrderContent>,
    statuses: DashMap<OrderHash, OrderStatus>,
    types: DashMap<OrderHash, OrderType>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for MemoryOrderStore {
    fn content(&self, hash: &OrderHash) -> Option<OrderContent> {
        self.contents.get(hash).map(|entry| entry.value().clone())
    }

    fn put_content(&self, hash: OrderHash, content: OrderContent) {
        self.contents.insert(hash, content);
    }

    fn status(&self, hash: &OrderHash) -> Option<OrderStatus> {
        self.statuses.get(hash).map(|entry| *entry)
    }

    fn put_status(&self, hash: OrderHash, status: OrderStatus) {
        self.statuses.insert(hash, status);
    }

    fn order_type(&self, hash: &OrderHash) -> Option<OrderType> {
        self.types.get(hash).map(|entry| *entry)
    }

    fn put_order_type(&self, hash: OrderHash, order_type: OrderType) {
        self.types.insert(hash, order_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_overwrite_in_place() {
        let store = MemoryOrderStore::new();
        let hash = OrderHash::from_bytes([3; 32]);

        assert_eq!(store.status(&hash), None);
        store.put_status(hash, OrderStatus::Open);
        assert_eq!(store.status(&hash), Some(OrderStatus::Open));
        store.put_status(hash, OrderStatus::Fulfilled);
        assert_eq!(store.status(&hash), Some(OrderStatus::Fulfilled));
    }
}
