//! Lifecycle events emitted after committed state transitions.
//!
//! Events are buffered on the engine and drained by the embedding
//! application. Each variant carries a schema version so downstream
//! consumers can evolve independently of the engine.

use bazaar_core::{Address, OrderHash, OrderType, ORDER_SCHEMA_VERSION};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarketEvent {
    OrderPlaced {
        schema_version: u32,
        order_hash: OrderHash,
        order_type: OrderType,
        offerer: Address,
        /// Previous occupant superseded by this placement, if any
        cancelled_order_hash: Option<OrderHash>,
    },
    OrderCancelled {
        schema_version: u32,
        order_hash: OrderHash,
        order_type: OrderType,
        offerer: Address,
    },
    OrderFulfilled {
        schema_version: u32,
        order_hash: OrderHash,
        related_order_hash: Option<OrderHash>,
        fulfiller: Address,
    },
    OrderExecuted {
        schema_version: u32,
        order_hash: OrderHash,
    },
    /// Reserved for settlement-layer reorgs. The engine itself never
    /// emits this; it exists so consumers share one event vocabulary
    /// with the executor.
    OrderRollback {
        schema_version: u32,
        order_hash: OrderHash,
    },
}

impl MarketEvent {
    pub fn schema_version(&self) -> u32 {
        match self {
            MarketEvent::OrderPlaced { schema_version, .. }
            | MarketEvent::OrderCancelled { schema_version, .. }
            | MarketEvent::OrderFulfilled { schema_version, .. }
            | MarketEvent::OrderExecuted { schema_version, .. }
            | MarketEvent::OrderRollback { schema_version, .. } => *schema_version,
        }
    }

    pub(crate) fn placed(
        order_hash: OrderHash,
        order_type: OrderType,
        offerer: Address,
        cancelled_order_hash: Option<OrderHash>,
    ) -> Self {
        MarketEvent::OrderPlaced {
            schema_version: ORDER_SCHEMA_VERSION,
            order_hash,
            order_type,
            offerer,
            cancelled_order_hash,
        }
    }

    pub(crate) fn cancelled(order_hash: OrderHash, order_type: OrderType, offerer: Address) -> Self {
        MarketEvent::OrderCancelled {
            schema_version: ORDER_SCHEMA_VERSION,
            order_hash,
            order_type,
            offerer,
        }
    }

    pub(crate) fn fulfilled(
        order_hash: OrderHash,
        related_order_hash: Option<OrderHash>,
        fulfiller: Address,
    ) -> Self {
        MarketEvent::OrderFulfilled {
            schema_version: ORDER_SCHEMA_VERSION,
            order_hash,
            related_order_hash,
            fulfiller,
        }
    }

    pub(crate) fn executed(order_hash: OrderHash) -> Self {
        MarketEvent::OrderExecuted {
            schema_version: ORDER_SCHEMA_VERSION,
            order_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_event_carries_the_schema_version() {
        let hash = OrderHash::from_bytes([1; 32]);
        let events = [
            MarketEvent::placed(hash, OrderType::Listing, Address::new("0xa"), None),
            MarketEvent::cancelled(hash, OrderType::Listing, Address::new("0xa")),
            MarketEvent::fulfilled(hash, None, Address::new("0xb")),
            MarketEvent::executed(hash),
        ];
        for event in events {
            assert_eq!(event.schema_version(), ORDER_SCHEMA_VERSION);
        }
    }

    #[test]
    fn events_serialize_with_a_kind_tag() {
        let event = MarketEvent::executed(OrderHash::from_bytes([2; 32]));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"order_executed\""));
        let back: MarketEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
