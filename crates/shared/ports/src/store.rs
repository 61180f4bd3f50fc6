use bazaar_core::{OrderContent, OrderHash, OrderStatus, OrderType};

/// Port for the content-addressed order repository.
///
/// Everything is keyed by the deterministic content hash; values are
/// overwritten in place and no history is retained. Orders are never
/// deleted: terminal statuses persist so replays can be rejected and
/// status queries stay idempotent.
pub trait OrderStore: Send + Sync {
    /// Order content by hash
    fn content(&self, hash: &OrderHash) -> Option<OrderContent>;

    /// Write order content under its hash
    fn put_content(&self, hash: OrderHash, content: OrderContent);

    /// Order status by hash; `None` means the hash was never recorded
    fn status(&self, hash: &OrderHash) -> Option<OrderStatus>;

    /// Write order status
    fn put_status(&self, hash: OrderHash, status: OrderStatus);

    /// Order type by hash
    fn order_type(&self, hash: &OrderHash) -> Option<OrderType>;

    /// Write order type
    fn put_order_type(&self, hash: OrderHash, order_type: OrderType);
}
