use serde::{Deserialize, Serialize};

use super::Route;
use crate::values::{
    Address, Amount, AssetHash, ChainId, Quantity, Timestamp, TokenId, PRICE_PRECISION,
};

/// Immutable order content.
///
/// An order is identified by the deterministic hash of this content
/// (`compute_order_hash`); re-submitting identical content is rejected as a
/// replay. Mutable lifecycle state (status) lives in the order store, never
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderContent {
    /// Account that created and signs for the order
    pub offerer: Address,
    /// Asset collection contract
    pub collection: Address,
    /// Specific asset within the collection; absent for
    /// fungible/collection-scoped orders
    pub token_id: Option<TokenId>,
    /// Asset units covered by the order
    pub quantity: Quantity,
    /// Amount at the start of the order's life (listing price, bid amount,
    /// limit-buy notional)
    pub start_amount: Amount,
    /// Amount at the end of the order's life (auction ceiling, limit-sell
    /// notional; equals `start_amount` otherwise)
    pub end_amount: Amount,
    /// Settlement currency contract
    pub currency: Address,
    /// Chain the settlement currency lives on
    pub chain_id: ChainId,
    /// Broker credited with the listing-side fee
    pub broker: Address,
    /// First second at which the order is active
    pub start_time: Timestamp,
    /// First second at which the order is expired
    pub end_time: Timestamp,
    /// Trade direction; drives order-type classification
    pub route: Route,
    /// Content schema version
    pub version: u32,
}

impl OrderContent {
    /// Canonical hash of the (collection, token id) pair this order targets
    pub fn asset_hash(&self) -> AssetHash {
        crate::hash::compute_asset_hash(&self.collection, self.token_id)
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.end_time
    }

    pub fn is_started(&self, now: Timestamp) -> bool {
        now >= self.start_time
    }

    /// Unit price scaled by `PRICE_PRECISION`, for the fungible routes.
    ///
    /// Buy orders quote with the start amount, sell orders with the end
    /// amount. Returns `None` for non-fungible routes or zero quantity.
    pub fn normalized_price(&self) -> Option<u128> {
        if self.quantity == 0 {
            return None;
        }
        let amount = match self.route {
            Route::FungibleBuy => self.start_amount,
            Route::FungibleSell => self.end_amount,
            _ => return None,
        };
        Some(amount * PRICE_PRECISION / self.quantity as u128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fungible(route: Route, start: Amount, end: Amount, quantity: Quantity) -> OrderContent {
        OrderContent {
            offerer: Address::new("0xoffer"),
            collection: Address::new("0xtoken"),
            token_id: None,
            quantity,
            start_amount: start,
            end_amount: end,
            currency: Address::new("0xusd"),
            chain_id: 1,
            broker: Address::new("0xbroker"),
            start_time: 0,
            end_time: 1_000,
            route,
            version: 1,
        }
    }

    #[test]
    fn buy_price_uses_start_amount() {
        let order = fungible(Route::FungibleBuy, 1_000, 9_999, 10);
        assert_eq!(order.normalized_price(), Some(100 * PRICE_PRECISION));
    }

    #[test]
    fn sell_price_uses_end_amount() {
        let order = fungible(Route::FungibleSell, 9_999, 600, 6);
        assert_eq!(order.normalized_price(), Some(100 * PRICE_PRECISION));
    }

    #[test]
    fn non_fungible_routes_have_no_price() {
        let order = fungible(Route::AssetToCurrency, 1_000, 1_000, 1);
        assert_eq!(order.normalized_price(), None);
    }

    #[test]
    fn zero_quantity_has_no_price() {
        let order = fungible(Route::FungibleBuy, 1_000, 1_000, 0);
        assert_eq!(order.normalized_price(), None);
    }

    #[test]
    fn expiry_bounds_are_half_open() {
        let order = fungible(Route::FungibleBuy, 1_000, 1_000, 10);
        assert!(!order.is_expired(999));
        assert!(order.is_expired(1_000));
        assert!(order.is_started(0));
    }
}
