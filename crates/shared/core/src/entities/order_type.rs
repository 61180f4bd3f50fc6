use serde::{Deserialize, Serialize};

/// Order type, inferred from order content at validation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Fixed-price sale of a specific asset
    Listing,
    /// Timed sale of a specific asset, settled by the seller accepting a bid
    Auction,
    /// Bid on a specific asset
    Offer,
    /// Bid on any asset of a collection
    CollectionOffer,
    /// Resting fungible buy order
    LimitBuy,
    /// Resting fungible sell order
    LimitSell,
}

impl OrderType {
    /// Returns true for the resting fungible order types
    pub fn is_limit(&self) -> bool {
        matches!(self, OrderType::LimitBuy | OrderType::LimitSell)
    }

    /// Returns true for the bid-shaped types an auction can settle against
    pub fn is_offer(&self) -> bool {
        matches!(self, OrderType::Offer | OrderType::CollectionOffer)
    }
}
