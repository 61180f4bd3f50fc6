//! Marketplace engine errors
//!
//! Every precondition violation aborts the operation atomically with a
//! distinguishable variant. No retries happen inside the engine; callers
//! resubmit corrected requests.

use bazaar_core::{AssetHash, OrderHash, OrderStatus, OrderType, TokenId};
use bazaar_ports::HookError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("order not found: {0}")]
    OrderNotFound(OrderHash),

    #[error("order already exists: {0}")]
    OrderAlreadyExists(OrderHash),

    #[error("order already fulfilled: {0}")]
    OrderAlreadyFulfilled(OrderHash),

    #[error("order expired: {0}")]
    OrderExpired(OrderHash),

    #[error("order not yet active: {0}")]
    OrderNotYetActive(OrderHash),

    #[error("order {hash} is not open (status {status:?})")]
    OrderNotOpen {
        hash: OrderHash,
        status: OrderStatus,
    },

    #[error("order {hash} is not fulfilled (status {status:?})")]
    OrderNotFulfilled {
        hash: OrderHash,
        status: OrderStatus,
    },

    #[error("price mismatch: buy {buy} vs sell {sell}")]
    PriceMismatch { buy: u128, sell: u128 },

    #[error("hash mismatch: supplied {supplied}, computed {computed}")]
    HashMismatch {
        supplied: OrderHash,
        computed: OrderHash,
    },

    #[error("orders reference different assets")]
    AssetMismatch,

    #[error("related order required but missing")]
    MissingRelatedOrder,

    #[error("related order has wrong type: {0:?}")]
    WrongRelatedOrderType(OrderType),

    #[error("routes do not form an opposite fungible pair")]
    InvalidRoute,

    #[error("caller is not the offerer of {0}")]
    NotOfferer(OrderHash),

    #[error("offerer cannot fulfill their own order {0}")]
    SameOfferer(OrderHash),

    #[error("token id required but missing")]
    MissingTokenId,

    #[error("token id mismatch: order targets {expected}, request supplied {supplied}")]
    TokenIdMismatch {
        expected: TokenId,
        supplied: TokenId,
    },

    #[error("asset has an active auction: {0}")]
    AuctionInProgress(AssetHash),

    #[error("invalid order data: {0}")]
    InvalidOrderData(String),

    #[error(transparent)]
    Hook(#[from] HookError),
}

pub type Result<T> = std::result::Result<T, Error>;
