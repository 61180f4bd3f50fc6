//! Bazaar Core Domain
//!
//! Pure domain types for the Bazaar marketplace engine.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod hash;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Fee types
    FeeConfig,
    FeeRatio,
    FeeSplit,
    // Core trading entities
    OrderContent,
    OrderStatus,
    OrderType,
    Route,
    // Settlement
    SettlementInstruction,
};
pub use hash::{compute_asset_hash, compute_order_hash};
pub use values::{
    Address, Amount, AssetHash, ChainId, OrderHash, Quantity, Timestamp, TokenId,
    ORDER_SCHEMA_VERSION, PRICE_PRECISION,
};
