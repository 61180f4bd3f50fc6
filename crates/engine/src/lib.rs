//! Bazaar Marketplace Engine
//!
//! Order lifecycle state machine, matching algorithms and fee computation
//! for an NFT/token marketplace:
//!
//! - **Validation**: structural/temporal checks and order-type classification
//! - **Registry**: per-asset listing/auction pointers and fungible book entries
//! - **Auction timer**: anti-snipe extension and acceptance grace window
//! - **Matching**: pairwise settlement per order type, including the
//!   continuous matcher for fungible limit orders
//! - **Fees**: broker/platform/royalty split attached to every settlement
//!
//! Storage, time and lifecycle hooks are injected through the
//! `bazaar-ports` traits; signature verification, asset transfer execution
//! and event delivery are external collaborators.

pub mod auction;
pub mod engine;
pub mod error;
pub mod events;
pub mod matching;
pub mod memory;
pub mod registry;
pub mod validation;

// Re-export main types
pub use engine::{CancelRequest, FulfillRequest, Marketplace};
pub use error::{Error, Result};
pub use events::MarketEvent;
pub use memory::MemoryOrderStore;
pub use registry::{AuctionSlot, BookEntry, Registry};
