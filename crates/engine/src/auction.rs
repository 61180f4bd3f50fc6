//! Auction timing rules.
//!
//! Two windows govern an auction. Bidding stays open through the slot's
//! end time, with a late bid pushing the end out by a fixed anti-snipe
//! extension. After bidding closes the seller keeps a grace period in
//! which they may still accept a linked bid.

use bazaar_core::Timestamp;

use crate::registry::AuctionSlot;

/// A bid landing within this many seconds of the end extends the auction
/// by the same span.
pub const AUCTION_EXTENSION_WINDOW: Timestamp = 600;

/// After bidding ends the seller may accept a bid for this long.
pub const AUCTION_ACCEPT_GRACE: Timestamp = 172_800;

/// Whether new bids are accepted against the slot at `now`
pub fn is_bidding_open(slot: &AuctionSlot, now: Timestamp) -> bool {
    now <= slot.end_time
}

/// Record a bid against the slot, extending the end time when the bid
/// lands inside the anti-snipe window. Returns true when an extension
/// was applied.
pub fn register_bid(slot: &mut AuctionSlot, now: Timestamp) -> bool {
    slot.offer_count += 1;
    if slot.end_time.saturating_sub(now) < AUCTION_EXTENSION_WINDOW {
        slot.end_time += AUCTION_EXTENSION_WINDOW;
        true
    } else {
        false
    }
}

/// Whether the seller may still accept a bid after the auction ended
pub fn can_accept(end_time: Timestamp, now: Timestamp) -> bool {
    now < end_time + AUCTION_ACCEPT_GRACE
}
