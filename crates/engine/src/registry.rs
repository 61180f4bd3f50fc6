//! In-engine index of live market state.
//!
//! The registry tracks which order currently occupies each asset (listing
//! or auction), which offers are linked to which auction, and the open
//! fungible book entries. It holds hashes and derived numbers only; order
//! content lives in the injected store.

use std::collections::HashMap;

use bazaar_core::{AssetHash, OrderHash, Quantity, Route, Timestamp};

/// Live auction state for one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionSlot {
    pub order_hash: OrderHash,
    /// Authoritative end time, carries anti-snipe extensions
    pub end_time: Timestamp,
    pub offer_count: u64,
}

/// Open fungible limit order resting in the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookEntry {
    /// Normalized unit price
    pub price: u128,
    pub remaining: Quantity,
}

#[derive(Debug, Default)]
pub struct Registry {
    listings: HashMap<AssetHash, OrderHash>,
    auctions: HashMap<AssetHash, AuctionSlot>,
    /// offer hash -> auction order hash
    auction_bids: HashMap<OrderHash, OrderHash>,
    buy_book: HashMap<OrderHash, BookEntry>,
    sell_book: HashMap<OrderHash, BookEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // Listing pointers

    pub fn listing(&self, asset: &AssetHash) -> Option<OrderHash> {
        self.listings.get(asset).copied()
    }

    pub fn set_listing(&mut self, asset: AssetHash, order_hash: OrderHash) {
        self.listings.insert(asset, order_hash);
    }

    /// Remove the listing pointer only if it still points at `order_hash`
    pub fn clear_listing(&mut self, asset: &AssetHash, order_hash: OrderHash) {
        if self.listings.get(asset) == Some(&order_hash) {
            self.listings.remove(asset);
        }
    }

    pub fn clear_listing_for_asset(&mut self, asset: &AssetHash) -> Option<OrderHash> {
        self.listings.remove(asset)
    }

    // Auction slots

    pub fn auction(&self, asset: &AssetHash) -> Option<&AuctionSlot> {
        self.auctions.get(asset)
    }

    pub fn auction_mut(&mut self, asset: &AssetHash) -> Option<&mut AuctionSlot> {
        self.auctions.get_mut(asset)
    }

    pub fn set_auction(&mut self, asset: AssetHash, slot: AuctionSlot) {
        self.auctions.insert(asset, slot);
    }

    /// Remove the auction slot only if it still belongs to `order_hash`
    pub fn clear_auction(&mut self, asset: &AssetHash, order_hash: OrderHash) {
        if self.auctions.get(asset).map(|s| s.order_hash) == Some(order_hash) {
            self.auctions.remove(asset);
        }
    }

    // Offer-to-auction links

    pub fn link_bid(&mut self, offer_hash: OrderHash, auction_hash: OrderHash) {
        self.auction_bids.insert(offer_hash, auction_hash);
    }

    pub fn linked_auction(&self, offer_hash: &OrderHash) -> Option<OrderHash> {
        self.auction_bids.get(offer_hash).copied()
    }

    pub fn unlink_bid(&mut self, offer_hash: &OrderHash) {
        self.auction_bids.remove(offer_hash);
    }

    /// Drop every bid link that points at `auction_hash`
    pub fn unlink_bids_for(&mut self, auction_hash: OrderHash) {
        self.auction_bids.retain(|_, target| *target != auction_hash);
    }

    // Fungible book entries

    pub fn insert_book_entry(&mut self, route: Route, order_hash: OrderHash, entry: BookEntry) {
        match route {
            Route::FungibleBuy => self.buy_book.insert(order_hash, entry),
            Route::FungibleSell => self.sell_book.insert(order_hash, entry),
            _ => None,
        };
    }

    pub fn book_entry(&self, route: Route, order_hash: &OrderHash) -> Option<BookEntry> {
        match route {
            Route::FungibleBuy => self.buy_book.get(order_hash).copied(),
            Route::FungibleSell => self.sell_book.get(order_hash).copied(),
            _ => None,
        }
    }

    pub fn remove_book_entry(&mut self, route: Route, order_hash: &OrderHash) -> Option<BookEntry> {
        match route {
            Route::FungibleBuy => self.buy_book.remove(order_hash),
            Route::FungibleSell => self.sell_book.remove(order_hash),
            _ => None,
        }
    }

    /// Reduce the remaining quantity of an entry after a partial fill
    pub fn decrement_book_entry(
        &mut self,
        route: Route,
        order_hash: &OrderHash,
        filled: Quantity,
    ) {
        let book = match route {
            Route::FungibleBuy => &mut self.buy_book,
            Route::FungibleSell => &mut self.sell_book,
            _ => return,
        };
        if let Some(entry) = book.get_mut(order_hash) {
            entry.remaining = entry.remaining.saturating_sub(filled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(byte: u8) -> OrderHash {
        OrderHash::from_bytes([byte; 32])
    }

    fn asset(byte: u8) -> AssetHash {
        AssetHash::from_bytes([byte; 32])
    }

    #[test]
    fn listing_clear_is_hash_guarded() {
        let mut reg = Registry::new();
        let a = asset(1);
        reg.set_listing(a, hash(1));

        // A stale clear for a different order leaves the pointer alone
        reg.clear_listing(&a, hash(2));
        assert_eq!(reg.listing(&a), Some(hash(1)));

        reg.clear_listing(&a, hash(1));
        assert_eq!(reg.listing(&a), None);
    }

    #[test]
    fn auction_clear_is_hash_guarded() {
        let mut reg = Registry::new();
        let a = asset(1);
        reg.set_auction(
            a,
            AuctionSlot {
                order_hash: hash(1),
                end_time: 500,
                offer_count: 0,
            },
        );

        reg.clear_auction(&a, hash(9));
        assert!(reg.auction(&a).is_some());

        reg.clear_auction(&a, hash(1));
        assert!(reg.auction(&a).is_none());
    }

    #[test]
    fn bid_links_unwind_per_auction() {
        let mut reg = Registry::new();
        reg.link_bid(hash(10), hash(1));
        reg.link_bid(hash(11), hash(1));
        reg.link_bid(hash(12), hash(2));

        reg.unlink_bids_for(hash(1));
        assert_eq!(reg.linked_auction(&hash(10)), None);
        assert_eq!(reg.linked_auction(&hash(11)), None);
        assert_eq!(reg.linked_auction(&hash(12)), Some(hash(2)));
    }

    #[test]
    fn book_entries_are_keyed_by_side() {
        let mut reg = Registry::new();
        let entry = BookEntry {
            price: 100,
            remaining: 10,
        };
        reg.insert_book_entry(Route::FungibleBuy, hash(1), entry);

        assert_eq!(reg.book_entry(Route::FungibleBuy, &hash(1)), Some(entry));
        assert_eq!(reg.book_entry(Route::FungibleSell, &hash(1)), None);

        reg.decrement_book_entry(Route::FungibleBuy, &hash(1), 6);
        assert_eq!(
            reg.book_entry(Route::FungibleBuy, &hash(1)).map(|e| e.remaining),
            Some(4)
        );

        reg.remove_book_entry(Route::FungibleBuy, &hash(1));
        assert_eq!(reg.book_entry(Route::FungibleBuy, &hash(1)), None);
    }
}
