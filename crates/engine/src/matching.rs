//! Pairwise matching for fungible limit orders.
//!
//! The matcher never scans a book: the caller names both orders and the
//! functions here decide whether the pair is well formed and how much of
//! each side fills. Matching requires exact price equality; partial fills
//! leave the larger side open with its remaining quantity.

use bazaar_core::{Address, OrderContent, OrderHash, Quantity, Route};

use crate::error::{Error, Result};
use crate::registry::BookEntry;

/// Validated buy/sell orientation of a fungible pair
#[derive(Debug, Clone)]
pub struct ClassifiedPair {
    pub buy_hash: OrderHash,
    pub sell_hash: OrderHash,
    pub buyer: Address,
    pub seller: Address,
}

/// Which side(s) a match exhausts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilledSide {
    Buy,
    Sell,
    Both,
}

/// Result of matching two resting limit orders
#[derive(Debug, Clone, Copy)]
pub struct LimitOutcome {
    /// Agreed normalized unit price
    pub price: u128,
    /// Units traded
    pub quantity: Quantity,
    pub filled: FilledSide,
}

/// Orient a fungible pair as (buy, sell) and check that both orders trade
/// the same instrument.
pub fn classify_pair(
    hash: OrderHash,
    content: &OrderContent,
    related_hash: OrderHash,
    related: &OrderContent,
) -> Result<ClassifiedPair> {
    if related.route != content.route.fungible_opposite().ok_or(Error::InvalidRoute)? {
        return Err(Error::InvalidRoute);
    }
    if content.collection != related.collection
        || content.currency != related.currency
        || content.chain_id != related.chain_id
    {
        return Err(Error::AssetMismatch);
    }

    let (buy_hash, sell_hash, buyer, seller) = match content.route {
        Route::FungibleBuy => (
            hash,
            related_hash,
            content.offerer.clone(),
            related.offerer.clone(),
        ),
        Route::FungibleSell => (
            related_hash,
            hash,
            related.offerer.clone(),
            content.offerer.clone(),
        ),
        _ => return Err(Error::InvalidRoute),
    };

    Ok(ClassifiedPair {
        buy_hash,
        sell_hash,
        buyer,
        seller,
    })
}

/// Match two book entries at an exactly equal price.
pub fn match_limit_pair(buy: &BookEntry, sell: &BookEntry) -> Result<LimitOutcome> {
    if buy.price != sell.price {
        return Err(Error::PriceMismatch {
            buy: buy.price,
            sell: sell.price,
        });
    }

    let quantity = buy.remaining.min(sell.remaining);
    let filled = match buy.remaining.cmp(&sell.remaining) {
        std::cmp::Ordering::Less => FilledSide::Buy,
        std::cmp::Ordering::Greater => FilledSide::Sell,
        std::cmp::Ordering::Equal => FilledSide::Both,
    };

    Ok(LimitOutcome {
        price: buy.price,
        quantity,
        filled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::compute_order_hash;

    fn limit(route: Route, offerer: &str, quantity: Quantity) -> OrderContent {
        OrderContent {
            offerer: Address::new(offerer),
            collection: Address::new("0xgold"),
            token_id: None,
            quantity,
            start_amount: 1_000,
            end_amount: 1_000,
            currency: Address::new("0xusd"),
            chain_id: 1,
            broker: Address::new("0xbroker"),
            start_time: 0,
            end_time: 10_000,
            route,
            version: 1,
        }
    }

    #[test]
    fn pair_orients_buy_and_sell() {
        let buy = limit(Route::FungibleBuy, "0xbuyer", 10);
        let sell = limit(Route::FungibleSell, "0xseller", 10);
        let buy_hash = compute_order_hash(&buy);
        let sell_hash = compute_order_hash(&sell);

        let pair = classify_pair(buy_hash, &buy, sell_hash, &sell).unwrap();
        assert_eq!(pair.buy_hash, buy_hash);
        assert_eq!(pair.sell_hash, sell_hash);
        assert_eq!(pair.buyer, Address::new("0xbuyer"));
        assert_eq!(pair.seller, Address::new("0xseller"));

        // Orientation is symmetric in the request direction
        let pair = classify_pair(sell_hash, &sell, buy_hash, &buy).unwrap();
        assert_eq!(pair.buy_hash, buy_hash);
        assert_eq!(pair.seller, Address::new("0xseller"));
    }

    #[test]
    fn same_side_pair_is_rejected() {
        let a = limit(Route::FungibleBuy, "0xbuyer", 10);
        let b = limit(Route::FungibleBuy, "0xother", 10);
        let result = classify_pair(compute_order_hash(&a), &a, compute_order_hash(&b), &b);
        assert_eq!(result.unwrap_err(), Error::InvalidRoute);
    }

    #[test]
    fn cross_instrument_pair_is_rejected() {
        let buy = limit(Route::FungibleBuy, "0xbuyer", 10);
        let mut sell = limit(Route::FungibleSell, "0xseller", 10);
        sell.currency = Address::new("0xeur");
        let result = classify_pair(
            compute_order_hash(&buy),
            &buy,
            compute_order_hash(&sell),
            &sell,
        );
        assert_eq!(result.unwrap_err(), Error::AssetMismatch);
    }

    #[test]
    fn equal_quantities_fill_both_sides() {
        let outcome = match_limit_pair(
            &BookEntry {
                price: 500,
                remaining: 6,
            },
            &BookEntry {
                price: 500,
                remaining: 6,
            },
        )
        .unwrap();
        assert_eq!(outcome.quantity, 6);
        assert_eq!(outcome.filled, FilledSide::Both);
    }

    #[test]
    fn smaller_side_fills_first() {
        let outcome = match_limit_pair(
            &BookEntry {
                price: 500,
                remaining: 10,
            },
            &BookEntry {
                price: 500,
                remaining: 6,
            },
        )
        .unwrap();
        assert_eq!(outcome.quantity, 6);
        assert_eq!(outcome.filled, FilledSide::Sell);
    }

    #[test]
    fn unequal_prices_never_match() {
        let result = match_limit_pair(
            &BookEntry {
                price: 501,
                remaining: 10,
            },
            &BookEntry {
                price: 500,
                remaining: 10,
            },
        );
        assert_eq!(
            result.unwrap_err(),
            Error::PriceMismatch {
                buy: 501,
                sell: 500
            }
        );
    }
}
