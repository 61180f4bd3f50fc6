//! Structural and temporal order validation.
//!
//! `validate_common_data` guards the fields every order must get right;
//! `validate_order_type` classifies content into one of the six order
//! shapes. Both are pure: they read the clock value handed to them and
//! mutate nothing.

use bazaar_core::{OrderContent, OrderHash, OrderType, Route, Timestamp};

use crate::error::{Error, Result};

/// Validate amounts and the activity window of an order
pub fn validate_common_data(
    content: &OrderContent,
    hash: OrderHash,
    now: Timestamp,
) -> Result<()> {
    if content.quantity == 0 {
        return Err(Error::InvalidOrderData("quantity must be non-zero".into()));
    }
    if content.start_amount == 0 || content.end_amount == 0 {
        return Err(Error::InvalidOrderData("amounts must be non-zero".into()));
    }
    if !content.is_started(now) {
        return Err(Error::OrderNotYetActive(hash));
    }
    if content.is_expired(now) {
        return Err(Error::OrderExpired(hash));
    }
    Ok(())
}

/// Classify order content into an order type.
///
/// Classification is a function of token id presence, route, quantity and
/// the start/end amount relation; a combination matching none of the six
/// shapes is invalid data.
pub fn validate_order_type(content: &OrderContent) -> Result<OrderType> {
    match (content.token_id, content.route) {
        (Some(_), Route::AssetToCurrency) if content.quantity == 1 => {
            if content.end_amount == content.start_amount {
                Ok(OrderType::Listing)
            } else if content.end_amount > content.start_amount {
                Ok(OrderType::Auction)
            } else {
                Err(Error::InvalidOrderData(
                    "sale end amount below start amount".into(),
                ))
            }
        }
        (Some(_), Route::CurrencyToAsset) if content.quantity == 1 => Ok(OrderType::Offer),
        (None, Route::CurrencyToAsset) if content.quantity == 1 => Ok(OrderType::CollectionOffer),
        (None, Route::FungibleBuy) => Ok(OrderType::LimitBuy),
        (None, Route::FungibleSell) => Ok(OrderType::LimitSell),
        _ => Err(Error::InvalidOrderData(
            "token id, route and quantity match no order type".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::{compute_order_hash, Address};

    fn content(
        token_id: Option<u64>,
        route: Route,
        quantity: u64,
        start: u128,
        end: u128,
    ) -> OrderContent {
        OrderContent {
            offerer: Address::new("0xalice"),
            collection: Address::new("0xcats"),
            token_id,
            quantity,
            start_amount: start,
            end_amount: end,
            currency: Address::new("0xusd"),
            chain_id: 1,
            broker: Address::new("0xbroker"),
            start_time: 100,
            end_time: 10_000,
            route,
            version: 1,
        }
    }

    #[test]
    fn classification_covers_all_six_shapes() {
        let cases = [
            (
                content(Some(1), Route::AssetToCurrency, 1, 100, 100),
                OrderType::Listing,
            ),
            (
                content(Some(1), Route::AssetToCurrency, 1, 100, 200),
                OrderType::Auction,
            ),
            (
                content(Some(1), Route::CurrencyToAsset, 1, 100, 100),
                OrderType::Offer,
            ),
            (
                content(None, Route::CurrencyToAsset, 1, 100, 100),
                OrderType::CollectionOffer,
            ),
            (
                content(None, Route::FungibleBuy, 10, 100, 100),
                OrderType::LimitBuy,
            ),
            (
                content(None, Route::FungibleSell, 10, 100, 100),
                OrderType::LimitSell,
            ),
        ];
        for (c, expected) in cases {
            assert_eq!(validate_order_type(&c).unwrap(), expected);
        }
    }

    #[test]
    fn unclassifiable_shapes_are_rejected() {
        // Listing-shaped but with a multi-unit quantity
        let c = content(Some(1), Route::AssetToCurrency, 2, 100, 100);
        assert!(matches!(
            validate_order_type(&c),
            Err(Error::InvalidOrderData(_))
        ));

        // Fungible route with a token id
        let c = content(Some(1), Route::FungibleBuy, 10, 100, 100);
        assert!(matches!(
            validate_order_type(&c),
            Err(Error::InvalidOrderData(_))
        ));

        // Asset sale without a token id
        let c = content(None, Route::AssetToCurrency, 1, 100, 100);
        assert!(matches!(
            validate_order_type(&c),
            Err(Error::InvalidOrderData(_))
        ));

        // Descending amounts match neither listing nor auction
        let c = content(Some(1), Route::AssetToCurrency, 1, 200, 100);
        assert!(matches!(
            validate_order_type(&c),
            Err(Error::InvalidOrderData(_))
        ));
    }

    #[test]
    fn common_data_checks_amounts_and_window() {
        let c = content(Some(1), Route::AssetToCurrency, 1, 100, 100);
        let hash = compute_order_hash(&c);

        assert!(validate_common_data(&c, hash, 100).is_ok());
        assert!(validate_common_data(&c, hash, 9_999).is_ok());

        assert!(matches!(
            validate_common_data(&c, hash, 99),
            Err(Error::OrderNotYetActive(_))
        ));
        assert!(matches!(
            validate_common_data(&c, hash, 10_000),
            Err(Error::OrderExpired(_))
        ));

        let mut zero_qty = c.clone();
        zero_qty.quantity = 0;
        assert!(matches!(
            validate_common_data(&zero_qty, hash, 100),
            Err(Error::InvalidOrderData(_))
        ));

        let mut zero_amount = c.clone();
        zero_amount.start_amount = 0;
        assert!(matches!(
            validate_common_data(&zero_amount, hash, 100),
            Err(Error::InvalidOrderData(_))
        ));
    }
}
