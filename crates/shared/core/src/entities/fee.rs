use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::values::{Address, Amount, TokenId};

/// Fee ratio as an independent numerator/denominator pair.
///
/// Ratios are applied with floor division and are never combined: each
/// recipient's cut is computed from the full payment amount. No cross-ratio
/// sum bound is enforced, matching the original permissive behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRatio {
    pub numerator: u128,
    pub denominator: u128,
}

impl FeeRatio {
    pub const ZERO: FeeRatio = FeeRatio {
        numerator: 0,
        denominator: 1,
    };

    pub fn new(numerator: u128, denominator: u128) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Apply this ratio to a payment amount.
    /// A zero denominator behaves as a zero ratio.
    pub fn apply(&self, amount: Amount) -> Amount {
        if self.denominator == 0 {
            return 0;
        }
        amount * self.numerator / self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0 || self.denominator == 0
    }
}

impl Default for FeeRatio {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Per-recipient amounts for one trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    /// Cut for the broker on the fulfilling side
    pub fulfill_broker: Amount,
    /// Cut for the broker on the listing side
    pub listing_broker: Amount,
    /// Platform cut
    pub platform: Amount,
    /// Creator royalty
    pub creator: Amount,
    /// Remainder to the seller after all cuts, saturating at zero
    pub seller_net: Amount,
}

impl FeeSplit {
    /// Total amount routed away from the seller
    pub fn total_fees(&self) -> Amount {
        self.fulfill_broker + self.listing_broker + self.platform + self.creator
    }
}

/// Process-wide fee configuration.
///
/// Brokers self-register their ratio; the platform ratio is set by an
/// administrator; royalties resolve by precedence: per-asset override, then
/// per-collection override, then the process-wide default, then zero.
#[derive(Debug, Clone, Default)]
pub struct FeeConfig {
    /// Self-registered broker ratios (zero if never registered)
    broker_ratios: HashMap<Address, FeeRatio>,

    /// Platform-wide ratio set by an administrator
    platform_ratio: FeeRatio,

    /// Fallback royalty when no override exists
    default_royalty: FeeRatio,

    /// Per-collection royalty overrides
    collection_royalties: HashMap<Address, FeeRatio>,

    /// Per-asset royalty overrides
    asset_royalties: HashMap<(Address, TokenId), FeeRatio>,
}

impl FeeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a broker's fee ratio
    pub fn register_broker(&mut self, broker: Address, ratio: FeeRatio) {
        self.broker_ratios.insert(broker, ratio);
    }

    /// Broker ratio, zero if the broker never registered
    pub fn broker_ratio(&self, broker: &Address) -> FeeRatio {
        self.broker_ratios
            .get(broker)
            .copied()
            .unwrap_or(FeeRatio::ZERO)
    }

    pub fn set_platform_ratio(&mut self, ratio: FeeRatio) {
        self.platform_ratio = ratio;
    }

    pub fn platform_ratio(&self) -> FeeRatio {
        self.platform_ratio
    }

    pub fn set_default_royalty(&mut self, ratio: FeeRatio) {
        self.default_royalty = ratio;
    }

    pub fn set_collection_royalty(&mut self, collection: Address, ratio: FeeRatio) {
        self.collection_royalties.insert(collection, ratio);
    }

    pub fn set_asset_royalty(&mut self, collection: Address, token_id: TokenId, ratio: FeeRatio) {
        self.asset_royalties.insert((collection, token_id), ratio);
    }

    /// Resolve the royalty ratio for an asset by precedence
    pub fn royalty_for(&self, collection: &Address, token_id: Option<TokenId>) -> FeeRatio {
        if let Some(token_id) = token_id {
            if let Some(ratio) = self.asset_royalties.get(&(collection.clone(), token_id)) {
                return *ratio;
            }
        }
        self.collection_royalties
            .get(collection)
            .copied()
            .unwrap_or(self.default_royalty)
    }

    /// Compute the fee split for a trade.
    ///
    /// Pure over the configured ratios: each recipient's amount is
    /// `payment × numerator ÷ denominator`, computed independently with no
    /// shared remainder tracking.
    pub fn split(
        &self,
        fulfill_broker: &Address,
        listing_broker: &Address,
        collection: &Address,
        token_id: Option<TokenId>,
        amount: Amount,
    ) -> FeeSplit {
        let fulfill = self.broker_ratio(fulfill_broker).apply(amount);
        let listing = self.broker_ratio(listing_broker).apply(amount);
        let platform = self.platform_ratio.apply(amount);
        let creator = self.royalty_for(collection, token_id).apply(amount);

        FeeSplit {
            fulfill_broker: fulfill,
            listing_broker: listing,
            platform,
            creator,
            seller_net: amount.saturating_sub(fulfill + listing + platform + creator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FeeConfig {
        let mut config = FeeConfig::new();
        config.register_broker(Address::new("0xfulfill"), FeeRatio::new(10, 100));
        config.register_broker(Address::new("0xlisting"), FeeRatio::new(5, 100));
        config.set_platform_ratio(FeeRatio::new(1, 100));
        config.set_default_royalty(FeeRatio::new(2, 100));
        config
    }

    #[test]
    fn split_with_default_royalty() {
        let split = config().split(
            &Address::new("0xfulfill"),
            &Address::new("0xlisting"),
            &Address::new("0xcats"),
            Some(1),
            10_000_000,
        );

        assert_eq!(split.fulfill_broker, 1_000_000);
        assert_eq!(split.listing_broker, 500_000);
        assert_eq!(split.platform, 100_000);
        assert_eq!(split.creator, 200_000);
        assert_eq!(split.seller_net, 8_200_000);
    }

    #[test]
    fn collection_override_changes_only_creator_cut() {
        let mut config = config();
        config.set_collection_royalty(Address::new("0xcats"), FeeRatio::new(3, 100));

        let split = config.split(
            &Address::new("0xfulfill"),
            &Address::new("0xlisting"),
            &Address::new("0xcats"),
            Some(1),
            10_000_000,
        );

        assert_eq!(split.fulfill_broker, 1_000_000);
        assert_eq!(split.listing_broker, 500_000);
        assert_eq!(split.platform, 100_000);
        assert_eq!(split.creator, 300_000);
    }

    #[test]
    fn asset_override_takes_precedence_over_collection() {
        let mut config = config();
        config.set_collection_royalty(Address::new("0xcats"), FeeRatio::new(3, 100));
        config.set_asset_royalty(Address::new("0xcats"), 7, FeeRatio::new(4, 100));

        let collection = Address::new("0xcats");
        assert_eq!(config.royalty_for(&collection, Some(7)), FeeRatio::new(4, 100));
        assert_eq!(config.royalty_for(&collection, Some(8)), FeeRatio::new(3, 100));
        assert_eq!(config.royalty_for(&collection, None), FeeRatio::new(3, 100));
        assert_eq!(
            config.royalty_for(&Address::new("0xdogs"), Some(7)),
            FeeRatio::new(2, 100)
        );
    }

    #[test]
    fn unregistered_broker_pays_nothing() {
        let split = config().split(
            &Address::new("0xunknown"),
            &Address::new("0xlisting"),
            &Address::new("0xcats"),
            None,
            10_000_000,
        );
        assert_eq!(split.fulfill_broker, 0);
        assert_eq!(split.listing_broker, 500_000);
    }

    #[test]
    fn fee_ratios_may_exceed_payment() {
        // Ratios are not jointly bounded; the seller net saturates at zero
        let mut config = FeeConfig::new();
        config.register_broker(Address::new("0xa"), FeeRatio::new(60, 100));
        config.register_broker(Address::new("0xb"), FeeRatio::new(60, 100));

        let split = config.split(
            &Address::new("0xa"),
            &Address::new("0xb"),
            &Address::new("0xcats"),
            None,
            1_000,
        );

        assert_eq!(split.total_fees(), 1_200);
        assert_eq!(split.seller_net, 0);
    }

    #[test]
    fn zero_denominator_behaves_as_zero_ratio() {
        assert_eq!(FeeRatio::new(5, 0).apply(1_000), 0);
        assert!(FeeRatio::new(5, 0).is_zero());
        assert_eq!(FeeRatio::ZERO.apply(1_000), 0);
    }
}
