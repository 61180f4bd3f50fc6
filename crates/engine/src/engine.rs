//! Marketplace orchestrator.
//!
//! `Marketplace` owns the registry, the fee configuration and the event
//! buffer, and drives every lifecycle operation against the injected
//! store, clock and hooks. Operations are atomic: every precondition is
//! checked before the first mutation, and the clock is read once per
//! call so all checks within an operation agree on the time.

use bazaar_core::{
    compute_asset_hash, compute_order_hash, Address, Amount, AssetHash, FeeConfig, FeeRatio,
    FeeSplit, OrderContent, OrderHash, OrderStatus, OrderType, Route, SettlementInstruction,
    Timestamp, TokenId, PRICE_PRECISION,
};
use bazaar_ports::{Clock, LifecycleHooks, NoopHooks, OrderStore};

use crate::auction;
use crate::error::{Error, Result};
use crate::events::MarketEvent;
use crate::matching::{self, FilledSide};
use crate::registry::{AuctionSlot, BookEntry, Registry};
use crate::validation;

/// Request to cancel an open order
#[derive(Debug, Clone)]
pub struct CancelRequest {
    pub order_hash: OrderHash,
    pub canceller: Address,
}

/// Request to fulfill an open order
#[derive(Debug, Clone)]
pub struct FulfillRequest {
    pub order_hash: OrderHash,
    pub fulfiller: Address,
    /// Broker credited with the fulfilling-side fee
    pub fulfill_broker: Address,
    /// Asset chosen by the fulfiller; required for collection offers
    pub token_id: Option<TokenId>,
    /// Counterpart order; required for auctions and limit orders
    pub related_order_hash: Option<OrderHash>,
}

/// The marketplace engine.
///
/// Single-threaded by design: the embedding application serializes calls
/// and the `&mut self` receivers enforce it at compile time.
pub struct Marketplace<S, C, H = NoopHooks> {
    store: S,
    clock: C,
    hooks: H,
    registry: Registry,
    fees: FeeConfig,
    events: Vec<MarketEvent>,
}

impl<S: OrderStore, C: Clock> Marketplace<S, C, NoopHooks> {
    pub fn new(store: S, clock: C) -> Self {
        Self::with_hooks(store, clock, NoopHooks)
    }
}

impl<S: OrderStore, C: Clock, H: LifecycleHooks> Marketplace<S, C, H> {
    pub fn with_hooks(store: S, clock: C, hooks: H) -> Self {
        Self {
            store,
            clock,
            hooks,
            registry: Registry::new(),
            fees: FeeConfig::new(),
            events: Vec::new(),
        }
    }

    // Lifecycle operations

    /// Validate, classify and register a new order.
    ///
    /// Returns the deterministic content hash under which the order was
    /// stored. Placing a listing or auction over an asset whose open
    /// occupant belongs to another order supersedes that occupant.
    pub fn create_order(&mut self, content: OrderContent) -> Result<OrderHash> {
        self.hooks.before_create(&content)?;
        let now = self.clock.now();
        let hash = compute_order_hash(&content);

        validation::validate_common_data(&content, hash, now)?;
        let order_type = validation::validate_order_type(&content)?;

        // Any recorded status means this exact content was seen before
        if let Some(status) = self.store.status(&hash) {
            return Err(match status {
                OrderStatus::Fulfilled | OrderStatus::Executed => {
                    Error::OrderAlreadyFulfilled(hash)
                }
                _ => Error::OrderAlreadyExists(hash),
            });
        }

        let superseded = match order_type {
            OrderType::Listing => {
                let asset = content.asset_hash();
                let prior = self.supersede_occupant(&asset, &content, now)?;
                self.registry.set_listing(asset, hash);
                prior
            }
            OrderType::Auction => {
                let asset = content.asset_hash();
                let prior = self.supersede_occupant(&asset, &content, now)?;
                self.registry.set_auction(
                    asset,
                    AuctionSlot {
                        order_hash: hash,
                        end_time: content.end_time,
                        offer_count: 0,
                    },
                );
                prior
            }
            OrderType::Offer => {
                let asset = content.asset_hash();
                let auction_hash = match self.registry.auction_mut(&asset) {
                    Some(slot) if auction::is_bidding_open(slot, now) => {
                        let extended = auction::register_bid(slot, now);
                        if extended {
                            log::debug!(
                                "auction {} extended to {} by late bid",
                                slot.order_hash,
                                slot.end_time
                            );
                        }
                        Some(slot.order_hash)
                    }
                    _ => None,
                };
                if let Some(auction_hash) = auction_hash {
                    self.registry.link_bid(hash, auction_hash);
                }
                None
            }
            OrderType::CollectionOffer => None,
            OrderType::LimitBuy | OrderType::LimitSell => {
                let price = content.normalized_price().ok_or_else(|| {
                    Error::InvalidOrderData("limit order has no unit price".into())
                })?;
                self.registry.insert_book_entry(
                    content.route,
                    hash,
                    BookEntry {
                        price,
                        remaining: content.quantity,
                    },
                );
                None
            }
        };

        let offerer = content.offerer.clone();
        self.store.put_content(hash, content);
        self.store.put_status(hash, OrderStatus::Open);
        self.store.put_order_type(hash, order_type);

        log::info!("order {hash} placed ({order_type:?}) by {offerer}");
        self.events
            .push(MarketEvent::placed(hash, order_type, offerer, superseded));
        self.hooks.after_create(&hash)?;
        Ok(hash)
    }

    /// Cancel an open order on behalf of its offerer.
    pub fn cancel_order(&mut self, request: &CancelRequest) -> Result<()> {
        let hash = request.order_hash;
        self.hooks.before_cancel(&hash)?;
        let now = self.clock.now();

        let content = self.store.content(&hash).ok_or(Error::OrderNotFound(hash))?;
        let computed = compute_order_hash(&content);
        if computed != hash {
            return Err(Error::HashMismatch {
                supplied: hash,
                computed,
            });
        }
        let status = self.store.status(&hash).ok_or(Error::OrderNotFound(hash))?;
        if !status.is_open() {
            return Err(Error::OrderNotOpen { hash, status });
        }
        if content.offerer != request.canceller {
            return Err(Error::NotOfferer(hash));
        }
        let order_type = self
            .store
            .order_type(&hash)
            .ok_or(Error::OrderNotFound(hash))?;

        match order_type {
            OrderType::Listing => {
                if content.is_expired(now) {
                    return Err(Error::OrderExpired(hash));
                }
                let asset = content.asset_hash();
                self.registry.clear_listing(&asset, hash);
            }
            OrderType::Auction => {
                let asset = content.asset_hash();
                // The slot carries anti-snipe extensions; fall back to the
                // content end time if the slot was already displaced
                let end = self
                    .registry
                    .auction(&asset)
                    .filter(|slot| slot.order_hash == hash)
                    .map(|slot| slot.end_time)
                    .unwrap_or(content.end_time);
                if now > end {
                    return Err(Error::OrderExpired(hash));
                }
                self.registry.clear_auction(&asset, hash);
                self.registry.unlink_bids_for(hash);
            }
            OrderType::Offer | OrderType::CollectionOffer => {
                if content.is_expired(now) {
                    return Err(Error::OrderExpired(hash));
                }
                self.registry.unlink_bid(&hash);
            }
            OrderType::LimitBuy | OrderType::LimitSell => {
                self.registry.remove_book_entry(content.route, &hash);
            }
        }

        self.store.put_status(hash, OrderStatus::CancelledUser);

        log::info!("order {hash} cancelled by {}", request.canceller);
        self.events.push(MarketEvent::cancelled(
            hash,
            order_type,
            content.offerer.clone(),
        ));
        self.hooks.after_cancel(&hash)?;
        Ok(())
    }

    /// Fulfill an open order, producing exactly one settlement instruction.
    pub fn fulfill_order(&mut self, request: &FulfillRequest) -> Result<SettlementInstruction> {
        let hash = request.order_hash;
        self.hooks.before_fulfill(&hash)?;
        let now = self.clock.now();

        let content = self.store.content(&hash).ok_or(Error::OrderNotFound(hash))?;
        let status = self.store.status(&hash).ok_or(Error::OrderNotFound(hash))?;
        if !status.is_open() {
            return Err(Error::OrderNotOpen { hash, status });
        }
        let order_type = self
            .store
            .order_type(&hash)
            .ok_or(Error::OrderNotFound(hash))?;

        let instruction = match order_type {
            OrderType::Listing => self.fulfill_listing(now, hash, &content, request)?,
            OrderType::Auction => self.fulfill_auction(now, hash, &content, request)?,
            OrderType::Offer | OrderType::CollectionOffer => {
                self.fulfill_offer(now, hash, &content, order_type, request)?
            }
            OrderType::LimitBuy | OrderType::LimitSell => {
                self.fulfill_limit(now, hash, &content, request)?
            }
        };

        log::info!(
            "order {hash} fulfilled by {} for {}",
            request.fulfiller,
            instruction.amount
        );
        self.events.push(MarketEvent::fulfilled(
            hash,
            instruction.related_order_hash,
            request.fulfiller.clone(),
        ));
        self.hooks.after_fulfill(&hash)?;
        Ok(instruction)
    }

    /// Confirm external settlement of a fulfilled order.
    pub fn validate_order_execution(&mut self, hash: OrderHash) -> Result<()> {
        self.hooks.before_validate_execution(&hash)?;

        let status = self.store.status(&hash).ok_or(Error::OrderNotFound(hash))?;
        if status != OrderStatus::Fulfilled {
            return Err(Error::OrderNotFulfilled { hash, status });
        }

        self.store.put_status(hash, OrderStatus::Executed);

        log::info!("order {hash} executed");
        self.events.push(MarketEvent::executed(hash));
        self.hooks.after_validate_execution(&hash)?;
        Ok(())
    }

    // Fulfillment branches

    fn fulfill_listing(
        &mut self,
        now: Timestamp,
        hash: OrderHash,
        content: &OrderContent,
        request: &FulfillRequest,
    ) -> Result<SettlementInstruction> {
        if request.fulfiller == content.offerer {
            return Err(Error::SameOfferer(hash));
        }
        if content.is_expired(now) {
            return Err(Error::OrderExpired(hash));
        }

        let amount = content.start_amount;
        let fees = self.split_fees(&request.fulfill_broker, content, content.token_id, amount);

        // The listing pointer is left in place: the asset now belongs to
        // the buyer and a stale re-listing by the seller must keep failing
        // until the pointer is displaced by the new owner
        self.store.put_status(hash, OrderStatus::Fulfilled);

        Ok(SettlementInstruction::new(
            hash,
            None,
            content.collection.clone(),
            content.token_id,
            1,
            content.offerer.clone(),
            request.fulfiller.clone(),
            request.fulfiller.clone(),
            content.offerer.clone(),
            amount,
            content.currency.clone(),
            content.chain_id,
            fees,
        ))
    }

    fn fulfill_auction(
        &mut self,
        now: Timestamp,
        hash: OrderHash,
        content: &OrderContent,
        request: &FulfillRequest,
    ) -> Result<SettlementInstruction> {
        // Only the seller accepts a bid
        if request.fulfiller != content.offerer {
            return Err(Error::NotOfferer(hash));
        }

        let asset = content.asset_hash();
        let end = self
            .registry
            .auction(&asset)
            .filter(|slot| slot.order_hash == hash)
            .map(|slot| slot.end_time)
            .unwrap_or(content.end_time);
        if !auction::can_accept(end, now) {
            return Err(Error::OrderExpired(hash));
        }

        let related_hash = request.related_order_hash.ok_or(Error::MissingRelatedOrder)?;
        let related = self
            .store
            .content(&related_hash)
            .ok_or(Error::OrderNotFound(related_hash))?;
        let related_type = self
            .store
            .order_type(&related_hash)
            .ok_or(Error::OrderNotFound(related_hash))?;
        if !related_type.is_offer() {
            return Err(Error::WrongRelatedOrderType(related_type));
        }
        let related_status = self
            .store
            .status(&related_hash)
            .ok_or(Error::OrderNotFound(related_hash))?;
        if !related_status.is_open() {
            return Err(Error::OrderNotOpen {
                hash: related_hash,
                status: related_status,
            });
        }
        if related.collection != content.collection
            || related.currency != content.currency
            || related.chain_id != content.chain_id
        {
            return Err(Error::AssetMismatch);
        }
        if let (Some(expected), Some(supplied)) = (content.token_id, related.token_id) {
            if expected != supplied {
                return Err(Error::TokenIdMismatch { expected, supplied });
            }
        }

        // Bids registered against this auction outlive their own end time:
        // anti-snipe extensions and the acceptance grace may run past it
        let linked = self.registry.linked_auction(&related_hash) == Some(hash);
        if !linked && related.is_expired(now) {
            return Err(Error::OrderExpired(related_hash));
        }

        let amount = related.start_amount;
        let fees = self.split_fees(&request.fulfill_broker, content, content.token_id, amount);

        self.store.put_status(hash, OrderStatus::Fulfilled);
        self.store.put_status(related_hash, OrderStatus::Fulfilled);
        self.registry.clear_auction(&asset, hash);
        self.registry.unlink_bids_for(hash);

        Ok(SettlementInstruction::new(
            hash,
            Some(related_hash),
            content.collection.clone(),
            content.token_id,
            1,
            content.offerer.clone(),
            related.offerer.clone(),
            related.offerer.clone(),
            content.offerer.clone(),
            amount,
            content.currency.clone(),
            content.chain_id,
            fees,
        ))
    }

    fn fulfill_offer(
        &mut self,
        now: Timestamp,
        hash: OrderHash,
        content: &OrderContent,
        order_type: OrderType,
        request: &FulfillRequest,
    ) -> Result<SettlementInstruction> {
        if request.fulfiller == content.offerer {
            return Err(Error::SameOfferer(hash));
        }

        let token_id = match order_type {
            OrderType::Offer => {
                let expected = content.token_id.ok_or(Error::MissingTokenId)?;
                if let Some(supplied) = request.token_id {
                    if supplied != expected {
                        return Err(Error::TokenIdMismatch { expected, supplied });
                    }
                }
                expected
            }
            // The fulfiller picks which asset satisfies a collection offer
            _ => request.token_id.ok_or(Error::MissingTokenId)?,
        };

        let asset = compute_asset_hash(&content.collection, Some(token_id));
        if let Some(slot) = self.registry.auction(&asset) {
            if auction::can_accept(slot.end_time, now) {
                return Err(Error::AuctionInProgress(asset));
            }
        }
        if content.is_expired(now) {
            return Err(Error::OrderExpired(hash));
        }

        let amount = content.start_amount;
        let fees = self.split_fees(&request.fulfill_broker, content, Some(token_id), amount);

        self.store.put_status(hash, OrderStatus::Fulfilled);
        self.registry.unlink_bid(&hash);
        // The asset leaves the seller, so any open listing they had on it
        // is displaced
        if let Some(listing_hash) = self.registry.clear_listing_for_asset(&asset) {
            if self.store.status(&listing_hash) == Some(OrderStatus::Open) {
                self.store
                    .put_status(listing_hash, OrderStatus::CancelledByNewOrder);
            }
        }

        Ok(SettlementInstruction::new(
            hash,
            None,
            content.collection.clone(),
            Some(token_id),
            1,
            request.fulfiller.clone(),
            content.offerer.clone(),
            content.offerer.clone(),
            request.fulfiller.clone(),
            amount,
            content.currency.clone(),
            content.chain_id,
            fees,
        ))
    }

    fn fulfill_limit(
        &mut self,
        now: Timestamp,
        hash: OrderHash,
        content: &OrderContent,
        request: &FulfillRequest,
    ) -> Result<SettlementInstruction> {
        if content.is_expired(now) {
            return Err(Error::OrderExpired(hash));
        }

        let related_hash = request.related_order_hash.ok_or(Error::MissingRelatedOrder)?;
        let related = self
            .store
            .content(&related_hash)
            .ok_or(Error::OrderNotFound(related_hash))?;
        let related_type = self
            .store
            .order_type(&related_hash)
            .ok_or(Error::OrderNotFound(related_hash))?;
        if !related_type.is_limit() {
            return Err(Error::WrongRelatedOrderType(related_type));
        }
        let related_status = self
            .store
            .status(&related_hash)
            .ok_or(Error::OrderNotFound(related_hash))?;
        if !related_status.is_open() {
            return Err(Error::OrderNotOpen {
                hash: related_hash,
                status: related_status,
            });
        }
        if related.is_expired(now) {
            return Err(Error::OrderExpired(related_hash));
        }

        let pair = matching::classify_pair(hash, content, related_hash, &related)?;
        let buy_entry = self
            .registry
            .book_entry(Route::FungibleBuy, &pair.buy_hash)
            .ok_or(Error::OrderNotFound(pair.buy_hash))?;
        let sell_entry = self
            .registry
            .book_entry(Route::FungibleSell, &pair.sell_hash)
            .ok_or(Error::OrderNotFound(pair.sell_hash))?;

        let outcome = matching::match_limit_pair(&buy_entry, &sell_entry)?;

        match outcome.filled {
            FilledSide::Both => {
                self.registry
                    .remove_book_entry(Route::FungibleBuy, &pair.buy_hash);
                self.registry
                    .remove_book_entry(Route::FungibleSell, &pair.sell_hash);
                self.store.put_status(pair.buy_hash, OrderStatus::Fulfilled);
                self.store.put_status(pair.sell_hash, OrderStatus::Fulfilled);
            }
            FilledSide::Buy => {
                self.registry
                    .remove_book_entry(Route::FungibleBuy, &pair.buy_hash);
                self.store.put_status(pair.buy_hash, OrderStatus::Fulfilled);
                self.registry.decrement_book_entry(
                    Route::FungibleSell,
                    &pair.sell_hash,
                    outcome.quantity,
                );
            }
            FilledSide::Sell => {
                self.registry
                    .remove_book_entry(Route::FungibleSell, &pair.sell_hash);
                self.store.put_status(pair.sell_hash, OrderStatus::Fulfilled);
                self.registry.decrement_book_entry(
                    Route::FungibleBuy,
                    &pair.buy_hash,
                    outcome.quantity,
                );
            }
        }

        let amount = outcome.price * outcome.quantity as u128 / PRICE_PRECISION;
        let fees = self.split_fees(&request.fulfill_broker, content, None, amount);

        Ok(SettlementInstruction::new(
            hash,
            Some(related_hash),
            content.collection.clone(),
            None,
            outcome.quantity,
            pair.seller.clone(),
            pair.buyer.clone(),
            pair.buyer,
            pair.seller,
            amount,
            content.currency.clone(),
            content.chain_id,
            fees,
        ))
    }

    // Occupancy

    /// Check and displace the current occupant of an asset slot.
    ///
    /// A fulfilled occupant blocks the new order outright; an open occupant
    /// with the same offerer and time left is a duplicate; any other open
    /// occupant is cancelled in favor of the new order.
    fn supersede_occupant(
        &mut self,
        asset: &AssetHash,
        content: &OrderContent,
        now: Timestamp,
    ) -> Result<Option<OrderHash>> {
        let listing_prior = self.registry.listing(asset);
        let auction_prior = self.registry.auction(asset).map(|slot| slot.order_hash);

        // Check both slots before touching either, so a blocked placement
        // leaves no half-applied cancellation behind
        let listing_occ = match listing_prior {
            Some(prior) => Some((prior, self.check_occupant(prior, content, now)?)),
            None => None,
        };
        let auction_occ = match auction_prior {
            Some(prior) => Some((prior, self.check_occupant(prior, content, now)?)),
            None => None,
        };

        let mut superseded = None;

        if let Some((prior, occupancy)) = listing_occ {
            if matches!(occupancy, Occupancy::Supersede) {
                self.store.put_status(prior, OrderStatus::CancelledByNewOrder);
                log::info!("listing {prior} superseded by new order");
                superseded = Some(prior);
            }
            self.registry.clear_listing(asset, prior);
        }

        if let Some((prior, occupancy)) = auction_occ {
            if matches!(occupancy, Occupancy::Supersede) {
                self.store.put_status(prior, OrderStatus::CancelledByNewOrder);
                log::info!("auction {prior} superseded by new order");
                superseded = Some(prior);
            }
            self.registry.clear_auction(asset, prior);
            self.registry.unlink_bids_for(prior);
        }

        Ok(superseded)
    }

    fn check_occupant(
        &self,
        prior: OrderHash,
        content: &OrderContent,
        now: Timestamp,
    ) -> Result<Occupancy> {
        match self.store.status(&prior) {
            Some(OrderStatus::Fulfilled) | Some(OrderStatus::Executed) => {
                Err(Error::OrderAlreadyFulfilled(prior))
            }
            Some(OrderStatus::Open) => {
                let prior_content = self.store.content(&prior);
                let duplicate = prior_content
                    .as_ref()
                    .is_some_and(|c| c.offerer == content.offerer && !c.is_expired(now));
                if duplicate {
                    Err(Error::OrderAlreadyExists(prior))
                } else {
                    Ok(Occupancy::Supersede)
                }
            }
            _ => Ok(Occupancy::Stale),
        }
    }

    fn split_fees(
        &self,
        fulfill_broker: &Address,
        content: &OrderContent,
        token_id: Option<TokenId>,
        amount: Amount,
    ) -> FeeSplit {
        self.fees.split(
            fulfill_broker,
            &content.broker,
            &content.collection,
            token_id,
            amount,
        )
    }

    // Queries

    pub fn get_order(&self, hash: &OrderHash) -> Option<OrderContent> {
        self.store.content(hash)
    }

    pub fn get_order_status(&self, hash: &OrderHash) -> Option<OrderStatus> {
        self.store.status(hash)
    }

    pub fn get_order_type(&self, hash: &OrderHash) -> Option<OrderType> {
        self.store.order_type(hash)
    }

    /// Current occupant (listing or auction) of an asset
    pub fn get_order_hash_for_asset(
        &self,
        collection: &Address,
        token_id: TokenId,
    ) -> Option<OrderHash> {
        let asset = compute_asset_hash(collection, Some(token_id));
        self.registry
            .listing(&asset)
            .or_else(|| self.registry.auction(&asset).map(|slot| slot.order_hash))
    }

    /// Authoritative end time of the asset's auction, extensions included
    pub fn get_auction_expiration(
        &self,
        collection: &Address,
        token_id: TokenId,
    ) -> Option<Timestamp> {
        let asset = compute_asset_hash(collection, Some(token_id));
        self.registry.auction(&asset).map(|slot| slot.end_time)
    }

    // Fee administration

    pub fn register_broker_fee(&mut self, broker: Address, ratio: FeeRatio) {
        self.fees.register_broker(broker, ratio);
    }

    pub fn set_platform_fee(&mut self, ratio: FeeRatio) {
        self.fees.set_platform_ratio(ratio);
    }

    pub fn set_default_royalty(&mut self, ratio: FeeRatio) {
        self.fees.set_default_royalty(ratio);
    }

    pub fn set_collection_royalty(&mut self, collection: Address, ratio: FeeRatio) {
        self.fees.set_collection_royalty(collection, ratio);
    }

    pub fn set_asset_royalty(&mut self, collection: Address, token_id: TokenId, ratio: FeeRatio) {
        self.fees.set_asset_royalty(collection, token_id, ratio);
    }

    pub fn fee_config(&self) -> &FeeConfig {
        &self.fees
    }

    // Events

    /// Take every buffered event, oldest first
    pub fn drain_events(&mut self) -> Vec<MarketEvent> {
        std::mem::take(&mut self.events)
    }
}

enum Occupancy {
    /// Open occupant to cancel in favor of the new order
    Supersede,
    /// Slot points at a cancelled or missing order; overwrite silently
    Stale,
}
