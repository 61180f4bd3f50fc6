use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fee::FeeSplit;
use crate::values::{Address, Amount, ChainId, OrderHash, Quantity, TokenId};

/// Instruction for the external settlement collaborator.
///
/// The engine only matches; moving the asset and the payment is someone
/// else's job. Exactly one instruction is produced per fulfillment, partial
/// fills included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementInstruction {
    pub id: Uuid,
    /// Order the fulfillment was requested against
    pub order_hash: OrderHash,
    /// Counterpart order, when the match involved one
    pub related_order_hash: Option<OrderHash>,
    pub collection: Address,
    /// Absent for fungible settlements
    pub token_id: Option<TokenId>,
    pub quantity: Quantity,
    /// Current asset holder
    pub asset_from: Address,
    /// Asset recipient
    pub asset_to: Address,
    /// Payment debtor
    pub payment_from: Address,
    /// Payment recipient
    pub payment_to: Address,
    pub amount: Amount,
    pub currency: Address,
    pub chain_id: ChainId,
    /// Fee amounts carved out of `amount`
    pub fees: FeeSplit,
}

impl SettlementInstruction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_hash: OrderHash,
        related_order_hash: Option<OrderHash>,
        collection: Address,
        token_id: Option<TokenId>,
        quantity: Quantity,
        asset_from: Address,
        asset_to: Address,
        payment_from: Address,
        payment_to: Address,
        amount: Amount,
        currency: Address,
        chain_id: ChainId,
        fees: FeeSplit,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_hash,
            related_order_hash,
            collection,
            token_id,
            quantity,
            asset_from,
            asset_to,
            payment_from,
            payment_to,
            amount,
            currency,
            chain_id,
            fees,
        }
    }
}
