//! Lowering a purchase plan into one atomic mutation batch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CommercialPaper, Cusip, ParticipantId, PurchaseOrder};
use crate::ledger::{Mutation, MutationBatch};
use crate::pricing::cost_of_purchase;

use super::plan::{BuyerPosition, PurchasePlan, SourcedLot};

/// Summary of a settled purchase, returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub batch_id: Uuid,
    pub cusip: Cusip,
    pub buyer: ParticipantId,
    pub quantity: u64,
    /// What the buyer paid, `cost(quantity, par, discount)`
    pub total_cost: Decimal,
    /// Who supplied how much, in sourcing order
    pub sources: Vec<SourcedLot>,
}

/// Build the settlement batch for a planned purchase.
///
/// Per drawn-from seller: the ownership decrement (or removal at zero) and
/// a balance credit of `cost(amount)`; remainder draws credit the issuer.
/// The buyer is debited `cost(quantity)` and its position upserted. The
/// resulting batch is zero-sum over balances, which the engine asserts
/// before applying.
pub fn settlement_batch(
    paper: &CommercialPaper,
    order: &PurchaseOrder,
    plan: &PurchasePlan,
) -> MutationBatch {
    let mut batch = MutationBatch::new();

    for updated in &plan.seller_updates {
        batch.push(Mutation::UpdateOwnership(updated.clone()));
    }
    for key in &plan.seller_removals {
        batch.push(Mutation::RemoveOwnership(key.clone()));
    }

    for lot in &plan.sources {
        batch.push(Mutation::AdjustBalance {
            participant: lot.seller.clone(),
            delta: cost_of_purchase(lot.amount, paper.par, paper.discount),
        });
    }
    batch.push(Mutation::AdjustBalance {
        participant: order.buyer.clone(),
        delta: -cost_of_purchase(order.quantity, paper.par, paper.discount),
    });

    match &plan.buyer_position {
        BuyerPosition::Update(ownership) => {
            batch.push(Mutation::UpdateOwnership(ownership.clone()));
        }
        BuyerPosition::Insert(ownership) => {
            batch.push(Mutation::InsertOwnership(ownership.clone()));
        }
    }

    batch
}
