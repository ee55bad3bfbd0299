//! Pure allocation planning.
//!
//! `plan_purchase` turns an ownership snapshot into a sourcing plan without
//! touching the ledger, which keeps the allocation algorithm unit-testable
//! on plain values. The engine applies the plan afterwards as one atomic
//! batch.

use serde::{Deserialize, Serialize};

use crate::domain::{CommercialPaper, Ownership, OwnershipKey, ParticipantId};
use crate::error::PaperdeskError;

/// One `(seller, amount)` pair in the sourcing list.
///
/// Draws from the issuer's unallocated remainder carry the issuer id and
/// `from_remainder = true`; they have no ownership record to decrement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcedLot {
    pub seller: ParticipantId,
    pub amount: u64,
    pub from_remainder: bool,
}

/// The buyer's position after the purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuyerPosition {
    /// Buyer already held some of this paper; increment the existing record
    Update(Ownership),
    /// First purchase of this paper by the buyer; create a fresh record
    Insert(Ownership),
}

/// Everything a purchase will change, computed before anything changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchasePlan {
    /// Who supplies how much, in sourcing order (issuer remainder first)
    pub sources: Vec<SourcedLot>,
    /// Seller records with stock left after the draw
    pub seller_updates: Vec<Ownership>,
    /// Seller records drained to zero, to be deleted
    pub seller_removals: Vec<OwnershipKey>,
    pub buyer_position: BuyerPosition,
}

/// Source `quantity` papers for `buyer` from the issuer's unallocated
/// remainder and other owners' resale offers.
///
/// The remainder is always drawn first; resale offers follow in snapshot
/// order (the collaborator serves ownership records in creation order, and
/// that order is the first-come-first-served tie-break). The buyer's own
/// record never supplies a purchase, but its quantity counts toward how
/// much of the issue is already allocated.
pub fn plan_purchase(
    paper: &CommercialPaper,
    ownerships: &[Ownership],
    buyer: &ParticipantId,
    quantity: u64,
    quantity_for_sale: u64,
) -> Result<PurchasePlan, PaperdeskError> {
    let mut buyer_existing: Option<&Ownership> = None;
    let mut total_owned: u64 = 0;
    let mut total_for_sale: u64 = 0;
    let mut potential_sellers: Vec<&Ownership> = Vec::new();

    for ownership in ownerships {
        if ownership.owner == *buyer {
            buyer_existing = Some(ownership);
        } else {
            total_for_sale += ownership.quantity_for_sale;
            if ownership.quantity_for_sale > 0 {
                potential_sellers.push(ownership);
            }
        }
        total_owned += ownership.quantity;
    }

    let unpurchased = paper.quantity_issued.saturating_sub(total_owned);
    total_for_sale += unpurchased;

    if quantity > total_for_sale {
        return Err(PaperdeskError::InsufficientSupply {
            requested: quantity,
            available: total_for_sale,
        });
    }

    let mut remaining = quantity;
    let mut sources = Vec::new();
    let mut seller_updates = Vec::new();
    let mut seller_removals = Vec::new();

    // The issuer's unallocated remainder is always the first source.
    if unpurchased > 0 && remaining > 0 {
        let amount = remaining.min(unpurchased);
        remaining -= amount;
        sources.push(SourcedLot {
            seller: paper.issuer.clone(),
            amount,
            from_remainder: true,
        });
    }

    for seller in potential_sellers {
        if remaining == 0 {
            break;
        }
        let amount = remaining.min(seller.quantity_for_sale);
        remaining -= amount;
        sources.push(SourcedLot {
            seller: seller.owner.clone(),
            amount,
            from_remainder: false,
        });

        let mut updated = seller.clone();
        updated.quantity -= amount;
        updated.quantity_for_sale -= amount;
        if updated.quantity == 0 {
            seller_removals.push(updated.key());
        } else {
            seller_updates.push(updated);
        }
    }

    // Unreachable after the supply check above; bail before any write
    // rather than let a short plan through.
    if remaining > 0 {
        return Err(PaperdeskError::Internal(format!(
            "allocation left {} papers unsourced after passing the supply check",
            remaining
        )));
    }

    let buyer_position = match buyer_existing {
        Some(existing) => {
            let mut updated = existing.clone();
            updated.quantity += quantity;
            updated.quantity_for_sale += quantity_for_sale;
            BuyerPosition::Update(updated)
        }
        None => BuyerPosition::Insert(Ownership::new(
            paper.cusip.clone(),
            buyer.clone(),
            quantity,
            quantity_for_sale,
        )),
    };

    Ok(PurchasePlan {
        sources,
        seller_updates,
        seller_removals,
        buyer_position,
    })
}
