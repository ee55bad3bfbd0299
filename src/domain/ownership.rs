use serde::{Deserialize, Serialize};

use super::{Cusip, ParticipantId};

/// Per-owner holding of a paper, keyed by `(owner, cusip)`.
///
/// Invariants: `quantity_for_sale <= quantity`, and a record whose quantity
/// reaches 0 is removed from the ledger, never stored as a zero row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub cusip: Cusip,
    pub owner: ParticipantId,
    pub quantity: u64,
    /// Portion of `quantity` the owner currently offers for resale
    pub quantity_for_sale: u64,
}

impl Ownership {
    pub fn new(
        cusip: Cusip,
        owner: ParticipantId,
        quantity: u64,
        quantity_for_sale: u64,
    ) -> Self {
        Self {
            cusip,
            owner,
            quantity,
            quantity_for_sale,
        }
    }

    pub fn key(&self) -> OwnershipKey {
        OwnershipKey {
            owner: self.owner.clone(),
            cusip: self.cusip.clone(),
        }
    }
}

/// Identifier pair for an ownership record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnershipKey {
    pub owner: ParticipantId,
    pub cusip: Cusip,
}

impl std::fmt::Display for OwnershipKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.owner, self.cusip)
    }
}
