//! The atomic write unit for settlement.
//!
//! The engine plans a purchase as pure data, lowers it into one
//! [`MutationBatch`], and hands the batch to the collaborator. Either every
//! mutation commits or none do; a half-settled trade is never acceptable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CommercialPaper, Ownership, OwnershipKey, ParticipantId};

/// A single record mutation within a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    InsertPaper(CommercialPaper),
    InsertOwnership(Ownership),
    UpdateOwnership(Ownership),
    RemoveOwnership(OwnershipKey),
    AdjustBalance {
        participant: ParticipantId,
        delta: Decimal,
    },
}

/// An ordered set of mutations applied as one logical transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationBatch {
    /// Batch identifier, threaded through tracing spans and receipts
    pub id: Uuid,
    mutations: Vec<Mutation>,
}

impl MutationBatch {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            mutations: Vec::new(),
        }
    }

    pub fn push(&mut self, mutation: Mutation) {
        self.mutations.push(mutation);
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Net effect of the batch on all participant balances combined.
    ///
    /// Settlement is a zero-sum transfer, so a well-formed settlement batch
    /// returns exactly zero here; the engine checks this before applying.
    pub fn balance_delta(&self) -> Decimal {
        self.mutations
            .iter()
            .map(|mutation| match mutation {
                Mutation::AdjustBalance { delta, .. } => *delta,
                _ => Decimal::ZERO,
            })
            .sum()
    }
}

impl Default for MutationBatch {
    fn default() -> Self {
        Self::new()
    }
}
