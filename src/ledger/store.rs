use async_trait::async_trait;

use crate::domain::{CommercialPaper, Cusip, Ownership, Participant, ParticipantId};
use crate::error::LedgerError;

use super::MutationBatch;

/// Typed repository interface over the shared ledger.
///
/// Implementations provide durable, linearizable per-record reads and
/// atomic batch writes. Concurrency control lives entirely behind this
/// trait: two racing purchases of the same paper must not both observe the
/// same unallocated units as available.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn get_paper(&self, cusip: &Cusip) -> Result<Option<CommercialPaper>, LedgerError>;

    async fn get_participant(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<Participant>, LedgerError>;

    /// All ownership records of one paper, in ascending creation order.
    ///
    /// The order is part of the contract: the allocation engine sources
    /// resale offers first-come-first-served in exactly this order, so it
    /// must be stable across calls against unchanged state.
    async fn ownerships_for(&self, cusip: &Cusip) -> Result<Vec<Ownership>, LedgerError>;

    /// Apply a batch atomically: either every mutation commits or none do.
    ///
    /// Any precondition failure (duplicate insert, missing target, invariant
    /// violation) rejects the whole batch with zero partial writes.
    async fn apply(&self, batch: MutationBatch) -> Result<(), LedgerError>;
}
