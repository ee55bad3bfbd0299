//! In-process reference ledger.
//!
//! Backs the integration tests and any embedder that wants a ledger without
//! external storage. The whole state sits behind a single `RwLock` because
//! batch application must be atomic across papers, ownerships, and
//! balances; per-entry locking cannot give that.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{
    CommercialPaper, Cusip, Ownership, OwnershipKey, Participant, ParticipantId,
};
use crate::error::{LedgerError, RecordKind};

use super::{LedgerStore, Mutation, MutationBatch};

/// Ownership row plus the creation sequence that fixes query order
#[derive(Debug, Clone)]
struct StoredOwnership {
    record: Ownership,
    seq: u64,
}

#[derive(Debug, Default)]
struct MemoryState {
    papers: HashMap<Cusip, CommercialPaper>,
    participants: HashMap<ParticipantId, Participant>,
    ownerships: HashMap<OwnershipKey, StoredOwnership>,
    next_seq: u64,
}

/// In-memory [`LedgerStore`] with serializable batch application
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: RwLock<MemoryState>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a participant record.
    ///
    /// Participants are never created by the core, so embedders and tests
    /// register them up front.
    pub async fn upsert_participant(&self, participant: Participant) {
        let mut state = self.state.write().await;
        state.participants.insert(participant.id.clone(), participant);
    }

    pub async fn balance_of(&self, id: &ParticipantId) -> Option<Decimal> {
        let state = self.state.read().await;
        state.participants.get(id).map(|p| p.balance)
    }

    /// Validate one mutation against current state, without applying it.
    fn check(state: &MemoryState, mutation: &Mutation) -> Result<(), LedgerError> {
        match mutation {
            Mutation::InsertPaper(paper) => {
                if state.papers.contains_key(&paper.cusip) {
                    return Err(LedgerError::AlreadyExists {
                        kind: RecordKind::Paper,
                        id: paper.cusip.to_string(),
                    });
                }
            }
            Mutation::InsertOwnership(ownership) => {
                if state.ownerships.contains_key(&ownership.key()) {
                    return Err(LedgerError::AlreadyExists {
                        kind: RecordKind::Ownership,
                        id: ownership.key().to_string(),
                    });
                }
                Self::check_ownership_row(ownership)?;
            }
            Mutation::UpdateOwnership(ownership) => {
                if !state.ownerships.contains_key(&ownership.key()) {
                    return Err(LedgerError::NotFound {
                        kind: RecordKind::Ownership,
                        id: ownership.key().to_string(),
                    });
                }
                Self::check_ownership_row(ownership)?;
            }
            Mutation::RemoveOwnership(key) => {
                if !state.ownerships.contains_key(key) {
                    return Err(LedgerError::NotFound {
                        kind: RecordKind::Ownership,
                        id: key.to_string(),
                    });
                }
            }
            Mutation::AdjustBalance { participant, .. } => {
                if !state.participants.contains_key(participant) {
                    return Err(LedgerError::NotFound {
                        kind: RecordKind::Participant,
                        id: participant.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    fn check_ownership_row(ownership: &Ownership) -> Result<(), LedgerError> {
        if ownership.quantity == 0 {
            return Err(LedgerError::Invariant(format!(
                "ownership {} has quantity 0 and must be removed, not stored",
                ownership.key()
            )));
        }
        if ownership.quantity_for_sale > ownership.quantity {
            return Err(LedgerError::Invariant(format!(
                "ownership {} offers {} for sale but only holds {}",
                ownership.key(),
                ownership.quantity_for_sale,
                ownership.quantity
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn get_paper(&self, cusip: &Cusip) -> Result<Option<CommercialPaper>, LedgerError> {
        let state = self.state.read().await;
        Ok(state.papers.get(cusip).cloned())
    }

    async fn get_participant(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<Participant>, LedgerError> {
        let state = self.state.read().await;
        Ok(state.participants.get(id).cloned())
    }

    async fn ownerships_for(&self, cusip: &Cusip) -> Result<Vec<Ownership>, LedgerError> {
        let state = self.state.read().await;
        let mut rows: Vec<&StoredOwnership> = state
            .ownerships
            .values()
            .filter(|stored| stored.record.cusip == *cusip)
            .collect();
        rows.sort_by_key(|stored| stored.seq);
        Ok(rows.into_iter().map(|stored| stored.record.clone()).collect())
    }

    async fn apply(&self, batch: MutationBatch) -> Result<(), LedgerError> {
        let mut state = self.state.write().await;

        // Validate the whole batch before touching anything, so a rejected
        // batch leaves the ledger exactly as it was.
        for mutation in batch.mutations() {
            Self::check(&state, mutation)?;
        }

        for mutation in batch.mutations() {
            match mutation {
                Mutation::InsertPaper(paper) => {
                    state.papers.insert(paper.cusip.clone(), paper.clone());
                }
                Mutation::InsertOwnership(ownership) => {
                    let seq = state.next_seq;
                    state.next_seq += 1;
                    state.ownerships.insert(
                        ownership.key(),
                        StoredOwnership {
                            record: ownership.clone(),
                            seq,
                        },
                    );
                }
                Mutation::UpdateOwnership(ownership) => {
                    if let Some(stored) = state.ownerships.get_mut(&ownership.key()) {
                        stored.record = ownership.clone();
                    }
                }
                Mutation::RemoveOwnership(key) => {
                    state.ownerships.remove(key);
                }
                Mutation::AdjustBalance { participant, delta } => {
                    if let Some(record) = state.participants.get_mut(participant) {
                        record.balance += *delta;
                    }
                }
            }
        }

        debug!(batch = %batch.id, mutations = batch.len(), "applied ledger batch");
        Ok(())
    }
}
