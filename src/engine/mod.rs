//! Issuance and purchase entry points.
//!
//! Each operation reads a snapshot through the ledger collaborator, plans
//! its mutations as pure data, and applies them as one atomic batch. A
//! request that fails validation or the liquidity check produces zero
//! observable ledger mutations.

pub mod plan;
pub mod settle;

pub use plan::{plan_purchase, BuyerPosition, PurchasePlan, SourcedLot};
pub use settle::{settlement_batch, PurchaseReceipt};

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::domain::{CommercialPaper, IssueOrder, ParticipantId, PurchaseOrder};
use crate::error::{LedgerError, PaperdeskError, RecordKind, Result};
use crate::ledger::{LedgerStore, Mutation, MutationBatch};
use crate::pricing::cost_of_purchase;
use crate::validation::{validate_issue_order, validate_purchase_order};

/// Issues and settles commercial paper against a ledger collaborator
pub struct PaperEngine {
    ledger: Arc<dyn LedgerStore>,
}

impl PaperEngine {
    pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
        Self { ledger }
    }

    /// Issue a new paper under the caller's identity.
    ///
    /// No ownership record is created here; the full issued quantity stays
    /// implicitly unallocated until purchased.
    #[instrument(skip(self, order), fields(cusip = %order.cusip))]
    pub async fn issue(&self, order: &IssueOrder, caller: Option<&ParticipantId>) -> Result<()> {
        validate_issue_order(order, caller).map_err(PaperdeskError::Validation)?;

        if self.ledger.get_paper(&order.cusip).await?.is_some() {
            return Err(LedgerError::AlreadyExists {
                kind: RecordKind::Paper,
                id: order.cusip.to_string(),
            }
            .into());
        }

        let mut batch = MutationBatch::new();
        batch.push(Mutation::InsertPaper(CommercialPaper::from_order(order)));
        self.ledger.apply(batch).await?;

        info!(
            cusip = %order.cusip,
            quantity = order.quantity_issued,
            issuer = %order.issuer,
            "issued commercial paper"
        );
        Ok(())
    }

    /// Purchase paper, sourcing the issuer's remainder first and then other
    /// owners' resale offers in creation order.
    #[instrument(skip(self, order), fields(cusip = %order.cusip, buyer = %order.buyer))]
    pub async fn purchase(
        &self,
        order: &PurchaseOrder,
        caller: Option<&ParticipantId>,
    ) -> Result<PurchaseReceipt> {
        let paper = self
            .ledger
            .get_paper(&order.cusip)
            .await?
            .ok_or_else(|| LedgerError::NotFound {
                kind: RecordKind::Paper,
                id: order.cusip.to_string(),
            })?;
        let buyer = self
            .ledger
            .get_participant(&order.buyer)
            .await?
            .ok_or_else(|| LedgerError::NotFound {
                kind: RecordKind::Participant,
                id: order.buyer.to_string(),
            })?;

        validate_purchase_order(order, caller, buyer.balance, &paper)
            .map_err(PaperdeskError::Validation)?;

        let ownerships = self.ledger.ownerships_for(&order.cusip).await?;
        let plan = plan_purchase(
            &paper,
            &ownerships,
            &order.buyer,
            order.quantity,
            order.quantity_for_sale,
        )?;
        let batch = settlement_batch(&paper, order, &plan);

        if batch.balance_delta() != Decimal::ZERO {
            return Err(PaperdeskError::Internal(format!(
                "settlement batch {} is not zero-sum",
                batch.id
            )));
        }

        let receipt = PurchaseReceipt {
            batch_id: batch.id,
            cusip: order.cusip.clone(),
            buyer: order.buyer.clone(),
            quantity: order.quantity,
            total_cost: cost_of_purchase(order.quantity, paper.par, paper.discount),
            sources: plan.sources.clone(),
        };

        self.ledger.apply(batch).await?;

        info!(
            batch = %receipt.batch_id,
            quantity = order.quantity,
            cost = %receipt.total_cost,
            sources = receipt.sources.len(),
            "settled paper purchase"
        );
        Ok(receipt)
    }
}
