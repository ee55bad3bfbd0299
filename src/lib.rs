pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod pricing;
pub mod telemetry;
pub mod validation;

pub use config::{AppConfig, LoggingConfig};
pub use domain::{
    CommercialPaper, Cusip, IssueOrder, Ownership, OwnershipKey, Participant, ParticipantId,
    PurchaseOrder,
};
pub use engine::{PaperEngine, PurchasePlan, PurchaseReceipt, SourcedLot};
pub use error::{LedgerError, PaperdeskError, RecordKind, Result, ValidationErrors};
pub use ledger::{LedgerStore, MemoryLedger, Mutation, MutationBatch};
pub use pricing::cost_of_purchase;
