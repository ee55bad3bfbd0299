use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ParticipantId;

/// A company or account holding currency on the ledger.
///
/// Settlement transfers mutate the balance; this core never creates or
/// destroys participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Signed currency balance
    pub balance: Decimal,
}

impl Participant {
    pub fn new(id: ParticipantId, balance: Decimal) -> Self {
        Self { id, balance }
    }
}
