use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Cusip, ParticipantId};

/// Request to issue a new commercial paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueOrder {
    pub cusip: Cusip,
    pub par: Decimal,
    pub quantity_issued: u64,
    pub discount: Decimal,
    pub maturity_days: u32,
    pub issuer: ParticipantId,
    pub issued_at: DateTime<Utc>,
}

/// Request to purchase paper from the issuer's remainder and resale offers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub buyer: ParticipantId,
    pub cusip: Cusip,
    /// How many papers the buyer wants to acquire
    pub quantity: u64,
    /// Portion of the purchased quantity immediately re-offered for resale
    pub quantity_for_sale: u64,
}
