use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Cusip, IssueOrder, ParticipantId};

/// A commercial paper instrument.
///
/// Immutable once issued; redemption and maturity settlement happen outside
/// this core. The portion of `quantity_issued` not covered by ownership
/// records is implicitly held by the issuer and available for initial sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialPaper {
    pub cusip: Cusip,
    /// Face value per paper
    pub par: Decimal,
    pub quantity_issued: u64,
    /// Discount fraction, strictly inside (0, 1)
    pub discount: Decimal,
    /// Days until maturity, 1 to 270
    pub maturity_days: u32,
    pub issuer: ParticipantId,
    pub issued_at: DateTime<Utc>,
}

impl CommercialPaper {
    pub fn from_order(order: &IssueOrder) -> Self {
        Self {
            cusip: order.cusip.clone(),
            par: order.par,
            quantity_issued: order.quantity_issued,
            discount: order.discount,
            maturity_days: order.maturity_days,
            issuer: order.issuer.clone(),
            issued_at: order.issued_at,
        }
    }
}
