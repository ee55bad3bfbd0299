//! Request validation for issuance and purchase orders.
//!
//! Each rule is a pure predicate returning a human-readable message on
//! failure. The aggregate validators run every rule and collect all
//! violations into a [`ValidationErrors`], so one rejected request reports
//! everything that is wrong with it at once.

use rust_decimal::Decimal;

use crate::domain::{CommercialPaper, Cusip, IssueOrder, ParticipantId, PurchaseOrder};
use crate::error::ValidationErrors;
use crate::pricing::cost_of_purchase;

/// Required CUSIP length in characters
pub const CUSIP_LEN: usize = 9;

/// Commercial paper matures in at most 270 days
pub const MAX_MATURITY_DAYS: u32 = 270;

type RuleResult = std::result::Result<(), String>;

pub fn validate_cusip(cusip: &Cusip) -> RuleResult {
    if cusip.as_str().chars().count() != CUSIP_LEN {
        return Err("CUSIP must be 9 characters long".to_string());
    }

    Ok(())
}

pub fn validate_par(par: Decimal) -> RuleResult {
    if par <= Decimal::ZERO {
        return Err("Par value must be greater than 0".to_string());
    }

    Ok(())
}

pub fn validate_quantity_issued(quantity_issued: u64) -> RuleResult {
    if quantity_issued == 0 {
        return Err("Quantity issued must be greater than 0".to_string());
    }

    Ok(())
}

pub fn validate_discount(discount: Decimal) -> RuleResult {
    if !(discount > Decimal::ZERO && discount < Decimal::ONE) {
        return Err("Discount must be greater than 0% and less than 100%".to_string());
    }

    Ok(())
}

pub fn validate_maturity(maturity_days: u32) -> RuleResult {
    if !(1..=MAX_MATURITY_DAYS).contains(&maturity_days) {
        return Err("Maturity must be at least 1 day and less than 270 days".to_string());
    }

    Ok(())
}

/// The participant named in an order must be the caller itself.
///
/// Identity is passed explicitly by the embedder; `None` means the caller
/// could not be resolved to any participant.
pub fn validate_caller_is(
    participant: &ParticipantId,
    caller: Option<&ParticipantId>,
) -> RuleResult {
    let caller = match caller {
        Some(caller) => caller,
        None => {
            return Err(
                "Identity is not associated with any participant, cannot issue or purchase commercial paper"
                    .to_string(),
            )
        }
    };

    if caller != participant {
        return Err(
            "A participant can only issue or purchase commercial paper for itself".to_string(),
        );
    }

    Ok(())
}

/// Reserved check on the purchased quantity; accepts all values today.
pub fn validate_quantity_purchased(_quantity: u64) -> RuleResult {
    Ok(())
}

pub fn validate_quantity_for_sale(quantity: u64, quantity_for_sale: u64) -> RuleResult {
    if quantity_for_sale > quantity {
        return Err(
            "Quantity for sale must be less than or equal to the quantity purchased".to_string(),
        );
    }

    Ok(())
}

pub fn validate_balance(balance: Decimal, quantity: u64, paper: &CommercialPaper) -> RuleResult {
    let cost = cost_of_purchase(quantity, paper.par, paper.discount);
    if cost > balance {
        return Err(format!(
            "Buyer does not have sufficient funds to purchase paper, balance = ${}, cost = ${}",
            balance, cost
        ));
    }

    Ok(())
}

/// Run every issuance rule, collecting all violations.
pub fn validate_issue_order(
    order: &IssueOrder,
    caller: Option<&ParticipantId>,
) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let checks = [
        validate_cusip(&order.cusip),
        validate_par(order.par),
        validate_quantity_issued(order.quantity_issued),
        validate_discount(order.discount),
        validate_maturity(order.maturity_days),
        validate_caller_is(&order.issuer, caller),
    ];

    for check in checks {
        if let Err(message) = check {
            errors.push(message);
        }
    }

    errors.into_result()
}

/// Run every purchase rule, collecting all violations.
///
/// The buyer's balance comes from the ledger snapshot the engine already
/// holds, keeping this function pure.
pub fn validate_purchase_order(
    order: &PurchaseOrder,
    caller: Option<&ParticipantId>,
    buyer_balance: Decimal,
    paper: &CommercialPaper,
) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let checks = [
        validate_caller_is(&order.buyer, caller),
        validate_quantity_purchased(order.quantity),
        validate_quantity_for_sale(order.quantity, order.quantity_for_sale),
        validate_balance(buyer_balance, order.quantity, paper),
    ];

    for check in checks {
        if let Err(message) = check {
            errors.push(message);
        }
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn paper() -> CommercialPaper {
        CommercialPaper {
            cusip: Cusip::new("037833100"),
            par: dec!(1000),
            quantity_issued: 100,
            discount: dec!(0.04),
            maturity_days: 90,
            issuer: ParticipantId::new("acme"),
            issued_at: Utc::now(),
        }
    }

    #[test]
    fn cusip_must_be_nine_characters() {
        assert!(validate_cusip(&Cusip::new("037833100")).is_ok());
        assert!(validate_cusip(&Cusip::new("03783310")).is_err());
        assert!(validate_cusip(&Cusip::new("0378331000")).is_err());
        assert!(validate_cusip(&Cusip::new("")).is_err());
    }

    #[test]
    fn par_must_be_positive() {
        assert!(validate_par(dec!(0.01)).is_ok());
        assert!(validate_par(Decimal::ZERO).is_err());
        assert!(validate_par(dec!(-100)).is_err());
    }

    #[test]
    fn discount_must_be_a_proper_fraction() {
        assert!(validate_discount(dec!(0.04)).is_ok());
        assert!(validate_discount(Decimal::ZERO).is_err());
        assert!(validate_discount(Decimal::ONE).is_err());
        assert!(validate_discount(dec!(1.2)).is_err());
    }

    #[test]
    fn maturity_bounds_are_one_to_270_days() {
        assert!(validate_maturity(1).is_ok());
        assert!(validate_maturity(270).is_ok());
        assert!(validate_maturity(0).is_err());
        assert!(validate_maturity(271).is_err());
    }

    #[test]
    fn caller_must_match_named_participant() {
        let acme = ParticipantId::new("acme");
        let globex = ParticipantId::new("globex");

        assert!(validate_caller_is(&acme, Some(&acme)).is_ok());
        assert!(validate_caller_is(&acme, Some(&globex)).is_err());
        assert!(validate_caller_is(&acme, None).is_err());
    }

    #[test]
    fn quantity_for_sale_cannot_exceed_purchase() {
        assert!(validate_quantity_for_sale(10, 10).is_ok());
        assert!(validate_quantity_for_sale(10, 0).is_ok());
        assert!(validate_quantity_for_sale(10, 11).is_err());
    }

    #[test]
    fn balance_must_cover_cost() {
        let paper = paper();
        // 10 papers cost 9600
        assert!(validate_balance(dec!(9600), 10, &paper).is_ok());
        assert!(validate_balance(dec!(9599.99), 10, &paper).is_err());
    }

    #[test]
    fn issue_order_collects_every_violation() {
        let issuer = ParticipantId::new("acme");
        let order = IssueOrder {
            cusip: Cusip::new("short"),
            par: dec!(-1),
            quantity_issued: 0,
            discount: dec!(1.5),
            maturity_days: 300,
            issuer: issuer.clone(),
            issued_at: Utc::now(),
        };

        let errors = validate_issue_order(&order, Some(&issuer)).unwrap_err();
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn bad_cusip_alone_yields_one_length_error() {
        let issuer = ParticipantId::new("acme");
        let order = IssueOrder {
            cusip: Cusip::new("03783310"),
            par: dec!(1000),
            quantity_issued: 100,
            discount: dec!(0.04),
            maturity_days: 90,
            issuer: issuer.clone(),
            issued_at: Utc::now(),
        };

        let errors = validate_issue_order(&order, Some(&issuer)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.messages()[0].contains("9 characters"));
    }

    #[test]
    fn purchase_order_collects_every_violation() {
        let paper = paper();
        let order = PurchaseOrder {
            buyer: ParticipantId::new("globex"),
            cusip: paper.cusip.clone(),
            quantity: 10,
            quantity_for_sale: 11,
        };

        // Wrong caller, oversize resale offer, and an empty wallet.
        let errors =
            validate_purchase_order(&order, Some(&ParticipantId::new("acme")), dec!(0), &paper)
                .unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
