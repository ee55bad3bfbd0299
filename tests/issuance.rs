//! End-to-end issuance scenarios against the in-memory ledger.

use std::sync::Arc;

use chrono::Utc;
use paperdesk::{
    Cusip, IssueOrder, LedgerError, LedgerStore, MemoryLedger, PaperEngine, PaperdeskError,
    ParticipantId,
};
use rust_decimal_macros::dec;

fn issue_order(cusip: &str, issuer: &str) -> IssueOrder {
    IssueOrder {
        cusip: Cusip::new(cusip),
        par: dec!(1000),
        quantity_issued: 100,
        discount: dec!(0.04),
        maturity_days: 90,
        issuer: ParticipantId::new(issuer),
        issued_at: Utc::now(),
    }
}

fn engine() -> (PaperEngine, Arc<MemoryLedger>) {
    let ledger = Arc::new(MemoryLedger::new());
    (PaperEngine::new(ledger.clone()), ledger)
}

#[tokio::test]
async fn issuing_creates_the_paper_record() {
    let (engine, ledger) = engine();
    let order = issue_order("037833100", "acme");

    engine
        .issue(&order, Some(&order.issuer))
        .await
        .expect("valid issue should succeed");

    let paper = ledger
        .get_paper(&order.cusip)
        .await
        .unwrap()
        .expect("paper should be on the ledger");
    assert_eq!(paper.par, order.par);
    assert_eq!(paper.quantity_issued, 100);
    assert_eq!(paper.discount, order.discount);
    assert_eq!(paper.maturity_days, 90);
    assert_eq!(paper.issuer, order.issuer);

    // No ownership record exists at issuance; the whole quantity is the
    // issuer's implicit remainder.
    let ownerships = ledger.ownerships_for(&order.cusip).await.unwrap();
    assert!(ownerships.is_empty());
}

#[tokio::test]
async fn duplicate_cusip_is_rejected() {
    let (engine, _ledger) = engine();
    let order = issue_order("037833100", "acme");

    engine.issue(&order, Some(&order.issuer)).await.unwrap();
    let err = engine
        .issue(&order, Some(&order.issuer))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PaperdeskError::Ledger(LedgerError::AlreadyExists { .. })
    ));
}

#[tokio::test]
async fn short_cusip_yields_exactly_one_length_error() {
    let (engine, ledger) = engine();
    let mut order = issue_order("037833100", "acme");
    order.cusip = Cusip::new("03783310");

    let err = engine
        .issue(&order, Some(&order.issuer))
        .await
        .unwrap_err();

    match err {
        PaperdeskError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors.messages()[0].contains("9 characters"));
        }
        other => panic!("expected validation error, got {other}"),
    }

    assert!(ledger.get_paper(&order.cusip).await.unwrap().is_none());
}

#[tokio::test]
async fn simultaneous_violations_are_reported_together() {
    let (engine, _ledger) = engine();
    let mut order = issue_order("037833100", "acme");
    order.par = dec!(-5);
    order.discount = dec!(1);

    let err = engine
        .issue(&order, Some(&order.issuer))
        .await
        .unwrap_err();

    match err {
        PaperdeskError::Validation(errors) => {
            assert_eq!(errors.len(), 2);
            let joined = errors.to_string();
            assert!(joined.contains("Par value"));
            assert!(joined.contains("Discount"));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[tokio::test]
async fn issuing_on_behalf_of_another_participant_is_rejected() {
    let (engine, ledger) = engine();
    let order = issue_order("037833100", "acme");

    let err = engine
        .issue(&order, Some(&ParticipantId::new("globex")))
        .await
        .unwrap_err();
    assert!(matches!(err, PaperdeskError::Validation(_)));

    let err = engine.issue(&order, None).await.unwrap_err();
    match err {
        PaperdeskError::Validation(errors) => {
            assert!(errors.to_string().contains("not associated"));
        }
        other => panic!("expected validation error, got {other}"),
    }

    assert!(ledger.get_paper(&order.cusip).await.unwrap().is_none());
}

#[tokio::test]
async fn rejected_issue_repeats_identically() {
    let (engine, _ledger) = engine();
    let mut order = issue_order("037833100", "acme");
    order.cusip = Cusip::new("short");
    order.maturity_days = 0;

    let first = engine
        .issue(&order, Some(&order.issuer))
        .await
        .unwrap_err()
        .to_string();
    let second = engine
        .issue(&order, Some(&order.issuer))
        .await
        .unwrap_err()
        .to_string();

    assert_eq!(first, second);
}
