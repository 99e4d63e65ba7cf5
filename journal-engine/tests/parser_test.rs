//! Narration parser tests.

use journal_engine::services::parse_narration;
use journal_engine::models::{PaymentMode, TransactionType};
use rust_decimal_macros::dec;

#[test]
fn expense_narration_with_cash_mode() {
    let parsed = parse_narration("Paid electricity bill Rs 1800 in cash");
    assert_eq!(parsed.transaction_type, TransactionType::Expense);
    assert_eq!(parsed.amount, Some(dec!(1800)));
    assert_eq!(parsed.payment_mode, Some(PaymentMode::Cash));
    assert!(parsed.confidence >= 0.7);
}

#[test]
fn sale_narration_with_counterparty() {
    let parsed = parse_narration("Sold goods worth Rs 11800 including GST 18% to Ramesh");
    assert_eq!(parsed.transaction_type, TransactionType::Sale);
    assert_eq!(parsed.amount, Some(dec!(11800)));
    assert_eq!(parsed.counterparty.as_deref(), Some("Ramesh"));
}

#[test]
fn personal_use_split_is_extracted() {
    let parsed = parse_narration("Office rent Rs 20000 personal use 40%");
    assert_eq!(parsed.transaction_type, TransactionType::Expense);
    assert!(parsed.is_personal);
    assert_eq!(parsed.personal_percentage, Some(dec!(40)));
    assert_eq!(parsed.business_percentage(), Some(dec!(60)));
}

#[test]
fn business_share_implies_personal_share() {
    let parsed = parse_narration("Laptop Rs 60000, 70% business use");
    assert_eq!(parsed.personal_percentage, Some(dec!(30)));
}

#[test]
fn advance_rent_maps_to_prepaid() {
    let parsed = parse_narration("Advance rent paid Rs 50000 by bank");
    assert_eq!(parsed.transaction_type, TransactionType::Prepaid);
    assert!(parsed.is_advance);
    assert_eq!(parsed.payment_mode, Some(PaymentMode::Bank));
}

#[test]
fn advance_without_rent_stays_advance() {
    let parsed = parse_narration("Advance Rs 10000 given for raw material supply");
    assert_eq!(parsed.transaction_type, TransactionType::Advance);
}

#[test]
fn outstanding_flag_overrides_expense_keywords() {
    let parsed = parse_narration("Salary for March still outstanding Rs 15000");
    assert_eq!(parsed.transaction_type, TransactionType::Outstanding);
    assert!(parsed.is_outstanding);
}

#[test]
fn returns_win_over_plain_sales() {
    let parsed = parse_narration("Sales return of Rs 5000 recorded");
    assert_eq!(parsed.transaction_type, TransactionType::SalesReturn);

    let parsed = parse_narration("Purchase return Rs 2000 sent back");
    assert_eq!(parsed.transaction_type, TransactionType::PurchaseReturn);
}

#[test]
fn missing_amount_lowers_confidence() {
    let with_amount = parse_narration("Paid electricity bill Rs 1800 in cash");
    let without_amount = parse_narration("Paid electricity bill in cash");
    assert!(without_amount.amount.is_none());
    assert!(without_amount.confidence < with_amount.confidence);
}

#[test]
fn state_token_is_recognized() {
    let parsed = parse_narration("Sold goods Rs 5000 to a dealer in Karnataka");
    assert_eq!(parsed.state_code.as_deref(), Some("KA"));
}

#[test]
fn preposition_fallback_detects_direction() {
    let parsed = parse_narration("Rs 500 for the watchman");
    assert_eq!(parsed.transaction_type, TransactionType::Payment);
}
