//! End-to-end pipeline tests.

mod common;

use common::{engine, entry_date};
use journal_engine::models::{Direction, TransactionType, VoucherType};
use journal_engine::party::{PartyResolver, PartyRole, StaticPartyResolver};
use journal_engine::services::{EntryEdits, LineEdit};
use rust_decimal_macros::dec;

#[test]
fn cash_expense_posts_expense_against_cash() {
    let result = engine().process_narration("Paid electricity bill Rs 1800 in cash", entry_date());

    assert!(result.errors.is_empty());
    assert_eq!(result.parsed.transaction_type, TransactionType::Expense);
    assert!(result.gst.is_none(), "no tax keyword, no GST");

    let entry = result.entry.expect("entry should generate");
    assert_eq!(entry.voucher_type, VoucherType::Payment);
    assert_eq!(entry.entries.len(), 2);
    assert_eq!(entry.entries[0].account_name, "Electricity Expense");
    assert_eq!(entry.entries[0].direction, Direction::Debit);
    assert_eq!(entry.entries[0].amount, dec!(1800));
    assert_eq!(entry.entries[1].account_name, "Cash in Hand");
    assert_eq!(entry.entries[1].direction, Direction::Credit);
    assert!(entry.is_balanced);
}

#[test]
fn inclusive_gst_sale_posts_debtor_and_output_tax() {
    let result = engine().process_narration(
        "Sold goods worth Rs 11800 including GST 18% to Ramesh",
        entry_date(),
    );

    assert!(result.errors.is_empty());
    let gst = result.gst.as_ref().expect("GST should be detected");
    assert_eq!(gst.taxable_value, dec!(10000.00));
    assert_eq!(gst.total_tax, dec!(1800.00));

    let entry = result.entry.expect("entry should generate");
    let debtor = entry
        .entries
        .iter()
        .find(|e| e.account_name == "Sundry Debtors")
        .expect("counterparty sale must post to debtors");
    assert_eq!(debtor.amount, dec!(11800));
    assert_eq!(debtor.direction, Direction::Debit);

    let sales = entry
        .entries
        .iter()
        .find(|e| e.account_name == "Sales")
        .unwrap();
    assert_eq!(sales.amount, dec!(10000.00));

    let output_cgst = entry
        .entries
        .iter()
        .find(|e| e.account_name == "GST Output CGST")
        .unwrap();
    let output_sgst = entry
        .entries
        .iter()
        .find(|e| e.account_name == "GST Output SGST")
        .unwrap();
    assert_eq!(output_cgst.amount, dec!(900.00));
    assert_eq!(output_sgst.amount, dec!(900.00));
    assert!(entry.is_balanced);
    assert_eq!(entry.counterparty.as_deref(), Some("Ramesh"));
}

#[test]
fn personal_split_scenario_balances() {
    let result = engine().process_narration("Office rent Rs 20000 personal use 40%", entry_date());
    let entry = result.entry.expect("entry should generate");

    assert_eq!(entry.total_debit, dec!(20000.00));
    assert_eq!(entry.total_credit, dec!(20000));
    assert!(entry.is_balanced);
}

#[test]
fn advance_rent_debits_prepaid_rent() {
    let result = engine().process_narration("Advance rent paid Rs 50000 by bank", entry_date());

    assert_eq!(result.parsed.transaction_type, TransactionType::Prepaid);
    let entry = result.entry.expect("entry should generate");
    assert_eq!(entry.entries[0].account_name, "Prepaid Rent");
    assert_eq!(entry.entries[0].direction, Direction::Debit);
    assert_eq!(entry.entries[0].amount, dec!(50000));
    assert_eq!(entry.entries[1].account_name, "Bank Account");
    assert_eq!(entry.entries[1].direction, Direction::Credit);
    assert!(entry.is_balanced);
}

#[test]
fn missing_amount_is_a_hard_error() {
    let result = engine().process_narration("Paid electricity bill in cash", entry_date());

    assert!(result.entry.is_none());
    assert!(result
        .errors
        .iter()
        .any(|e| e.starts_with("Amount not found")));
}

#[test]
fn missing_payment_mode_warns_and_defaults_to_cash() {
    let result = engine().process_narration("Electricity bill Rs 1800", entry_date());

    let entry = result.entry.expect("entry should generate");
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("No payment mode")));
    assert!(entry
        .entries
        .iter()
        .any(|e| e.account_name == "Cash in Hand" && e.direction == Direction::Credit));
}

#[test]
fn validation_catches_structural_defects() {
    let engine = engine();
    let result = engine.process_narration("Paid electricity bill Rs 1800 in cash", entry_date());
    let entry = result.entry.expect("entry should generate");

    let report = engine.validate_journal_entry(&entry);
    assert!(report.is_valid());

    // Break the balance.
    let mut broken = entry.clone();
    broken.entries[0].amount = dec!(1700);
    let report = engine.validate_journal_entry(&broken);
    assert!(report.errors.iter().any(|e| e.contains("not balanced")));

    // Zero amounts are rejected.
    let mut zeroed = entry.clone();
    zeroed.entries[0].amount = dec!(0);
    let report = engine.validate_journal_entry(&zeroed);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("non-positive amount")));

    // A single line can never balance a double entry.
    let mut single = entry.clone();
    single.entries.truncate(1);
    let report = engine.validate_journal_entry(&single);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("at least two lines")));
    assert!(report.errors.iter().any(|e| e.contains("no credit line")));
}

#[test]
fn user_edits_are_pure_and_idempotent() {
    let engine = engine();
    let result = engine.process_narration("Paid electricity bill Rs 1800 in cash", entry_date());
    let entry = result.entry.expect("entry should generate");

    let edits = EntryEdits {
        voucher_type: Some(VoucherType::Journal),
        narration: Some("Electricity for the shop".to_string()),
        line_edits: vec![LineEdit {
            index: 0,
            account_code: Some("5104".to_string()),
            amount: Some(dec!(1850)),
            ..Default::default()
        }],
        ..Default::default()
    };

    let once = engine.apply_user_edits(&entry, &edits);
    // Source entry is untouched.
    assert_eq!(entry.entries[0].amount, dec!(1800));

    assert_eq!(once.voucher_type, VoucherType::Journal);
    assert_eq!(once.entries[0].account_name, "Office Expenses");
    assert_eq!(once.entries[0].amount, dec!(1850));
    assert_eq!(once.total_debit, dec!(1850));
    assert!(!once.is_balanced, "edit broke the balance on purpose");

    let twice = engine.apply_user_edits(&once, &edits);
    assert_eq!(
        serde_json::to_value(&once).unwrap(),
        serde_json::to_value(&twice).unwrap()
    );
}

#[test]
fn suggested_voucher_tracks_settlement() {
    let engine = engine();
    let sale = engine.process_narration(
        "Sold goods Rs 5000 on credit to Mehta Stores",
        entry_date(),
    );
    assert_eq!(sale.suggested_voucher, VoucherType::Sales);

    let receipt = engine.process_narration("Received commission Rs 2500 by upi", entry_date());
    assert_eq!(receipt.suggested_voucher, VoucherType::Receipt);

    let ret = engine.process_narration("Sales return of Rs 5000 recorded", entry_date());
    assert_eq!(ret.suggested_voucher, VoucherType::Journal);
}

#[tokio::test]
async fn party_resolver_round_trip() {
    let resolver = StaticPartyResolver::new()
        .with_party("Ramesh", PartyRole::Customer, "1210")
        .with_party("Mehta Stores", PartyRole::Vendor, "2010");

    let account = resolver.resolve("ramesh", PartyRole::Customer).await.unwrap();
    assert_eq!(account.code, "1210");

    let missing = resolver.resolve("Unknown Traders", PartyRole::Vendor).await;
    assert!(missing.is_err());
}
