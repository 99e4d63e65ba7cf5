//! Account matcher tests.

use journal_engine::defaults::reference_chart;
use journal_engine::models::{AccountCategory, Chart, ChartOfAccount};
use journal_engine::services::{match_accounts, parse_narration};

#[test]
fn electricity_beats_generic_expense_accounts() {
    let chart = reference_chart();
    let parsed = parse_narration("Paid electricity bill Rs 1800 in cash");
    let matches = match_accounts(&parsed, &chart);

    let top_expense = matches
        .iter()
        .find(|m| m.account.category == AccountCategory::Expense)
        .unwrap();
    assert_eq!(top_expense.account.name, "Electricity Expense");
}

#[test]
fn salary_never_resolves_to_stationery() {
    let chart = reference_chart();
    let parsed = parse_narration("Paid salary Rs 5000 in cash");
    let matches = match_accounts(&parsed, &chart);

    assert_eq!(matches[0].account.name, "Salaries & Wages");
    assert!(matches
        .iter()
        .all(|m| !m.account.name.contains("Stationery")));
}

#[test]
fn prepaid_rent_outranks_rent_expense_for_advances() {
    let chart = reference_chart();
    let parsed = parse_narration("Advance rent paid Rs 50000 by bank");
    let matches = match_accounts(&parsed, &chart);

    let prepaid_pos = matches
        .iter()
        .position(|m| m.account.name == "Prepaid Rent")
        .unwrap();
    let rent_pos = matches.iter().position(|m| m.account.name == "Rent Expense");
    if let Some(rent_pos) = rent_pos {
        assert!(prepaid_pos < rent_pos);
    }
}

#[test]
fn personal_use_boosts_drawings() {
    let chart = reference_chart();
    let parsed = parse_narration("Bought a television for personal use Rs 30000");
    let matches = match_accounts(&parsed, &chart);

    assert_eq!(matches[0].account.name, "Drawings");
}

#[test]
fn duplicate_codes_keep_the_highest_score() {
    let chart = Chart::new(vec![
        ChartOfAccount::new("9001", "Camel Rides", AccountCategory::Expense, &["camel"]),
        ChartOfAccount::new(
            "9001",
            "Camel Ride Specials",
            AccountCategory::Expense,
            &["camel ride special"],
        ),
    ]);
    let parsed = parse_narration("Booked camel ride special for 100");
    let matches = match_accounts(&parsed, &chart);

    let dupes: Vec<_> = matches.iter().filter(|m| m.account.code == "9001").collect();
    assert_eq!(dupes.len(), 1);
    // The multi-word phrase scores 8 + 2*3; the single keyword only 8.
    assert_eq!(dupes[0].account.name, "Camel Ride Specials");
}

#[test]
fn candidate_list_is_capped_at_eight() {
    let accounts: Vec<ChartOfAccount> = (0..12)
        .map(|i| {
            ChartOfAccount::new(
                &format!("9{:03}", i),
                &format!("Widget Account {}", i),
                AccountCategory::Expense,
                &["widget"],
            )
        })
        .collect();
    let chart = Chart::new(accounts);
    let parsed = parse_narration("Bought widget stock for 100");
    let matches = match_accounts(&parsed, &chart);
    assert_eq!(matches.len(), 8);
}

#[test]
fn non_matching_accounts_are_excluded() {
    let chart = reference_chart();
    let parsed = parse_narration("Paid electricity bill Rs 1800 in cash");
    let matches = match_accounts(&parsed, &chart);
    assert!(matches.iter().all(|m| m.score > 0));
    assert!(matches.len() <= 8);
}
