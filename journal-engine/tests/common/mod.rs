//! Shared test fixtures.

use chrono::NaiveDate;
use journal_engine::defaults::{reference_chart, reference_tax_config};
use journal_engine::JournalEngine;

pub fn engine() -> JournalEngine {
    JournalEngine::new(reference_chart(), reference_tax_config())
}

pub fn entry_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
}
