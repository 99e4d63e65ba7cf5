//! Journal entry model for double-entry output.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::account::AccountCategory;
use crate::models::gst::GstDetails;
use crate::models::narration::{PaymentMode, TransactionType};

/// Two debits and credits within this tolerance are considered equal.
pub const BALANCE_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Entry direction (debit or credit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Voucher classification for downstream bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherType {
    Payment,
    Receipt,
    Journal,
    Sales,
    Purchase,
}

impl VoucherType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoucherType::Payment => "payment",
            VoucherType::Receipt => "receipt",
            VoucherType::Journal => "journal",
            VoucherType::Sales => "sales",
            VoucherType::Purchase => "purchase",
        }
    }
}

impl std::fmt::Display for VoucherType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ledger line. Amounts are always positive; `direction` carries the sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountEntry {
    pub account_code: String,
    pub account_name: String,
    pub account_category: AccountCategory,
    pub amount: Decimal,
    pub direction: Direction,
    pub narration: String,
    pub gst: Option<GstDetails>,
    /// Free-form caller annotations, passed through to persistence untouched.
    pub metadata: Option<serde_json::Value>,
}

impl AccountEntry {
    /// Signed amount: positive for debit, negative for credit.
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Debit => self.amount,
            Direction::Credit => -self.amount,
        }
    }
}

/// Pipeline metadata carried on a generated entry for display purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub confidence: f64,
    pub transaction_type: TransactionType,
    pub suggested_accounts: Vec<String>,
}

/// The output aggregate: an ordered set of ledger lines with derived totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub voucher_type: VoucherType,
    pub date: NaiveDate,
    pub narration: String,
    pub entries: Vec<AccountEntry>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub is_balanced: bool,
    pub gst: Option<GstDetails>,
    pub counterparty: Option<String>,
    pub payment_mode: Option<PaymentMode>,
    pub metadata: EntryMetadata,
}

impl JournalEntry {
    /// Recompute totals and the balanced flag from the current lines.
    pub fn recompute_totals(&mut self) {
        self.total_debit = self
            .entries
            .iter()
            .filter(|e| e.direction == Direction::Debit)
            .map(|e| e.amount)
            .sum();
        self.total_credit = self
            .entries
            .iter()
            .filter(|e| e.direction == Direction::Credit)
            .map(|e| e.amount)
            .sum();
        self.is_balanced = (self.total_debit - self.total_credit).abs() < BALANCE_EPSILON;
    }
}
