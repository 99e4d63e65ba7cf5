//! Parsed narration model: the structured intent extracted from free text.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction types the engine can recognize and generate entries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Purchase,
    Sale,
    Payment,
    Receipt,
    Expense,
    Income,
    Transfer,
    Adjustment,
    Advance,
    Prepaid,
    Outstanding,
    Accrued,
    SalesReturn,
    PurchaseReturn,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Purchase => "purchase",
            TransactionType::Sale => "sale",
            TransactionType::Payment => "payment",
            TransactionType::Receipt => "receipt",
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
            TransactionType::Transfer => "transfer",
            TransactionType::Adjustment => "adjustment",
            TransactionType::Advance => "advance",
            TransactionType::Prepaid => "prepaid",
            TransactionType::Outstanding => "outstanding",
            TransactionType::Accrued => "accrued",
            TransactionType::SalesReturn => "sales_return",
            TransactionType::PurchaseReturn => "purchase_return",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the transaction was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Cash,
    Bank,
    Upi,
    Credit,
    Cheque,
    Neft,
    Rtgs,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Bank => "bank",
            PaymentMode::Upi => "upi",
            PaymentMode::Credit => "credit",
            PaymentMode::Cheque => "cheque",
            PaymentMode::Neft => "neft",
            PaymentMode::Rtgs => "rtgs",
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured intent extracted from a free-text narration.
///
/// Parsing never fails: missing data lowers `confidence` instead of erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedNarration {
    pub transaction_type: TransactionType,
    pub amount: Option<Decimal>,
    pub payment_mode: Option<PaymentMode>,
    pub item_description: Option<String>,
    pub counterparty: Option<String>,
    pub state_code: Option<String>,
    pub original_text: String,
    /// Confidence in the extraction, clamped to [0, 1].
    pub confidence: f64,
    pub is_advance: bool,
    pub is_prepaid: bool,
    pub is_outstanding: bool,
    pub is_personal: bool,
    /// Explicit personal-use percentage in [0, 100], when stated in the text.
    pub personal_percentage: Option<Decimal>,
}

impl ParsedNarration {
    /// Business share of a personal-use split: 100 minus the personal share.
    pub fn business_percentage(&self) -> Option<Decimal> {
        self.personal_percentage
            .map(|p| Decimal::ONE_HUNDRED - p)
    }

    /// Effective personal percentage: the explicit value, or 100 when the
    /// narration is flagged personal without a stated split.
    pub fn effective_personal_percentage(&self) -> Option<Decimal> {
        match self.personal_percentage {
            Some(p) => Some(p),
            None if self.is_personal => Some(Decimal::ONE_HUNDRED),
            None => None,
        }
    }
}
