//! Narration parser: free text in, structured intent out.
//!
//! Parsing never fails. Every extraction is independent and optional; missing
//! data lowers the confidence score instead of producing an error.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::models::{ParsedNarration, PaymentMode, TransactionType};

static AMOUNT_PREFIXED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:rs\.?|inr|₹)\s*([0-9][0-9,]*(?:\.[0-9]+)?)").unwrap());
static AMOUNT_SUFFIXED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9][0-9,]*(?:\.[0-9]+)?)\s*(?:rupees|rs\b|/-)").unwrap());
static AMOUNT_LABELLED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)amount\s*[:=]?\s*(?:rs\.?\s*)?([0-9][0-9,]*(?:\.[0-9]+)?)").unwrap()
});
static AMOUNT_BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9][0-9,]*(?:\.[0-9]+)?)(\s*%)?").unwrap());

static PCT_BEFORE_PERSONAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]{1,3})\s*%\s*personal").unwrap());
static PERSONAL_THEN_PCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)personal(?:\s+use)?\s*(?:of\s*)?([0-9]{1,3})\s*%").unwrap());
static PCT_BEFORE_BUSINESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]{1,3})\s*%\s*business").unwrap());
static BUSINESS_THEN_PCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)business(?:\s+use)?\s*(?:of\s*)?([0-9]{1,3})\s*%").unwrap());

static COUNTERPARTY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:paid to|received from|\bto\b|\bfrom\b)\s+([A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*)")
        .unwrap()
});

const ADVANCE_KEYWORDS: &[&str] = &["advance", "token money"];
const PREPAID_KEYWORDS: &[&str] = &["prepaid", "pre-paid", "paid in advance"];
const OUTSTANDING_KEYWORDS: &[&str] = &[
    "outstanding",
    "unpaid",
    "payable",
    "accrued",
    "yet to pay",
    "not yet paid",
];
const PERSONAL_KEYWORDS: &[&str] = &["personal", "own use", "household", "domestic use"];

const SALES_RETURN_KEYWORDS: &[&str] = &[
    "sales return",
    "return inward",
    "returned by",
    "customer returned",
    "goods returned by",
];
const PURCHASE_RETURN_KEYWORDS: &[&str] = &[
    "purchase return",
    "return outward",
    "returned to",
    "returned goods to",
];
const SALE_KEYWORDS: &[&str] = &["sold", "sale", "sales"];
const PURCHASE_KEYWORDS: &[&str] = &["purchased", "purchase", "bought", "procured"];
const PAYMENT_KEYWORDS: &[&str] = &[
    "paid to",
    "payment to",
    "payment made",
    "settled",
    "cleared dues",
];
const RECEIPT_KEYWORDS: &[&str] = &["received", "receipt", "collected"];
const EXPENSE_KEYWORDS: &[&str] = &[
    "expense",
    "bill",
    "charges",
    "fees",
    "fee",
    "rent",
    "salary",
    "wages",
    "electricity",
    "stationery",
    "insurance",
    "maintenance",
    "repairs",
    "fuel",
    "travel",
    "telephone",
    "internet",
    "postage",
    "courier",
    "freight",
    "subscription",
];
const INCOME_KEYWORDS: &[&str] = &["income", "commission", "interest", "dividend", "earned"];

const DESCRIPTION_STOP_WORDS: &[&str] = &[
    "paid", "received", "purchased", "bought", "sold", "to", "from", "for", "the", "a", "an",
    "in", "by", "of", "on", "rs", "rs.", "inr", "with", "and", "worth", "including", "excluding",
    "gst", "tax", "via", "at", "use", "personal", "business", "cash", "bank", "upi", "cheque",
    "neft", "rtgs", "credit", "amount",
];

/// Indian state names and their GST state codes.
const STATES: &[(&str, &str)] = &[
    ("andhra pradesh", "AP"),
    ("assam", "AS"),
    ("bihar", "BR"),
    ("delhi", "DL"),
    ("goa", "GA"),
    ("gujarat", "GJ"),
    ("haryana", "HR"),
    ("karnataka", "KA"),
    ("kerala", "KL"),
    ("madhya pradesh", "MP"),
    ("maharashtra", "MH"),
    ("odisha", "OD"),
    ("punjab", "PB"),
    ("rajasthan", "RJ"),
    ("tamil nadu", "TN"),
    ("telangana", "TS"),
    ("uttar pradesh", "UP"),
    ("west bengal", "WB"),
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Parse a free-text narration into a structured intent record.
pub fn parse_narration(text: &str) -> ParsedNarration {
    let lower = text.to_lowercase();
    let mut confidence: f64 = 0.5;

    let amount = extract_amount(&lower);
    if amount.is_some() {
        confidence += 0.2;
    } else {
        confidence -= 0.2;
        debug!("no amount found in narration");
    }

    let is_advance = contains_any(&lower, ADVANCE_KEYWORDS);
    let is_prepaid = contains_any(&lower, PREPAID_KEYWORDS);
    let is_outstanding = contains_any(&lower, OUTSTANDING_KEYWORDS);

    let personal_percentage = extract_personal_percentage(&lower);
    let is_personal = personal_percentage.is_some() || contains_any(&lower, PERSONAL_KEYWORDS);
    if personal_percentage.is_some() {
        // An explicit split is stronger evidence than a bare keyword.
        confidence += 0.1;
    } else if is_personal {
        confidence -= 0.05;
    }

    let (transaction_type, via_keyword) =
        detect_transaction_type(&lower, is_advance, is_prepaid, is_outstanding);
    confidence += via_keyword;

    let payment_mode = detect_payment_mode(&lower);
    if payment_mode.is_some() {
        confidence += 0.1;
    }

    ParsedNarration {
        transaction_type,
        amount,
        payment_mode,
        item_description: extract_item_description(&lower),
        counterparty: extract_counterparty(text),
        state_code: extract_state_code(&lower),
        original_text: text.to_string(),
        confidence: confidence.clamp(0.0, 1.0),
        is_advance,
        is_prepaid,
        is_outstanding,
        is_personal,
        personal_percentage,
    }
}

/// Amount extraction tries currency-prefixed, currency-suffixed, labelled,
/// then bare-number patterns; the first value in (0, 1e9) wins.
fn extract_amount(lower: &str) -> Option<Decimal> {
    for pattern in [&*AMOUNT_PREFIXED, &*AMOUNT_SUFFIXED, &*AMOUNT_LABELLED] {
        if let Some(captures) = pattern.captures(lower) {
            if let Some(value) = parse_money(&captures[1]) {
                return Some(value);
            }
        }
    }
    // Bare numbers, skipping percentages like "18%".
    for captures in AMOUNT_BARE.captures_iter(lower) {
        if captures.get(2).is_some() {
            continue;
        }
        if let Some(value) = parse_money(&captures[1]) {
            return Some(value);
        }
    }
    None
}

fn parse_money(raw: &str) -> Option<Decimal> {
    let cleaned = raw.replace(',', "");
    let value = Decimal::from_str(&cleaned).ok()?;
    if value > Decimal::ZERO && value < Decimal::from(1_000_000_000u64) {
        Some(value)
    } else {
        None
    }
}

/// An explicit "N% personal" / "N% business" split, when stated.
fn extract_personal_percentage(lower: &str) -> Option<Decimal> {
    let personal = PCT_BEFORE_PERSONAL
        .captures(lower)
        .or_else(|| PERSONAL_THEN_PCT.captures(lower))
        .and_then(|c| Decimal::from_str(&c[1]).ok());
    let from_business = PCT_BEFORE_BUSINESS
        .captures(lower)
        .or_else(|| BUSINESS_THEN_PCT.captures(lower))
        .and_then(|c| Decimal::from_str(&c[1]).ok())
        .map(|b| Decimal::ONE_HUNDRED - b);

    personal
        .or(from_business)
        .filter(|p| *p >= Decimal::ZERO && *p <= Decimal::ONE_HUNDRED)
}

/// Priority-ordered transaction type detection. Returns the type and the
/// confidence adjustment for how it was decided.
fn detect_transaction_type(
    lower: &str,
    is_advance: bool,
    is_prepaid: bool,
    is_outstanding: bool,
) -> (TransactionType, f64) {
    // Flags override keyword sets; rent narrations map to prepaid.
    if is_advance || is_prepaid {
        let kind = if lower.contains("rent") || is_prepaid {
            TransactionType::Prepaid
        } else {
            TransactionType::Advance
        };
        return (kind, 0.2);
    }
    if is_outstanding {
        return (TransactionType::Outstanding, 0.2);
    }

    // Returns must win over plain sales/purchases.
    if contains_any(lower, SALES_RETURN_KEYWORDS) {
        return (TransactionType::SalesReturn, 0.2);
    }
    if contains_any(lower, PURCHASE_RETURN_KEYWORDS) {
        return (TransactionType::PurchaseReturn, 0.2);
    }
    if contains_any(lower, SALE_KEYWORDS) {
        return (TransactionType::Sale, 0.2);
    }
    if contains_any(lower, PURCHASE_KEYWORDS) {
        return (TransactionType::Purchase, 0.2);
    }
    if contains_any(lower, PAYMENT_KEYWORDS) {
        return (TransactionType::Payment, 0.2);
    }
    if contains_any(lower, RECEIPT_KEYWORDS) {
        return (TransactionType::Receipt, 0.2);
    }
    if contains_any(lower, EXPENSE_KEYWORDS) {
        return (TransactionType::Expense, 0.2);
    }
    if contains_any(lower, INCOME_KEYWORDS) {
        return (TransactionType::Income, 0.2);
    }

    // Preposition fallback, then expense as the last resort.
    if lower.contains("from ") || lower.contains(" by ") {
        return (TransactionType::Receipt, 0.05);
    }
    if lower.contains(" to ") || lower.contains(" for ") {
        return (TransactionType::Payment, 0.05);
    }
    (TransactionType::Expense, 0.0)
}

fn detect_payment_mode(lower: &str) -> Option<PaymentMode> {
    if lower.contains("cheque") || lower.contains("check no") {
        Some(PaymentMode::Cheque)
    } else if lower.contains("neft") {
        Some(PaymentMode::Neft)
    } else if lower.contains("rtgs") {
        Some(PaymentMode::Rtgs)
    } else if contains_any(lower, &["upi", "gpay", "google pay", "paytm", "phonepe"]) {
        Some(PaymentMode::Upi)
    } else if lower.contains("credit") {
        Some(PaymentMode::Credit)
    } else if lower.contains("cash") {
        Some(PaymentMode::Cash)
    } else if contains_any(lower, &["bank", "net banking", "online transfer", "imps"]) {
        Some(PaymentMode::Bank)
    } else {
        None
    }
}

/// Capitalized word span following "to"/"from"/"paid to"/"received from".
fn extract_counterparty(text: &str) -> Option<String> {
    let captures = COUNTERPARTY.captures(text)?;
    let name = captures[1].trim().to_string();
    let first = name.split_whitespace().next()?;
    // Currency and tax tokens are capitalized too; they are not names.
    if matches!(first, "Rs" | "Rs." | "INR" | "GST" | "Cash" | "Bank" | "UPI") {
        return None;
    }
    Some(name)
}

fn extract_state_code(lower: &str) -> Option<String> {
    STATES
        .iter()
        .find(|(name, _)| lower.contains(name))
        .map(|(_, code)| code.to_string())
}

/// Item/service text: the narration minus amounts, percentages and stop words.
fn extract_item_description(lower: &str) -> Option<String> {
    let mut stripped = AMOUNT_PREFIXED.replace_all(lower, " ").to_string();
    stripped = AMOUNT_BARE.replace_all(&stripped, " ").to_string();

    let words: Vec<&str> = stripped
        .split_whitespace()
        .filter(|w| {
            let cleaned = w.trim_matches(|c: char| !c.is_alphanumeric());
            !cleaned.is_empty()
                && !DESCRIPTION_STOP_WORDS.contains(&cleaned)
                && cleaned.chars().any(|c| c.is_alphabetic())
        })
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_prefers_currency_prefix() {
        // The bare 18 must not win over the prefixed 11800.
        let lower = "sold goods worth rs 11800 including gst 18% to ramesh".to_lowercase();
        assert_eq!(extract_amount(&lower), Some(Decimal::from(11800)));
    }

    #[test]
    fn amount_skips_percentages() {
        assert_eq!(
            extract_amount("office rent 20000 personal use 40%"),
            Some(Decimal::from(20000))
        );
    }

    #[test]
    fn amount_handles_commas_and_suffix() {
        assert_eq!(
            extract_amount("paid 1,80,000/- for machinery"),
            Some(Decimal::from(180000))
        );
    }

    #[test]
    fn amount_rejects_out_of_range() {
        assert_eq!(extract_amount("paid rs 0 for nothing"), None);
    }

    #[test]
    fn personal_percentage_from_business_share() {
        assert_eq!(
            extract_personal_percentage("laptop 60% business use"),
            Some(Decimal::from(40))
        );
    }

    #[test]
    fn state_lookup_is_substring_based() {
        assert_eq!(
            extract_state_code("sold goods to a dealer in tamil nadu"),
            Some("TN".to_string())
        );
        assert_eq!(extract_state_code("sold goods locally"), None);
    }

    #[test]
    fn counterparty_ignores_currency_tokens() {
        assert_eq!(extract_counterparty("goods sold to Rs 500"), None);
        assert_eq!(
            extract_counterparty("received from Sharma Traders"),
            Some("Sharma Traders".to_string())
        );
    }
}
