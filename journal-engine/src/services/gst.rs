//! GST detector: decides whether tax applies to a narration and computes the
//! taxable/tax split.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::config::TaxConfig;
use crate::models::{round_money, GstBreakup, GstDetails, GstRegime};

static RATE_AFTER_TAX_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:gst|igst|cgst|sgst|tax)\s*(?:@\s*)?([0-9]{1,2}(?:\.[0-9]+)?)\s*%?")
        .unwrap()
});
static RATE_BEFORE_TAX_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]{1,2}(?:\.[0-9]+)?)\s*%\s*(?:gst|igst|cgst|sgst|tax)").unwrap()
});

const TAX_KEYWORDS: &[&str] = &["gst", "cgst", "sgst", "igst", "tax"];
const INCLUSIVE_KEYWORDS: &[&str] = &["including", "inclusive", "incl.", "incl of"];
const EXCLUSIVE_KEYWORDS: &[&str] = &["excluding", "exclusive", "plus gst", "plus tax", "extra"];
const INTER_STATE_KEYWORDS: &[&str] = &[
    "igst",
    "interstate",
    "inter-state",
    "inter state",
    "outside state",
    "other state",
    "out of state",
];
const INTRA_STATE_KEYWORDS: &[&str] = &[
    "cgst",
    "sgst",
    "intrastate",
    "intra-state",
    "intra state",
    "same state",
    "within state",
    "local",
];
const SERVICE_KEYWORDS: &[&str] = &["service", "fees", "consulting", "professional"];
const SALE_KEYWORDS: &[&str] = &["sold", "sale", "sales"];
const RCM_KEYWORDS: &[&str] = &["reverse charge", "rcm"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Detect GST on a narration. Returns `None` when no tax keyword appears.
pub fn detect_gst(narration: &str, amount: Decimal, config: &TaxConfig) -> Option<GstDetails> {
    let lower = narration.to_lowercase();
    if !contains_any(&lower, TAX_KEYWORDS) {
        return None;
    }

    let rate = extract_rate(&lower).unwrap_or_else(|| {
        if contains_any(&lower, SERVICE_KEYWORDS) {
            config.services_rate
        } else {
            config.goods_rate
        }
    });

    let is_inclusive = if contains_any(&lower, INCLUSIVE_KEYWORDS) {
        true
    } else if contains_any(&lower, EXCLUSIVE_KEYWORDS) {
        false
    } else {
        contains_any(&lower, SALE_KEYWORDS) && config.sale_defaults_inclusive
    };

    let regime = if contains_any(&lower, INTER_STATE_KEYWORDS) {
        GstRegime::InterState
    } else if contains_any(&lower, INTRA_STATE_KEYWORDS) {
        GstRegime::IntraState
    } else {
        config.default_regime
    };

    let rate_factor = Decimal::ONE + rate / Decimal::ONE_HUNDRED;
    let (taxable_value, total_tax, total_amount) = if is_inclusive {
        let taxable = round_money(amount / rate_factor);
        (taxable, amount - taxable, amount)
    } else {
        let tax = round_money(amount * rate / Decimal::ONE_HUNDRED);
        (amount, tax, amount + tax)
    };

    let reverse_charge = contains_any(&lower, RCM_KEYWORDS)
        || config
            .rcm_service_keywords
            .iter()
            .any(|k| lower.contains(&k.to_lowercase()));

    // Credit survives reverse charge (claimable once self-tax is remitted)
    // but not composition dealers or blocked categories.
    let blocked_reason = blocked_credit_reason(&lower, config);
    let itc_eligible = !config.composition_scheme && blocked_reason.is_none();

    debug!(
        rate = %rate,
        inclusive = is_inclusive,
        regime = %regime,
        "gst detected"
    );

    Some(GstDetails {
        rate,
        is_inclusive,
        taxable_value,
        breakup: GstBreakup::split(regime, total_tax),
        total_tax,
        total_amount,
        reverse_charge,
        itc_eligible,
        blocked_reason,
    })
}

/// Explicit rate token like "GST 18", "gst @ 12%" or "5% tax".
fn extract_rate(lower: &str) -> Option<Decimal> {
    RATE_AFTER_TAX_WORD
        .captures(lower)
        .or_else(|| RATE_BEFORE_TAX_WORD.captures(lower))
        .and_then(|c| Decimal::from_str(&c[1]).ok())
        .filter(|r| *r > Decimal::ZERO && *r <= Decimal::from(50))
}

fn blocked_credit_reason(lower: &str, config: &TaxConfig) -> Option<String> {
    if config.composition_scheme {
        return Some("composition scheme dealers cannot claim input credit".to_string());
    }
    config
        .blocked_credit_keywords
        .iter()
        .find(|k| lower.contains(&k.to_lowercase()))
        .map(|k| format!("input credit blocked for category: {}", k))
}
