//! Tax configuration supplied by the caller on every invocation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::GstRegime;

/// GST configuration for one business.
///
/// `default_regime` and `sale_defaults_inclusive` capture heuristic defaults
/// (intra-state, and sale narrations treated as tax-inclusive) that are not
/// settled law; they are fields here so callers can override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Registered state code of the business, e.g. "MH".
    pub business_state: String,
    /// Composition-scheme dealers cannot claim input credit.
    pub composition_scheme: bool,
    /// Narration keywords for categories where input credit is blocked by law.
    pub blocked_credit_keywords: Vec<String>,
    /// Default rate (percent) for goods when no explicit rate appears.
    pub goods_rate: Decimal,
    /// Default rate (percent) for services when no explicit rate appears.
    pub services_rate: Decimal,
    /// Service keywords that attract reverse charge.
    pub rcm_service_keywords: Vec<String>,
    pub default_regime: GstRegime,
    pub sale_defaults_inclusive: bool,
}
