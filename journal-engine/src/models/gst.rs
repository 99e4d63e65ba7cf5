//! GST computation result model.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Round a monetary value to 2 decimal places, half-up.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Tax regime: intra-state splits into CGST+SGST, inter-state levies IGST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GstRegime {
    IntraState,
    InterState,
}

impl GstRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            GstRegime::IntraState => "intra_state",
            GstRegime::InterState => "inter_state",
        }
    }
}

impl std::fmt::Display for GstRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-component tax amounts. Exactly one variant is ever populated, so the
/// "never both CGST/SGST and IGST" invariant holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "regime")]
pub enum GstBreakup {
    IntraState { cgst: Decimal, sgst: Decimal },
    InterState { igst: Decimal },
}

impl GstBreakup {
    /// Split a total tax across components for the given regime.
    ///
    /// The intra-state SGST half takes the rounding remainder so the two
    /// components always sum back to `total_tax` exactly.
    pub fn split(regime: GstRegime, total_tax: Decimal) -> Self {
        match regime {
            GstRegime::IntraState => {
                let cgst = round_money(total_tax / Decimal::TWO);
                GstBreakup::IntraState {
                    cgst,
                    sgst: total_tax - cgst,
                }
            }
            GstRegime::InterState => GstBreakup::InterState { igst: total_tax },
        }
    }

    pub fn regime(&self) -> GstRegime {
        match self {
            GstBreakup::IntraState { .. } => GstRegime::IntraState,
            GstBreakup::InterState { .. } => GstRegime::InterState,
        }
    }

    pub fn total(&self) -> Decimal {
        match self {
            GstBreakup::IntraState { cgst, sgst } => *cgst + *sgst,
            GstBreakup::InterState { igst } => *igst,
        }
    }
}

/// Computed GST details for one transaction amount.
///
/// Invariant: `taxable_value + total_tax == total_amount` within 0.01.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GstDetails {
    /// Rate as a percentage, e.g. 18 for 18%.
    pub rate: Decimal,
    /// True when the narration amount already included tax.
    pub is_inclusive: bool,
    pub taxable_value: Decimal,
    pub breakup: GstBreakup,
    pub total_tax: Decimal,
    pub total_amount: Decimal,
    pub reverse_charge: bool,
    pub itc_eligible: bool,
    /// Why input credit is blocked, when it is.
    pub blocked_reason: Option<String>,
}

impl GstDetails {
    pub fn regime(&self) -> GstRegime {
        self.breakup.regime()
    }
}
