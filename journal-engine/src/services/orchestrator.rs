//! Orchestrator: composes the parser, GST detector, matcher and generator,
//! and exposes validation and entry-mutation operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::config::TaxConfig;
use crate::models::{
    Chart, Direction, EntryMetadata, GstDetails, JournalEntry, ParsedNarration, PaymentMode,
    TransactionType, VoucherType,
};
use crate::services::generator::{apply_gst_to_entry, generate_entries};
use crate::services::matcher::{match_accounts, MatchedAccount};
use crate::services::parser::parse_narration;

/// Warnings are raised below this parser confidence.
const LOW_CONFIDENCE: f64 = 0.7;

/// Result of processing one narration. Errors are blocking; warnings are
/// advisory and the caller may proceed after acknowledging them.
#[derive(Debug, Clone)]
pub struct ParsingResult {
    pub parsed: ParsedNarration,
    pub accounts: Vec<MatchedAccount>,
    pub suggested_voucher: VoucherType,
    pub gst: Option<GstDetails>,
    pub entry: Option<JournalEntry>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ParsingResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty() && self.entry.is_some()
    }
}

/// Structural validation outcome for a journal entry.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Caller-supplied overrides for one ledger line, addressed by position.
#[derive(Debug, Clone, Default)]
pub struct LineEdit {
    pub index: usize,
    pub account_code: Option<String>,
    pub amount: Option<Decimal>,
    pub direction: Option<Direction>,
    pub narration: Option<String>,
}

/// Caller-supplied overrides for a journal entry. Applying the same edits
/// twice yields the same entry as applying them once.
#[derive(Debug, Clone, Default)]
pub struct EntryEdits {
    pub voucher_type: Option<VoucherType>,
    pub date: Option<NaiveDate>,
    pub narration: Option<String>,
    pub line_edits: Vec<LineEdit>,
}

/// The engine: a stateless pipeline over a caller-supplied chart of accounts
/// and tax configuration. Both are read-only; the engine keeps no state
/// between calls and is safe to share across threads.
#[derive(Debug, Clone)]
pub struct JournalEngine {
    chart: Chart,
    tax_config: TaxConfig,
}

impl JournalEngine {
    pub fn new(chart: Chart, tax_config: TaxConfig) -> Self {
        Self { chart, tax_config }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn tax_config(&self) -> &TaxConfig {
        &self.tax_config
    }

    /// Run the full pipeline on one narration.
    #[instrument(skip(self, narration), fields(narration_len = narration.len()))]
    pub fn process_narration(&self, narration: &str, date: NaiveDate) -> ParsingResult {
        let parsed = parse_narration(narration);
        let accounts = match_accounts(&parsed, &self.chart);
        let suggested_voucher = suggest_voucher(&parsed);

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if parsed.confidence < LOW_CONFIDENCE {
            warnings.push(format!(
                "Low parsing confidence ({:.2}); review the entry before saving",
                parsed.confidence
            ));
        }
        if parsed.payment_mode.is_none() {
            warnings.push("No payment mode detected; defaulting to cash".to_string());
        }

        let Some(amount) = parsed.amount else {
            errors.push("Amount not found in narration".to_string());
            return ParsingResult {
                parsed,
                accounts,
                suggested_voucher,
                gst: None,
                entry: None,
                errors,
                warnings,
            };
        };

        let gst = crate::services::gst::detect_gst(narration, amount, &self.tax_config);
        if let Some(g) = &gst {
            if let Some(reason) = &g.blocked_reason {
                warnings.push(format!("Input tax credit not claimable: {}", reason));
            }
            if g.reverse_charge {
                warnings.push(
                    "Reverse charge applies: the recipient must remit the GST".to_string(),
                );
            }
        }

        let entry = match generate_entries(&parsed, gst.as_ref(), &accounts, &self.chart) {
            Ok(lines) => {
                let mut entry = JournalEntry {
                    voucher_type: suggested_voucher,
                    date,
                    narration: narration.to_string(),
                    entries: lines,
                    total_debit: Decimal::ZERO,
                    total_credit: Decimal::ZERO,
                    is_balanced: false,
                    gst: gst.clone(),
                    counterparty: parsed.counterparty.clone(),
                    payment_mode: parsed.payment_mode,
                    metadata: EntryMetadata {
                        confidence: parsed.confidence,
                        transaction_type: parsed.transaction_type,
                        suggested_accounts: accounts
                            .iter()
                            .map(|m| m.account.name.clone())
                            .collect(),
                    },
                };
                entry.recompute_totals();
                if !entry.is_balanced {
                    warnings.push(format!(
                        "Generated entry is not balanced: debit {} vs credit {}",
                        entry.total_debit, entry.total_credit
                    ));
                }
                Some(entry)
            }
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        };

        info!(
            transaction_type = %parsed.transaction_type,
            errors = errors.len(),
            warnings = warnings.len(),
            "narration processed"
        );

        ParsingResult {
            parsed,
            accounts,
            suggested_voucher,
            gst,
            entry,
            errors,
            warnings,
        }
    }

    /// Structural validation of an entry before hand-off to persistence.
    /// Never fails; problems come back as error strings.
    pub fn validate_journal_entry(&self, entry: &JournalEntry) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if entry.entries.len() < 2 {
            errors.push("Entry must have at least two lines".to_string());
        }

        let total_debit: Decimal = entry
            .entries
            .iter()
            .filter(|e| e.direction == Direction::Debit)
            .map(|e| e.amount)
            .sum();
        let total_credit: Decimal = entry
            .entries
            .iter()
            .filter(|e| e.direction == Direction::Credit)
            .map(|e| e.amount)
            .sum();

        if (total_debit - total_credit).abs() >= crate::models::BALANCE_EPSILON {
            errors.push(format!(
                "Entry is not balanced: debit {} vs credit {}",
                total_debit, total_credit
            ));
        }
        if !entry.entries.iter().any(|e| e.direction == Direction::Debit) {
            errors.push("Entry has no debit line".to_string());
        }
        if !entry.entries.iter().any(|e| e.direction == Direction::Credit) {
            errors.push("Entry has no credit line".to_string());
        }
        for (idx, line) in entry.entries.iter().enumerate() {
            if line.amount <= Decimal::ZERO {
                errors.push(format!(
                    "Line {} ({}) has a non-positive amount",
                    idx + 1,
                    line.account_name
                ));
            }
        }

        if let Some(g) = &entry.gst {
            if let Some(reason) = &g.blocked_reason {
                warnings.push(format!("Input tax credit not claimable: {}", reason));
            }
            if g.reverse_charge {
                warnings.push(
                    "Reverse charge applies: the recipient must remit the GST".to_string(),
                );
            }
        }

        ValidationReport { errors, warnings }
    }

    /// Apply caller edits to an entry. Pure: the input entry is untouched and
    /// the returned entry has recomputed totals.
    pub fn apply_user_edits(&self, entry: &JournalEntry, edits: &EntryEdits) -> JournalEntry {
        let mut out = entry.clone();

        if let Some(voucher_type) = edits.voucher_type {
            out.voucher_type = voucher_type;
        }
        if let Some(date) = edits.date {
            out.date = date;
        }
        if let Some(narration) = &edits.narration {
            out.narration = narration.clone();
        }

        for edit in &edits.line_edits {
            let Some(target) = out.entries.get_mut(edit.index) else {
                continue;
            };
            if let Some(code) = &edit.account_code {
                if let Some(account) = self.chart.find_by_code(code) {
                    target.account_code = account.code.clone();
                    target.account_name = account.name.clone();
                    target.account_category = account.category;
                } else {
                    target.account_code = code.clone();
                }
            }
            if let Some(amount) = edit.amount {
                target.amount = amount;
            }
            if let Some(direction) = edit.direction {
                target.direction = direction;
            }
            if let Some(narration) = &edit.narration {
                target.narration = narration.clone();
            }
        }

        out.recompute_totals();
        out
    }

    /// Attach or replace GST on an existing entry, rescaling its lines.
    pub fn apply_gst(&self, entry: &JournalEntry, gst: &GstDetails) -> JournalEntry {
        apply_gst_to_entry(entry, gst, &self.chart)
    }
}

/// Voucher classification suggested for a parsed narration.
pub fn suggest_voucher(parsed: &ParsedNarration) -> VoucherType {
    let on_credit = parsed.payment_mode == Some(PaymentMode::Credit)
        || (parsed.payment_mode.is_none() && parsed.counterparty.is_some());
    match parsed.transaction_type {
        TransactionType::Sale | TransactionType::Income => {
            if on_credit {
                VoucherType::Sales
            } else {
                VoucherType::Receipt
            }
        }
        TransactionType::Purchase => {
            if on_credit {
                VoucherType::Purchase
            } else {
                VoucherType::Payment
            }
        }
        TransactionType::Expense
        | TransactionType::Payment
        | TransactionType::Advance
        | TransactionType::Prepaid => VoucherType::Payment,
        TransactionType::Receipt => VoucherType::Receipt,
        TransactionType::Outstanding
        | TransactionType::Accrued
        | TransactionType::Transfer
        | TransactionType::Adjustment
        | TransactionType::SalesReturn
        | TransactionType::PurchaseReturn => VoucherType::Journal,
    }
}
