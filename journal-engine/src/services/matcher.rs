//! Account matcher: scores chart-of-accounts entries against a parsed
//! narration and returns a ranked candidate list.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{
    AccountCategory, Chart, ChartOfAccount, ParsedNarration, PaymentMode, TransactionType,
};

/// Maximum number of candidates returned.
const MAX_CANDIDATES: usize = 8;

/// A candidate account with its accumulated score.
#[derive(Debug, Clone)]
pub struct MatchedAccount {
    pub account: ChartOfAccount,
    pub score: i32,
}

/// Score every account in the chart against the parsed narration.
///
/// Candidates are deduplicated by account code (highest score wins), sorted by
/// descending score with the code as a stable tiebreak, and capped at 8.
/// Accounts with a non-positive score are dropped.
pub fn match_accounts(parsed: &ParsedNarration, chart: &Chart) -> Vec<MatchedAccount> {
    let lower = parsed.original_text.to_lowercase();
    let mut scores: HashMap<usize, i32> = HashMap::new();

    // Keyword pass over the inverted index: only keywords present in the
    // narration touch their accounts.
    for (keyword, indices) in chart.keyword_index() {
        if !lower.contains(keyword.as_str()) {
            continue;
        }
        let words = keyword.split_whitespace().count() as i32;
        // Multi-word phrases earn a specificity bonus on top of the base.
        let points = 8 + if words > 1 { 2 * words } else { 0 };
        for &idx in indices {
            *scores.entry(idx).or_insert(0) += points;
        }
    }

    for (idx, account) in chart.accounts().iter().enumerate() {
        let adjust = context_adjustment(parsed, &lower, account);
        if adjust != 0 {
            *scores.entry(idx).or_insert(0) += adjust;
        }
    }

    let mut best_by_code: HashMap<&str, MatchedAccount> = HashMap::new();
    for (idx, score) in scores {
        if score <= 0 {
            continue;
        }
        let account = &chart.accounts()[idx];
        match best_by_code.get(account.code.as_str()) {
            Some(existing) if existing.score >= score => {}
            _ => {
                best_by_code.insert(
                    account.code.as_str(),
                    MatchedAccount {
                        account: account.clone(),
                        score,
                    },
                );
            }
        }
    }

    let mut ranked: Vec<MatchedAccount> = best_by_code.into_values().collect();
    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.account.code.cmp(&b.account.code))
    });
    ranked.truncate(MAX_CANDIDATES);

    debug!(candidates = ranked.len(), "account matching complete");
    ranked
}

/// The best-ranked candidate of a given category, if any.
pub fn best_of_category<'a>(
    matches: &'a [MatchedAccount],
    category: AccountCategory,
) -> Option<&'a MatchedAccount> {
    matches.iter().find(|m| m.account.category == category)
}

/// The best-ranked income-like candidate (Income, Revenue or Other-Income).
pub fn best_income<'a>(matches: &'a [MatchedAccount]) -> Option<&'a MatchedAccount> {
    matches.iter().find(|m| m.account.category.is_income_like())
}

fn name_has(account: &ChartOfAccount, tokens: &[&str]) -> bool {
    let name = account.name.to_lowercase();
    tokens.iter().any(|t| name.contains(t))
}

/// Context rules: flag- and phrase-driven score nudges on top of keyword hits.
fn context_adjustment(parsed: &ParsedNarration, lower: &str, account: &ChartOfAccount) -> i32 {
    let mut adjust = 0;

    let split_personal = parsed
        .personal_percentage
        .map(|p| p > rust_decimal::Decimal::ZERO && p < rust_decimal::Decimal::ONE_HUNDRED)
        .unwrap_or(false);

    if parsed.is_advance || parsed.is_prepaid {
        if account.category == AccountCategory::Asset && name_has(account, &["prepaid", "advance"])
        {
            adjust += 25;
            if name_has(account, &["rent", "salary"])
                && (lower.contains("rent") || lower.contains("salary"))
            {
                adjust += 35;
            }
        }
        if account.category == AccountCategory::Expense {
            // Suppress premature expensing of prepayments.
            adjust -= 18;
        }
    } else if parsed.is_outstanding {
        if account.category == AccountCategory::Liability
            && name_has(account, &["outstanding", "accrued"])
        {
            adjust += 25;
            if name_has(account, &["rent", "salary"])
                && (lower.contains("rent") || lower.contains("salary"))
            {
                adjust += 35;
            }
        }
        if account.category == AccountCategory::Expense {
            adjust -= 18;
        }
    } else if parsed.is_personal {
        if account.category == AccountCategory::Equity && name_has(account, &["drawings"]) {
            adjust += 50;
        }
        // A stated split still needs the expense account for the business
        // share; only fully-personal narrations suppress expenses.
        if account.category == AccountCategory::Expense && !split_personal {
            adjust -= 35;
        }
    } else {
        // Mild type bias when no overriding flag applies.
        match parsed.transaction_type {
            TransactionType::Purchase | TransactionType::Expense => {
                if account.category == AccountCategory::Expense {
                    adjust += 5;
                }
            }
            TransactionType::Sale | TransactionType::Income => {
                if account.category.is_income_like() {
                    adjust += 5;
                }
            }
            _ => {}
        }
    }

    if let Some(mode) = parsed.payment_mode {
        let token = match mode {
            PaymentMode::Cash => Some("cash"),
            PaymentMode::Bank => Some("bank"),
            PaymentMode::Upi => Some("upi"),
            _ => None,
        };
        if let Some(token) = token {
            if name_has(account, &[token]) {
                adjust += 10;
            }
        }
    }

    adjust + domain_adjustment(parsed, lower, account)
}

/// Narrow disambiguation rules for common keyword collisions.
fn domain_adjustment(parsed: &ParsedNarration, lower: &str, account: &ChartOfAccount) -> i32 {
    let mut adjust = 0;

    // Outward freight is a selling expense, not a purchase.
    if lower.contains("delivery") || lower.contains("freight outward") {
        if name_has(account, &["freight", "delivery", "carriage outward"]) {
            adjust += 20;
        }
        if name_has(account, &["purchase"]) {
            adjust -= 15;
        }
    }

    // "salary" must never resolve to stationery or office accounts.
    if lower.contains("salary") || lower.contains("wages") {
        if name_has(account, &["salar", "wage"]) {
            adjust += 25;
        }
        if name_has(account, &["stationery", "office"]) {
            adjust -= 30;
        }
    }

    if lower.contains("electricity") || lower.contains("power bill") {
        if name_has(account, &["electricity", "power"]) {
            adjust += 25;
        }
    }

    if lower.contains("carriage inward") || lower.contains("freight inward") {
        if name_has(account, &["carriage inward", "freight inward"]) {
            adjust += 20;
        }
        if name_has(account, &["freight outward", "carriage outward"]) {
            adjust -= 20;
        }
    }

    if lower.contains("bank charges") && name_has(account, &["bank charges"]) {
        adjust += 25;
    }

    if lower.contains("insurance") {
        let wants_prepaid = parsed.is_advance || parsed.is_prepaid;
        if name_has(account, &["prepaid insurance"]) {
            adjust += if wants_prepaid { 30 } else { -12 };
        } else if name_has(account, &["insurance"]) && !wants_prepaid {
            adjust += 20;
        }
    }

    if lower.contains("rent") {
        let wants_prepaid = parsed.is_advance || parsed.is_prepaid;
        let wants_outstanding = parsed.is_outstanding;
        if name_has(account, &["prepaid rent"]) {
            adjust += if wants_prepaid { 35 } else { -12 };
        } else if name_has(account, &["outstanding rent"]) {
            adjust += if wants_outstanding { 35 } else { -12 };
        } else if name_has(account, &["rent"]) && !wants_prepaid && !wants_outstanding {
            adjust += 20;
        }
    }

    if (lower.contains("professional") || lower.contains("legal") || lower.contains("audit"))
        && name_has(account, &["professional", "legal", "audit"])
    {
        adjust += 20;
    }

    if (lower.contains("postage") || lower.contains("courier"))
        && name_has(account, &["postage", "courier"])
    {
        adjust += 20;
    }

    // Plain goods purchases bias toward the COGS purchases account.
    if lower.contains("purchase") && !lower.contains("purchase return") {
        if name_has(account, &["purchases"]) && account.category == AccountCategory::Expense {
            adjust += 15;
        }
    }

    adjust
}
