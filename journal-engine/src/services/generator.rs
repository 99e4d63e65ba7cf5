//! Entry generator: a state machine over the transaction type that turns the
//! parsed intent, tax details and matched accounts into balanced ledger lines.
//!
//! Every rule constructs a debit set and a credit set that sum to the same
//! total; rounding remainders always land on one designated line so the
//! balance holds exactly, not just within the epsilon.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::models::{
    round_money, AccountCategory, AccountEntry, AccountRole, Chart, ChartOfAccount, Direction,
    GstBreakup, GstDetails, JournalEntry, ParsedNarration, PaymentMode,
};
use crate::services::matcher::{best_income, best_of_category, MatchedAccount};

/// Generate the ledger lines for a parsed narration.
///
/// Fails only when the narration has no amount or the chart of accounts lacks
/// a required account role.
pub fn generate_entries(
    parsed: &ParsedNarration,
    gst: Option<&GstDetails>,
    matches: &[MatchedAccount],
    chart: &Chart,
) -> Result<Vec<AccountEntry>> {
    use crate::models::TransactionType::*;

    let entries = match parsed.transaction_type {
        Purchase | Expense => purchase_or_expense(parsed, gst, matches, chart, true)?,
        Sale | Income => sale_or_income(parsed, gst, matches, chart)?,
        SalesReturn => sales_return(parsed, gst, matches, chart)?,
        PurchaseReturn => purchase_return(parsed, gst, matches, chart)?,
        Payment => purchase_or_expense(parsed, gst, matches, chart, false)?,
        Receipt => receipt(parsed, matches, chart)?,
        Advance | Prepaid => prepaid(parsed, chart)?,
        Outstanding | Accrued => outstanding(parsed, matches, chart)?,
        // No dedicated rule; fall back to the payment shape.
        Transfer | Adjustment => purchase_or_expense(parsed, gst, matches, chart, false)?,
    };

    debug!(
        transaction_type = %parsed.transaction_type,
        lines = entries.len(),
        "entries generated"
    );
    Ok(entries)
}

fn line(
    account: &ChartOfAccount,
    amount: Decimal,
    direction: Direction,
    narration: &str,
) -> AccountEntry {
    AccountEntry {
        account_code: account.code.clone(),
        account_name: account.name.clone(),
        account_category: account.category,
        amount,
        direction,
        narration: narration.to_string(),
        gst: None,
        metadata: None,
    }
}

fn share_of(amount: Decimal, percentage: Decimal) -> Decimal {
    round_money(amount * percentage / Decimal::ONE_HUNDRED)
}

/// Tax component amounts paired with their posting accounts.
fn tax_component_lines(
    gst: &GstDetails,
    accounts: Vec<ChartOfAccount>,
    direction: Direction,
    narration: &str,
    share_pct: Option<Decimal>,
) -> Vec<AccountEntry> {
    let components: Vec<Decimal> = match gst.breakup {
        GstBreakup::IntraState { cgst, sgst } => vec![cgst, sgst],
        GstBreakup::InterState { igst } => vec![igst],
    };
    accounts
        .iter()
        .zip(components)
        .filter_map(|(account, component)| {
            let amount = match share_pct {
                Some(pct) => share_of(component, pct),
                None => component,
            };
            if amount > Decimal::ZERO {
                Some(line(account, amount, direction, narration))
            } else {
                None
            }
        })
        .collect()
}

/// Settlement account for the money side of the entry: creditors/debtors for
/// credit settlements, otherwise the payment-mode account with a cash default.
fn settlement_account(parsed: &ParsedNarration, chart: &Chart, receivable: bool) -> ChartOfAccount {
    let on_credit = parsed.payment_mode == Some(PaymentMode::Credit)
        || (receivable && parsed.payment_mode.is_none() && parsed.counterparty.is_some());
    if on_credit {
        if receivable {
            chart.debtor_account()
        } else {
            chart.creditor_account()
        }
    } else {
        chart.payment_account(parsed.payment_mode.unwrap_or(PaymentMode::Cash))
    }
}

/// Purchase, expense and payment rule. `consider_fixed_asset` lets capital
/// purchases debit the matched fixed-asset account; the payment rule skips it.
fn purchase_or_expense(
    parsed: &ParsedNarration,
    gst: Option<&GstDetails>,
    matches: &[MatchedAccount],
    chart: &Chart,
    consider_fixed_asset: bool,
) -> Result<Vec<AccountEntry>> {
    let amount = parsed.amount.ok_or(EngineError::AmountNotFound)?;
    let narration = parsed.original_text.as_str();

    let debit_target = if consider_fixed_asset {
        best_of_category(matches, AccountCategory::FixedAsset)
    } else {
        None
    }
    .or_else(|| best_of_category(matches, AccountCategory::Expense))
    .map(|m| m.account.clone())
    .or_else(|| chart.default_expense_account().cloned())
    .ok_or(EngineError::missing(AccountRole::Expense))?;

    let total = gst.map(|g| g.total_amount).unwrap_or(amount);
    let claim_credit = gst.map(|g| g.itc_eligible).unwrap_or(false);
    let mut entries = Vec::new();

    match parsed.effective_personal_percentage() {
        Some(p) if p >= Decimal::ONE_HUNDRED => {
            // Fully personal: the whole gross amount is a drawing. No input
            // credit is claimable on personal consumption.
            entries.push(line(
                &chart.drawings_account(),
                total,
                Direction::Debit,
                narration,
            ));
        }
        Some(p) if p > Decimal::ZERO => {
            let drawings_amount = share_of(total, p);
            let business_pct = Decimal::ONE_HUNDRED - p;

            let tax_lines = match gst {
                Some(g) if claim_credit => tax_component_lines(
                    g,
                    chart.input_tax_accounts(g.regime()),
                    Direction::Debit,
                    narration,
                    Some(business_pct),
                ),
                _ => Vec::new(),
            };
            let tax_total: Decimal = tax_lines.iter().map(|l| l.amount).sum();

            // The business expense line takes the rounding remainder.
            let business_amount = total - drawings_amount - tax_total;
            let mut main = line(&debit_target, business_amount, Direction::Debit, narration);
            main.gst = gst.cloned();
            entries.push(main);
            entries.push(line(
                &chart.drawings_account(),
                drawings_amount,
                Direction::Debit,
                narration,
            ));
            entries.extend(tax_lines);
        }
        _ => {
            let (main_amount, tax_lines) = match gst {
                Some(g) if claim_credit => (
                    g.taxable_value,
                    tax_component_lines(
                        g,
                        chart.input_tax_accounts(g.regime()),
                        Direction::Debit,
                        narration,
                        None,
                    ),
                ),
                // Blocked or no credit: the tax is part of the cost.
                _ => (total, Vec::new()),
            };
            let mut main = line(&debit_target, main_amount, Direction::Debit, narration);
            main.gst = gst.cloned();
            entries.push(main);
            entries.extend(tax_lines);
        }
    }

    let credit_account = settlement_account(parsed, chart, false);
    entries.push(line(&credit_account, total, Direction::Credit, narration));
    Ok(entries)
}

/// Sale and income rule: credit income for the taxable value, credit output
/// tax, debit the debtor or payment account for the gross.
fn sale_or_income(
    parsed: &ParsedNarration,
    gst: Option<&GstDetails>,
    matches: &[MatchedAccount],
    chart: &Chart,
) -> Result<Vec<AccountEntry>> {
    let amount = parsed.amount.ok_or(EngineError::AmountNotFound)?;
    let narration = parsed.original_text.as_str();

    let credit_target = best_income(matches)
        .map(|m| m.account.clone())
        .or_else(|| chart.default_income_account().cloned())
        .ok_or(EngineError::missing(AccountRole::Income))?;

    let total = gst.map(|g| g.total_amount).unwrap_or(amount);
    let mut entries = Vec::new();

    let debit_account = settlement_account(parsed, chart, true);
    entries.push(line(&debit_account, total, Direction::Debit, narration));

    let main_amount = gst.map(|g| g.taxable_value).unwrap_or(amount);
    let mut main = line(&credit_target, main_amount, Direction::Credit, narration);
    main.gst = gst.cloned();
    entries.push(main);

    if let Some(g) = gst {
        entries.extend(tax_component_lines(
            g,
            chart.output_tax_accounts(g.regime()),
            Direction::Credit,
            narration,
            None,
        ));
    }
    Ok(entries)
}

/// Sales return: contra the sales side, reverse output tax, credit the debtor
/// (or cash) for the gross refunded.
fn sales_return(
    parsed: &ParsedNarration,
    gst: Option<&GstDetails>,
    matches: &[MatchedAccount],
    chart: &Chart,
) -> Result<Vec<AccountEntry>> {
    let amount = parsed.amount.ok_or(EngineError::AmountNotFound)?;
    let narration = parsed.original_text.as_str();

    // Dedicated returns account, else contra directly against sales.
    let returns_target = chart
        .returns_account(true)
        .cloned()
        .or_else(|| best_income(matches).map(|m| m.account.clone()))
        .or_else(|| chart.default_income_account().cloned())
        .ok_or(EngineError::missing(AccountRole::Income))?;

    let total = gst.map(|g| g.total_amount).unwrap_or(amount);
    let main_amount = gst.map(|g| g.taxable_value).unwrap_or(amount);
    let mut entries = Vec::new();

    let mut main = line(&returns_target, main_amount, Direction::Debit, narration);
    main.gst = gst.cloned();
    entries.push(main);

    if let Some(g) = gst {
        // Reverse the output tax recognized on the original sale.
        entries.extend(tax_component_lines(
            g,
            chart.output_tax_accounts(g.regime()),
            Direction::Debit,
            narration,
            None,
        ));
    }

    let credit_account = settlement_account(parsed, chart, true);
    entries.push(line(&credit_account, total, Direction::Credit, narration));
    Ok(entries)
}

/// Purchase return: contra the purchases side, reverse input tax where credit
/// had been claimed, debit the creditor (or cash) for the gross recovered.
fn purchase_return(
    parsed: &ParsedNarration,
    gst: Option<&GstDetails>,
    matches: &[MatchedAccount],
    chart: &Chart,
) -> Result<Vec<AccountEntry>> {
    let amount = parsed.amount.ok_or(EngineError::AmountNotFound)?;
    let narration = parsed.original_text.as_str();

    let returns_target = chart
        .returns_account(false)
        .cloned()
        .or_else(|| best_of_category(matches, AccountCategory::Expense).map(|m| m.account.clone()))
        .or_else(|| chart.default_expense_account().cloned())
        .ok_or(EngineError::missing(AccountRole::Expense))?;

    let total = gst.map(|g| g.total_amount).unwrap_or(amount);
    let claim_credit = gst.map(|g| g.itc_eligible).unwrap_or(false);
    // When no credit was claimable the tax sat in the cost, so the whole
    // gross reverses through the returns line.
    let main_amount = match gst {
        Some(g) if claim_credit => g.taxable_value,
        Some(g) => g.total_amount,
        None => amount,
    };
    let mut entries = Vec::new();

    let debit_account = settlement_account(parsed, chart, false);
    entries.push(line(&debit_account, total, Direction::Debit, narration));

    let mut main = line(&returns_target, main_amount, Direction::Credit, narration);
    main.gst = gst.cloned();
    entries.push(main);

    if let Some(g) = gst {
        if claim_credit {
            entries.extend(tax_component_lines(
                g,
                chart.input_tax_accounts(g.regime()),
                Direction::Credit,
                narration,
                None,
            ));
        }
    }
    Ok(entries)
}

/// Receipt rule: debit the payment account, credit the matched income account.
fn receipt(
    parsed: &ParsedNarration,
    matches: &[MatchedAccount],
    chart: &Chart,
) -> Result<Vec<AccountEntry>> {
    let amount = parsed.amount.ok_or(EngineError::AmountNotFound)?;
    let narration = parsed.original_text.as_str();

    let income = best_income(matches)
        .map(|m| m.account.clone())
        .or_else(|| chart.default_income_account().cloned())
        .ok_or(EngineError::missing(AccountRole::Income))?;

    let debit_account = chart.payment_account(parsed.payment_mode.unwrap_or(PaymentMode::Cash));
    Ok(vec![
        line(&debit_account, amount, Direction::Debit, narration),
        line(&income, amount, Direction::Credit, narration),
    ])
}

/// Advance/prepaid rule: debit a prepaid asset, credit the payment account.
fn prepaid(parsed: &ParsedNarration, chart: &Chart) -> Result<Vec<AccountEntry>> {
    let amount = parsed.amount.ok_or(EngineError::AmountNotFound)?;
    let narration = parsed.original_text.as_str();
    let for_rent = parsed.original_text.to_lowercase().contains("rent");

    let prepaid_account = chart
        .prepaid_account(for_rent)
        .ok_or(EngineError::missing(AccountRole::PrepaidAsset))?;
    let credit_account = chart.payment_account(parsed.payment_mode.unwrap_or(PaymentMode::Cash));

    Ok(vec![
        line(prepaid_account, amount, Direction::Debit, narration),
        line(&credit_account, amount, Direction::Credit, narration),
    ])
}

/// Outstanding rule: debit the expense, credit an outstanding liability.
fn outstanding(
    parsed: &ParsedNarration,
    matches: &[MatchedAccount],
    chart: &Chart,
) -> Result<Vec<AccountEntry>> {
    let amount = parsed.amount.ok_or(EngineError::AmountNotFound)?;
    let narration = parsed.original_text.as_str();
    let for_rent = parsed.original_text.to_lowercase().contains("rent");

    let expense = best_of_category(matches, AccountCategory::Expense)
        .map(|m| m.account.clone())
        .or_else(|| chart.default_expense_account().cloned())
        .ok_or(EngineError::missing(AccountRole::Expense))?;
    let liability = chart
        .outstanding_account(for_rent)
        .ok_or(EngineError::missing(AccountRole::OutstandingLiability))?;

    Ok(vec![
        line(&expense, amount, Direction::Debit, narration),
        line(liability, amount, Direction::Credit, narration),
    ])
}

fn is_tax_line(entry: &AccountEntry, chart: &Chart) -> bool {
    chart
        .find_by_code(&entry.account_code)
        .map(|a| a.is_tax_account)
        .unwrap_or_else(|| entry.account_name.to_lowercase().contains("gst"))
}

/// Amend the GST on an existing entry.
///
/// Removes existing tax lines, re-bases the main income/expense line to the
/// new taxable value, re-adds tax lines on the same side, and rescales the
/// settlement line to the new gross total.
pub fn apply_gst_to_entry(entry: &JournalEntry, gst: &GstDetails, chart: &Chart) -> JournalEntry {
    let mut out = entry.clone();
    out.entries.retain(|e| !is_tax_line(e, chart));

    let main_idx = out.entries.iter().position(|e| {
        e.account_category.is_income_like()
            || e.account_category == AccountCategory::Expense
            || e.account_category == AccountCategory::FixedAsset
    });

    if let Some(idx) = main_idx {
        out.entries[idx].amount = gst.taxable_value;
        out.entries[idx].gst = Some(gst.clone());
        let direction = out.entries[idx].direction;

        let tax_accounts = match direction {
            Direction::Credit => chart.output_tax_accounts(gst.regime()),
            Direction::Debit => chart.input_tax_accounts(gst.regime()),
        };
        let narration = out.entries[idx].narration.clone();
        let tax_lines = tax_component_lines(gst, tax_accounts, direction, &narration, None);
        let insert_at = idx + 1;
        for (offset, tax_line) in tax_lines.into_iter().enumerate() {
            out.entries.insert(insert_at + offset, tax_line);
        }

        // The settlement line is the opposite-direction money line.
        if let Some(settlement) = out
            .entries
            .iter_mut()
            .find(|e| e.direction != direction)
        {
            settlement.amount = gst.total_amount;
        }
    }

    out.gst = Some(gst.clone());
    out.recompute_totals();
    out
}
