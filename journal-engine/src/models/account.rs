//! Chart of accounts: reference account records plus lookup helpers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::gst::GstRegime;
use crate::models::narration::PaymentMode;

/// Account categories, following standard accounting heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    Asset,
    Liability,
    Equity,
    Income,
    Revenue,
    Expense,
    FixedAsset,
    Cash,
    OtherIncome,
}

impl AccountCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountCategory::Asset => "asset",
            AccountCategory::Liability => "liability",
            AccountCategory::Equity => "equity",
            AccountCategory::Income => "income",
            AccountCategory::Revenue => "revenue",
            AccountCategory::Expense => "expense",
            AccountCategory::FixedAsset => "fixed_asset",
            AccountCategory::Cash => "cash",
            AccountCategory::OtherIncome => "other_income",
        }
    }

    /// Income, Revenue and Other-Income all carry income semantics.
    pub fn is_income_like(&self) -> bool {
        matches!(
            self,
            AccountCategory::Income | AccountCategory::Revenue | AccountCategory::OtherIncome
        )
    }
}

impl std::fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One account in the chart of accounts. Immutable reference data, supplied
/// per call by the caller and never mutated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartOfAccount {
    pub code: String,
    pub name: String,
    pub category: AccountCategory,
    pub parent_code: Option<String>,
    /// Keywords matched against narrations by the account matcher.
    pub keywords: Vec<String>,
    pub is_tax_account: bool,
}

impl ChartOfAccount {
    pub fn new(
        code: &str,
        name: &str,
        category: AccountCategory,
        keywords: &[&str],
    ) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            category,
            parent_code: None,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            is_tax_account: false,
        }
    }

    pub fn tax_account(code: &str, name: &str, category: AccountCategory) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            category,
            parent_code: None,
            keywords: Vec::new(),
            is_tax_account: true,
        }
    }

    fn name_contains(&self, token: &str) -> bool {
        self.name.to_lowercase().contains(token)
    }
}

/// Account roles whose absence from the chart makes entry generation fail.
/// Cash, debtor, creditor and drawings roles never fail; they carry canonical
/// fallbacks instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    Expense,
    Income,
    PrepaidAsset,
    OutstandingLiability,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Expense => "expense",
            AccountRole::Income => "income",
            AccountRole::PrepaidAsset => "prepaid asset",
            AccountRole::OutstandingLiability => "outstanding liability",
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The loaded chart of accounts.
///
/// Wraps the caller-supplied account list with a keyword index built once at
/// load, so matching scans only the keywords present in the narration rather
/// than every account's full keyword list.
#[derive(Debug, Clone)]
pub struct Chart {
    accounts: Vec<ChartOfAccount>,
    /// Lowercased keyword -> indices of accounts carrying it.
    keyword_index: HashMap<String, Vec<usize>>,
}

impl Chart {
    pub fn new(accounts: Vec<ChartOfAccount>) -> Self {
        let mut keyword_index: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, account) in accounts.iter().enumerate() {
            for keyword in &account.keywords {
                keyword_index
                    .entry(keyword.to_lowercase())
                    .or_default()
                    .push(idx);
            }
        }
        Self {
            accounts,
            keyword_index,
        }
    }

    pub fn accounts(&self) -> &[ChartOfAccount] {
        &self.accounts
    }

    pub fn keyword_index(&self) -> &HashMap<String, Vec<usize>> {
        &self.keyword_index
    }

    pub fn find_by_code(&self, code: &str) -> Option<&ChartOfAccount> {
        self.accounts.iter().find(|a| a.code == code)
    }

    fn first_named_like(
        &self,
        categories: &[AccountCategory],
        tokens: &[&str],
    ) -> Option<&ChartOfAccount> {
        self.accounts.iter().find(|a| {
            categories.contains(&a.category) && tokens.iter().any(|t| a.name_contains(t))
        })
    }

    fn first_of(&self, category: AccountCategory) -> Option<&ChartOfAccount> {
        self.accounts.iter().find(|a| a.category == category)
    }

    /// Cash account: Cash-category account named "cash", else any Cash-category
    /// account, else the canonical fallback.
    pub fn cash_account(&self) -> ChartOfAccount {
        self.first_named_like(&[AccountCategory::Cash, AccountCategory::Asset], &["cash"])
            .or_else(|| self.first_of(AccountCategory::Cash))
            .cloned()
            .unwrap_or_else(|| {
                ChartOfAccount::new("1001", "Cash", AccountCategory::Cash, &["cash"])
            })
    }

    /// Account that settles the given payment mode. Credit has no settlement
    /// account; callers route credit settlements to debtors/creditors instead.
    pub fn payment_account(&self, mode: PaymentMode) -> ChartOfAccount {
        let found = match mode {
            PaymentMode::Cash | PaymentMode::Credit => None,
            PaymentMode::Upi => self.first_named_like(
                &[AccountCategory::Cash, AccountCategory::Asset],
                &["upi", "wallet"],
            ),
            PaymentMode::Bank | PaymentMode::Cheque | PaymentMode::Neft | PaymentMode::Rtgs => self
                .first_named_like(&[AccountCategory::Cash, AccountCategory::Asset], &["bank"]),
        };
        found.cloned().unwrap_or_else(|| self.cash_account())
    }

    pub fn debtor_account(&self) -> ChartOfAccount {
        self.first_named_like(&[AccountCategory::Asset], &["debtor", "receivable"])
            .cloned()
            .unwrap_or_else(|| {
                ChartOfAccount::new(
                    "1201",
                    "Sundry Debtors",
                    AccountCategory::Asset,
                    &["debtor"],
                )
            })
    }

    pub fn creditor_account(&self) -> ChartOfAccount {
        self.first_named_like(&[AccountCategory::Liability], &["creditor", "payable"])
            .cloned()
            .unwrap_or_else(|| {
                ChartOfAccount::new(
                    "2001",
                    "Sundry Creditors",
                    AccountCategory::Liability,
                    &["creditor"],
                )
            })
    }

    /// Default expense account: "Office Expenses", else "Miscellaneous", else
    /// the first Expense account in the chart.
    pub fn default_expense_account(&self) -> Option<&ChartOfAccount> {
        self.first_named_like(&[AccountCategory::Expense], &["office expense"])
            .or_else(|| self.first_named_like(&[AccountCategory::Expense], &["miscellaneous"]))
            .or_else(|| self.first_of(AccountCategory::Expense))
    }

    /// Default income account: "Sales", else the first income-like account.
    pub fn default_income_account(&self) -> Option<&ChartOfAccount> {
        self.first_named_like(
            &[
                AccountCategory::Income,
                AccountCategory::Revenue,
                AccountCategory::OtherIncome,
            ],
            &["sales"],
        )
        .or_else(|| self.accounts.iter().find(|a| a.category.is_income_like()))
    }

    pub fn drawings_account(&self) -> ChartOfAccount {
        self.first_named_like(&[AccountCategory::Equity], &["drawings", "drawing"])
            .cloned()
            .unwrap_or_else(|| {
                ChartOfAccount::new("3002", "Drawings", AccountCategory::Equity, &["drawings"])
            })
    }

    /// Prepaid asset account; rent narrations prefer a rent-specific one.
    /// `None` when the chart has no prepaid account at all.
    pub fn prepaid_account(&self, for_rent: bool) -> Option<&ChartOfAccount> {
        let general = || {
            self.first_named_like(&[AccountCategory::Asset], &["prepaid", "advance"])
        };
        if for_rent {
            self.first_named_like(&[AccountCategory::Asset], &["prepaid rent", "advance rent"])
                .or_else(general)
        } else {
            general()
        }
    }

    /// Outstanding/accrued liability account; rent narrations prefer a
    /// rent-specific one. `None` when the chart has no such account.
    pub fn outstanding_account(&self, for_rent: bool) -> Option<&ChartOfAccount> {
        let general = || {
            self.first_named_like(&[AccountCategory::Liability], &["outstanding", "accrued"])
        };
        if for_rent {
            self.first_named_like(&[AccountCategory::Liability], &["outstanding rent"])
                .or_else(general)
        } else {
            general()
        }
    }

    /// Dedicated returns account, when the chart configures one.
    pub fn returns_account(&self, sales_side: bool) -> Option<&ChartOfAccount> {
        if sales_side {
            self.first_named_like(
                &[AccountCategory::Income, AccountCategory::Revenue],
                &["sales return", "return inward"],
            )
        } else {
            self.first_named_like(
                &[AccountCategory::Expense],
                &["purchase return", "return outward"],
            )
        }
    }

    /// Input-tax (ITC) accounts for a regime, in posting order.
    pub fn input_tax_accounts(&self, regime: GstRegime) -> Vec<ChartOfAccount> {
        match regime {
            GstRegime::IntraState => vec![
                self.tax_account_named(&["input cgst", "cgst input"], || {
                    ChartOfAccount::tax_account("1401", "GST Input CGST", AccountCategory::Asset)
                }),
                self.tax_account_named(&["input sgst", "sgst input"], || {
                    ChartOfAccount::tax_account("1402", "GST Input SGST", AccountCategory::Asset)
                }),
            ],
            GstRegime::InterState => vec![self.tax_account_named(
                &["input igst", "igst input"],
                || ChartOfAccount::tax_account("1403", "GST Input IGST", AccountCategory::Asset),
            )],
        }
    }

    /// Output-tax accounts for a regime, in posting order.
    pub fn output_tax_accounts(&self, regime: GstRegime) -> Vec<ChartOfAccount> {
        match regime {
            GstRegime::IntraState => vec![
                self.tax_account_named(&["output cgst", "cgst output"], || {
                    ChartOfAccount::tax_account(
                        "2401",
                        "GST Output CGST",
                        AccountCategory::Liability,
                    )
                }),
                self.tax_account_named(&["output sgst", "sgst output"], || {
                    ChartOfAccount::tax_account(
                        "2402",
                        "GST Output SGST",
                        AccountCategory::Liability,
                    )
                }),
            ],
            GstRegime::InterState => vec![self.tax_account_named(
                &["output igst", "igst output"],
                || {
                    ChartOfAccount::tax_account(
                        "2403",
                        "GST Output IGST",
                        AccountCategory::Liability,
                    )
                },
            )],
        }
    }

    fn tax_account_named(
        &self,
        tokens: &[&str],
        fallback: impl FnOnce() -> ChartOfAccount,
    ) -> ChartOfAccount {
        self.accounts
            .iter()
            .find(|a| a.is_tax_account && tokens.iter().any(|t| a.name_contains(t)))
            .cloned()
            .unwrap_or_else(fallback)
    }
}
