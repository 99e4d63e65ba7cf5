//! Reference defaults for tests and tooling.
//!
//! The engine never falls back to these implicitly; callers inject a chart of
//! accounts and a tax configuration on every construction. This module only
//! supplies a documented sample set.

use rust_decimal::Decimal;

use crate::config::TaxConfig;
use crate::models::{AccountCategory, Chart, ChartOfAccount, GstRegime};

/// A sample Indian small-business chart of accounts.
pub fn reference_chart() -> Chart {
    use AccountCategory::*;
    let a = ChartOfAccount::new;
    let t = ChartOfAccount::tax_account;

    Chart::new(vec![
        a("1001", "Cash in Hand", Cash, &["cash"]),
        a("1002", "Bank Account", Cash, &["bank", "neft", "rtgs", "cheque"]),
        a("1003", "UPI Wallet", Cash, &["upi", "gpay", "paytm", "phonepe"]),
        a("1201", "Sundry Debtors", Asset, &["debtor", "receivable", "customer"]),
        a("1301", "Prepaid Expenses", Asset, &["prepaid"]),
        a("1302", "Prepaid Rent", Asset, &["prepaid rent", "advance rent"]),
        a("1303", "Prepaid Insurance", Asset, &["prepaid insurance"]),
        a("1304", "Prepaid Salary", Asset, &["advance salary"]),
        t("1401", "GST Input CGST", Asset),
        t("1402", "GST Input SGST", Asset),
        t("1403", "GST Input IGST", Asset),
        a("1501", "Furniture & Fixtures", FixedAsset, &["furniture", "fixture"]),
        a("1502", "Plant & Machinery", FixedAsset, &["machinery", "machine", "equipment"]),
        a("1503", "Computers & Peripherals", FixedAsset, &["computer", "laptop", "printer"]),
        a("2001", "Sundry Creditors", Liability, &["creditor", "supplier", "vendor"]),
        a("2101", "Outstanding Expenses", Liability, &["outstanding"]),
        a("2102", "Outstanding Rent", Liability, &["outstanding rent", "rent payable"]),
        a("2103", "Outstanding Salary", Liability, &["outstanding salary", "salary payable"]),
        t("2401", "GST Output CGST", Liability),
        t("2402", "GST Output SGST", Liability),
        t("2403", "GST Output IGST", Liability),
        a("3001", "Capital Account", Equity, &["capital"]),
        a("3002", "Drawings", Equity, &["drawings", "withdrew"]),
        a("4001", "Sales", Revenue, &["sale", "sold", "sales", "goods sold"]),
        a("4002", "Service Revenue", Revenue, &["service", "consulting"]),
        a("4101", "Commission Received", OtherIncome, &["commission"]),
        a("4102", "Interest Income", OtherIncome, &["interest"]),
        a("4201", "Sales Returns", Income, &["sales return", "return inward"]),
        a("5001", "Purchases", Expense, &["purchase", "purchased", "bought", "goods"]),
        a("5002", "Purchase Returns", Expense, &["purchase return", "return outward"]),
        a("5101", "Rent Expense", Expense, &["rent"]),
        a("5102", "Salaries & Wages", Expense, &["salary", "salaries", "wages", "payroll"]),
        a("5103", "Electricity Expense", Expense, &["electricity", "power bill", "electric bill"]),
        a("5104", "Office Expenses", Expense, &["office"]),
        a("5105", "Stationery & Printing", Expense, &["stationery", "printing"]),
        a("5106", "Telephone & Internet", Expense, &["telephone", "mobile bill", "internet", "broadband"]),
        a("5107", "Insurance Expense", Expense, &["insurance", "premium"]),
        a("5108", "Bank Charges", Expense, &["bank charges", "bank fee"]),
        a("5109", "Professional Fees", Expense, &["professional", "legal", "audit", "consultancy"]),
        a("5110", "Postage & Courier", Expense, &["postage", "courier"]),
        a("5111", "Freight Outward", Expense, &["freight", "delivery", "carriage outward"]),
        a("5112", "Carriage Inward", Expense, &["carriage inward", "freight inward"]),
        a("5113", "Travelling Expenses", Expense, &["travel", "conveyance", "fuel"]),
        a("5114", "Repairs & Maintenance", Expense, &["repair", "maintenance"]),
        a("5115", "Miscellaneous Expenses", Expense, &["miscellaneous", "sundry"]),
    ])
}

/// A sample tax configuration: Maharashtra business, regular scheme, 18%
/// default rates, the common blocked-credit and RCM categories.
pub fn reference_tax_config() -> TaxConfig {
    TaxConfig {
        business_state: "MH".to_string(),
        composition_scheme: false,
        blocked_credit_keywords: [
            "food",
            "beverage",
            "restaurant",
            "catering",
            "club membership",
            "health insurance",
            "life insurance",
            "beauty treatment",
            "motor car",
            "personal vehicle",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        goods_rate: Decimal::from(18),
        services_rate: Decimal::from(18),
        rcm_service_keywords: [
            "advocate",
            "legal service",
            "goods transport agency",
            "gta",
            "sponsorship",
            "security service",
            "import of service",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        default_regime: GstRegime::IntraState,
        sale_defaults_inclusive: true,
    }
}
