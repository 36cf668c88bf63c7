// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::RawRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedIncome {
    pub name: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableIncome {
    pub name: String,
    pub amount: i64,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub name: String,
    pub amount: i64,
    /// Paid-this-month flag; anything but the literal "unchecked" counts as
    /// checked, including an empty detail.
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableExpense {
    pub name: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedAmount {
    pub name: String,
    pub amount: i64,
}

/// The single bond line of a period. Sub-record fields come from the
/// pipe-delimited detail column; missing or malformed parts default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondHolding {
    pub name: String,
    pub balance: i64,
    pub purchase_date: Option<NaiveDate>,
    pub yield_rate: Decimal,
    pub maturity_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockHolding {
    pub ticker: String,
    pub qty: Decimal,
    pub avg_price: Decimal,
    pub account: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Incomes {
    pub fixed: Vec<FixedIncome>,
    pub variable: Vec<VariableIncome>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Expenses {
    pub fixed: Vec<FixedExpense>,
    pub variable: Vec<VariableExpense>,
    /// Card total for the period; a single slot, later rows win.
    pub card: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assets {
    pub balances: Vec<NamedAmount>,
    pub savings: Vec<NamedAmount>,
    pub bond: Option<BondHolding>,
    pub stock_accounts: Vec<NamedAmount>,
}

/// Structured view of one period, recomputed from the full row log on every
/// read. Has no identity of its own — nothing here is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    pub period: String,
    pub incomes: Incomes,
    pub expenses: Expenses,
    pub assets: Assets,
    pub stocks: Vec<StockHolding>,
    /// Legacy per-account investment rollup rows.
    pub investment_totals: Vec<NamedAmount>,
    /// Rows whose category tag resolved to nothing. Kept verbatim so unknown
    /// tags stay observable instead of silently vanishing.
    pub unmatched: Vec<RawRow>,
}

impl PeriodSnapshot {
    pub fn new(period: &str) -> Self {
        PeriodSnapshot {
            period: period.to_string(),
            ..Default::default()
        }
    }
}
