// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::parser::UNCHECKED;
use crate::store::RawRow;
use crate::taxonomy::{self, Category};
use crate::utils::parse_amount;

/// The legacy generic card tag. Before `expense-card` existed the card total
/// was logged under this tag; months carrying both would double-count, so
/// the monthly fold drops the legacy spelling.
pub const LEGACY_CARD_TAG: &str = "card";

/// Name fragment of the legacy overseas-stock rollup rows.
pub const OVERSEAS_STOCK_TAG: &str = "overseas stock";

/// Name tag of the paid-in principal rollup row.
pub const PRINCIPAL_TAG: &str = "principal";

/// One named sub-account of the legacy investment rollup. A row belongs to
/// the account when its name contains every tag.
pub struct AccountRule {
    pub label: &'static str,
    pub tags: &'static [&'static str],
}

/// Explicit sub-account table for the investment history. Replaces the ad hoc
/// substring checks the rollup rows were originally split with.
pub const ACCOUNT_RULES: &[AccountRule] = &[
    AccountRule {
        label: "overseas-mine",
        tags: &[OVERSEAS_STOCK_TAG, "mine"],
    },
    AccountRule {
        label: "overseas-spouse",
        tags: &[OVERSEAS_STOCK_TAG, "spouse"],
    },
    AccountRule {
        label: "pension",
        tags: &["pension"],
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub period: String,
    pub income: i64,
    pub expense: i64,
    pub saving: i64,
    pub investment: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvestmentPoint {
    pub period: String,
    /// Sub-account sums keyed by `AccountRule::label`; every label is
    /// present, zero when nothing matched.
    pub accounts: BTreeMap<String, i64>,
    pub principal: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollupEntry {
    pub name: String,
    pub amount: i64,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BalancePoint {
    pub cash: i64,
    pub savings: i64,
    pub bond: i64,
    pub stocks: i64,
}

/// Per-period income/expense/saving/investment sums, ascending by period.
/// Unchecked fixed expenses are not yet paid and stay out of the expense
/// total; legacy generic card rows are dropped entirely (see
/// `LEGACY_CARD_TAG`).
pub fn monthly_history(rows: &[RawRow]) -> Vec<MonthlyPoint> {
    let mut map: BTreeMap<String, MonthlyPoint> = BTreeMap::new();

    for row in rows.iter().skip(1) {
        if row.period.trim().is_empty() {
            continue;
        }
        let Some(cat) = taxonomy::resolve(&row.category) else {
            continue;
        };
        let amount = parse_amount(&row.amount);
        let entry = map.entry(row.period.clone()).or_default();
        if cat.is_income() {
            entry.income += amount;
        } else if cat.is_expense() {
            if cat == Category::ExpenseFixed && row.detail == UNCHECKED {
                continue;
            }
            if row.category.trim() == LEGACY_CARD_TAG {
                continue;
            }
            entry.expense += amount;
        } else if cat == Category::AssetSavings {
            entry.saving += amount;
        } else if cat == Category::InvestmentTotal {
            entry.investment += amount;
        }
    }

    map.into_iter()
        .map(|(period, mut point)| {
            point.period = period;
            point
        })
        .collect()
}

/// Per-period investment-account sums over the legacy rollup rows, ascending
/// by period. Rows split into the `ACCOUNT_RULES` buckets by name tags; the
/// principal row is tracked on its own and excluded from `total`.
pub fn investment_history(rows: &[RawRow]) -> Vec<InvestmentPoint> {
    let mut map: BTreeMap<String, InvestmentPoint> = BTreeMap::new();

    for row in rows.iter().skip(1) {
        if row.period.trim().is_empty() {
            continue;
        }
        if taxonomy::resolve(&row.category) != Some(Category::InvestmentTotal) {
            continue;
        }
        let amount = parse_amount(&row.amount);
        let entry = map.entry(row.period.clone()).or_insert_with(|| {
            let mut point = InvestmentPoint::default();
            for rule in ACCOUNT_RULES {
                point.accounts.insert(rule.label.to_string(), 0);
            }
            point
        });
        if row.name.contains(PRINCIPAL_TAG) {
            entry.principal += amount;
            continue;
        }
        if let Some(rule) = ACCOUNT_RULES
            .iter()
            .find(|rule| rule.tags.iter().all(|tag| row.name.contains(tag)))
        {
            *entry.accounts.get_mut(rule.label).expect("seeded label") += amount;
            entry.total += amount;
        }
    }

    map.into_iter()
        .map(|(period, mut point)| {
            point.period = period;
            point
        })
        .collect()
}

/// Lifetime expense rollup keyed by entry name (raw tag when the name is
/// empty), descending by amount, truncated to `top_n`, each entry annotated
/// with its share of the whole rollup — the total before truncation.
pub fn category_rollup(rows: &[RawRow], top_n: usize) -> Vec<RollupEntry> {
    let mut sums: HashMap<String, i64> = HashMap::new();

    for row in rows.iter().skip(1) {
        let Some(cat) = taxonomy::resolve(&row.category) else {
            continue;
        };
        if !cat.is_expense() {
            continue;
        }
        if cat == Category::ExpenseFixed && row.detail == UNCHECKED {
            continue;
        }
        let name = row.name.trim();
        let key = if name.is_empty() {
            row.category.trim()
        } else {
            name
        };
        *sums.entry(key.to_string()).or_insert(0) += parse_amount(&row.amount);
    }

    let total: i64 = sums.values().sum();
    let mut entries: Vec<(String, i64)> = sums.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(top_n);

    entries
        .into_iter()
        .map(|(name, amount)| RollupEntry {
            name,
            amount,
            percent: if total == 0 {
                0.0
            } else {
                amount as f64 * 100.0 / total as f64
            },
        })
        .collect()
}

/// Per-period asset accumulators for delta-over-time display. Legacy
/// overseas-stock rollup rows fold into the stocks accumulator alongside the
/// canonical stock-account category.
pub fn balance_history(rows: &[RawRow]) -> BTreeMap<String, BalancePoint> {
    let mut map: BTreeMap<String, BalancePoint> = BTreeMap::new();

    for row in rows.iter().skip(1) {
        if row.period.trim().is_empty() {
            continue;
        }
        let Some(cat) = taxonomy::resolve(&row.category) else {
            continue;
        };
        let amount = parse_amount(&row.amount);
        let entry = map.entry(row.period.clone()).or_default();
        match cat {
            Category::AssetBalance => entry.cash += amount,
            Category::AssetSavings => entry.savings += amount,
            Category::AssetBond => entry.bond += amount,
            Category::AssetStockAccount => entry.stocks += amount,
            Category::InvestmentTotal if row.name.contains(OVERSEAS_STOCK_TAG) => {
                entry.stocks += amount
            }
            _ => {}
        }
    }

    map
}
