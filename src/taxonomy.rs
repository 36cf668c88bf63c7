// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::{Deserialize, Serialize};

/// Canonical category tags of the ledger. The row log itself is free text;
/// everything the parser and the folds do starts by resolving a raw tag into
/// one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    IncomeFixed,
    IncomeVariable,
    ExpenseCard,
    ExpenseFixed,
    ExpenseVariable,
    AssetBalance,
    AssetSavings,
    AssetBond,
    AssetStock,
    AssetStockAccount,
    /// Legacy rollup rows from before per-asset tracking existed. Still fed
    /// into the investment and balance histories.
    InvestmentTotal,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::IncomeFixed,
        Category::IncomeVariable,
        Category::ExpenseCard,
        Category::ExpenseFixed,
        Category::ExpenseVariable,
        Category::AssetBalance,
        Category::AssetSavings,
        Category::AssetBond,
        Category::AssetStock,
        Category::AssetStockAccount,
        Category::InvestmentTotal,
    ];

    /// The canonical spelling as written in the row log.
    pub fn tag(&self) -> &'static str {
        match self {
            Category::IncomeFixed => "income-fixed",
            Category::IncomeVariable => "income-variable",
            Category::ExpenseCard => "expense-card",
            Category::ExpenseFixed => "expense-fixed",
            Category::ExpenseVariable => "expense-variable",
            Category::AssetBalance => "asset-balance",
            Category::AssetSavings => "asset-savings",
            Category::AssetBond => "asset-bond",
            Category::AssetStock => "asset-stock",
            Category::AssetStockAccount => "asset-stock-account",
            Category::InvestmentTotal => "investment-total",
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Category::IncomeFixed | Category::IncomeVariable)
    }

    pub fn is_expense(&self) -> bool {
        matches!(
            self,
            Category::ExpenseCard | Category::ExpenseFixed | Category::ExpenseVariable
        )
    }
}

/// Retired tag spellings, in the order they were introduced. Each maps onto
/// exactly one canonical bucket; rows written under these tags keep folding
/// into the same views as their canonical successors.
pub const ALIASES: &[(&str, Category)] = &[
    ("fixed-income", Category::IncomeFixed),
    ("side-income", Category::IncomeVariable),
    ("card", Category::ExpenseCard),
    ("fixed-expense", Category::ExpenseFixed),
    ("living-expense", Category::ExpenseVariable),
    ("bank-balance", Category::AssetBalance),
    ("saving", Category::AssetSavings),
    ("bond", Category::AssetBond),
    ("stock", Category::AssetStock),
    ("stock-account", Category::AssetStockAccount),
    ("invest-total", Category::InvestmentTotal),
    ("investment", Category::InvestmentTotal),
];

/// Resolves a raw tag to its canonical category. Exact canonical spellings
/// win, then the alias table, then a substring fallback for the oldest
/// free-form tags. Pure and total: unknown tags come back as `None`, never an
/// error — the caller decides whether to drop or surface the row.
pub fn resolve(raw: &str) -> Option<Category> {
    let tag = raw.trim();
    if tag.is_empty() {
        return None;
    }
    for cat in Category::ALL {
        if tag == cat.tag() {
            return Some(cat);
        }
    }
    for (alias, cat) in ALIASES {
        if tag == *alias {
            return Some(*cat);
        }
    }
    // Free-form tags predating the alias table. "income"/"expense" split into
    // fixed vs variable on the presence of a "fix" fragment.
    if tag.contains("income") {
        return Some(if tag.contains("fix") {
            Category::IncomeFixed
        } else {
            Category::IncomeVariable
        });
    }
    if tag.contains("expense") {
        return Some(if tag.contains("fix") {
            Category::ExpenseFixed
        } else {
            Category::ExpenseVariable
        });
    }
    if tag.contains("invest") {
        return Some(Category::InvestmentTotal);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_tags_resolve_exactly() {
        for cat in Category::ALL {
            assert_eq!(resolve(cat.tag()), Some(cat));
        }
    }

    #[test]
    fn alias_table_is_exhaustively_mapped() {
        for (alias, cat) in ALIASES {
            assert_eq!(resolve(alias), Some(*cat), "alias '{}'", alias);
        }
    }

    #[test]
    fn legacy_freeform_income_splits_on_fix_fragment() {
        assert_eq!(resolve("monthly-income-fixed-old"), Some(Category::IncomeFixed));
        assert_eq!(resolve("misc income"), Some(Category::IncomeVariable));
        assert_eq!(resolve("household expense"), Some(Category::ExpenseVariable));
        assert_eq!(resolve("fix expense etc"), Some(Category::ExpenseFixed));
        assert_eq!(resolve("old investments"), Some(Category::InvestmentTotal));
    }

    #[test]
    fn unknown_tags_resolve_to_none_without_error() {
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("   "), None);
        assert_eq!(resolve("gibberish"), None);
        assert_eq!(resolve("asset-house"), None);
    }

    #[test]
    fn resolution_trims_whitespace() {
        assert_eq!(resolve("  expense-card  "), Some(Category::ExpenseCard));
    }
}
