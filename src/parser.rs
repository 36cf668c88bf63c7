// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{
    BondHolding, FixedExpense, FixedIncome, NamedAmount, PeriodSnapshot, StockHolding,
    VariableExpense, VariableIncome,
};
use crate::store::RawRow;
use crate::taxonomy::{self, Category};
use crate::utils::{parse_amount, parse_date, parse_decimal_lenient};

/// Sentinel in the detail column marking a fixed expense as not yet paid.
pub const UNCHECKED: &str = "unchecked";

/// Folds the raw row log into a structured snapshot. `rows` is the full
/// `fetch_all` output, header row first. With `target` set, rows from other
/// periods are skipped; without it the whole log folds into one view.
///
/// One linear pass. Rows missing a category or name are ignored; rows with an
/// unresolvable tag land in `unmatched`; malformed amounts parse to 0. For
/// keyed buckets a later row under the same (period, category, name) replaces
/// the earlier one in place — last write wins by input order. The variable
/// income/expense lists append instead, duplicate names are meaningful there.
pub fn parse(rows: &[RawRow], target: Option<&str>) -> PeriodSnapshot {
    let mut snap = PeriodSnapshot::new(target.unwrap_or_default());

    for row in rows.iter().skip(1) {
        if let Some(period) = target {
            if row.period != period {
                continue;
            }
        }
        let name = row.name.trim();
        if row.category.trim().is_empty() || name.is_empty() {
            continue;
        }
        let Some(cat) = taxonomy::resolve(&row.category) else {
            snap.unmatched.push(row.clone());
            continue;
        };

        let amount = parse_amount(&row.amount);
        match cat {
            Category::IncomeFixed => put_keyed(
                &mut snap.incomes.fixed,
                |e| e.name == name,
                FixedIncome {
                    name: name.to_string(),
                    amount,
                },
            ),
            Category::IncomeVariable => snap.incomes.variable.push(VariableIncome {
                name: name.to_string(),
                amount,
                memo: row.detail.clone(),
            }),
            Category::ExpenseCard => snap.expenses.card = amount,
            Category::ExpenseFixed => put_keyed(
                &mut snap.expenses.fixed,
                |e| e.name == name,
                FixedExpense {
                    name: name.to_string(),
                    amount,
                    checked: row.detail != UNCHECKED,
                },
            ),
            Category::ExpenseVariable => snap.expenses.variable.push(VariableExpense {
                name: name.to_string(),
                amount,
            }),
            Category::AssetBalance => put_keyed(
                &mut snap.assets.balances,
                |e| e.name == name,
                NamedAmount {
                    name: name.to_string(),
                    amount,
                },
            ),
            Category::AssetSavings => put_keyed(
                &mut snap.assets.savings,
                |e| e.name == name,
                NamedAmount {
                    name: name.to_string(),
                    amount,
                },
            ),
            Category::AssetBond => snap.assets.bond = Some(decode_bond(name, amount, &row.detail)),
            Category::AssetStock => {
                let holding = decode_stock(name, &row.detail);
                put_keyed(&mut snap.stocks, |e| e.ticker == name, holding);
            }
            Category::AssetStockAccount => put_keyed(
                &mut snap.assets.stock_accounts,
                |e| e.name == name,
                NamedAmount {
                    name: name.to_string(),
                    amount,
                },
            ),
            Category::InvestmentTotal => put_keyed(
                &mut snap.investment_totals,
                |e| e.name == name,
                NamedAmount {
                    name: name.to_string(),
                    amount,
                },
            ),
        }
    }

    snap
}

/// Replace-in-place for buckets keyed by name, preserving first-seen order.
fn put_keyed<T>(list: &mut Vec<T>, matches: impl Fn(&T) -> bool, item: T) {
    if let Some(pos) = list.iter().position(matches) {
        list[pos] = item;
    } else {
        list.push(item);
    }
}

/// Splits a pipe-delimited positional sub-record; missing trailing parts
/// come back as "".
fn detail_part<'a>(detail: &'a str, i: usize) -> &'a str {
    detail.split('|').nth(i).unwrap_or("").trim()
}

fn decode_bond(name: &str, balance: i64, detail: &str) -> BondHolding {
    BondHolding {
        name: name.to_string(),
        balance,
        purchase_date: parse_date(detail_part(detail, 0)).ok(),
        yield_rate: parse_decimal_lenient(detail_part(detail, 1)),
        maturity_months: parse_amount(detail_part(detail, 2)).max(0) as u32,
    }
}

fn decode_stock(ticker: &str, detail: &str) -> StockHolding {
    StockHolding {
        ticker: ticker.to_string(),
        qty: parse_decimal_lenient(detail_part(detail, 0)),
        avg_price: parse_decimal_lenient(detail_part(detail, 1)),
        account: detail_part(detail, 2).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn header() -> RawRow {
        RawRow::header()
    }

    #[test]
    fn routes_fixed_income_into_snapshot() {
        let rows = vec![
            header(),
            RawRow::new("2025.01", "income-fixed", "salary", "3000000", ""),
        ];
        let snap = parse(&rows, Some("2025.01"));
        assert_eq!(
            snap.incomes.fixed,
            vec![FixedIncome {
                name: "salary".into(),
                amount: 3000000
            }]
        );
    }

    #[test]
    fn period_filter_skips_other_months() {
        let rows = vec![
            header(),
            RawRow::new("2025.01", "income-fixed", "salary", "3000000", ""),
            RawRow::new("2025.02", "income-fixed", "salary", "3100000", ""),
        ];
        let snap = parse(&rows, Some("2025.02"));
        assert_eq!(snap.incomes.fixed.len(), 1);
        assert_eq!(snap.incomes.fixed[0].amount, 3100000);
    }

    #[test]
    fn later_row_wins_for_keyed_buckets() {
        let rows = vec![
            header(),
            RawRow::new("2025.01", "expense-fixed", "rent", "500000", ""),
            RawRow::new("2025.01", "expense-fixed", "rent", "550000", "unchecked"),
        ];
        let snap = parse(&rows, Some("2025.01"));
        assert_eq!(snap.expenses.fixed.len(), 1);
        assert_eq!(snap.expenses.fixed[0].amount, 550000);
        assert!(!snap.expenses.fixed[0].checked);
    }

    #[test]
    fn variable_lists_keep_duplicate_names() {
        let rows = vec![
            header(),
            RawRow::new("2025.01", "expense-variable", "groceries", "30000", ""),
            RawRow::new("2025.01", "expense-variable", "groceries", "45000", ""),
        ];
        let snap = parse(&rows, Some("2025.01"));
        assert_eq!(snap.expenses.variable.len(), 2);
    }

    #[test]
    fn checked_defaults_true_unless_literal_sentinel() {
        let rows = vec![
            header(),
            RawRow::new("2025.01", "expense-fixed", "rent", "500000", ""),
            RawRow::new("2025.01", "expense-fixed", "phone", "50000", "unchecked"),
            RawRow::new("2025.01", "expense-fixed", "power", "40000", "note to self"),
        ];
        let snap = parse(&rows, Some("2025.01"));
        let by_name = |n: &str| snap.expenses.fixed.iter().find(|e| e.name == n).unwrap();
        assert!(by_name("rent").checked);
        assert!(!by_name("phone").checked);
        assert!(by_name("power").checked);
    }

    #[test]
    fn legacy_alias_folds_into_canonical_bucket() {
        let rows = vec![
            header(),
            RawRow::new("2025.01", "fixed-expense", "insurance", "120000", "unchecked"),
        ];
        let snap = parse(&rows, Some("2025.01"));
        assert_eq!(snap.expenses.fixed.len(), 1);
        assert!(!snap.expenses.fixed[0].checked);
    }

    #[test]
    fn stock_detail_decodes_positionally_with_defaults() {
        let rows = vec![
            header(),
            RawRow::new("2025.01", "asset-stock", "VTI", "1200000", "10.5|250.25|broker-main"),
            RawRow::new("2025.01", "asset-stock", "QQQ", "0", "3"),
        ];
        let snap = parse(&rows, Some("2025.01"));
        assert_eq!(snap.stocks.len(), 2);
        let vti = &snap.stocks[0];
        assert_eq!(vti.qty, Decimal::new(105, 1));
        assert_eq!(vti.avg_price, Decimal::new(25025, 2));
        assert_eq!(vti.account, "broker-main");
        let qqq = &snap.stocks[1];
        assert_eq!(qqq.qty, Decimal::from(3));
        assert_eq!(qqq.avg_price, Decimal::ZERO);
        assert_eq!(qqq.account, "");
    }

    #[test]
    fn bond_detail_decodes_date_yield_and_maturity() {
        let rows = vec![
            header(),
            RawRow::new("2025.01", "asset-bond", "treasury", "5000000", "2024-06-15|3.25|36"),
        ];
        let snap = parse(&rows, Some("2025.01"));
        let bond = snap.assets.bond.unwrap();
        assert_eq!(bond.balance, 5000000);
        assert_eq!(
            bond.purchase_date,
            Some(chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        );
        assert_eq!(bond.yield_rate, Decimal::new(325, 2));
        assert_eq!(bond.maturity_months, 36);
    }

    #[test]
    fn bond_tolerates_malformed_detail() {
        let rows = vec![
            header(),
            RawRow::new("2025.01", "asset-bond", "treasury", "5000000", "someday|lots"),
        ];
        let snap = parse(&rows, Some("2025.01"));
        let bond = snap.assets.bond.unwrap();
        assert_eq!(bond.purchase_date, None);
        assert_eq!(bond.yield_rate, Decimal::ZERO);
        assert_eq!(bond.maturity_months, 0);
    }

    #[test]
    fn unmatched_categories_are_preserved_not_dropped() {
        let rows = vec![
            header(),
            RawRow::new("2025.01", "asset-house", "apartment", "900000000", ""),
        ];
        let snap = parse(&rows, Some("2025.01"));
        assert!(snap.incomes.fixed.is_empty());
        assert_eq!(snap.unmatched.len(), 1);
        assert_eq!(snap.unmatched[0].category, "asset-house");
    }

    #[test]
    fn rows_missing_category_or_name_are_ignored() {
        let rows = vec![
            header(),
            RawRow::new("2025.01", "", "salary", "100", ""),
            RawRow::new("2025.01", "income-fixed", "", "100", ""),
        ];
        let snap = parse(&rows, Some("2025.01"));
        assert!(snap.incomes.fixed.is_empty());
        assert!(snap.unmatched.is_empty());
    }

    #[test]
    fn malformed_amounts_parse_to_zero() {
        let rows = vec![
            header(),
            RawRow::new("2025.01", "income-variable", "refund", "n/a", "memo"),
        ];
        let snap = parse(&rows, Some("2025.01"));
        assert_eq!(snap.incomes.variable[0].amount, 0);
        assert_eq!(snap.incomes.variable[0].memo, "memo");
    }

    #[test]
    fn no_target_folds_every_period() {
        let rows = vec![
            header(),
            RawRow::new("2025.01", "expense-card", "card-total", "800,000", ""),
            RawRow::new("2025.02", "income-fixed", "salary", "3000000", ""),
        ];
        let snap = parse(&rows, None);
        assert_eq!(snap.expenses.card, 800000);
        assert_eq!(snap.incomes.fixed.len(), 1);
    }
}
