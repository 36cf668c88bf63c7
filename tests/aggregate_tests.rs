// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tallybook::aggregate::{category_rollup, monthly_history};
use tallybook::db::SqliteStore;
use tallybook::store::{RawRow, RowStore};

#[test]
fn monthly_history_orders_periods_ascending() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store
        .append(&[
            RawRow::new("2025.02", "income-fixed", "salary", "400000", ""),
            RawRow::new("2025.02", "expense-variable", "food", "450000", ""),
            RawRow::new("2025.01", "income-fixed", "salary", "500000", ""),
            RawRow::new("2025.01", "expense-variable", "food", "300000", ""),
        ])
        .unwrap();

    let history = monthly_history(&store.fetch_all().unwrap());
    let pairs: Vec<(&str, i64, i64)> = history
        .iter()
        .map(|p| (p.period.as_str(), p.income, p.expense))
        .collect();
    assert_eq!(
        pairs,
        vec![("2025.01", 500000, 300000), ("2025.02", 400000, 450000)]
    );
}

#[test]
fn rollup_excludes_unchecked_fixed_expense_from_total_and_list() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store
        .append(&[
            RawRow::new("2025.01", "expense-variable", "food", "600", ""),
            RawRow::new("2025.01", "expense-fixed", "rent", "400", ""),
            RawRow::new("2025.01", "expense-fixed", "gym", "9999", "unchecked"),
        ])
        .unwrap();

    let rollup = category_rollup(&store.fetch_all().unwrap(), 5);
    assert!(rollup.iter().all(|e| e.name != "gym"));
    assert_eq!(rollup[0].name, "food");
    assert_eq!(rollup[0].percent, 60.0);
    assert_eq!(rollup[1].name, "rent");
    assert_eq!(rollup[1].percent, 40.0);
}
