// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::parser;
use crate::store::RowStore;
use crate::utils::{current_period, fmt_amount, maybe_print_json, parse_period, pretty_table};
use anyhow::Result;

pub fn handle(store: &dyn RowStore, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let period = match m.get_one::<String>("period") {
        Some(p) => parse_period(p)?,
        None => current_period(),
    };

    let rows = store.fetch_all()?;
    let snap = parser::parse(&rows, Some(&period));

    if maybe_print_json(json_flag, jsonl_flag, &snap)? {
        return Ok(());
    }

    println!("Period {}", snap.period);

    let mut income_rows = Vec::new();
    for e in &snap.incomes.fixed {
        income_rows.push(vec!["fixed".into(), e.name.clone(), fmt_amount(e.amount), String::new()]);
    }
    for e in &snap.incomes.variable {
        income_rows.push(vec![
            "variable".into(),
            e.name.clone(),
            fmt_amount(e.amount),
            e.memo.clone(),
        ]);
    }
    if !income_rows.is_empty() {
        println!("{}", pretty_table(&["Income", "Name", "Amount", "Memo"], income_rows));
    }

    let mut expense_rows = Vec::new();
    if snap.expenses.card != 0 {
        expense_rows.push(vec![
            "card".into(),
            "card-total".into(),
            fmt_amount(snap.expenses.card),
            String::new(),
        ]);
    }
    for e in &snap.expenses.fixed {
        expense_rows.push(vec![
            "fixed".into(),
            e.name.clone(),
            fmt_amount(e.amount),
            if e.checked { "paid".into() } else { "unpaid".into() },
        ]);
    }
    for e in &snap.expenses.variable {
        expense_rows.push(vec![
            "variable".into(),
            e.name.clone(),
            fmt_amount(e.amount),
            String::new(),
        ]);
    }
    if !expense_rows.is_empty() {
        println!(
            "{}",
            pretty_table(&["Expense", "Name", "Amount", "Status"], expense_rows)
        );
    }

    let mut asset_rows = Vec::new();
    for e in &snap.assets.balances {
        asset_rows.push(vec!["balance".into(), e.name.clone(), fmt_amount(e.amount)]);
    }
    for e in &snap.assets.savings {
        asset_rows.push(vec!["savings".into(), e.name.clone(), fmt_amount(e.amount)]);
    }
    if let Some(bond) = &snap.assets.bond {
        asset_rows.push(vec!["bond".into(), bond.name.clone(), fmt_amount(bond.balance)]);
    }
    for e in &snap.assets.stock_accounts {
        asset_rows.push(vec![
            "stock-account".into(),
            e.name.clone(),
            fmt_amount(e.amount),
        ]);
    }
    if !asset_rows.is_empty() {
        println!("{}", pretty_table(&["Asset", "Name", "Amount"], asset_rows));
    }

    if !snap.stocks.is_empty() {
        let stock_rows = snap
            .stocks
            .iter()
            .map(|s| {
                vec![
                    s.ticker.clone(),
                    format!("{}", s.qty),
                    format!("{}", s.avg_price),
                    s.account.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Ticker", "Qty", "Avg Price", "Account"], stock_rows)
        );
    }

    if !snap.investment_totals.is_empty() {
        let inv_rows = snap
            .investment_totals
            .iter()
            .map(|e| vec![e.name.clone(), fmt_amount(e.amount)])
            .collect();
        println!("{}", pretty_table(&["Investment", "Amount"], inv_rows));
    }

    if !snap.unmatched.is_empty() {
        let rows = snap
            .unmatched
            .iter()
            .map(|r| vec![r.category.clone(), r.name.clone(), r.amount.clone()])
            .collect();
        println!(
            "{}",
            pretty_table(&["Unmatched Tag", "Name", "Amount"], rows)
        );
    }

    Ok(())
}
