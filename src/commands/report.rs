// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, ACCOUNT_RULES};
use crate::store::RowStore;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &dyn RowStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("history", sub)) => history(store, sub)?,
        Some(("invest", sub)) => invest(store, sub)?,
        Some(("rollup", sub)) => rollup(store, sub)?,
        Some(("balances", sub)) => balances(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn history(store: &dyn RowStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = store.fetch_all()?;
    let history = aggregate::monthly_history(&rows);
    if maybe_print_json(json_flag, jsonl_flag, &history)? {
        return Ok(());
    }
    let data = history
        .iter()
        .map(|p| {
            vec![
                p.period.clone(),
                fmt_amount(p.income),
                fmt_amount(p.expense),
                fmt_amount(p.saving),
                fmt_amount(p.investment),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Period", "Income", "Expense", "Saving", "Investment"],
            data
        )
    );
    Ok(())
}

fn invest(store: &dyn RowStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = store.fetch_all()?;
    let history = aggregate::investment_history(&rows);
    if maybe_print_json(json_flag, jsonl_flag, &history)? {
        return Ok(());
    }
    let mut headers: Vec<&str> = vec!["Period"];
    headers.extend(ACCOUNT_RULES.iter().map(|r| r.label));
    headers.push("Principal");
    headers.push("Total");
    let data = history
        .iter()
        .map(|p| {
            let mut row = vec![p.period.clone()];
            for rule in ACCOUNT_RULES {
                row.push(fmt_amount(p.accounts.get(rule.label).copied().unwrap_or(0)));
            }
            row.push(fmt_amount(p.principal));
            row.push(fmt_amount(p.total));
            row
        })
        .collect();
    println!("{}", pretty_table(&headers, data));
    Ok(())
}

fn rollup(store: &dyn RowStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let top: usize = *sub.get_one::<usize>("top").unwrap_or(&5);
    let rows = store.fetch_all()?;
    let rollup = aggregate::category_rollup(&rows, top);
    if maybe_print_json(json_flag, jsonl_flag, &rollup)? {
        return Ok(());
    }
    let data = rollup
        .iter()
        .map(|e| {
            vec![
                e.name.clone(),
                fmt_amount(e.amount),
                format!("{:.1}%", e.percent),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Name", "Amount", "Share"], data));
    Ok(())
}

fn balances(store: &dyn RowStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = store.fetch_all()?;
    let history = aggregate::balance_history(&rows);
    if maybe_print_json(json_flag, jsonl_flag, &history)? {
        return Ok(());
    }
    let data = history
        .iter()
        .map(|(period, p)| {
            vec![
                period.clone(),
                fmt_amount(p.cash),
                fmt_amount(p.savings),
                fmt_amount(p.bond),
                fmt_amount(p.stocks),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Period", "Cash", "Savings", "Bond", "Stocks"], data)
    );
    Ok(())
}
