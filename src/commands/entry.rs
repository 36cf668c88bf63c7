// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{RawRow, RowStore};
use crate::taxonomy;
use crate::upsert::{self, UpsertOutcome};
use crate::utils::parse_period;
use anyhow::Result;

pub fn handle(store: &mut dyn RowStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(store: &mut dyn RowStore, sub: &clap::ArgMatches) -> Result<()> {
    let period = parse_period(sub.get_one::<String>("period").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let amount = sub.get_one::<String>("amount").unwrap().trim().to_string();
    let detail = sub
        .get_one::<String>("detail")
        .map(|s| s.to_string())
        .unwrap_or_default();

    if taxonomy::resolve(&category).is_none() {
        println!(
            "note: '{}' is not a recognized tag; the row will be stored but stay unparsed",
            category
        );
    }

    let row = RawRow::new(&period, &category, &name, &amount, &detail);
    let outcome = upsert::upsert(store, &period, &category, &name, &row)?;
    match outcome {
        UpsertOutcome::Updated { .. } => {
            println!("Updated {} / {} / {} = {}", period, category, name, amount)
        }
        UpsertOutcome::Appended => {
            println!("Added {} / {} / {} = {}", period, category, name, amount)
        }
    }
    Ok(())
}

fn rm(store: &mut dyn RowStore, sub: &clap::ArgMatches) -> Result<()> {
    let period = parse_period(sub.get_one::<String>("period").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim();
    let name = sub.get_one::<String>("name").unwrap().trim();
    upsert::delete_by_key(store, &period, category, name)?;
    println!("Removed {} / {} / {}", period, category, name);
    Ok(())
}
