// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{RawRow, RowStore};
use crate::utils::parse_period;
use anyhow::{Context, Result};
use csv::ReaderBuilder;

pub fn handle(store: &mut dyn RowStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("rows", sub)) => import_rows(store, sub),
        _ => Ok(()),
    }
}

/// Appends the data rows of a CSV file to the store. The file's header line
/// is skipped; periods are validated up front (a bad partition key would
/// poison every fold), everything else rides along as-is per the lenient
/// parse policy.
fn import_rows(store: &mut dyn RowStore, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        let fields: Vec<String> = rec.iter().map(|s| s.trim().to_string()).collect();
        let row = RawRow::from_fields(&fields);
        parse_period(&row.period)
            .with_context(|| format!("Invalid period '{}' for row '{}'", row.period, row.name))?;
        rows.push(row);
    }

    let count = rows.len();
    store.append(&rows)?;
    println!("Imported {} rows from {}", count, path);
    Ok(())
}
