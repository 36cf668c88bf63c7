// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::RowStore;
use anyhow::Result;

pub fn handle(store: &dyn RowStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("rows", sub)) => export_rows(store, sub),
        _ => Ok(()),
    }
}

fn export_rows(store: &dyn RowStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let rows = store.fetch_all()?;

    match fmt.as_str() {
        "csv" => {
            // The store's first row is already the header line.
            let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(out)?;
            for row in &rows {
                wtr.write_record(row.to_fields())?;
            }
            wtr.flush()?;
        }
        "json" => {
            let data: Vec<_> = rows.iter().skip(1).collect();
            std::fs::write(out, serde_json::to_string_pretty(&data)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} rows to {}", rows.len().saturating_sub(1), out);
    Ok(())
}
