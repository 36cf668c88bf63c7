// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use tallybook::store::RowStore;
use tallybook::{cli, commands, db, sheet};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store: Box<dyn RowStore> = if matches.get_flag("sheet") {
        let mut s = sheet::SheetStore::from_env()?.with_context(|| {
            format!(
                "--sheet requires {} and {} to be set",
                sheet::URL_ENV,
                sheet::TOKEN_ENV
            )
        })?;
        s.ensure_header()?;
        Box::new(s)
    } else {
        Box::new(db::SqliteStore::open_or_init()?)
    };

    match matches.subcommand() {
        Some(("init", _)) => {
            if matches.get_flag("sheet") {
                println!("Sheet store ready");
            } else {
                println!("Database initialized at {}", db::db_path()?.display());
            }
        }
        Some(("show", sub)) => commands::show::handle(store.as_ref(), sub)?,
        Some(("entry", sub)) => commands::entry::handle(store.as_mut(), sub)?,
        Some(("report", sub)) => commands::report::handle(store.as_ref(), sub)?,
        Some(("import", sub)) => commands::importer::handle(store.as_mut(), sub)?,
        Some(("export", sub)) => commands::exporter::handle(store.as_ref(), sub)?,
        Some(("category", sub)) => commands::categories::handle(sub)?,
        Some(("doctor", _)) => commands::doctor::handle(store.as_ref())?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
