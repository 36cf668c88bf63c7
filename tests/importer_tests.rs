// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;

use tallybook::commands::importer;
use tallybook::db::SqliteStore;
use tallybook::store::RowStore;
use tallybook::{cli, parser};
use tempfile::NamedTempFile;

fn import(store: &mut SqliteStore, path: &str) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["tallybook", "import", "rows", "--path", path]);
    let Some(("import", import_m)) = matches.subcommand() else {
        panic!("no import subcommand");
    };
    importer::handle(store, import_m)
}

#[test]
fn importer_appends_data_rows_and_skips_file_header() {
    let mut store = SqliteStore::open_in_memory().unwrap();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "period,category,name,amount,detail\n2025.01,income-fixed,salary,\"3,000,000\",\n2025.01,expense-fixed,rent,500000,unchecked"
    )
    .unwrap();
    file.flush().unwrap();

    import(&mut store, file.path().to_str().unwrap()).unwrap();

    let rows = store.fetch_all().unwrap();
    assert_eq!(rows.len(), 3); // store header + two data rows

    let snap = parser::parse(&rows, Some("2025.01"));
    assert_eq!(snap.incomes.fixed[0].amount, 3000000);
    assert!(!snap.expenses.fixed[0].checked);
}

#[test]
fn importer_tolerates_short_rows() {
    let mut store = SqliteStore::open_in_memory().unwrap();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "period,category,name,amount,detail\n2025.01,income-variable,refund"
    )
    .unwrap();
    file.flush().unwrap();

    import(&mut store, file.path().to_str().unwrap()).unwrap();

    let rows = store.fetch_all().unwrap();
    assert_eq!(rows[1].amount, "");
    assert_eq!(rows[1].detail, "");
}

#[test]
fn importer_rejects_invalid_period() {
    let mut store = SqliteStore::open_in_memory().unwrap();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "period,category,name,amount,detail\n2025-01,income-fixed,salary,3000000,"
    )
    .unwrap();
    file.flush().unwrap();

    let err = import(&mut store, file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Invalid period '2025-01'"));

    // nothing appended
    assert_eq!(store.fetch_all().unwrap().len(), 1);
}
