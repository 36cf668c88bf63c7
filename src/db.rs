// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};
use std::fs;
use std::path::PathBuf;

use crate::store::{LedgerError, RawRow, RowStore};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Tallybook", "tallybook"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("tallybook.sqlite"))
}

/// Local mirror of the row log in a single SQLite table. Insertion order is
/// the row order; the header row is seeded at the top on first open so the
/// table reads exactly like the remote sheet does.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open_or_init() -> Result<Self> {
        let path = db_path()?;
        let conn =
            Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
        let store = SqliteStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store, used by tests and throwaway runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Open in-memory DB")?;
        let store = SqliteStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
        CREATE TABLE IF NOT EXISTS ledger_rows(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            period TEXT NOT NULL,
            category TEXT NOT NULL,
            name TEXT NOT NULL,
            amount TEXT NOT NULL,
            detail TEXT NOT NULL
        );
        "#,
        )?;
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM ledger_rows", [], |r| r.get(0))?;
        if count == 0 {
            self.insert_row(&RawRow::header())?;
        }
        Ok(())
    }

    fn insert_row(&self, row: &RawRow) -> Result<()> {
        self.conn.execute(
            "INSERT INTO ledger_rows(period, category, name, amount, detail)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![row.period, row.category, row.name, row.amount, row.detail],
        )?;
        Ok(())
    }

    fn row_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM ledger_rows", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    /// Maps fetch-order positions onto table ids. Errors when the range runs
    /// past the end of the table.
    fn ids_for_range(&self, start: usize, len: usize) -> Result<Vec<i64>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id FROM ledger_rows ORDER BY id LIMIT ?1 OFFSET ?2")?;
        let rows = stmt.query_map(params![len as i64, start as i64], |r| r.get::<_, i64>(0))?;
        let mut ids = Vec::with_capacity(len);
        for id in rows {
            ids.push(id?);
        }
        if ids.len() < len {
            return Err(LedgerError::OutOfRange {
                start,
                end: start + len,
                len: self.row_count()?,
            }
            .into());
        }
        Ok(ids)
    }
}

impl RowStore for SqliteStore {
    fn fetch_all(&self) -> Result<Vec<RawRow>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT period, category, name, amount, detail FROM ledger_rows ORDER BY id",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(RawRow {
                period: r.get(0)?,
                category: r.get(1)?,
                name: r.get(2)?,
                amount: r.get(3)?,
                detail: r.get(4)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn append(&mut self, rows: &[RawRow]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO ledger_rows(period, category, name, amount, detail)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.period,
                    row.category,
                    row.name,
                    row.amount,
                    row.detail
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn update_rows(&mut self, at: usize, rows: &[RawRow]) -> Result<()> {
        let ids = self.ids_for_range(at, rows.len())?;
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "UPDATE ledger_rows SET period=?1, category=?2, name=?3, amount=?4, detail=?5
                 WHERE id=?6",
            )?;
            for (row, id) in rows.iter().zip(&ids) {
                stmt.execute(params![
                    row.period,
                    row.category,
                    row.name,
                    row.amount,
                    row.detail,
                    id
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn delete_rows(&mut self, start: usize, end: usize) -> Result<()> {
        if end <= start {
            return Ok(());
        }
        let ids = self.ids_for_range(start, end - start)?;
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached("DELETE FROM ledger_rows WHERE id=?1")?;
            for id in &ids {
                stmt.execute(params![id])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_header_row_on_init() {
        let store = SqliteStore::open_in_memory().unwrap();
        let rows = store.fetch_all().unwrap();
        assert_eq!(rows, vec![RawRow::header()]);
    }

    #[test]
    fn append_then_fetch_round_trips() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let row = RawRow::new("2025.01", "income-fixed", "salary", "3,000,000", "");
        store.append(std::slice::from_ref(&row)).unwrap();
        let rows = store.fetch_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], row);
    }

    #[test]
    fn update_overwrites_by_position() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .append(&[
                RawRow::new("2025.01", "expense-card", "card-total", "100", ""),
                RawRow::new("2025.01", "expense-fixed", "rent", "200", ""),
            ])
            .unwrap();
        let newer = RawRow::new("2025.01", "expense-card", "card-total", "999", "");
        store.update_rows(1, std::slice::from_ref(&newer)).unwrap();
        let rows = store.fetch_all().unwrap();
        assert_eq!(rows[1].amount, "999");
        assert_eq!(rows[2].amount, "200");
    }

    #[test]
    fn delete_shifts_following_rows_up() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .append(&[
                RawRow::new("2025.01", "expense-card", "card-total", "100", ""),
                RawRow::new("2025.01", "expense-fixed", "rent", "200", ""),
            ])
            .unwrap();
        store.delete_rows(1, 2).unwrap();
        let rows = store.fetch_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "rent");
    }

    #[test]
    fn out_of_range_update_reports_not_found_condition() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let row = RawRow::new("2025.01", "expense-card", "card-total", "100", "");
        let err = store.update_rows(5, std::slice::from_ref(&row)).unwrap_err();
        assert!(err.downcast_ref::<LedgerError>().is_some());
    }
}
