// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::store::{LedgerError, RawRow, RowStore};

/// What an upsert ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// An existing row matched the key and was overwritten at this index.
    Updated { index: usize },
    /// No row matched; the row was appended.
    Appended,
}

/// Update-or-append keyed on (period, category, name). Scans the full table
/// for the first matching row; overwrites it in place when found, appends
/// when not. The missing-key condition is the trigger for the append
/// fallback, it never surfaces to the caller.
///
/// One read plus one write per call, and nothing ties them together: a
/// concurrent writer between the two can make the computed index stale. The
/// ledger assumes a single logical writer at a time.
pub fn upsert(
    store: &mut dyn RowStore,
    period: &str,
    category: &str,
    name: &str,
    row: &RawRow,
) -> Result<UpsertOutcome> {
    let rows = store.fetch_all()?;
    match find_key(&rows, period, category, name) {
        Some(index) => {
            store.update_rows(index, std::slice::from_ref(row))?;
            Ok(UpsertOutcome::Updated { index })
        }
        None => {
            store.append(std::slice::from_ref(row))?;
            Ok(UpsertOutcome::Appended)
        }
    }
}

/// Removes the first row matching the key. Unlike `upsert`, a missing key is
/// the caller's problem: surfaces `LedgerError::NotFound`.
pub fn delete_by_key(
    store: &mut dyn RowStore,
    period: &str,
    category: &str,
    name: &str,
) -> Result<()> {
    let rows = store.fetch_all()?;
    let index = find_key(&rows, period, category, name).ok_or_else(|| LedgerError::NotFound {
        period: period.to_string(),
        category: category.to_string(),
        name: name.to_string(),
    })?;
    store.delete_rows(index, index + 1)
}

/// Index of the first data row matching the composite key, in `fetch_all`
/// ordering. Duplicate keys can exist in the store (nothing enforces the
/// convention); only the first occurrence is ever addressed.
fn find_key(rows: &[RawRow], period: &str, category: &str, name: &str) -> Option<usize> {
    rows.iter()
        .enumerate()
        .skip(1)
        .find(|(_, r)| r.matches_key(period, category, name))
        .map(|(i, _)| i)
}
