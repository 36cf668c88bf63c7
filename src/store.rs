// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Typed failures of the row-store protocol. Transport failures from a
/// concrete store surface as plain anyhow errors; these are the conditions
/// callers need to match on.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Composite key absent during an update or delete.
    #[error("no ledger row for ({period}, {category}, {name})")]
    NotFound {
        period: String,
        category: String,
        name: String,
    },
    /// Row range outside the current table.
    #[error("row range {start}..{end} outside table of {len} rows")]
    OutOfRange {
        start: usize,
        end: usize,
        len: usize,
    },
}

/// Column headers of the row log. Every store keeps this as its first row and
/// `fetch_all` returns it at index 0; parsing and aggregation skip it.
pub const HEADER: [&str; 5] = ["period", "category", "name", "amount", "detail"];

/// One row of the flat ledger log. All fields are kept as strings exactly as
/// stored; interpretation (amount parsing, detail decoding) happens at read
/// time in the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub period: String,
    pub category: String,
    pub name: String,
    pub amount: String,
    pub detail: String,
}

impl RawRow {
    pub fn new(period: &str, category: &str, name: &str, amount: &str, detail: &str) -> Self {
        RawRow {
            period: period.to_string(),
            category: category.to_string(),
            name: name.to_string(),
            amount: amount.to_string(),
            detail: detail.to_string(),
        }
    }

    /// The header row as stored at index 0.
    pub fn header() -> Self {
        RawRow::new(HEADER[0], HEADER[1], HEADER[2], HEADER[3], HEADER[4])
    }

    /// Builds a row from positional fields; missing trailing fields default
    /// to the empty string (sheet ranges drop trailing blanks).
    pub fn from_fields(fields: &[String]) -> Self {
        let get = |i: usize| fields.get(i).cloned().unwrap_or_default();
        RawRow {
            period: get(0),
            category: get(1),
            name: get(2),
            amount: get(3),
            detail: get(4),
        }
    }

    pub fn to_fields(&self) -> [String; 5] {
        [
            self.period.clone(),
            self.category.clone(),
            self.name.clone(),
            self.amount.clone(),
            self.detail.clone(),
        ]
    }

    /// True when this row matches the logical (period, category, name) key.
    pub fn matches_key(&self, period: &str, category: &str, name: &str) -> bool {
        self.period == period && self.category == category && self.name == name
    }
}

/// Contract of the tabular row store. Row indices are positions in the
/// ordering returned by `fetch_all`, header included at index 0. The store
/// has no uniqueness constraint of its own; key discipline lives in the
/// upsert layer.
pub trait RowStore {
    /// All rows in storage order, header row first.
    fn fetch_all(&self) -> Result<Vec<RawRow>>;

    /// Appends rows to the end of the table.
    fn append(&mut self, rows: &[RawRow]) -> Result<()>;

    /// Overwrites the contiguous range starting at `at` with `rows`.
    /// Errors with `LedgerError::NotFound` if the range falls outside the
    /// current table.
    fn update_rows(&mut self, at: usize, rows: &[RawRow]) -> Result<()>;

    /// Removes rows in the half-open range `[start, end)`, shifting
    /// subsequent rows up. Errors with `LedgerError::NotFound` if the range
    /// falls outside the current table.
    fn delete_rows(&mut self, start: usize, end: usize) -> Result<()>;
}
