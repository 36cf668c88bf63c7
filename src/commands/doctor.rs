// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::store::RowStore;
use crate::taxonomy;
use crate::utils::{parse_amount, pretty_table};
use anyhow::Result;

/// Read-only audit of the row log. The parser and the folds are lenient on
/// purpose; this is where the silently-tolerated rows become visible.
pub fn handle(store: &dyn RowStore) -> Result<()> {
    let rows = store.fetch_all()?;
    let mut issues = Vec::new();

    // 1) Duplicate composite keys. Nothing in the store prevents them; the
    //    upsert layer only ever sees the first occurrence.
    let mut seen: HashMap<(String, String, String), usize> = HashMap::new();
    for row in rows.iter().skip(1) {
        if row.category.trim().is_empty() || row.name.trim().is_empty() {
            continue;
        }
        *seen
            .entry((row.period.clone(), row.category.clone(), row.name.clone()))
            .or_insert(0) += 1;
    }
    let mut dupes: Vec<_> = seen.into_iter().filter(|(_, n)| *n > 1).collect();
    dupes.sort();
    for ((period, category, name), n) in dupes {
        issues.push(vec![
            "duplicate_key".into(),
            format!("({}, {}, {}) x{}", period, category, name, n),
        ]);
    }

    for (i, row) in rows.iter().enumerate().skip(1) {
        // 2) Rows the parser ignores outright
        if row.category.trim().is_empty() || row.name.trim().is_empty() {
            issues.push(vec![
                "missing_fields".into(),
                format!("row {}: category='{}' name='{}'", i, row.category, row.name),
            ]);
            continue;
        }
        // 3) Tags nothing resolves
        if taxonomy::resolve(&row.category).is_none() {
            issues.push(vec![
                "unknown_category".into(),
                format!("row {}: '{}'", i, row.category),
            ]);
        }
        // 4) Amounts that fold as zero without literally being zero
        let trimmed = row.amount.trim();
        if !trimmed.is_empty() && trimmed != "0" && parse_amount(trimmed) == 0 {
            issues.push(vec![
                "zero_defaulted_amount".into(),
                format!("row {}: '{}'", i, row.amount),
            ]);
        }
    }

    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], issues));
    }
    Ok(())
}
