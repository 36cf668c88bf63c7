// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

const UA: &str = concat!(
    "tallybook/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/tallybook)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

static PERIOD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}\.\d{2}$").unwrap());

/// Validates a period key ("YYYY.MM") and returns it unchanged. Zero-padded
/// keys sort chronologically as plain strings, which every fold relies on.
pub fn parse_period(s: &str) -> Result<String> {
    let s = s.trim();
    if !PERIOD_RE.is_match(s) {
        return Err(anyhow::anyhow!("Invalid period '{}', expected YYYY.MM", s));
    }
    let month: u32 = s[5..7].parse()?;
    if !(1..=12).contains(&month) {
        return Err(anyhow::anyhow!("Invalid month in period '{}'", s));
    }
    Ok(s.to_string())
}

/// The current period key, for commands that default to "this month".
pub fn current_period() -> String {
    chrono::Local::now().format("%Y.%m").to_string()
}

/// Lenient ledger-amount parse: strip thousands separators, then take the
/// leading signed integer. Anything unparseable contributes 0 — the row log
/// keeps flowing, it never rejects.
pub fn parse_amount(s: &str) -> i64 {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    let mut end = 0;
    for (i, c) in cleaned.char_indices() {
        if i == 0 && (c == '-' || c == '+') {
            end = i + 1;
            continue;
        }
        if c.is_ascii_digit() {
            end = i + 1;
        } else {
            break;
        }
    }
    cleaned[..end].parse::<i64>().unwrap_or(0)
}

/// Lenient decimal parse for the fractional sub-record fields (stock
/// quantities, average prices, bond yields). Zero on failure, same policy as
/// `parse_amount`.
pub fn parse_decimal_lenient(s: &str) -> Decimal {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

pub fn fmt_amount(v: i64) -> String {
    let digits = v.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if v < 0 {
        out.push('-');
    }
    let first = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - first) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn parse_date(s: &str) -> Result<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}
