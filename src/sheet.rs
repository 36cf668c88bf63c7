// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::{RawRow, RowStore};
use crate::utils::http_client;

pub const URL_ENV: &str = "TALLYBOOK_SHEET_URL";
pub const RANGE_ENV: &str = "TALLYBOOK_SHEET_RANGE";
pub const TOKEN_ENV: &str = "TALLYBOOK_SHEET_TOKEN";

/// Row store backed by a spreadsheet service speaking the values API
/// (get / append / update / batchUpdate-delete on a named range). This is
/// the deployment backend; every call is one HTTP round trip and any
/// transport failure surfaces to the caller untouched — retry policy lives
/// on the service side, not here.
pub struct SheetStore {
    client: reqwest::blocking::Client,
    base_url: String,
    range: String,
    token: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<String>,
    #[serde(default)]
    values: Option<Vec<Vec<String>>>,
}

#[derive(Serialize)]
struct BatchUpdateBody {
    requests: Vec<DeleteDimensionRequest>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteDimensionRequest {
    delete_dimension: DeleteDimension,
}

#[derive(Serialize)]
struct DeleteDimension {
    range: DimensionRange,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DimensionRange {
    dimension: &'static str,
    start_index: usize,
    end_index: usize,
}

impl SheetStore {
    pub fn new(base_url: &str, range: &str, token: &str) -> Result<Self> {
        Ok(SheetStore {
            client: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            range: range.to_string(),
            token: token.to_string(),
        })
    }

    /// Builds a store from the TALLYBOOK_SHEET_* environment variables.
    /// Returns None when no sheet URL is configured.
    pub fn from_env() -> Result<Option<Self>> {
        let Ok(base_url) = std::env::var(URL_ENV) else {
            return Ok(None);
        };
        let range = std::env::var(RANGE_ENV).unwrap_or_else(|_| "ledger".to_string());
        let token = std::env::var(TOKEN_ENV)
            .with_context(|| format!("{} is set but {} is not", URL_ENV, TOKEN_ENV))?;
        Ok(Some(SheetStore::new(&base_url, &range, &token)?))
    }

    /// Seeds the header row on an empty sheet. Idempotent.
    pub fn ensure_header(&mut self) -> Result<()> {
        if self.fetch_all()?.is_empty() {
            self.append(&[RawRow::header()])?;
        }
        Ok(())
    }

    /// "ledger!A5:E7" style range for a contiguous block of rows, converting
    /// our 0-based fetch indices to the sheet's 1-based rows.
    fn block_range(&self, at: usize, len: usize) -> String {
        format!("{}!A{}:E{}", self.range, at + 1, at + len)
    }
}

impl RowStore for SheetStore {
    fn fetch_all(&self) -> Result<Vec<RawRow>> {
        let url = format!("{}/values/{}", self.base_url, self.range);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .with_context(|| format!("GET {}", url))?
            .error_for_status()?;
        let vr: ValueRange = resp.json().context("Decode values response")?;
        Ok(vr
            .values
            .unwrap_or_default()
            .iter()
            .map(|fields| RawRow::from_fields(fields))
            .collect())
    }

    fn append(&mut self, rows: &[RawRow]) -> Result<()> {
        let url = format!(
            "{}/values/{}:append?valueInputOption=RAW",
            self.base_url, self.range
        );
        let body = ValueRange {
            range: None,
            values: Some(rows.iter().map(|r| r.to_fields().to_vec()).collect()),
        };
        self.client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .with_context(|| format!("POST {}", url))?
            .error_for_status()?;
        Ok(())
    }

    fn update_rows(&mut self, at: usize, rows: &[RawRow]) -> Result<()> {
        let range = self.block_range(at, rows.len());
        let url = format!(
            "{}/values/{}?valueInputOption=RAW",
            self.base_url, range
        );
        let body = ValueRange {
            range: Some(range.clone()),
            values: Some(rows.iter().map(|r| r.to_fields().to_vec()).collect()),
        };
        self.client
            .put(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .with_context(|| format!("PUT {}", url))?
            .error_for_status()?;
        Ok(())
    }

    fn delete_rows(&mut self, start: usize, end: usize) -> Result<()> {
        if end <= start {
            return Ok(());
        }
        let url = format!("{}:batchUpdate", self.base_url);
        let body = BatchUpdateBody {
            requests: vec![DeleteDimensionRequest {
                delete_dimension: DeleteDimension {
                    range: DimensionRange {
                        dimension: "ROWS",
                        start_index: start,
                        end_index: end,
                    },
                },
            }],
        };
        self.client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .with_context(|| format!("POST {}", url))?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_range_is_one_based_inclusive() {
        let store = SheetStore::new("https://sheets.test/v4/spreadsheets/abc", "ledger", "t")
            .unwrap();
        assert_eq!(store.block_range(0, 1), "ledger!A1:E1");
        assert_eq!(store.block_range(4, 1), "ledger!A5:E5");
        assert_eq!(store.block_range(4, 3), "ledger!A5:E7");
    }

    #[test]
    fn delete_body_serializes_to_values_api_shape() {
        let body = BatchUpdateBody {
            requests: vec![DeleteDimensionRequest {
                delete_dimension: DeleteDimension {
                    range: DimensionRange {
                        dimension: "ROWS",
                        start_index: 3,
                        end_index: 4,
                    },
                },
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json["requests"][0]["deleteDimension"]["range"]["startIndex"],
            3
        );
        assert_eq!(json["requests"][0]["deleteDimension"]["range"]["endIndex"], 4);
    }
}
