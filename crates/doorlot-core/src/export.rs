//! Export documents for a finished draw.
//!
//! The document carries the data a printable report needs: title, when it
//! was generated, who generated it, and the ordered rows. Page layout is left
//! to whatever consumes it; this module renders plain text and JSON.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use doorlot_state::{encode_json, keys, read_json, KvStore};
use serde::{Deserialize, Serialize};

use crate::domain::{AssignmentResult, Result};

/// Title used when no company name is configured.
pub const DEFAULT_TITLE: &str = "Randomizer Results";

/// Author label used when none is configured.
pub const DEFAULT_AUTHOR: &str = "User";

/// Stored report settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    pub company_name: Option<String>,
    pub username: Option<String>,
}

impl ExportSettings {
    pub fn load(store: &dyn KvStore) -> Result<Self> {
        Ok(read_json(store, keys::COMPANY_INFO)?.unwrap_or_default())
    }

    pub fn save(&self, store: &dyn KvStore) -> Result<()> {
        store.set(keys::COMPANY_INFO, encode_json(self)?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportRow {
    pub name: String,
    pub slot: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub generated_by: String,
    pub rows: Vec<ExportRow>,
}

impl ExportDocument {
    pub fn from_results(
        settings: &ExportSettings,
        generated_at: DateTime<Utc>,
        results: &[AssignmentResult],
    ) -> Self {
        Self {
            title: non_blank(&settings.company_name).unwrap_or(DEFAULT_TITLE).to_string(),
            generated_at,
            generated_by: non_blank(&settings.username).unwrap_or(DEFAULT_AUTHOR).to_string(),
            rows: results
                .iter()
                .map(|r| ExportRow {
                    name: r.name.clone(),
                    slot: r.slot,
                })
                .collect(),
        }
    }

    /// Header lines followed by a `Name | Door Number` table.
    pub fn render_text(&self) -> String {
        const NAME_HEADER: &str = "Name";
        const SLOT_HEADER: &str = "Door Number";

        let name_width = self
            .rows
            .iter()
            .map(|r| r.name.chars().count())
            .chain(std::iter::once(NAME_HEADER.len()))
            .max()
            .unwrap_or(NAME_HEADER.len());

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "Generated on: {}", self.generated_at.to_rfc3339());
        let _ = writeln!(out, "Generated by: {}", self.generated_by);
        let _ = writeln!(out);
        let _ = writeln!(out, "{:<name_width$} | {}", NAME_HEADER, SLOT_HEADER);
        let _ = writeln!(out, "{}-+-{}", "-".repeat(name_width), "-".repeat(SLOT_HEADER.len()));
        for row in &self.rows {
            let _ = writeln!(out, "{:<name_width$} | {}", row.name, row.slot);
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
