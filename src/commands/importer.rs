// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! JSON import. The payload is untrusted: every record is decoded through an
//! explicit raw shape and re-validated with the same field rules as manual
//! entry. One bad record rejects the whole file; partial import would leave
//! the store in a state no single user action could have produced.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;

use crate::commands::transactions::report_save;
use crate::models::{Category, Record, RecordInput, SettingsPatch};
use crate::session::Session;
use crate::validate;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").cloned().unwrap_or_default();
    let path = path.trim();
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Open import file {}", path))?;
    let imported = import_payload(session, &text)?;
    println!("Imported {} record(s) from {}", imported, path);
    report_save(session.persist());
    Ok(())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    id: String,
    description: String,
    amount: RawAmount,
    category: String,
    date: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

// Exports written by this program carry amounts as strings; be tolerant of
// plain JSON numbers from other producers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(Decimal),
    Text(String),
}

impl RawAmount {
    fn as_text(&self) -> String {
        match self {
            RawAmount::Number(d) => d.to_string(),
            RawAmount::Text(s) => s.clone(),
        }
    }
}

fn decode_record(value: &serde_json::Value, seen_ids: &mut HashSet<String>) -> Option<Record> {
    let raw: RawRecord = serde_json::from_value(value.clone()).ok()?;
    if raw.id.trim().is_empty() || !seen_ids.insert(raw.id.clone()) {
        return None;
    }
    let input = RecordInput {
        description: raw.description.clone(),
        amount: raw.amount.as_text(),
        category: raw.category.clone(),
        date: raw.date.clone(),
    };
    if !validate::validate_form(&input).is_valid {
        return None;
    }
    // Validation guarantees these coercions succeed.
    let amount = input.amount.trim().parse::<Decimal>().ok()?;
    let category = Category::parse(&raw.category)?;
    let date = chrono::NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d").ok()?;
    let now = Utc::now();
    Some(Record {
        id: raw.id,
        description: raw.description,
        amount,
        category,
        date,
        created_at: raw.created_at.unwrap_or(now),
        updated_at: raw.updated_at.unwrap_or(now),
    })
}

/// Applies a full export payload: all-or-nothing record replacement plus a
/// merge of whatever settings the payload carries. Returns the number of
/// imported records.
pub fn import_payload(session: &mut Session, text: &str) -> Result<usize> {
    let payload: serde_json::Value =
        serde_json::from_str(text).context("Import file is not valid JSON")?;
    let records = payload
        .get("records")
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow!("Invalid file format: missing records array"))?;

    let mut seen_ids = HashSet::new();
    let mut decoded = Vec::with_capacity(records.len());
    let mut invalid = 0usize;
    for value in records {
        match decode_record(value, &mut seen_ids) {
            Some(record) => decoded.push(record),
            None => invalid += 1,
        }
    }
    if invalid > 0 {
        return Err(anyhow!(
            "Import rejected: {} of {} record(s) failed validation",
            invalid,
            records.len()
        ));
    }

    let count = decoded.len();
    session.store_mut().set_records(decoded);

    if let Some(settings) = payload.get("settings") {
        if settings.is_object() {
            let patch: SettingsPatch =
                serde_json::from_value(settings.clone()).unwrap_or_default();
            if let Some(cap) = patch.budget_cap {
                // Invalid caps are ignored, same as manual entry.
                session.store_mut().set_budget_cap(cap).ok();
            }
            session.store_mut().set_currencies(&patch);
        }
    }
    Ok(count)
}
