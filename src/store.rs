// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The record store: sole owner of transaction records and settings. Every
//! getter hands out clones, so callers can never mutate store internals
//! except through the methods here.

use chrono::{Duration, Local, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    Category, CurrencyPatch, Record, RecordInput, RecordPatch, Settings, SettingsPatch,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("unknown category '{0}'")]
    InvalidCategory(String),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("no record with id '{0}'")]
    NotFound(String),
    #[error("budget cap must be a non-negative number")]
    InvalidBudgetCap,
}

#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    settings: Settings,
    editing_id: Option<String>,
    id_seq: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        RecordStore::default()
    }

    // Millisecond timestamp in base36 plus a per-store counter. Ids are
    // opaque and never recycled; the existence check guards against
    // collisions with imported ids.
    fn generate_id(&mut self) -> String {
        loop {
            self.id_seq += 1;
            let id = format!(
                "{}{}",
                to_base36(Utc::now().timestamp_millis() as u64),
                to_base36(self.id_seq)
            );
            if !self.records.iter().any(|r| r.id == id) {
                return id;
            }
        }
    }

    fn coerce_amount(raw: &str) -> Result<Decimal, StoreError> {
        raw.trim()
            .parse::<Decimal>()
            .map_err(|_| StoreError::InvalidAmount(raw.to_string()))
    }

    fn coerce_category(raw: &str) -> Result<Category, StoreError> {
        Category::parse(raw.trim()).ok_or_else(|| StoreError::InvalidCategory(raw.to_string()))
    }

    fn coerce_date(raw: &str) -> Result<chrono::NaiveDate, StoreError> {
        chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| StoreError::InvalidDate(raw.to_string()))
    }

    /// Creates a record from raw field values. All four fields must be
    /// present and coercible; on success the stored copy is returned with a
    /// fresh id and both timestamps stamped.
    pub fn add_record(&mut self, input: &RecordInput) -> Result<Record, StoreError> {
        if input.description.trim().is_empty() {
            return Err(StoreError::MissingField("description"));
        }
        if input.amount.trim().is_empty() {
            return Err(StoreError::MissingField("amount"));
        }
        if input.category.trim().is_empty() {
            return Err(StoreError::MissingField("category"));
        }
        if input.date.trim().is_empty() {
            return Err(StoreError::MissingField("date"));
        }

        let now = Utc::now();
        let record = Record {
            id: self.generate_id(),
            description: input.description.clone(),
            amount: Self::coerce_amount(&input.amount)?,
            category: Self::coerce_category(&input.category)?,
            date: Self::coerce_date(&input.date)?,
            created_at: now,
            updated_at: now,
        };
        self.records.push(record.clone());
        Ok(record)
    }

    /// Merges the patch over an existing record. `id` and `created_at` are
    /// not addressable through `RecordPatch`, so they cannot change;
    /// `updated_at` is refreshed.
    pub fn update_record(&mut self, id: &str, patch: &RecordPatch) -> Result<Record, StoreError> {
        let amount = patch.amount.as_deref().map(Self::coerce_amount).transpose()?;
        let category = patch
            .category
            .as_deref()
            .map(Self::coerce_category)
            .transpose()?;
        let date = patch.date.as_deref().map(Self::coerce_date).transpose()?;

        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Some(description) = &patch.description {
            record.description = description.clone();
        }
        if let Some(amount) = amount {
            record.amount = amount;
        }
        if let Some(category) = category {
            record.category = category;
        }
        if let Some(date) = date {
            record.date = date;
        }
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    /// Removes and returns the record, or `None` if the id is unknown.
    pub fn delete_record(&mut self, id: &str) -> Option<Record> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Removes every record whose id appears in `ids`, returning the
    /// removed records in their stored order.
    pub fn delete_records(&mut self, ids: &[String]) -> Vec<Record> {
        let mut deleted = Vec::new();
        self.records.retain(|r| {
            if ids.iter().any(|id| *id == r.id) {
                deleted.push(r.clone());
                false
            } else {
                true
            }
        });
        deleted
    }

    pub fn find_record(&self, id: &str) -> Option<Record> {
        self.records.iter().find(|r| r.id == id).cloned()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn clear_all_records(&mut self) {
        self.records.clear();
    }

    /// Bulk replacement, used by state load and by import. Field-level
    /// validation is the caller's concern: import re-validates every record,
    /// the load path trusts what the typed decode produced.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn settings(&self) -> Settings {
        self.settings.clone()
    }

    pub fn budget_cap(&self) -> Decimal {
        self.settings.budget_cap
    }

    pub fn set_budget_cap(&mut self, cap: Decimal) -> Result<(), StoreError> {
        if cap < Decimal::ZERO {
            return Err(StoreError::InvalidBudgetCap);
        }
        self.settings.budget_cap = cap;
        Ok(())
    }

    /// Applies each provided sub-field independently: codes are uppercased
    /// and truncated to 3 characters, rates must be positive. Absent or
    /// invalid sub-fields leave the stored value unchanged.
    pub fn set_currencies(&mut self, patch: &SettingsPatch) {
        if let Some(code) = patch.base_currency.as_deref().and_then(normalize_code) {
            self.settings.base_currency = code;
        }
        if let Some(p) = &patch.currency2 {
            apply_currency_patch(&mut self.settings.currency2, p);
        }
        if let Some(p) = &patch.currency3 {
            apply_currency_patch(&mut self.settings.currency3, p);
        }
    }

    // Editing-session marker: transient, never persisted.
    pub fn set_editing_id(&mut self, id: &str) {
        self.editing_id = Some(id.to_string());
    }

    pub fn clear_editing_id(&mut self) {
        self.editing_id = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn editing_id(&self) -> Option<String> {
        self.editing_id.clone()
    }

    pub fn total_spent(&self) -> Decimal {
        self.records.iter().map(|r| r.amount).sum()
    }

    /// Category with the most records; ties go to the category seen first
    /// in insertion order. `None` when the store is empty.
    pub fn top_category(&self) -> Option<Category> {
        let mut counts: Vec<(Category, usize)> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|(c, _)| *c == record.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((record.category, 1)),
            }
        }
        let mut best: Option<(Category, usize)> = None;
        for (category, count) in counts {
            if best.map_or(true, |(_, n)| count > n) {
                best = Some((category, count));
            }
        }
        best.map(|(c, _)| c)
    }

    /// Records dated on or after today minus `days`.
    pub fn records_in_last_days(&self, days: i64) -> Vec<Record> {
        let cutoff = Local::now().date_naive() - Duration::days(days);
        self.records
            .iter()
            .filter(|r| r.date >= cutoff)
            .cloned()
            .collect()
    }
}

fn normalize_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_uppercase().chars().take(3).collect())
}

fn apply_currency_patch(entry: &mut crate::models::CurrencyEntry, patch: &CurrencyPatch) {
    if let Some(code) = patch.code.as_deref().and_then(normalize_code) {
        entry.code = code;
    }
    if let Some(rate) = patch.rate {
        if rate > Decimal::ZERO {
            entry.rate = rate;
        }
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    out.iter().rev().collect()
}
