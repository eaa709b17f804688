// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wires the store, validation, and search together in response to user
//! actions, and pushes state to storage after every successful mutation.
//! One `Session` per program run; tests construct as many as they like over
//! in-memory storage.

use anyhow::Result;
use chrono::Utc;
use std::collections::BTreeMap;

use crate::models::{BudgetStatus, DashboardSummary, Record, RecordInput, RecordPatch};
use crate::search;
use crate::storage::{PersistedState, SaveOutcome, Storage, StorageInfo, STORAGE_VERSION};
use crate::store::RecordStore;
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Description,
    Amount,
}

impl SortField {
    pub fn parse(s: &str) -> Option<SortField> {
        match s {
            "date" => Some(SortField::Date),
            "description" => Some(SortField::Description),
            "amount" => Some(SortField::Amount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Per-field messages; the store was not touched.
    Invalid(BTreeMap<&'static str, &'static str>),
    /// The record as stored, plus how persisting it went.
    Saved { record: Record, save: SaveOutcome },
}

pub struct Session {
    store: RecordStore,
    storage: Box<dyn Storage>,
    sort_field: SortField,
    sort_direction: SortDirection,
    search_term: String,
    corrupted: bool,
}

impl Session {
    /// Loads persisted state and builds a working session. Corrupted stored
    /// data has already been replaced by defaults; the flag is kept so the
    /// caller can tell the user.
    pub fn start(storage: Box<dyn Storage>) -> Self {
        let loaded = storage.load();
        let mut store = RecordStore::new();
        store.set_records(loaded.records);
        store.set_settings(loaded.settings);
        Session {
            store,
            storage,
            sort_field: SortField::Date,
            sort_direction: SortDirection::Desc,
            search_term: String::new(),
            corrupted: loaded.corrupted,
        }
    }

    pub fn loaded_corrupted(&self) -> bool {
        self.corrupted
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    pub fn storage_info(&self) -> StorageInfo {
        self.storage.info()
    }

    /// Validate, then add or update depending on the editing marker, then
    /// persist. Validation failure leaves the store, the marker, and the
    /// durable copy all untouched.
    pub fn submit_form(&mut self, input: &RecordInput) -> Result<SubmitOutcome> {
        let validation = validate::validate_form(input);
        if !validation.is_valid {
            return Ok(SubmitOutcome::Invalid(validation.errors));
        }
        let record = match self.store.editing_id() {
            Some(id) => self
                .store
                .update_record(&id, &RecordPatch::from_input(input))?,
            None => self.store.add_record(input)?,
        };
        self.store.clear_editing_id();
        let save = self.persist();
        Ok(SubmitOutcome::Saved { record, save })
    }

    /// Marks a record for update by the next `submit_form`.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        if self.store.find_record(id).is_none() {
            return false;
        }
        self.store.set_editing_id(id);
        true
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Clicking the current field toggles direction; a new field starts
    /// ascending.
    pub fn sort_by(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = match self.sort_direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Asc;
        }
    }

    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.sort_field = field;
        self.sort_direction = direction;
    }

    pub fn sort_state(&self) -> (SortField, SortDirection) {
        (self.sort_field, self.sort_direction)
    }

    /// The display list: search filter first, then a stable sort of the
    /// filtered result.
    pub fn visible_records(&self) -> Vec<Record> {
        let mut records = search::search_records(&self.store.records(), &self.search_term, true);
        sort_records(&mut records, self.sort_field, self.sort_direction);
        records
    }

    pub fn dashboard(&self) -> DashboardSummary {
        let total_spent = self.store.total_spent();
        let budget_cap = self.store.budget_cap();
        let budget = if total_spent > budget_cap {
            BudgetStatus::OverBudget {
                overage: total_spent - budget_cap,
            }
        } else {
            BudgetStatus::WithinBudget {
                remaining: budget_cap - total_spent,
            }
        };
        DashboardSummary {
            total_spent,
            top_category: self.store.top_category(),
            total_count: self.store.record_count(),
            budget_cap,
            settings: self.store.settings(),
            last7_days_records: self.store.records_in_last_days(7),
            budget,
        }
    }

    /// Writes the current state through the storage seam. Failure is
    /// reported, not raised: the in-memory state stays correct either way.
    pub fn persist(&mut self) -> SaveOutcome {
        let state = PersistedState {
            records: self.store.records(),
            settings: self.store.settings(),
            version: STORAGE_VERSION.to_string(),
            last_updated: Some(Utc::now()),
        };
        self.storage.save(&state)
    }
}

fn sort_records(records: &mut [Record], field: SortField, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ordering = match field {
            SortField::Date => a.date.cmp(&b.date),
            SortField::Description => a
                .description
                .to_lowercase()
                .cmp(&b.description.to_lowercase()),
            SortField::Amount => a.amount.cmp(&b.amount),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
