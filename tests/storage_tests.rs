// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use ledgerline::models::{Category, Record, Settings};
use ledgerline::storage::{JsonStorage, PersistedState, Storage, STORAGE_VERSION};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn sample_record() -> Record {
    let now = Utc::now();
    Record {
        id: "abc123".to_string(),
        description: "Coffee run".to_string(),
        amount: Decimal::new(450, 2),
        category: Category::Food,
        date: "2024-01-10".parse().unwrap(),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn missing_file_loads_defaults_without_corruption_flag() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::new(dir.path().join("ledgerline.json"));
    let loaded = storage.load();
    assert!(loaded.records.is_empty());
    assert_eq!(loaded.settings, Settings::default());
    assert!(!loaded.corrupted);
    assert_eq!(loaded.settings.budget_cap, Decimal::from(500));
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::new(dir.path().join("ledgerline.json"));
    let state = PersistedState {
        records: vec![sample_record()],
        settings: Settings::default(),
        version: STORAGE_VERSION.to_string(),
        last_updated: Some(Utc::now()),
    };
    assert!(storage.save(&state).is_saved());

    let loaded = storage.load();
    assert!(!loaded.corrupted);
    assert_eq!(loaded.records, state.records);
    assert_eq!(loaded.settings, state.settings);
}

#[test]
fn damaged_document_is_discarded_and_flagged() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledgerline.json");
    std::fs::write(&path, "{ not json").unwrap();
    let storage = JsonStorage::new(path.clone());

    let loaded = storage.load();
    assert!(loaded.corrupted);
    assert!(loaded.records.is_empty());
    assert_eq!(loaded.settings, Settings::default());
    // The bad document is gone, so the next load starts clean.
    assert!(!path.exists());
    assert!(!storage.load().corrupted);
}

#[test]
fn type_mismatched_records_field_counts_as_corruption() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledgerline.json");
    std::fs::write(&path, r#"{"records": "nope", "settings": {}}"#).unwrap();
    let storage = JsonStorage::new(path);
    assert!(storage.load().corrupted);
}

#[test]
fn omitted_fields_decode_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledgerline.json");
    std::fs::write(&path, r#"{"records": []}"#).unwrap();
    let storage = JsonStorage::new(path);
    let loaded = storage.load();
    assert!(!loaded.corrupted);
    assert_eq!(loaded.settings, Settings::default());
}

#[test]
fn info_reflects_stored_document() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::new(dir.path().join("ledgerline.json"));
    let info = storage.info();
    assert!(!info.has_data);
    assert_eq!(info.size_bytes, 0);

    let state = PersistedState {
        records: Vec::new(),
        settings: Settings::default(),
        version: STORAGE_VERSION.to_string(),
        last_updated: Some(Utc::now()),
    };
    storage.save(&state);
    let info = storage.info();
    assert!(info.has_data);
    assert!(info.size_bytes > 0);
    assert!(info.last_updated.is_some());
}

#[test]
fn save_into_unwritable_location_reports_unavailable() {
    let storage = JsonStorage::new(std::path::PathBuf::from(
        "/proc/ledgerline-no-such-dir/ledgerline.json",
    ));
    let outcome = storage.save(&PersistedState::default());
    assert!(!outcome.is_saved());
}
