// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::rc::Rc;

use ledgerline::commands::{exporter, importer};
use ledgerline::models::RecordInput;
use ledgerline::session::Session;
use ledgerline::storage::{LoadedState, PersistedState, SaveOutcome, Storage, StorageInfo};
use rust_decimal::Decimal;

struct MemStorage {
    saved: Rc<RefCell<Option<PersistedState>>>,
}

impl MemStorage {
    fn new() -> Self {
        MemStorage {
            saved: Rc::new(RefCell::new(None)),
        }
    }
}

impl Storage for MemStorage {
    fn load(&self) -> LoadedState {
        LoadedState {
            records: Vec::new(),
            settings: Default::default(),
            corrupted: false,
        }
    }

    fn save(&self, state: &PersistedState) -> SaveOutcome {
        *self.saved.borrow_mut() = Some(state.clone());
        SaveOutcome::Saved
    }

    fn info(&self) -> StorageInfo {
        StorageInfo {
            available: true,
            has_data: self.saved.borrow().is_some(),
            size_bytes: 0,
            last_updated: None,
            path: "memory".to_string(),
        }
    }
}

fn session_with_records() -> Session {
    let mut session = Session::start(Box::new(MemStorage::new()));
    for (d, a, c, day) in [
        ("Coffee run", "4.50", "Food", "2024-01-10"),
        ("Used textbook", "19.99", "Books", "2024-01-12"),
    ] {
        session
            .submit_form(&RecordInput {
                description: d.to_string(),
                amount: a.to_string(),
                category: c.to_string(),
                date: day.to_string(),
            })
            .unwrap();
    }
    session
}

#[test]
fn export_then_import_reproduces_the_store() {
    let mut source = session_with_records();
    source
        .store_mut()
        .set_budget_cap(Decimal::from(750))
        .unwrap();
    let payload = exporter::export_payload(&source).unwrap();

    let mut target = Session::start(Box::new(MemStorage::new()));
    let imported = importer::import_payload(&mut target, &payload).unwrap();
    assert_eq!(imported, 2);
    assert_eq!(target.store().records(), source.store().records());
    assert_eq!(target.store().settings(), source.store().settings());

    // And importing the re-export changes nothing: the cycle is idempotent.
    let payload2 = exporter::export_payload(&target).unwrap();
    let mut third = Session::start(Box::new(MemStorage::new()));
    importer::import_payload(&mut third, &payload2).unwrap();
    assert_eq!(third.store().records(), source.store().records());
}

#[test]
fn missing_records_array_rejects_the_file() {
    let mut session = session_with_records();
    let before = session.store().records();
    let err = importer::import_payload(&mut session, r#"{"settings": {}}"#).unwrap_err();
    assert!(err.to_string().contains("missing records array"));
    let err = importer::import_payload(&mut session, r#"{"records": 5}"#).unwrap_err();
    assert!(err.to_string().contains("missing records array"));
    assert_eq!(session.store().records(), before);
}

#[test]
fn one_invalid_record_rejects_everything_with_a_count() {
    let mut session = session_with_records();
    let before = session.store().records();
    let payload = r#"{
        "records": [
            {"id": "a1", "description": "Coffee run", "amount": "4.50",
             "category": "Food", "date": "2024-01-10"},
            {"id": "a2", "description": "ok desc", "amount": "-3",
             "category": "Food", "date": "2024-01-10"},
            {"id": "a3", "description": "no such category", "amount": "1.00",
             "category": "Groceries", "date": "2024-01-10"}
        ]
    }"#;
    let err = importer::import_payload(&mut session, payload).unwrap_err();
    assert!(err.to_string().contains("2 of 3"));
    assert_eq!(session.store().records(), before);
}

#[test]
fn duplicate_ids_count_as_invalid() {
    let mut session = Session::start(Box::new(MemStorage::new()));
    let payload = r#"{
        "records": [
            {"id": "a1", "description": "Coffee run", "amount": "4.50",
             "category": "Food", "date": "2024-01-10"},
            {"id": "a1", "description": "Bus ticket", "amount": "2.00",
             "category": "Transport", "date": "2024-01-11"}
        ]
    }"#;
    let err = importer::import_payload(&mut session, payload).unwrap_err();
    assert!(err.to_string().contains("1 of 2"));
}

#[test]
fn numeric_amounts_are_accepted() {
    let mut session = Session::start(Box::new(MemStorage::new()));
    let payload = r#"{
        "records": [
            {"id": "a1", "description": "Coffee run", "amount": 4.5,
             "category": "Food", "date": "2024-01-10"}
        ]
    }"#;
    let imported = importer::import_payload(&mut session, payload).unwrap();
    assert_eq!(imported, 1);
    assert_eq!(session.store().records()[0].amount, Decimal::new(45, 1));
}

#[test]
fn provided_settings_merge_and_normalize() {
    let mut session = Session::start(Box::new(MemStorage::new()));
    let payload = r#"{
        "records": [],
        "settings": {
            "budgetCap": 800,
            "currency2": {"code": "jpy", "rate": 155}
        }
    }"#;
    importer::import_payload(&mut session, payload).unwrap();
    let settings = session.store().settings();
    assert_eq!(settings.budget_cap, Decimal::from(800));
    assert_eq!(settings.currency2.code, "JPY");
    assert_eq!(settings.currency2.rate, Decimal::from(155));
    // Untouched sub-fields keep their defaults.
    assert_eq!(settings.base_currency, "USD");
    assert_eq!(settings.currency3.code, "KES");
}

#[test]
fn bad_json_is_an_error_not_a_panic() {
    let mut session = Session::start(Box::new(MemStorage::new()));
    assert!(importer::import_payload(&mut session, "not json").is_err());
    assert_eq!(session.store().record_count(), 0);
}
