// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerline::commands::{exporter, importer};
use ledgerline::models::RecordInput;
use ledgerline::session::Session;
use ledgerline::storage::JsonStorage;
use ledgerline::cli;
use tempfile::tempdir;

fn file_session(dir: &std::path::Path) -> Session {
    Session::start(Box::new(JsonStorage::new(dir.join("ledgerline.json"))))
}

fn add(session: &mut Session, d: &str, a: &str, c: &str, day: &str) {
    session
        .submit_form(&RecordInput {
            description: d.to_string(),
            amount: a.to_string(),
            category: c.to_string(),
            date: day.to_string(),
        })
        .unwrap();
}

#[test]
fn export_and_import_through_the_cli_round_trips() {
    let dir = tempdir().unwrap();
    let mut session = file_session(dir.path());
    add(&mut session, "Coffee run", "4.50", "Food", "2024-01-10");
    add(&mut session, "Bus ticket", "2.00", "Transport", "2024-01-11");
    let records = session.store().records();

    let out = dir.path().join("export.json");
    let out_str = out.to_str().unwrap().to_string();
    let matches = cli::build_cli().get_matches_from(["ledgerline", "export", &out_str]);
    let Some(("export", export_m)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    exporter::handle(&session, export_m).unwrap();

    let other_dir = tempdir().unwrap();
    let mut fresh = file_session(other_dir.path());
    let matches = cli::build_cli().get_matches_from(["ledgerline", "import", &out_str]);
    let Some(("import", import_m)) = matches.subcommand() else {
        panic!("no import subcommand");
    };
    importer::handle(&mut fresh, import_m).unwrap();

    assert_eq!(fresh.store().records(), records);

    // The import persisted: a restart over the same file sees the records.
    let reopened = file_session(other_dir.path());
    assert_eq!(reopened.store().records(), records);
}

#[test]
fn json_export_has_the_interchange_shape() {
    let dir = tempdir().unwrap();
    let mut session = file_session(dir.path());
    add(&mut session, "Coffee run", "4.50", "Food", "2024-01-10");

    let payload = exporter::export_payload(&session).unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert!(value.get("records").unwrap().is_array());
    assert!(value.get("settings").unwrap().is_object());
    assert!(value.get("exportedAt").unwrap().is_string());
    let record = &value["records"][0];
    for key in ["id", "description", "amount", "category", "date", "createdAt", "updatedAt"] {
        assert!(record.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(record["date"], "2024-01-10");
    assert_eq!(record["category"], "Food");
}

#[test]
fn csv_export_writes_one_row_per_record() {
    let dir = tempdir().unwrap();
    let mut session = file_session(dir.path());
    add(&mut session, "Coffee run", "4.50", "Food", "2024-01-10");
    add(&mut session, "Bus ticket", "2.00", "Transport", "2024-01-11");

    let out = dir.path().join("export.csv");
    let out_str = out.to_str().unwrap().to_string();
    let matches = cli::build_cli().get_matches_from([
        "ledgerline", "export", &out_str, "--format", "csv",
    ]);
    let Some(("export", export_m)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    exporter::handle(&session, export_m).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,date,description,category,amount"
    );
    assert_eq!(lines.clone().count(), 2);
    assert!(text.contains("Coffee run"));
    assert!(text.contains("Transport"));
}
