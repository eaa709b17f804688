// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::RecordInput;
use crate::search;
use crate::session::{Session, SortDirection, SortField, SubmitOutcome};
use crate::storage::SaveOutcome;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub),
        Some(("edit", sub)) => edit(session, sub),
        Some(("delete", sub)) => delete(session, sub),
        Some(("clear", sub)) => clear(session, sub),
        Some(("list", sub)) => list(session, sub),
        _ => Ok(()),
    }
}

pub fn report_save(save: SaveOutcome) {
    if let SaveOutcome::Failed(reason) = save {
        eprintln!("Warning: changes were not saved ({}).", reason);
    }
}

fn submit(session: &mut Session, input: &RecordInput) -> Result<()> {
    match session.submit_form(input)? {
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors {
                eprintln!("{}: {}", field, message);
            }
        }
        SubmitOutcome::Saved { record, save } => {
            println!(
                "Recorded '{}' {} on {} [{}] (id: {})",
                record.description,
                fmt_money(&record.amount, &session.store().settings().base_currency),
                record.date,
                record.category,
                record.id
            );
            report_save(save);
        }
    }
    Ok(())
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let input = RecordInput {
        description: sub.get_one::<String>("description").cloned().unwrap_or_default(),
        amount: sub.get_one::<String>("amount").cloned().unwrap_or_default(),
        category: sub.get_one::<String>("category").cloned().unwrap_or_default(),
        date: sub.get_one::<String>("date").cloned().unwrap_or_default(),
    };
    submit(session, &input)
}

// Editing submits the full form: the existing record pre-fills whatever the
// user did not override, then the merged form goes through validation.
fn edit(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").cloned().unwrap_or_default();
    let Some(existing) = session.store().find_record(&id) else {
        eprintln!("No record with id '{}'", id);
        return Ok(());
    };
    session.begin_edit(&id);
    let pick = |name: &str, fallback: String| {
        sub.get_one::<String>(name).cloned().unwrap_or(fallback)
    };
    let input = RecordInput {
        description: pick("description", existing.description.clone()),
        amount: pick("amount", existing.amount.to_string()),
        category: pick("category", existing.category.to_string()),
        date: pick("date", existing.date.to_string()),
    };
    submit(session, &input)
}

fn delete(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let ids: Vec<String> = sub
        .get_many::<String>("ids")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let deleted = session.store_mut().delete_records(&ids);
    for record in &deleted {
        println!("Deleted '{}' ({})", record.description, record.id);
    }
    for id in &ids {
        if !deleted.iter().any(|r| &r.id == id) {
            eprintln!("No record with id '{}'", id);
        }
    }
    if !deleted.is_empty() {
        report_save(session.persist());
    }
    Ok(())
}

fn clear(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        eprintln!("Refusing to delete all records without --yes");
        return Ok(());
    }
    let count = session.store().record_count();
    session.store_mut().clear_all_records();
    println!("Deleted {} record(s)", count);
    report_save(session.persist());
    Ok(())
}

fn list(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let term = sub.get_one::<String>("search").cloned().unwrap_or_default();
    let case_insensitive = !sub.get_flag("match-case");
    if !search::is_valid_pattern(&term) {
        eprintln!("Note: '{}' is not a valid pattern; showing no matches.", term);
    }
    session.set_search_term(&term);

    let field = sub
        .get_one::<String>("sort")
        .and_then(|s| SortField::parse(s))
        .unwrap_or(SortField::Date);
    let direction = if sub.get_flag("desc") {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    session.set_sort(field, direction);

    // The session always searches case-insensitively, matching the original
    // search box; --match-case re-filters here.
    let mut records = session.visible_records();
    if !case_insensitive {
        records = search::search_records(&records, &term, false);
    }

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &records)? {
        return Ok(());
    }
    if records.is_empty() {
        println!("No transactions found");
        return Ok(());
    }
    let base = session.store().settings().base_currency;
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            let description = if term.trim().is_empty() {
                r.description.clone()
            } else {
                search::highlight_text(&r.description, &term, case_insensitive)
            };
            vec![
                r.date.to_string(),
                description,
                r.category.to_string(),
                fmt_money(&r.amount, &base),
                r.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Category", "Amount", "Id"], rows)
    );
    Ok(())
}
