// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::commands::transactions::report_save;
use crate::models::BudgetStatus;
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("cap", sub)) => cap(session, sub),
        Some(("dashboard", sub)) => dashboard(session, sub),
        _ => Ok(()),
    }
}

fn cap(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let raw = sub.get_one::<String>("value").cloned().unwrap_or_default();
    let value = parse_decimal(&raw)?;
    match session.store_mut().set_budget_cap(value) {
        Ok(()) => {
            println!("Budget cap set to {}", value);
            report_save(session.persist());
        }
        Err(e) => eprintln!("{}", e),
    }
    Ok(())
}

fn dashboard(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let summary = session.dashboard();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        return Ok(());
    }

    let base = summary.settings.base_currency.clone();
    let mut rows = vec![
        vec![
            "Transactions".to_string(),
            summary.total_count.to_string(),
        ],
        vec![
            "Total spent".to_string(),
            fmt_money(&summary.total_spent, &base),
        ],
        vec![
            "Top category".to_string(),
            summary
                .top_category
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ],
        vec![
            "Budget cap".to_string(),
            fmt_money(&summary.budget_cap, &base),
        ],
        vec![
            "Last 7 days".to_string(),
            format!("{} transaction(s)", summary.last7_days_records.len()),
        ],
    ];
    for entry in [&summary.settings.currency2, &summary.settings.currency3] {
        rows.push(vec![
            format!("Total in {}", entry.code),
            fmt_money(&(summary.total_spent * entry.rate), &entry.code),
        ]);
    }
    println!("{}", pretty_table(&["Metric", "Value"], rows));

    match summary.budget {
        BudgetStatus::OverBudget { overage } => println!(
            "OVER BUDGET: spent {} of {} ({} over)",
            fmt_money(&summary.total_spent, &base),
            fmt_money(&summary.budget_cap, &base),
            fmt_money(&overage, &base),
        ),
        BudgetStatus::WithinBudget { remaining } => println!(
            "Within budget: {} remaining of {}",
            fmt_money(&remaining, &base),
            fmt_money(&summary.budget_cap, &base),
        ),
    }
    Ok(())
}
