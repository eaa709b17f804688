// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::commands::transactions::report_save;
use crate::models::{CurrencyPatch, SettingsPatch};
use crate::session::Session;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("currency", sub)) => currency(session, sub),
        Some(("show", sub)) => show(session, sub),
        _ => Ok(()),
    }
}

fn currency(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let rate = |name: &str| -> Result<Option<rust_decimal::Decimal>> {
        sub.get_one::<String>(name).map(|s| parse_decimal(s)).transpose()
    };
    let entry = |code: &str, rate_name: &str| -> Result<Option<CurrencyPatch>> {
        let code = sub.get_one::<String>(code).cloned();
        let rate = rate(rate_name)?;
        Ok(if code.is_none() && rate.is_none() {
            None
        } else {
            Some(CurrencyPatch { code, rate })
        })
    };

    let patch = SettingsPatch {
        budget_cap: None,
        base_currency: sub.get_one::<String>("base").cloned(),
        currency2: entry("code2", "rate2")?,
        currency3: entry("code3", "rate3")?,
    };
    session.store_mut().set_currencies(&patch);
    print_settings(session);
    report_save(session.persist());
    Ok(())
}

fn show(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let settings = session.store().settings();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &settings)? {
        return Ok(());
    }
    print_settings(session);
    Ok(())
}

fn print_settings(session: &Session) {
    let s = session.store().settings();
    let rows = vec![
        vec!["Budget cap".to_string(), s.budget_cap.to_string()],
        vec!["Base currency".to_string(), s.base_currency.clone()],
        vec![
            "Currency 2".to_string(),
            format!("{} @ {}", s.currency2.code, s.currency2.rate),
        ],
        vec![
            "Currency 3".to_string(),
            format!("{} @ {}", s.currency3.code, s.currency3.rate),
        ],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
}
