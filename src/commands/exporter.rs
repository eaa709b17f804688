// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::models::ExportFile;
use crate::session::Session;

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").cloned().unwrap_or_default();
    let fmt = m
        .get_one::<String>("format")
        .cloned()
        .unwrap_or_else(|| "json".to_string());
    let count = session.store().record_count();

    match fmt.as_str() {
        "json" => {
            let payload = export_payload(session)?;
            std::fs::write(&path, payload).with_context(|| format!("Write export {}", path))?;
        }
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(&path).with_context(|| format!("Write export {}", path))?;
            wtr.write_record(["id", "date", "description", "category", "amount"])?;
            for r in session.store().records() {
                wtr.write_record([
                    r.id,
                    r.date.to_string(),
                    r.description,
                    r.category.to_string(),
                    r.amount.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            eprintln!("Unknown format: {} (use json|csv)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} record(s) to {}", count, path);
    Ok(())
}

/// The JSON interchange document; `import` accepts exactly this shape, so
/// export followed by import reproduces the store.
pub fn export_payload(session: &Session) -> Result<String> {
    let file = ExportFile {
        records: session.store().records(),
        settings: session.store().settings(),
        exported_at: Utc::now(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}
