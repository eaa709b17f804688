// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::session::Session;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    let info = session.storage_info();
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &info)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Path".to_string(), info.path.clone()],
        vec!["Available".to_string(), info.available.to_string()],
        vec!["Has data".to_string(), info.has_data.to_string()],
        vec![
            "Size".to_string(),
            format!(
                "{} bytes ({:.2} KB)",
                info.size_bytes,
                info.size_bytes as f64 / 1024.0
            ),
        ],
        vec![
            "Last updated".to_string(),
            info.last_updated
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "-".to_string()),
        ],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}
