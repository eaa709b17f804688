// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use ledgerline::{cli, commands, session::Session, storage::JsonStorage};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let storage = JsonStorage::open_default()?;
    let mut session = Session::start(Box::new(storage));
    if session.loaded_corrupted() {
        eprintln!("Warning: stored data was corrupted and has been reset to defaults.");
    }

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&mut session, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut session, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut session, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&session, sub)?,
        Some(("info", sub)) => commands::info::handle(&session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
