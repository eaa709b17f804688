// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("ledgerline")
        .about("Personal finance tracking with budget caps, regex search, and JSON import/export")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(
            Command::new("tx")
                .about("Manage transaction records")
                .subcommand(
                    Command::new("add")
                        .about("Add a transaction")
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('d')
                                .required(true),
                        )
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .short('c')
                                .required(true)
                                .help("One of: Food, Books, Transport, Entertainment, Fees, Other"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Update fields of an existing transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("description").long("description").short('d'))
                        .arg(Arg::new("amount").long("amount").short('a'))
                        .arg(Arg::new("category").long("category").short('c'))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete one or more transactions by id")
                        .arg(Arg::new("ids").required(true).num_args(1..)),
                )
                .subcommand(
                    Command::new("clear")
                        .about("Delete every transaction")
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .action(ArgAction::SetTrue)
                                .help("Confirm the deletion"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, optionally filtered and sorted")
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .short('s')
                                .help("Regex matched against description, category, amount, date"),
                        )
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .value_parser(["date", "description", "amount"])
                                .default_value("date"),
                        )
                        .arg(
                            Arg::new("desc")
                                .long("desc")
                                .action(ArgAction::SetTrue)
                                .help("Sort descending"),
                        )
                        .arg(
                            Arg::new("match-case")
                                .long("match-case")
                                .action(ArgAction::SetTrue)
                                .help("Make the search pattern case-sensitive"),
                        ),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Budget cap and dashboard")
                .subcommand(
                    Command::new("cap")
                        .about("Set the budget cap")
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("dashboard").about("Spending summary against the budget cap"),
                )),
        )
        .subcommand(
            Command::new("settings")
                .about("Currency settings")
                .subcommand(
                    Command::new("currency")
                        .about("Update base and secondary currencies")
                        .arg(Arg::new("base").long("base").help("3-letter base currency code"))
                        .arg(Arg::new("code2").long("code2"))
                        .arg(Arg::new("rate2").long("rate2"))
                        .arg(Arg::new("code3").long("code3"))
                        .arg(Arg::new("rate3").long("rate3")),
                )
                .subcommand(json_flags(Command::new("show").about("Show current settings"))),
        )
        .subcommand(
            Command::new("import")
                .about("Replace all data from a JSON export file")
                .arg(Arg::new("path").required(true)),
        )
        .subcommand(
            Command::new("export")
                .about("Export records and settings to a file")
                .arg(Arg::new("path").required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["json", "csv"])
                        .default_value("json"),
                ),
        )
        .subcommand(json_flags(
            Command::new("info").about("Show storage location and status"),
        ))
}
