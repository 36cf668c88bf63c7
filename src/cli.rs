// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{ArgAction, Command, arg, value_parser};

fn with_json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").action(ArgAction::SetTrue))
        .arg(arg!(--jsonl "Print as JSON lines").action(ArgAction::SetTrue))
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .about("Household ledger over a flat append-only row store")
        .arg(
            arg!(--sheet "Use the remote sheet store (TALLYBOOK_SHEET_* env vars)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("init").about("Create or locate the row store"))
        .subcommand(with_json_flags(
            Command::new("show")
                .about("Structured snapshot of one period")
                .arg(arg!(--period <PERIOD> "Period key YYYY.MM (default: current month)")),
        ))
        .subcommand(
            Command::new("entry")
                .about("Write or remove a single ledger entry")
                .subcommand(
                    Command::new("set")
                        .about("Update-or-append an entry by (period, category, name)")
                        .arg(arg!(--period <PERIOD>).required(true))
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--detail <DETAIL>)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an entry by (period, category, name)")
                        .arg(arg!(--period <PERIOD>).required(true))
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(arg!(--name <NAME>).required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived views over the whole row log")
                .subcommand(with_json_flags(
                    Command::new("history").about("Monthly income/expense/saving/investment"),
                ))
                .subcommand(with_json_flags(
                    Command::new("invest").about("Investment sub-account history"),
                ))
                .subcommand(with_json_flags(
                    Command::new("rollup")
                        .about("Lifetime expense rollup, top spenders first")
                        .arg(
                            arg!(--top <N> "How many entries to keep")
                                .value_parser(value_parser!(usize))
                                .default_value("5"),
                        ),
                ))
                .subcommand(with_json_flags(
                    Command::new("balances").about("Cash/savings/bond/stock balances per period"),
                )),
        )
        .subcommand(
            Command::new("import").about("Load rows from a flat file").subcommand(
                Command::new("rows")
                    .about("Append data rows from a CSV file (header line skipped)")
                    .arg(arg!(--path <PATH>).required(true)),
            ),
        )
        .subcommand(
            Command::new("export").about("Dump the row log").subcommand(
                Command::new("rows")
                    .about("Write the row log to CSV or JSON")
                    .arg(arg!(--format <FMT> "csv|json").required(true))
                    .arg(arg!(--out <OUT>).required(true)),
            ),
        )
        .subcommand(
            Command::new("category")
                .about("Category taxonomy")
                .subcommand(Command::new("list").about("Canonical tags and legacy aliases")),
        )
        .subcommand(Command::new("doctor").about("Audit the row log for suspicious rows"))
}
