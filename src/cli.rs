// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn scope_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("year")
            .long("year")
            .value_parser(value_parser!(i32))
            .help("Year scope (defaults to the current year)"),
    )
    .arg(
        Arg::new("month")
            .long("month")
            .value_parser(value_parser!(u32).range(1..=12))
            .help("Month scope 1-12"),
    )
}

pub fn build_cli() -> Command {
    Command::new("kakei")
        .about("Household ledger: reconcile imports, budgets, asset goals, and reports")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the store database (defaults to the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Initialize the store"))
        .subcommand(
            Command::new("import")
                .about("Import a transactions CSV (Shift-JIS, falling back to UTF-8)")
                .arg(Arg::new("path").required(true).help("CSV file path")),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a manual transaction")
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .required(true)
                                .help("What the money was for"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Positive amount in yen"),
                        )
                        .arg(
                            Arg::new("income")
                                .long("income")
                                .action(ArgAction::SetTrue)
                                .help("Record as income instead of expense"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Major category (defaults to food)"),
                        )
                        .arg(Arg::new("minor").long("minor").help("Optional minor category")),
                )
                .subcommand(json_flags(scope_args(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("category").long("category").help("Filter by category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .help("Show at most N rows"),
                        ),
                ))),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budgets per category")
                .subcommand(
                    Command::new("set")
                        .about("Set a category budget (0 removes it)")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List budgets")))
                .subcommand(json_flags(scope_args(
                    Command::new("report").about("Budget utilization for a month"),
                ))),
        )
        .subcommand(
            Command::new("asset")
                .about("Monthly asset snapshots")
                .subcommand(
                    Command::new("set")
                        .about("Record the snapshot for one month (replaces any prior one)")
                        .arg(Arg::new("month").required(true).help("YYYY-MM"))
                        .arg(Arg::new("cash").long("cash").default_value("0"))
                        .arg(Arg::new("securities").long("securities").default_value("0"))
                        .arg(Arg::new("retirement").long("retirement").default_value("0"))
                        .arg(Arg::new("other").long("other").default_value("0")),
                )
                .subcommand(json_flags(Command::new("list").about("List snapshots"))),
        )
        .subcommand(
            Command::new("goal")
                .about("Asset goals and trajectory forecasts")
                .subcommand(
                    Command::new("set")
                        .about("Set a goal (same name replaces)")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("target").long("target").required(true).help("Target amount"))
                        .arg(Arg::new("date").long("date").required(true).help("Target date YYYY-MM-DD")),
                )
                .subcommand(json_flags(Command::new("list").about("List goals")))
                .subcommand(json_flags(
                    Command::new("forecast")
                        .about("Project the asset trajectory toward a goal")
                        .arg(Arg::new("name").help("Goal name (defaults to every goal)")),
                )),
        )
        .subcommand(
            Command::new("journal")
                .about("Monthly reviews")
                .subcommand(
                    Command::new("add")
                        .about("Record a review for a month (replaces any prior one)")
                        .arg(Arg::new("month").required(true).help("YYYY-MM"))
                        .arg(
                            Arg::new("score")
                                .long("score")
                                .value_parser(value_parser!(u8).range(1..=10))
                                .default_value("5")
                                .help("Satisfaction 1-10"),
                        )
                        .arg(Arg::new("comment").long("comment").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List reviews"))),
        )
        .subcommand(
            Command::new("report")
                .about("Derived reports over the ledger")
                .subcommand(json_flags(scope_args(
                    Command::new("summary")
                        .about("Income, expense, balance, year-over-year, budget utilization"),
                )))
                .subcommand(json_flags(scope_args(
                    Command::new("categories")
                        .about("Spend per category against the yearly monthly average"),
                )))
                .subcommand(json_flags(scope_args(
                    Command::new("year").about("Annual category summary"),
                ))),
        )
        .subcommand(scope_args(
            Command::new("advice")
                .about("Build the monthly analysis prompt; send it when an endpoint is configured")
                .arg(
                    Arg::new("send")
                        .long("send")
                        .action(ArgAction::SetTrue)
                        .help("Send to the configured advice endpoint"),
                ),
        ))
        .subcommand(
            Command::new("export").about("Export collections").subcommand(
                Command::new("transactions")
                    .about("Export the ledger")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv or json"),
                    )
                    .arg(Arg::new("out").long("out").required(true).help("Output path")),
            ),
        )
        .subcommand(
            Command::new("auth")
                .about("Check a passphrase against the configured secret")
                .arg(Arg::new("passphrase").required(true)),
        )
        .subcommand(Command::new("doctor").about("Check store health and configuration"))
}
