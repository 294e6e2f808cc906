// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).num_args(1).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

fn mode_args(cmd: Command) -> Command {
    cmd.arg(
        opt("cycle-days", "Recurring income: spread the amount over a cycle of N days")
            .conflicts_with("duration-days"),
    )
    .arg(opt(
        "duration-days",
        "Continuous expense: spread the amount over N days, then stop",
    ))
}

pub fn build_cli() -> Command {
    Command::new("vela")
        .about("Vela: day-capacity budgeting for recurring income and installment expenses")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database and default categories"))
        .subcommand(
            Command::new("settings")
                .about("Show or change settings")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(opt("initial-balance", "Opening balance"))
                        .arg(opt("currency", "Display currency code, e.g. USD")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(req("name", "Category name"))
                        .arg(opt("description", "Optional description")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(req("name", "Existing category name"))
                        .arg(opt("new-name", "New name"))
                        .arg(opt("description", "New description (empty to clear)")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category; its transactions become uncategorized")
                        .arg(req("name", "Category name")),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(mode_args(
                    Command::new("add")
                        .arg(req("type", "income or expense"))
                        .arg(req("amount", "Positive amount"))
                        .arg(opt("date", "Start date YYYY-MM-DD (default today)"))
                        .arg(opt("category", "Category name"))
                        .arg(opt("description", "Free text")),
                ))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(opt("from", "Earliest start date"))
                        .arg(opt("to", "Latest start date"))
                        .arg(opt("category", "Category name"))
                        .arg(opt("type", "income or expense"))
                        .arg(opt("limit", "Maximum rows").value_parser(value_parser!(usize))),
                ))
                .subcommand(json_flags(
                    Command::new("show").arg(req("id", "Transaction id")),
                ))
                .subcommand(mode_args(
                    Command::new("edit")
                        .arg(req("id", "Transaction id"))
                        .arg(opt("amount", "New amount"))
                        .arg(opt("type", "income or expense"))
                        .arg(opt("date", "New start date"))
                        .arg(opt("category", "Category name").conflicts_with("uncategorize"))
                        .arg(
                            Arg::new("uncategorize")
                                .long("uncategorize")
                                .action(ArgAction::SetTrue)
                                .help("Clear the category"),
                        )
                        .arg(opt("description", "New description (empty to clear)"))
                        .arg(
                            Arg::new("single")
                                .long("single")
                                .action(ArgAction::SetTrue)
                                .conflicts_with_all(["cycle-days", "duration-days"])
                                .help("Make this a one-off transaction"),
                        ),
                ))
                .subcommand(Command::new("rm").arg(req("id", "Transaction id"))),
        )
        .subcommand(
            Command::new("report")
                .about("Day capacity, summaries and category breakdowns")
                .subcommand(json_flags(
                    Command::new("capacity").arg(opt("date", "Day YYYY-MM-DD (default today)")),
                ))
                .subcommand(json_flags(
                    Command::new("trend")
                        .arg(req("from", "First day"))
                        .arg(req("to", "Last day (inclusive)")),
                ))
                .subcommand(json_flags(
                    Command::new("summary")
                        .arg(req("from", "First day"))
                        .arg(req("to", "Last day (inclusive)")),
                ))
                .subcommand(json_flags(
                    Command::new("categories").arg(req("month", "Month YYYY-MM")),
                ))
                .subcommand(json_flags(
                    Command::new("balance").arg(opt("as-of", "Day YYYY-MM-DD (default today)")),
                )),
        )
        .subcommand(Command::new("doctor").about("Check stored transactions for invalid rows"))
}
