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
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_arg(required: bool) -> Arg {
    Arg::new("month")
        .long("month")
        .value_parser(value_parser!(u32))
        .required(required)
        .help("Month (1-12)")
}

fn year_arg(required: bool) -> Arg {
    Arg::new("year")
        .long("year")
        .value_parser(value_parser!(i32))
        .allow_negative_numbers(true)
        .required(required)
        .help("Year (YYYY)")
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Record id")
}

fn password_arg() -> Arg {
    Arg::new("password")
        .long("password")
        .help("Password (prompted when omitted)")
}

fn expense_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("description").long("description").required(true))
        .arg(Arg::new("amount").long("amount").required(true))
        .arg(
            Arg::new("due")
                .long("due")
                .required(true)
                .help("Due date YYYY-MM-DD"),
        )
        .arg(Arg::new("category").long("category"))
        .arg(Arg::new("paid").long("paid").action(ArgAction::SetTrue))
        .arg(
            Arg::new("paid_on")
                .long("paid-on")
                .help("Payment instant (RFC 3339 or YYYY-MM-DD); implies --paid"),
        )
        .arg(Arg::new("note").long("note"))
}

fn income_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("description").long("description").required(true))
        .arg(Arg::new("amount").long("amount").required(true))
        .arg(
            Arg::new("received")
                .long("received")
                .required(true)
                .help("Receipt date YYYY-MM-DD"),
        )
        .arg(Arg::new("category").long("category"))
        .arg(Arg::new("note").long("note"))
}

pub fn build_cli() -> Command {
    Command::new("saldozen")
        .version(clap::crate_version!())
        .about("Track expenses and incomes, and see where the month stands")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("user")
                .about("Register, log in and out")
                .subcommand(
                    Command::new("register")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(password_arg()),
                )
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(password_arg()),
                )
                .subcommand(Command::new("logout"))
                .subcommand(json_flags(Command::new("whoami"))),
        )
        .subcommand(
            Command::new("category")
                .about("Organise category labels")
                .subcommand(Command::new("add").arg(Arg::new("name").required(true)))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("expense")
                .about("Record and settle expenses")
                .subcommand(expense_fields(Command::new("add")))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg(false).requires("year"))
                        .arg(year_arg(false).requires("month")),
                ))
                .subcommand(json_flags(Command::new("show").arg(id_arg())))
                .subcommand(expense_fields(Command::new("update").arg(id_arg())))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(Command::new("pay").arg(id_arg()))
                .subcommand(Command::new("unpay").arg(id_arg())),
        )
        .subcommand(
            Command::new("income")
                .about("Record incomes")
                .subcommand(income_fields(Command::new("add")))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg(true))
                        .arg(year_arg(true)),
                ))
                .subcommand(json_flags(Command::new("show").arg(id_arg())))
                .subcommand(income_fields(Command::new("update").arg(id_arg())))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Monthly totals and balance")
                .arg(month_arg(true))
                .arg(year_arg(true)),
        ))
        .subcommand(
            Command::new("chart")
                .about("Grouped totals for charts")
                .subcommand(json_flags(
                    Command::new("category")
                        .arg(month_arg(true))
                        .arg(year_arg(true)),
                ))
                .subcommand(json_flags(
                    Command::new("status")
                        .arg(month_arg(true))
                        .arg(year_arg(true)),
                ))
                .subcommand(json_flags(
                    Command::new("yearly").arg(year_arg(true)).arg(
                        Arg::new("incomes")
                            .long("incomes")
                            .action(ArgAction::SetTrue)
                            .help("Total incomes instead of expenses"),
                    ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export records to CSV or JSON")
                .subcommand(
                    Command::new("expenses")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("incomes")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored records for inconsistencies"))
}
