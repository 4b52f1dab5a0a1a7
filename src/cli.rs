// Copyright (c) 2025 FinanceHub contributors.
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
            .help("Print as a pretty JSON document"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("financehub")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Personal finance tracker: yield-bearing incomes, installment expenses, cards, and savings jars")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(income_cmd())
        .subcommand(expense_cmd())
        .subcommand(card_cmd())
        .subcommand(jar_cmd())
        .subcommand(advance_cmd())
        .subcommand(salary_cmd())
        .subcommand(json_flags(
            Command::new("dashboard").about("Current balances, month spend, and upcoming invoices"),
        ))
        .subcommand(report_cmd())
        .subcommand(Command::new("doctor").about("Check the data set for inconsistencies"))
}

fn income_cmd() -> Command {
    Command::new("income")
        .about("Incomes and deposits, optionally yield-bearing")
        .subcommand(
            Command::new("add")
                .about("Record an income")
                .arg(Arg::new("description").long("description").short('d').required(true))
                .arg(Arg::new("amount").long("amount").short('a').required(true))
                .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                .arg(Arg::new("rate").long("rate").help("Yield in % per business day"))
                .arg(Arg::new("jar").long("jar").help("Savings jar name to link"))
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List incomes with their accrued current value")
                .arg(Arg::new("month").long("month").help("Filter by YYYY-MM")),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete an income")
                .arg(Arg::new("id").required(true)),
        )
}

fn expense_cmd() -> Command {
    Command::new("expense")
        .about("Expenses, including card installment purchases")
        .subcommand(
            Command::new("add")
                .about("Record an expense")
                .arg(Arg::new("description").long("description").short('d').required(true))
                .arg(Arg::new("amount").long("amount").short('a').required(true).help("Total across all installments"))
                .arg(Arg::new("date").long("date").required(true).help("Purchase date YYYY-MM-DD"))
                .arg(Arg::new("category").long("category").short('c').required(true))
                .arg(Arg::new("method").long("method").short('m').required(true).help("card | pix | cash"))
                .arg(Arg::new("card").long("card").help("Card name (card method)"))
                .arg(
                    Arg::new("installments")
                        .long("installments")
                        .short('n')
                        .value_parser(clap::value_parser!(u32))
                        .default_value("1"),
                )
                .arg(Arg::new("start-month").long("start-month").help("Pin the first installment's due month (YYYY-MM)"))
                .arg(Arg::new("creditor").long("creditor"))
                .arg(Arg::new("creditor-contact").long("creditor-contact"))
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List expenses with installment status")
                .arg(Arg::new("month").long("month").help("Filter by budget month YYYY-MM"))
                .arg(Arg::new("method").long("method").help("Filter by payment method")),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete an expense")
                .arg(Arg::new("id").required(true)),
        )
}

fn card_cmd() -> Command {
    Command::new("card")
        .about("Credit cards")
        .subcommand(
            Command::new("add")
                .about("Register a card")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("holder").long("holder"))
                .arg(Arg::new("limit").long("limit"))
                .arg(
                    Arg::new("due-day")
                        .long("due-day")
                        .value_parser(clap::value_parser!(u32))
                        .help("Statement due day, 1..=31"),
                )
                .arg(Arg::new("color").long("color")),
        )
        .subcommand(json_flags(
            Command::new("list").about("List cards with current invoice and limit use"),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a card")
                .arg(Arg::new("id").required(true)),
        )
}

fn jar_cmd() -> Command {
    Command::new("jar")
        .about("Savings jars (named goals, optionally yield-bearing)")
        .subcommand(
            Command::new("add")
                .about("Create a jar")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("target").long("target"))
                .arg(Arg::new("rate").long("rate").help("Yield in % per business day; overrides linked incomes"))
                .arg(Arg::new("icon").long("icon"))
                .arg(Arg::new("color").long("color")),
        )
        .subcommand(json_flags(
            Command::new("list").about("List jars with accrued balance and goal progress"),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a jar")
                .arg(Arg::new("id").required(true)),
        )
}

fn advance_cmd() -> Command {
    Command::new("advance")
        .about("Early/discounted installment payments")
        .subcommand(
            Command::new("record")
                .about("Record that an installment was paid ahead of its due date")
                .arg(Arg::new("expense").long("expense").required(true).help("Expense id"))
                .arg(
                    Arg::new("installment")
                        .long("installment")
                        .short('i')
                        .required(true)
                        .value_parser(clap::value_parser!(u32))
                        .help("Zero-based installment index"),
                )
                .arg(Arg::new("paid").long("paid").required(true).help("Amount actually paid"))
                .arg(Arg::new("date").long("date").help("Payment date, defaults to today")),
        )
        .subcommand(json_flags(Command::new("list").about("List advance payments")))
}

fn salary_cmd() -> Command {
    Command::new("salary")
        .about("Monthly salary rule")
        .subcommand(
            Command::new("set")
                .about("Set the salary configuration")
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("inactive")
                        .long("inactive")
                        .action(ArgAction::SetTrue)
                        .help("Keep the amount but stop counting it"),
                )
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(Command::new("show").about("Show the salary configuration"))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Derived reports")
        .subcommand(json_flags(
            Command::new("invoice")
                .about("A card's statement for a month")
                .arg(Arg::new("card").long("card").required(true).help("Card name or id"))
                .arg(Arg::new("month").long("month").required(true).help("YYYY-MM")),
        ))
        .subcommand(json_flags(
            Command::new("month")
                .about("Spend for a month, total and by category")
                .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to the current month")),
        ))
        .subcommand(json_flags(
            Command::new("annual")
                .about("Twelve-month income/salary/spend table")
                .arg(
                    Arg::new("year")
                        .long("year")
                        .required(true)
                        .value_parser(clap::value_parser!(i32)),
                ),
        ))
}
