// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::accrual::accrued_value;
use crate::calendar::month_key;
use crate::models::Income;
use crate::store::{Store, collections};
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let income = Income {
        id: String::new(),
        description: sub.get_one::<String>("description").unwrap().trim().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        yield_rate: sub
            .get_one::<String>("rate")
            .map(|s| parse_decimal(s))
            .transpose()?,
        jar_name: sub.get_one::<String>("jar").map(|s| s.trim().to_string()),
        note: sub.get_one::<String>("note").cloned(),
    };
    income.validate()?;

    if let Some(name) = &income.jar_name {
        let ledger = store.load_ledger()?;
        if !ledger.jars.iter().any(|j| &j.name == name) {
            anyhow::bail!("No jar named '{}'", name);
        }
    }

    let id = store.create(collections::INCOMES, serde_json::to_value(&income)?)?;
    println!(
        "Recorded income '{}' of {} on {} ({})",
        income.description,
        fmt_money(income.amount),
        income.date,
        id
    );
    Ok(())
}

#[derive(Serialize)]
struct IncomeRow {
    id: String,
    date: String,
    description: String,
    principal: Decimal,
    current: Decimal,
    gains: Decimal,
    rate: Option<Decimal>,
    jar: String,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = sub.get_one::<String>("month");
    let ledger = store.load_ledger()?;
    let today = crate::utils::today();

    let rows: Vec<IncomeRow> = ledger
        .incomes
        .iter()
        .filter(|r| month.is_none_or(|m| &month_key(r.date) == m))
        .map(|r| {
            let current = accrued_value(r, &ledger.jars, today);
            IncomeRow {
                id: r.id.clone(),
                date: r.date.to_string(),
                description: r.description.clone(),
                principal: r.amount,
                current,
                gains: current - r.amount,
                rate: Some(crate::accrual::effective_rate(r, &ledger.jars))
                    .filter(|v| *v > Decimal::ZERO),
                jar: r.jar_name.clone().unwrap_or_default(),
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.description.clone(),
                    fmt_money(r.principal),
                    fmt_money(r.current),
                    fmt_money(r.gains),
                    r.rate.map(|v| format!("{}/day", fmt_pct(v))).unwrap_or_default(),
                    r.jar.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Principal", "Current", "Gains", "Yield", "Jar"],
                data
            )
        );
    }
    Ok(())
}

fn remove(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    store.delete(collections::INCOMES, id)?;
    println!("Removed income {}", id);
    Ok(())
}
