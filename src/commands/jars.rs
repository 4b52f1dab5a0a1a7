// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::jar_balance;
use crate::models::Jar;
use crate::store::{Store, collections};
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, parse_decimal, pretty_table};

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
    let jar = Jar {
        id: String::new(),
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        target: sub
            .get_one::<String>("target")
            .map(|s| parse_decimal(s))
            .transpose()?,
        yield_rate: sub
            .get_one::<String>("rate")
            .map(|s| parse_decimal(s))
            .transpose()?,
        icon: sub.get_one::<String>("icon").cloned(),
        color: sub.get_one::<String>("color").cloned(),
    };
    jar.validate()?;

    let ledger = store.load_ledger()?;
    if ledger.jars.iter().any(|j| j.name == jar.name) {
        anyhow::bail!("A jar named '{}' already exists", jar.name);
    }

    let id = store.create(collections::JARS, serde_json::to_value(&jar)?)?;
    println!("Created jar '{}' ({})", jar.name, id);
    Ok(())
}

#[derive(Serialize)]
struct JarRow {
    id: String,
    name: String,
    balance: Decimal,
    target: Option<Decimal>,
    progress: String,
    rate: String,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = store.load_ledger()?;
    let today = crate::utils::today();

    let rows: Vec<JarRow> = ledger
        .jars
        .iter()
        .map(|j| {
            let balance = jar_balance(&ledger, j, today);
            let progress = match j.target {
                Some(target) if target > Decimal::ZERO => {
                    let pct = (balance / target * Decimal::ONE_HUNDRED)
                        .min(Decimal::ONE_HUNDRED)
                        .round_dp(1);
                    format!("{}%", pct)
                }
                _ => String::new(),
            };
            JarRow {
                id: j.id.clone(),
                name: j.name.clone(),
                balance,
                target: j.target,
                progress,
                rate: j
                    .yield_rate
                    .filter(|r| *r > Decimal::ZERO)
                    .map(|r| format!("{}/day", fmt_pct(r)))
                    .unwrap_or_default(),
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.name.clone(),
                    fmt_money(r.balance),
                    r.target.map(fmt_money).unwrap_or_default(),
                    r.progress.clone(),
                    r.rate.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Balance", "Target", "Progress", "Yield"], data)
        );
    }
    Ok(())
}

fn remove(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    store.delete(collections::JARS, id)?;
    println!("Removed jar {}", id);
    Ok(())
}
