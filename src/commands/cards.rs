// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::card_invoice_total;
use crate::calendar::month_key;
use crate::models::Card;
use crate::status::invoice_due_date;
use crate::store::{Store, collections};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

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
    let card = Card {
        id: String::new(),
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        holder: sub.get_one::<String>("holder").cloned(),
        limit: sub
            .get_one::<String>("limit")
            .map(|s| parse_decimal(s))
            .transpose()?,
        due_day: sub.get_one::<u32>("due-day").copied(),
        color: sub.get_one::<String>("color").cloned(),
    };
    card.validate()?;
    let id = store.create(collections::CARDS, serde_json::to_value(&card)?)?;
    println!("Registered card '{}' ({})", card.name, id);
    Ok(())
}

#[derive(Serialize)]
struct CardRow {
    id: String,
    name: String,
    invoice: Decimal,
    due_date: String,
    limit_use: String,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = store.load_ledger()?;
    let month = month_key(crate::utils::today());

    let rows: Vec<CardRow> = ledger
        .cards
        .iter()
        .map(|c| {
            let invoice = card_invoice_total(&ledger, &c.id, &month);
            let limit_use = match c.limit {
                Some(limit) if limit > Decimal::ZERO => {
                    let pct = (invoice / limit * Decimal::ONE_HUNDRED).round_dp(1);
                    format!("{}% of {}", pct, fmt_money(limit))
                }
                _ => String::new(),
            };
            CardRow {
                id: c.id.clone(),
                name: c.name.clone(),
                invoice,
                due_date: invoice_due_date(Some(c), &month)
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                limit_use,
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
                    fmt_money(r.invoice),
                    r.due_date.clone(),
                    r.limit_use.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Invoice", "Due", "Limit use"], data)
        );
    }
    Ok(())
}

fn remove(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    store.delete(collections::CARDS, id)?;
    println!("Removed card {}", id);
    Ok(())
}
