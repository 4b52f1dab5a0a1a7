// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::aggregate::{annual_report, card_invoice_total, month_spend_total, spend_by_category};
use crate::attribution::{installment_count, installment_due_month, installment_value};
use crate::calendar::month_key;
use crate::models::PaymentMethod;
use crate::status::installment_settled;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("invoice", sub)) => invoice(store, sub)?,
        Some(("month", sub)) => month(store, sub)?,
        Some(("annual", sub)) => annual(store, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct InvoiceLine {
    description: String,
    installment: String,
    value: rust_decimal::Decimal,
    settled: bool,
}

fn invoice(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let card_arg = sub.get_one::<String>("card").unwrap();
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;

    let ledger = store.load_ledger()?;
    let today = crate::utils::today();
    let card = ledger
        .cards
        .iter()
        .find(|c| c.name == *card_arg || c.id == *card_arg)
        .ok_or_else(|| anyhow::anyhow!("Card '{}' not found", card_arg))?;

    let mut lines = Vec::new();
    for e in &ledger.expenses {
        if e.payment != PaymentMethod::Card || e.card_id.as_deref() != Some(card.id.as_str()) {
            continue;
        }
        let n = installment_count(e);
        for i in 0..n {
            if installment_due_month(e, Some(card), i) == month {
                lines.push(InvoiceLine {
                    description: e.description.clone(),
                    installment: format!("{}/{}", i + 1, n),
                    value: installment_value(e),
                    settled: installment_settled(e, Some(card), &ledger.advances, i, today),
                });
            }
        }
    }
    let total = card_invoice_total(&ledger, &card.id, &month);

    if !maybe_print_json(json_flag, jsonl_flag, &lines)? {
        let rows = lines
            .iter()
            .map(|l| {
                vec![
                    l.description.clone(),
                    l.installment.clone(),
                    fmt_money(l.value),
                    if l.settled { "settled" } else { "pending" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Description", "Installment", "Value", "Status"], rows)
        );
        println!("Invoice {} for {}: {}", month, card.name, fmt_money(total));
    }
    Ok(())
}

fn month(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => month_key(crate::utils::today()),
    };
    let ledger = store.load_ledger()?;

    let by_cat = spend_by_category(&ledger, &month);
    let total = month_spend_total(&ledger, &month);

    #[derive(Serialize)]
    struct CategoryLine {
        category: &'static str,
        spent: rust_decimal::Decimal,
    }
    let lines: Vec<CategoryLine> = by_cat
        .iter()
        .map(|(c, v)| CategoryLine {
            category: c.as_str(),
            spent: *v,
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &lines)? {
        let rows = by_cat
            .iter()
            .map(|(c, v)| vec![c.label().to_string(), fmt_money(*v)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
        println!("Total spend in {}: {}", month, fmt_money(total));
    }
    Ok(())
}

fn annual(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub.get_one::<i32>("year").unwrap();
    let ledger = store.load_ledger()?;
    let today = crate::utils::today();

    let rows = annual_report(&ledger, year, today);
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.month.clone(),
                    fmt_money(r.incomes),
                    fmt_money(r.salary),
                    fmt_money(r.spend),
                    fmt_money(r.net),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Incomes", "Salary", "Spend", "Net"], data)
        );
    }
    Ok(())
}
