// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::attribution::{installment_budget_month, installment_count, installment_value};
use crate::models::{Category, Expense, PaymentMethod};
use crate::status::installment_settled;
use crate::store::{Store, collections};
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table,
};

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
    let category_arg = sub.get_one::<String>("category").unwrap();
    let category = Category::parse(category_arg)
        .ok_or_else(|| anyhow::anyhow!("Unknown category '{}'", category_arg))?;
    let method_arg = sub.get_one::<String>("method").unwrap();
    let payment = PaymentMethod::parse(method_arg)
        .ok_or_else(|| anyhow::anyhow!("Unknown payment method '{}'", method_arg))?;

    let card_id = match sub.get_one::<String>("card") {
        Some(name) => {
            let ledger = store.load_ledger()?;
            let card = ledger
                .cards
                .iter()
                .find(|c| c.name == *name || c.id == *name)
                .ok_or_else(|| anyhow::anyhow!("Card '{}' not found", name))?;
            Some(card.id.clone())
        }
        None => None,
    };

    let expense = Expense {
        id: String::new(),
        description: sub.get_one::<String>("description").unwrap().trim().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        category,
        payment,
        card_id,
        installments: *sub.get_one::<u32>("installments").unwrap_or(&1),
        first_due_month: sub
            .get_one::<String>("start-month")
            .map(|s| parse_month(s))
            .transpose()?,
        creditor: sub.get_one::<String>("creditor").cloned(),
        creditor_contact: sub.get_one::<String>("creditor-contact").cloned(),
        note: sub.get_one::<String>("note").cloned(),
    };
    expense.validate()?;

    let id = store.create(collections::EXPENSES, serde_json::to_value(&expense)?)?;
    let n = installment_count(&expense);
    if n > 1 {
        println!(
            "Recorded expense '{}': {}x of {} from {} ({})",
            expense.description,
            n,
            fmt_money(installment_value(&expense)),
            expense.date,
            id
        );
    } else {
        println!(
            "Recorded expense '{}' of {} on {} ({})",
            expense.description,
            fmt_money(expense.amount),
            expense.date,
            id
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct ExpenseRow {
    id: String,
    date: String,
    description: String,
    amount: Decimal,
    category: &'static str,
    method: &'static str,
    card: String,
    installments: String,
    settled: String,
    creditor: String,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month_filter = sub.get_one::<String>("month");
    let method_filter = sub
        .get_one::<String>("method")
        .map(|s| PaymentMethod::parse(s).ok_or_else(|| anyhow::anyhow!("Unknown method '{}'", s)))
        .transpose()?;

    let ledger = store.load_ledger()?;
    let today = crate::utils::today();

    let mut rows = Vec::new();
    for e in &ledger.expenses {
        if let Some(wanted) = method_filter {
            if e.payment != wanted {
                continue;
            }
        }
        let card = ledger.card_for(e);
        let n = installment_count(e);
        if let Some(m) = month_filter {
            let hit = if crate::aggregate::simple_attribution(e) {
                crate::calendar::month_key(e.date) == *m
            } else {
                (0..n).any(|i| installment_budget_month(e, card, i) == *m)
            };
            if !hit {
                continue;
            }
        }
        let settled_count = (0..n)
            .filter(|&i| installment_settled(e, card, &ledger.advances, i, today))
            .count();
        rows.push(ExpenseRow {
            id: e.id.clone(),
            date: e.date.to_string(),
            description: e.description.clone(),
            amount: e.amount,
            category: e.category.as_str(),
            method: e.payment.as_str(),
            card: card.map(|c| c.name.clone()).unwrap_or_default(),
            installments: if n > 1 {
                format!("{}x {}", n, fmt_money(installment_value(e)))
            } else {
                String::new()
            },
            settled: format!("{}/{}", settled_count, n),
            creditor: e.creditor.clone().unwrap_or_default(),
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.description.clone(),
                    fmt_money(r.amount),
                    r.category.to_string(),
                    r.method.to_string(),
                    r.card.clone(),
                    r.installments.clone(),
                    r.settled.clone(),
                    r.creditor.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id", "Date", "Description", "Amount", "Category", "Method", "Card",
                    "Installments", "Settled", "Creditor"
                ],
                data
            )
        );
    }
    Ok(())
}

fn remove(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    store.delete(collections::EXPENSES, id)?;
    println!("Removed expense {}", id);
    Ok(())
}
