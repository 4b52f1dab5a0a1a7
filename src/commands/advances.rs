// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::attribution::{installment_count, installment_value};
use crate::models::AdvancePayment;
use crate::status::advance_for;
use crate::store::{Store, collections};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("record", sub)) => record(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn record(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let expense_id = sub.get_one::<String>("expense").unwrap();
    let installment = *sub.get_one::<u32>("installment").unwrap();
    let paid = parse_decimal(sub.get_one::<String>("paid").unwrap())?;
    let paid_on = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => crate::utils::today(),
    };

    let ledger = store.load_ledger()?;
    let expense = ledger
        .expense(expense_id)
        .ok_or_else(|| anyhow::anyhow!("Expense '{}' not found", expense_id))?;
    if installment >= installment_count(expense) {
        anyhow::bail!(
            "Expense '{}' has {} installment(s); index {} is out of range",
            expense.description,
            installment_count(expense),
            installment
        );
    }
    if advance_for(&ledger.advances, expense_id, installment).is_some() {
        anyhow::bail!(
            "Installment {} of '{}' already has an advance payment",
            installment,
            expense.description
        );
    }

    let original = installment_value(expense);
    let advance = AdvancePayment {
        id: String::new(),
        expense_id: expense_id.clone(),
        installment,
        original_value: original,
        amount_paid: paid,
        discount: original - paid,
        paid_on,
    };
    advance.validate()?;

    let id = store.create(collections::ADVANCES, serde_json::to_value(&advance)?)?;
    if advance.discount > rust_decimal::Decimal::ZERO {
        println!(
            "Installment {} of '{}' settled early: paid {} ({} discount) ({})",
            installment,
            expense.description,
            fmt_money(paid),
            fmt_money(advance.discount),
            id
        );
    } else {
        println!(
            "Installment {} of '{}' settled early: paid {} ({})",
            installment,
            expense.description,
            fmt_money(paid),
            id
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct AdvanceRow {
    id: String,
    expense: String,
    installment: u32,
    original: String,
    paid: String,
    discount: String,
    date: String,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = store.load_ledger()?;

    let rows: Vec<AdvanceRow> = ledger
        .advances
        .iter()
        .map(|a| AdvanceRow {
            id: a.id.clone(),
            expense: ledger
                .expense(&a.expense_id)
                .map(|e| e.description.clone())
                .unwrap_or_else(|| a.expense_id.clone()),
            installment: a.installment,
            original: fmt_money(a.original_value),
            paid: fmt_money(a.amount_paid),
            discount: fmt_money(a.discount),
            date: a.paid_on.to_string(),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.expense.clone(),
                    r.installment.to_string(),
                    r.original.clone(),
                    r.paid.clone(),
                    r.discount.clone(),
                    r.date.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Expense", "Installment", "Original", "Paid", "Discount", "Date"],
                data
            )
        );
    }
    Ok(())
}
