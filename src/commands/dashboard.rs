// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::accrual::effective_rate;
use crate::aggregate::{
    balance_summary, month_spend_total, pending_installments_total, salary_for_month,
    upcoming_invoices,
};
use crate::calendar::{is_business_day, month_key};
use crate::models::Ledger;
use crate::store::{Store, YIELD_MARKER_KEY};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

const UPCOMING_HORIZON_DAYS: i64 = 7;

#[derive(Serialize)]
struct Dashboard {
    month: String,
    total_balance: Decimal,
    yield_gains: Decimal,
    month_spend: Decimal,
    salary: Decimal,
    free_balance: Decimal,
    pending_card: Decimal,
}

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let ledger = store.load_ledger()?;
    let today = crate::utils::today();
    let month = month_key(today);

    touch_yield_marker(store, &ledger, today)?;

    let balances = balance_summary(&ledger, today);
    let spend = month_spend_total(&ledger, &month);
    let salary = salary_for_month(ledger.salary.as_ref(), &month, today);
    let pending = pending_installments_total(&ledger, &month, today);
    let dash = Dashboard {
        month: month.clone(),
        total_balance: balances.total,
        yield_gains: balances.gains,
        month_spend: spend,
        salary,
        free_balance: balances.total + salary - spend,
        pending_card: pending,
    };

    if maybe_print_json(json_flag, jsonl_flag, &dash)? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Month", "Balance", "Yield gains", "Spend", "Salary", "Free", "Pending card"],
            vec![vec![
                dash.month.clone(),
                fmt_money(dash.total_balance),
                fmt_money(dash.yield_gains),
                fmt_money(dash.month_spend),
                fmt_money(dash.salary),
                fmt_money(dash.free_balance),
                fmt_money(dash.pending_card),
            ]]
        )
    );

    let upcoming = upcoming_invoices(&ledger, today, UPCOMING_HORIZON_DAYS);
    if upcoming.is_empty() {
        println!("No invoices due in the next {} days", UPCOMING_HORIZON_DAYS);
    } else {
        let rows = upcoming
            .iter()
            .map(|u| {
                vec![
                    u.card_name.clone(),
                    u.due_date.to_string(),
                    fmt_money(u.amount),
                    if u.days_left == 0 {
                        "today".to_string()
                    } else {
                        format!("{}d", u.days_left)
                    },
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Card", "Due", "Invoice", "In"], rows));
    }

    // Snapshot loads expenses newest-first
    let recent: Vec<Vec<String>> = ledger
        .expenses
        .iter()
        .take(5)
        .map(|e| {
            vec![
                e.date.to_string(),
                e.description.clone(),
                fmt_money(e.amount),
                e.category.label().to_string(),
            ]
        })
        .collect();
    if !recent.is_empty() {
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Amount", "Category"], recent)
        );
    }
    Ok(())
}

/// Once-daily idempotent marker: on business days with at least one
/// yield-bearing income, remember that accrual was observed today. The
/// stored principals are never rewritten; current values are always derived
/// at read time.
fn touch_yield_marker(
    store: &Store,
    ledger: &Ledger,
    today: chrono::NaiveDate,
) -> Result<()> {
    if !is_business_day(today) {
        return Ok(());
    }
    let today_str = today.to_string();
    if store.get_setting(YIELD_MARKER_KEY)?.as_deref() == Some(today_str.as_str()) {
        return Ok(());
    }
    let any_yield = ledger
        .incomes
        .iter()
        .any(|r| effective_rate(r, &ledger.jars) > Decimal::ZERO);
    if any_yield {
        store.set_setting(YIELD_MARKER_KEY, &today_str)?;
        tracing::info!(date = %today_str, "yield marker advanced");
    }
    Ok(())
}
