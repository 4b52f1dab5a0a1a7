// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rollups over the in-memory `Ledger` snapshot. Everything here is a pure
//! function of the snapshot plus an explicit evaluation date, and reuses
//! the attribution, accrual, and status modules rather than re-deriving
//! calendar or compounding logic inline.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::accrual::accrued_value;
use crate::attribution::{
    installment_budget_month, installment_count, installment_due_month, installment_value,
};
use crate::calendar::{last_business_day_of_month, month_key, split_month_key};
use crate::models::{Category, Expense, Jar, Ledger, PaymentMethod, SalaryConfig};
use crate::status::{installment_settled, invoice_due_date};

/// Invoice total for one card in one `YYYY-MM` month: the sum of
/// per-installment shares of that card's expenses billed (due) that month.
pub fn card_invoice_total(ledger: &Ledger, card_id: &str, month: &str) -> Decimal {
    let card = ledger.card(card_id);
    let mut total = Decimal::ZERO;
    for expense in &ledger.expenses {
        if expense.payment != PaymentMethod::Card || expense.card_id.as_deref() != Some(card_id) {
            continue;
        }
        let share = installment_value(expense);
        for i in 0..installment_count(expense) {
            if installment_due_month(expense, card, i) == month {
                total += share;
            }
        }
    }
    total
}

/// Plain non-card single payments skip the statement calendar entirely
/// and count in their purchase month.
pub fn simple_attribution(expense: &Expense) -> bool {
    expense.payment != PaymentMethod::Card
        && installment_count(expense) == 1
        && expense.first_due_month.is_none()
}

/// What was actually spent in a month, across all payment methods, by
/// budget-month attribution. Plain non-card single payments count in their
/// purchase month.
pub fn month_spend_total(ledger: &Ledger, month: &str) -> Decimal {
    let mut total = Decimal::ZERO;
    for expense in &ledger.expenses {
        if simple_attribution(expense) {
            if month_key(expense.date) == month {
                total += expense.amount;
            }
            continue;
        }
        let card = ledger.card_for(expense);
        let share = installment_value(expense);
        for i in 0..installment_count(expense) {
            if installment_budget_month(expense, card, i) == month {
                total += share;
            }
        }
    }
    total
}

/// The configured salary counts for a month only once its payday (the
/// month's last business day) has arrived.
pub fn salary_for_month(salary: Option<&SalaryConfig>, month: &str, today: NaiveDate) -> Decimal {
    let Some(cfg) = salary else {
        return Decimal::ZERO;
    };
    if !cfg.active {
        return Decimal::ZERO;
    }
    let Some((year, m)) = split_month_key(month) else {
        return Decimal::ZERO;
    };
    match last_business_day_of_month(year, m) {
        Some(payday) if payday <= today => cfg.amount,
        _ => Decimal::ZERO,
    }
}

/// Spend per category for a month (budget-month attribution), largest
/// first. The per-category sums add up to `month_spend_total`.
pub fn spend_by_category(ledger: &Ledger, month: &str) -> Vec<(Category, Decimal)> {
    let mut by_cat: BTreeMap<Category, Decimal> = BTreeMap::new();
    for expense in &ledger.expenses {
        let mut add = |value: Decimal| {
            *by_cat.entry(expense.category).or_insert(Decimal::ZERO) += value;
        };
        if simple_attribution(expense) {
            if month_key(expense.date) == month {
                add(expense.amount);
            }
            continue;
        }
        let card = ledger.card_for(expense);
        let share = installment_value(expense);
        for i in 0..installment_count(expense) {
            if installment_budget_month(expense, card, i) == month {
                add(share);
            }
        }
    }
    let mut rows: Vec<(Category, Decimal)> = by_cat.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceSummary {
    pub total: Decimal,
    pub principal: Decimal,
    pub gains: Decimal,
}

/// Total holdings at `today`: every income at its accrued current value.
pub fn balance_summary(ledger: &Ledger, today: NaiveDate) -> BalanceSummary {
    let mut total = Decimal::ZERO;
    let mut principal = Decimal::ZERO;
    for income in &ledger.incomes {
        total += accrued_value(income, &ledger.jars, today);
        principal += income.amount;
    }
    BalanceSummary {
        total,
        principal,
        gains: total - principal,
    }
}

/// Accrued balance of the incomes linked to a jar by name.
pub fn jar_balance(ledger: &Ledger, jar: &Jar, today: NaiveDate) -> Decimal {
    ledger
        .incomes
        .iter()
        .filter(|r| r.jar_name.as_deref() == Some(jar.name.as_str()))
        .map(|r| accrued_value(r, &ledger.jars, today))
        .sum()
}

/// Card installments due in `month` that are not yet settled (neither
/// cutoff passed nor advance-paid).
pub fn pending_installments_total(ledger: &Ledger, month: &str, today: NaiveDate) -> Decimal {
    let mut total = Decimal::ZERO;
    for expense in &ledger.expenses {
        if expense.payment != PaymentMethod::Card {
            continue;
        }
        let card = ledger.card_for(expense);
        let share = installment_value(expense);
        for i in 0..installment_count(expense) {
            if installment_due_month(expense, card, i) == month
                && !installment_settled(expense, card, &ledger.advances, i, today)
            {
                total += share;
            }
        }
    }
    total
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnualRow {
    pub month: String,
    pub incomes: Decimal,
    pub salary: Decimal,
    pub spend: Decimal,
    pub net: Decimal,
}

/// One row per calendar month of `year`: incomes by receipt month (at
/// principal), salary once its payday passed, spend by budget month.
pub fn annual_report(ledger: &Ledger, year: i32, today: NaiveDate) -> Vec<AnnualRow> {
    (1..=12)
        .map(|m| {
            let month = format!("{:04}-{:02}", year, m);
            let incomes: Decimal = ledger
                .incomes
                .iter()
                .filter(|r| month_key(r.date) == month)
                .map(|r| r.amount)
                .sum();
            let salary = salary_for_month(ledger.salary.as_ref(), &month, today);
            let spend = month_spend_total(ledger, &month);
            AnnualRow {
                net: incomes + salary - spend,
                month,
                incomes,
                salary,
                spend,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingInvoice {
    pub card_id: String,
    pub card_name: String,
    pub due_date: NaiveDate,
    pub amount: Decimal,
    pub days_left: i64,
}

/// Per-card next invoice due date within `horizon_days` of `today`, for
/// cards with a non-zero invoice that month. Sorted soonest first.
pub fn upcoming_invoices(ledger: &Ledger, today: NaiveDate, horizon_days: i64) -> Vec<UpcomingInvoice> {
    let mut items = Vec::new();
    for card in &ledger.cards {
        let this_month = month_key(today);
        let mut due = match invoice_due_date(Some(card), &this_month) {
            Some(d) => d,
            None => continue,
        };
        if due < today {
            let Some(next) = crate::calendar::shift_month_key(&this_month, 1) else {
                continue;
            };
            due = match invoice_due_date(Some(card), &next) {
                Some(d) => d,
                None => continue,
            };
        }
        let days_left = (due - today).num_days();
        if days_left > horizon_days {
            continue;
        }
        let amount = card_invoice_total(ledger, &card.id, &month_key(due));
        if amount > Decimal::ZERO {
            items.push(UpcomingInvoice {
                card_id: card.id.clone(),
                card_name: card.name.clone(),
                due_date: due,
                amount,
                days_left,
            });
        }
    }
    items.sort_by_key(|i| i.due_date);
    items
}
