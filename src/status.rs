// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Settled-vs-pending resolution for installments. Read-only and
//! idempotent: status changes only because the due date passes or because
//! the user recorded an advance payment. Both settled states are terminal.

use chrono::NaiveDate;

use crate::attribution::installment_due_month;
use crate::calendar::{last_day_of_month, split_month_key};
use crate::models::{AdvancePayment, Card, Expense};

/// The invoice due date for a card in a given `YYYY-MM` month: the card's
/// due day clamped to the month length, day 1 without a card.
pub fn invoice_due_date(card: Option<&Card>, month: &str) -> Option<NaiveDate> {
    let (year, m) = split_month_key(month)?;
    let day = card.and_then(|c| c.due_day).unwrap_or(1);
    NaiveDate::from_ymd_opt(year, m, day.min(last_day_of_month(year, m)))
}

/// True iff the month's due date is strictly before `today` (date-only).
pub fn invoice_cutoff_passed(card: Option<&Card>, month: &str, today: NaiveDate) -> bool {
    invoice_due_date(card, month).is_some_and(|due| due < today)
}

/// First advance-payment record for `(expense_id, installment)`, if any.
pub fn advance_for<'a>(
    advances: &'a [AdvancePayment],
    expense_id: &str,
    installment: u32,
) -> Option<&'a AdvancePayment> {
    advances
        .iter()
        .find(|a| a.expense_id == expense_id && a.installment == installment)
}

/// Settled iff the invoice cutoff has passed for the installment's due
/// month, or an advance payment was recorded for it.
pub fn installment_settled(
    expense: &Expense,
    card: Option<&Card>,
    advances: &[AdvancePayment],
    installment: u32,
    today: NaiveDate,
) -> bool {
    let due_month = installment_due_month(expense, card, installment);
    invoice_cutoff_passed(card, &due_month, today)
        || advance_for(advances, &expense.id, installment).is_some()
}
