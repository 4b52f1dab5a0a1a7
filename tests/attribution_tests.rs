// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financehub::attribution::{
    installment_budget_month, installment_count, installment_due_month, installment_value,
};
use financehub::models::{Card, Category, Expense, PaymentMethod};
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn expense(amount: &str, date: &str, installments: u32) -> Expense {
    Expense {
        id: "e1".into(),
        description: "test purchase".into(),
        amount: dec(amount),
        date: d(date),
        category: Category::Outro,
        payment: PaymentMethod::Card,
        card_id: Some("c1".into()),
        installments,
        first_due_month: None,
        creditor: None,
        creditor_contact: None,
        note: None,
    }
}

fn card(due_day: Option<u32>) -> Card {
    Card {
        id: "c1".into(),
        name: "Visa".into(),
        holder: None,
        limit: None,
        due_day,
        color: None,
    }
}

#[test]
fn purchase_after_due_day_rolls_to_next_month() {
    let c = card(Some(15));
    let e = expense("100", "2024-03-20", 1);
    assert_eq!(installment_due_month(&e, Some(&c), 0), "2024-04");
}

#[test]
fn purchase_on_or_before_due_day_stays_in_month() {
    let c = card(Some(15));
    let e = expense("100", "2024-03-10", 1);
    assert_eq!(installment_due_month(&e, Some(&c), 0), "2024-03");
    let e = expense("100", "2024-03-15", 1);
    assert_eq!(installment_due_month(&e, Some(&c), 0), "2024-03");
}

#[test]
fn missing_card_defaults_due_day_to_one() {
    // Day 1 purchase stays; day 2 purchase rolls
    let e = expense("100", "2024-06-01", 1);
    assert_eq!(installment_due_month(&e, None, 0), "2024-06");
    let e = expense("100", "2024-06-02", 1);
    assert_eq!(installment_due_month(&e, None, 0), "2024-07");
}

#[test]
fn installment_schedule_three_payments() {
    // 1200 in 3x on a due-day-10 card, bought on the 15th: first invoice
    // is next month, then consecutive months, 400 each.
    let c = card(Some(10));
    let e = expense("1200", "2024-01-15", 3);
    assert_eq!(installment_value(&e), dec("400"));
    assert_eq!(installment_due_month(&e, Some(&c), 0), "2024-02");
    assert_eq!(installment_due_month(&e, Some(&c), 1), "2024-03");
    assert_eq!(installment_due_month(&e, Some(&c), 2), "2024-04");
}

#[test]
fn due_months_are_strictly_increasing() {
    let c = card(Some(10));
    let e = expense("600", "2024-11-20", 6);
    let mut last = String::new();
    for i in 0..installment_count(&e) {
        let month = installment_due_month(&e, Some(&c), i);
        assert!(month > last, "{} !> {}", month, last);
        last = month;
    }
    assert_eq!(last, "2025-05");
}

#[test]
fn installment_shares_sum_to_amount() {
    let e = expense("1000", "2024-01-15", 3);
    let sum = installment_value(&e) * Decimal::from(installment_count(&e));
    assert!((sum - e.amount).abs() < dec("0.0001"));
}

#[test]
fn zero_installments_treated_as_one() {
    let e = expense("250", "2024-05-05", 0);
    assert_eq!(installment_count(&e), 1);
    assert_eq!(installment_value(&e), dec("250"));
}

#[test]
fn start_month_override_wins_over_due_day() {
    let c = card(Some(10));
    let mut e = expense("300", "2024-01-15", 3);
    e.first_due_month = Some("2024-03".into());
    assert_eq!(installment_due_month(&e, Some(&c), 0), "2024-03");
    assert_eq!(installment_due_month(&e, Some(&c), 1), "2024-04");
    assert_eq!(installment_due_month(&e, Some(&c), 2), "2024-05");
}

#[test]
fn invalid_override_falls_back_to_due_day_rule() {
    let c = card(Some(10));
    let mut e = expense("300", "2024-01-15", 1);
    e.first_due_month = Some("next month".into());
    assert_eq!(installment_due_month(&e, Some(&c), 0), "2024-02");
}

#[test]
fn budget_month_shifts_back_under_future_override() {
    // Override strictly after the purchase month: each installment counts
    // against the month before it is billed.
    let mut e = expense("200", "2024-01-15", 2);
    e.first_due_month = Some("2024-03".into());
    assert_eq!(installment_due_month(&e, None, 0), "2024-03");
    assert_eq!(installment_budget_month(&e, None, 0), "2024-02");
    assert_eq!(installment_due_month(&e, None, 1), "2024-04");
    assert_eq!(installment_budget_month(&e, None, 1), "2024-03");
}

#[test]
fn budget_month_equals_due_month_without_future_override() {
    // Override equal to the purchase month does not shift
    let mut e = expense("200", "2024-01-15", 2);
    e.first_due_month = Some("2024-01".into());
    assert_eq!(installment_budget_month(&e, None, 0), "2024-01");
    assert_eq!(installment_budget_month(&e, None, 1), "2024-02");

    // No override at all: budget month tracks the due month
    let c = card(Some(10));
    let e = expense("200", "2024-01-15", 2);
    assert_eq!(
        installment_budget_month(&e, Some(&c), 0),
        installment_due_month(&e, Some(&c), 0)
    );
}

#[test]
fn unpadded_override_compares_by_value_not_text() {
    // "2024-3" is the same month as the 2024-03-10 purchase even though it
    // sorts after "2024-03" as a string: no back-shift.
    let mut e = expense("200", "2024-03-10", 2);
    e.first_due_month = Some("2024-3".into());
    assert_eq!(installment_due_month(&e, None, 0), "2024-03");
    assert_eq!(installment_budget_month(&e, None, 0), "2024-03");

    // Unpadded earlier month: still no shift
    e.first_due_month = Some("2024-1".into());
    assert_eq!(installment_budget_month(&e, None, 0), "2024-01");

    // Unpadded future month: shifts as usual
    e.first_due_month = Some("2024-5".into());
    assert_eq!(installment_due_month(&e, None, 0), "2024-05");
    assert_eq!(installment_budget_month(&e, None, 0), "2024-04");
}

#[test]
fn schedule_crosses_year_boundary() {
    let c = card(Some(5));
    let e = expense("1200", "2024-12-20", 2);
    assert_eq!(installment_due_month(&e, Some(&c), 0), "2025-01");
    assert_eq!(installment_due_month(&e, Some(&c), 1), "2025-02");
}
