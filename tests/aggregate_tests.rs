// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financehub::aggregate::{
    annual_report, balance_summary, card_invoice_total, jar_balance, month_spend_total,
    pending_installments_total, salary_for_month, spend_by_category, upcoming_invoices,
};
use financehub::models::{
    AdvancePayment, Card, Category, Expense, Income, Jar, Ledger, PaymentMethod, SalaryConfig,
};
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn income(id: &str, amount: &str, date: &str, rate: Option<&str>) -> Income {
    Income {
        id: id.into(),
        description: format!("income {}", id),
        amount: dec(amount),
        date: d(date),
        yield_rate: rate.map(dec),
        jar_name: None,
        note: None,
    }
}

fn card_expense(id: &str, amount: &str, date: &str, installments: u32) -> Expense {
    Expense {
        id: id.into(),
        description: format!("expense {}", id),
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

fn pix_expense(id: &str, amount: &str, date: &str, category: Category) -> Expense {
    Expense {
        id: id.into(),
        description: format!("expense {}", id),
        amount: dec(amount),
        date: d(date),
        category,
        payment: PaymentMethod::Pix,
        card_id: None,
        installments: 1,
        first_due_month: None,
        creditor: None,
        creditor_contact: None,
        note: None,
    }
}

fn card(due_day: u32) -> Card {
    Card {
        id: "c1".into(),
        name: "Visa".into(),
        holder: None,
        limit: None,
        due_day: Some(due_day),
        color: None,
    }
}

#[test]
fn card_invoice_sums_installments_due_that_month() {
    // 1200 in 3x, bought Jan 15 on a due-day-10 card: 400 per invoice
    // from February through April.
    let ledger = Ledger {
        cards: vec![card(10)],
        expenses: vec![card_expense("e1", "1200", "2024-01-15", 3)],
        ..Default::default()
    };
    assert_eq!(card_invoice_total(&ledger, "c1", "2024-01"), Decimal::ZERO);
    assert_eq!(card_invoice_total(&ledger, "c1", "2024-02"), dec("400"));
    assert_eq!(card_invoice_total(&ledger, "c1", "2024-03"), dec("400"));
    assert_eq!(card_invoice_total(&ledger, "c1", "2024-04"), dec("400"));
    assert_eq!(card_invoice_total(&ledger, "c1", "2024-05"), Decimal::ZERO);
}

#[test]
fn plain_payments_count_in_their_purchase_month() {
    let ledger = Ledger {
        expenses: vec![
            pix_expense("e1", "80", "2024-03-02", Category::Alimentacao),
            pix_expense("e2", "120", "2024-03-28", Category::Transporte),
            pix_expense("e3", "50", "2024-04-01", Category::Alimentacao),
        ],
        ..Default::default()
    };
    assert_eq!(month_spend_total(&ledger, "2024-03"), dec("200"));
    assert_eq!(month_spend_total(&ledger, "2024-04"), dec("50"));
}

#[test]
fn month_totals_conserve_the_full_amounts() {
    // Every cent of every expense lands in exactly one month
    let ledger = Ledger {
        cards: vec![card(10)],
        expenses: vec![
            card_expense("e1", "1200", "2024-01-15", 3),
            card_expense("e2", "90", "2024-02-05", 1),
            pix_expense("e3", "60", "2024-01-20", Category::Lazer),
        ],
        ..Default::default()
    };
    let mut sum = Decimal::ZERO;
    for m in 1..=12 {
        sum += month_spend_total(&ledger, &format!("2024-{:02}", m));
    }
    assert!((sum - dec("1350")).abs() < dec("0.0001"));
}

#[test]
fn aggregation_is_idempotent() {
    let ledger = Ledger {
        cards: vec![card(10)],
        expenses: vec![
            card_expense("e1", "1000", "2024-01-15", 3),
            pix_expense("e2", "60", "2024-02-20", Category::Lazer),
        ],
        ..Default::default()
    };
    let first = month_spend_total(&ledger, "2024-02");
    for _ in 0..5 {
        assert_eq!(month_spend_total(&ledger, "2024-02"), first);
    }
}

#[test]
fn category_breakdown_sums_to_month_total() {
    let ledger = Ledger {
        cards: vec![card(10)],
        expenses: vec![
            card_expense("e1", "900", "2024-01-15", 3),
            pix_expense("e2", "80", "2024-02-10", Category::Alimentacao),
            pix_expense("e3", "40", "2024-02-11", Category::Alimentacao),
        ],
        ..Default::default()
    };
    let rows = spend_by_category(&ledger, "2024-02");
    let sum: Decimal = rows.iter().map(|(_, v)| *v).sum();
    assert_eq!(sum, month_spend_total(&ledger, "2024-02"));
    // Largest first
    assert_eq!(rows[0].0, Category::Outro);
    assert_eq!(rows[0].1, dec("300"));
    assert_eq!(rows[1].0, Category::Alimentacao);
    assert_eq!(rows[1].1, dec("120"));
}

#[test]
fn salary_counts_only_after_last_business_day() {
    // August 31 2025 is a Sunday, so payday is Friday the 29th
    let cfg = SalaryConfig {
        amount: dec("3000"),
        active: true,
        note: None,
    };
    assert_eq!(
        salary_for_month(Some(&cfg), "2025-08", d("2025-08-28")),
        Decimal::ZERO
    );
    assert_eq!(
        salary_for_month(Some(&cfg), "2025-08", d("2025-08-29")),
        dec("3000")
    );
    assert_eq!(
        salary_for_month(Some(&cfg), "2025-08", d("2025-09-15")),
        dec("3000")
    );
}

#[test]
fn inactive_or_missing_salary_counts_nothing() {
    let cfg = SalaryConfig {
        amount: dec("3000"),
        active: false,
        note: None,
    };
    assert_eq!(
        salary_for_month(Some(&cfg), "2025-08", d("2025-12-31")),
        Decimal::ZERO
    );
    assert_eq!(salary_for_month(None, "2025-08", d("2025-12-31")), Decimal::ZERO);
}

#[test]
fn balance_summary_splits_principal_and_gains() {
    let ledger = Ledger {
        incomes: vec![
            income("r1", "1000", "2024-01-01", Some("0.05")),
            income("r2", "500", "2024-01-01", None),
        ],
        ..Default::default()
    };
    let sum = balance_summary(&ledger, d("2024-01-08"));
    assert_eq!(sum.principal, dec("1500"));
    assert!(sum.total > sum.principal);
    assert_eq!(sum.gains, sum.total - sum.principal);
}

#[test]
fn jar_balance_accrues_linked_incomes_only() {
    let jar = Jar {
        id: "j1".into(),
        name: "Emergency".into(),
        target: Some(dec("5000")),
        yield_rate: Some(dec("0.05")),
        icon: None,
        color: None,
    };
    let mut linked = income("r1", "1000", "2024-01-01", None);
    linked.jar_name = Some("Emergency".into());
    let ledger = Ledger {
        jars: vec![jar.clone()],
        incomes: vec![linked, income("r2", "999", "2024-01-01", None)],
        ..Default::default()
    };
    let balance = jar_balance(&ledger, &jar, d("2024-01-08"));
    // Only the linked income, grown at the jar's rate for five days
    assert_eq!(
        balance,
        financehub::accrual::compound(dec("1000"), dec("0.05"), 5)
    );
}

#[test]
fn pending_total_excludes_settled_installments() {
    let ledger = Ledger {
        cards: vec![card(10)],
        expenses: vec![card_expense("e1", "300", "2024-01-15", 3)],
        advances: vec![AdvancePayment {
            id: "a1".into(),
            expense_id: "e1".into(),
            installment: 1,
            original_value: dec("100"),
            amount_paid: dec("95"),
            discount: dec("5"),
            paid_on: d("2024-01-20"),
        }],
        ..Default::default()
    };
    // Feb installment pending before its Feb 10 due date
    assert_eq!(
        pending_installments_total(&ledger, "2024-02", d("2024-02-01")),
        dec("100")
    );
    // Settled by cutoff once the due date passes
    assert_eq!(
        pending_installments_total(&ledger, "2024-02", d("2024-02-11")),
        Decimal::ZERO
    );
    // March installment was advance-paid, never pending
    assert_eq!(
        pending_installments_total(&ledger, "2024-03", d("2024-02-15")),
        Decimal::ZERO
    );
    // April installment still open
    assert_eq!(
        pending_installments_total(&ledger, "2024-04", d("2024-02-15")),
        dec("100")
    );
}

#[test]
fn annual_report_has_twelve_consistent_rows() {
    let cfg = SalaryConfig {
        amount: dec("3000"),
        active: true,
        note: None,
    };
    let ledger = Ledger {
        incomes: vec![income("r1", "800", "2024-03-05", None)],
        expenses: vec![pix_expense("e1", "200", "2024-03-10", Category::Moradia)],
        salary: Some(cfg),
        ..Default::default()
    };
    let rows = annual_report(&ledger, 2024, d("2024-06-30"));
    assert_eq!(rows.len(), 12);
    let march = &rows[2];
    assert_eq!(march.month, "2024-03");
    assert_eq!(march.incomes, dec("800"));
    assert_eq!(march.salary, dec("3000"));
    assert_eq!(march.spend, dec("200"));
    assert_eq!(march.net, dec("3600"));
    // Payday for July onward has not arrived by June 30
    assert_eq!(rows[6].salary, Decimal::ZERO);
    for row in &rows {
        assert_eq!(row.net, row.incomes + row.salary - row.spend);
    }
}

#[test]
fn upcoming_invoices_respect_the_horizon() {
    let ledger = Ledger {
        cards: vec![card(10)],
        expenses: vec![card_expense("e1", "1200", "2024-01-15", 3)],
        ..Default::default()
    };
    // Feb 5, due Feb 10: five days out, inside a 7-day horizon
    let items = upcoming_invoices(&ledger, d("2024-02-05"), 7);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].due_date, d("2024-02-10"));
    assert_eq!(items[0].amount, dec("400"));
    assert_eq!(items[0].days_left, 5);
    // Feb 1: nine days out, outside the horizon
    assert!(upcoming_invoices(&ledger, d("2024-02-01"), 7).is_empty());
    // Feb 11: this month's due date passed, next invoice is Mar 10,
    // too far out for the horizon
    assert!(upcoming_invoices(&ledger, d("2024-02-11"), 7).is_empty());
    let items = upcoming_invoices(&ledger, d("2024-03-05"), 7);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].due_date, d("2024-03-10"));
}
