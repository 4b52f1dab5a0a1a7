// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::collections::HashSet;

use crate::attribution::installment_count;
use crate::models::PaymentMethod;
use crate::store::Store;
use crate::utils::pretty_table;

pub fn handle(store: &Store) -> Result<()> {
    let ledger = store.load_ledger()?;
    let mut rows = Vec::new();

    // 1) Card expenses pointing at a missing card
    for e in &ledger.expenses {
        if e.payment == PaymentMethod::Card {
            if let Some(card_id) = &e.card_id {
                if ledger.card(card_id).is_none() {
                    rows.push(vec![
                        "expense_card_missing".into(),
                        format!("{} -> {}", e.id, card_id),
                    ]);
                }
            }
        }
    }

    // 2) Advances pointing at missing expenses or out-of-range installments
    for a in &ledger.advances {
        match ledger.expense(&a.expense_id) {
            None => rows.push(vec![
                "advance_expense_missing".into(),
                format!("{} -> {}", a.id, a.expense_id),
            ]),
            Some(e) => {
                if a.installment >= installment_count(e) {
                    rows.push(vec![
                        "advance_installment_out_of_range".into(),
                        format!("{} installment {} of {}", a.id, a.installment, installment_count(e)),
                    ]);
                }
            }
        }
    }

    // 3) Duplicate advance pairs; the resolver takes the first match
    let mut seen: HashSet<(String, u32)> = HashSet::new();
    for a in &ledger.advances {
        if !seen.insert((a.expense_id.clone(), a.installment)) {
            rows.push(vec![
                "advance_duplicate".into(),
                format!("{} installment {}", a.expense_id, a.installment),
            ]);
        }
    }

    // 4) Incomes linked to a jar that does not exist
    for r in &ledger.incomes {
        if let Some(name) = &r.jar_name {
            if !ledger.jars.iter().any(|j| &j.name == name) {
                rows.push(vec![
                    "income_jar_missing".into(),
                    format!("{} -> '{}'", r.id, name),
                ]);
            }
        }
    }

    // 5) Cards with an out-of-range due day
    for c in &ledger.cards {
        if let Some(day) = c.due_day {
            if !(1..=31).contains(&day) {
                rows.push(vec!["card_due_day_invalid".into(), format!("{} day {}", c.id, day)]);
            }
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
