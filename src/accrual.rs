// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Compounding yield over business days. This is the single source of
//! truth for "current value" of a deposit; dashboards, jar balances, and
//! reports all call through here.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calendar::business_days_between;
use crate::models::{Income, Jar};

/// Effective daily rate (percent per business day): the income's own rate
/// when positive, else the linked jar's rate, else zero.
pub fn effective_rate(income: &Income, jars: &[Jar]) -> Decimal {
    if let Some(rate) = income.yield_rate {
        if rate > Decimal::ZERO {
            return rate;
        }
    }
    if let Some(name) = &income.jar_name {
        if let Some(jar) = jars.iter().find(|j| &j.name == name) {
            return jar.yield_rate.unwrap_or(Decimal::ZERO);
        }
    }
    Decimal::ZERO
}

/// Current value of the principal at `as_of`: compounded once per business
/// day elapsed strictly after the deposit date. Weekends contribute no
/// growth; `as_of` on or before the deposit date returns the principal.
pub fn accrued_value(income: &Income, jars: &[Jar], as_of: NaiveDate) -> Decimal {
    let rate = effective_rate(income, jars);
    if rate <= Decimal::ZERO || as_of <= income.date {
        return income.amount;
    }
    let Some(first) = income.date.succ_opt() else {
        return income.amount;
    };
    compound(income.amount, rate, business_days_between(first, as_of))
}

/// `principal * (1 + rate/100)^periods`, computed by repeated exact
/// multiplication so `Decimal` needs no transcendental support.
pub fn compound(principal: Decimal, daily_rate_pct: Decimal, periods: u32) -> Decimal {
    let factor = Decimal::ONE + daily_rate_pct / Decimal::ONE_HUNDRED;
    let mut value = principal;
    for _ in 0..periods {
        value *= factor;
    }
    value
}
