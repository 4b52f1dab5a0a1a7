// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Months, NaiveDate, Weekday};

/// Monday through Friday. No holiday calendar.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Business days in the inclusive range `[start, end]`; 0 when `end < start`.
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    let mut count = 0;
    let mut day = start;
    loop {
        if is_business_day(day) {
            count += 1;
        }
        if day == end {
            break;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    count
}

/// The `YYYY-MM` key a date falls in.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Parses a `YYYY-MM` key into `(year, month)`; `None` if malformed.
pub fn split_month_key(key: &str) -> Option<(i32, u32)> {
    let (y, m) = key.split_once('-')?;
    let year: i32 = y.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    if (1..=12).contains(&month) {
        Some((year, month))
    } else {
        None
    }
}

/// Shifts a `YYYY-MM` key by `n` months (negative allowed). `None` if the
/// key is malformed.
pub fn shift_month_key(key: &str, n: i32) -> Option<String> {
    let (year, month) = split_month_key(key)?;
    let total = year * 12 + month as i32 - 1 + n;
    Some(format!(
        "{:04}-{:02}",
        total.div_euclid(12),
        total.rem_euclid(12) + 1
    ))
}

pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Last weekday of the month, rolling back over a weekend month-end.
pub fn last_business_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let mut day = NaiveDate::from_ymd_opt(year, month, last_day_of_month(year, month))?;
    while !is_business_day(day) {
        day = day.pred_opt()?;
    }
    Some(day)
}

/// Calendar month addition with chrono's day-of-month clamping (Jan 31 + 1
/// month = Feb 28/29). Not invariant across end-of-month days; accepted.
pub fn add_months(date: NaiveDate, n: i32) -> NaiveDate {
    let shifted = if n >= 0 {
        date.checked_add_months(Months::new(n as u32))
    } else {
        date.checked_sub_months(Months::new(n.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}
