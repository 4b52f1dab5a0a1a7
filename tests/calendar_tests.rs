// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financehub::calendar::{
    add_months, business_days_between, is_business_day, last_business_day_of_month,
    last_day_of_month, month_key, shift_month_key, split_month_key,
};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn weekdays_are_business_days() {
    assert!(is_business_day(d("2024-01-01"))); // Monday
    assert!(is_business_day(d("2024-01-05"))); // Friday
    assert!(!is_business_day(d("2024-01-06"))); // Saturday
    assert!(!is_business_day(d("2024-01-07"))); // Sunday
}

#[test]
fn business_days_inclusive_range() {
    // Mon Jan 1 through Mon Jan 8: five weekdays plus the second Monday
    assert_eq!(business_days_between(d("2024-01-01"), d("2024-01-08")), 6);
    // Within one business week
    assert_eq!(business_days_between(d("2024-01-01"), d("2024-01-05")), 5);
    // Weekend only
    assert_eq!(business_days_between(d("2024-01-06"), d("2024-01-07")), 0);
    // Single day
    assert_eq!(business_days_between(d("2024-01-03"), d("2024-01-03")), 1);
    // Reversed range
    assert_eq!(business_days_between(d("2024-01-08"), d("2024-01-01")), 0);
}

#[test]
fn month_key_and_split() {
    assert_eq!(month_key(d("2024-03-20")), "2024-03");
    assert_eq!(split_month_key("2024-03"), Some((2024, 3)));
    assert_eq!(split_month_key("2024-13"), None);
    assert_eq!(split_month_key("garbage"), None);
}

#[test]
fn month_key_shifts_across_year_boundaries() {
    assert_eq!(shift_month_key("2024-12", 1).unwrap(), "2025-01");
    assert_eq!(shift_month_key("2024-01", -1).unwrap(), "2023-12");
    assert_eq!(shift_month_key("2024-06", 18).unwrap(), "2025-12");
    assert_eq!(shift_month_key("2024-06", 0).unwrap(), "2024-06");
    assert!(shift_month_key("junk", 1).is_none());
}

#[test]
fn leap_year_february() {
    assert_eq!(last_day_of_month(2024, 2), 29);
    assert_eq!(last_day_of_month(2023, 2), 28);
    assert_eq!(last_day_of_month(2024, 4), 30);
    assert_eq!(last_day_of_month(2024, 12), 31);
}

#[test]
fn last_business_day_rolls_back_over_weekends() {
    // March 31 2024 is a Sunday; Friday the 29th is the last business day
    assert_eq!(
        last_business_day_of_month(2024, 3).unwrap(),
        d("2024-03-29")
    );
    // Feb 29 2024 is a Thursday
    assert_eq!(
        last_business_day_of_month(2024, 2).unwrap(),
        d("2024-02-29")
    );
    // Nov 30 2024 is a Saturday
    assert_eq!(
        last_business_day_of_month(2024, 11).unwrap(),
        d("2024-11-29")
    );
}

#[test]
fn add_months_clamps_short_months() {
    assert_eq!(add_months(d("2024-01-31"), 1), d("2024-02-29"));
    assert_eq!(add_months(d("2023-01-31"), 1), d("2023-02-28"));
    assert_eq!(add_months(d("2024-03-15"), 12), d("2025-03-15"));
    assert_eq!(add_months(d("2024-03-31"), -1), d("2024-02-29"));
}
