/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Dates from separate year and month fields, as found in BibTeX data.
//!
//! Either field may hold a range (`2000-2013`, `Mar--Aug`) or a list
//! (`2013/2014`, `Jul/Aug`). Lists are merged into a range only when their
//! ends are at most one year (or month) apart.

use csl_core::{Date, MonthNames};

/// Month number from a numeric string or a month name known to any of
/// `months`, tried in order.
pub fn to_month(month: &str, months: &[&MonthNames]) -> Option<u32> {
    if month.is_empty() {
        return None;
    }
    if month.chars().all(|c| c.is_ascii_digit()) {
        return month.parse().ok();
    }
    months.iter().find_map(|names| names.lookup(month))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// A single date. Years need four digits; extra leading text (`in 2013`)
/// marks the date as approximate.
pub fn to_date_single(year: Option<&str>, month: Option<&str>, months: &[&MonthNames]) -> Option<Date> {
    let year = year?;
    let len = year.chars().count();
    if len < 4 {
        return None;
    }
    let (y, circa) = if is_digits(year) {
        (year.parse::<i32>().ok()?, false)
    } else {
        let split = year.char_indices().nth(len - 4).map(|(i, _)| i)?;
        let tail = &year[split..];
        if !is_digits(tail) {
            return None;
        }
        (tail.parse::<i32>().ok()?, len > 4)
    };

    let parts = match month.and_then(|m| to_month(m, months)) {
        Some(m) => vec![y, m as i32],
        None => vec![y],
    };
    Some(Date::from_parts(&parts).with_circa(circa))
}

fn split_range(s: &str) -> Vec<&str> {
    s.split(['-', '\u{2013}']).filter(|p| !p.is_empty()).collect()
}

/// A date that may be a range written with dashes.
pub fn to_date_range(year: Option<&str>, month: Option<&str>, months: &[&MonthNames]) -> Option<Date> {
    let years = year.map(split_range).unwrap_or_default();
    let month_parts = month.map(split_range).unwrap_or_default();

    if years.len() > 1 {
        // a month is ambiguous next to a year range, so it is dropped
        let d1 = to_date_single(years.first().copied(), None, months);
        let d2 = to_date_single(years.last().copied(), None, months);
        return merge(d1, d2);
    }
    if month_parts.len() > 1 {
        let d1 = to_date_single(year, Some(month_parts[0]), months);
        let d2 = to_date_single(year, Some(month_parts[1]), months);
        return merge(d1, d2);
    }
    to_date_single(year, month, months)
}

fn endpoint(date: &Date, last: bool, index: usize) -> Option<i32> {
    let parts = if last {
        date.date_parts.last()
    } else {
        date.date_parts.first()
    };
    parts.and_then(|p| p.get(index)).copied()
}

fn close_enough(d1: &Option<Date>, d2: &Option<Date>, index: usize) -> bool {
    let (Some(d1), Some(d2)) = (d1, d2) else {
        return false;
    };
    match (endpoint(d1, true, index), endpoint(d2, false, index)) {
        (Some(a), Some(b)) => (b - a).abs() <= 1,
        _ => false,
    }
}

/// Build a date from BibTeX `year` and `month` fields.
pub fn to_date(year: Option<&str>, month: Option<&str>, months: &[&MonthNames]) -> Option<Date> {
    let years: Vec<&str> = year.map(|y| y.split('/').collect()).unwrap_or_default();
    let month_list: Vec<&str> = month.map(|m| m.split('/').collect()).unwrap_or_default();

    if years.len() > 1 {
        let d1 = to_date_range(years.first().copied(), None, months);
        let d2 = to_date_range(years.last().copied(), None, months);
        if close_enough(&d1, &d2, 0) {
            return merge(d1, d2);
        }
    } else if month_list.len() > 1 {
        let d1 = to_date_range(year, Some(month_list[0]), months);
        let d2 = to_date_range(year, Some(month_list[1]), months);
        if close_enough(&d1, &d2, 1) {
            return merge(d1, d2);
        }
    }
    to_date_range(year, month, months)
}

/// Join two dates into a range from the first endpoint of `d1` to the last
/// endpoint of `d2`.
fn merge(d1: Option<Date>, d2: Option<Date>) -> Option<Date> {
    match (d1, d2) {
        (None, d2) => d2,
        (d1, None) => d1,
        (Some(d1), Some(d2)) => {
            let first = d1.date_parts.first().cloned().unwrap_or_default();
            let last = d2.date_parts.last().cloned().unwrap_or_default();
            Some(Date::range(&first, &last).with_circa(d1.circa || d2.circa))
        }
    }
}
