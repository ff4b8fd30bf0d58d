/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Page range formatting (`page-range-format`).

use std::fmt;
use std::str::FromStr;

use crate::page::{PageRange, PageRanges};

/// Delimiter used between the first and last page.
pub const DEFAULT_DELIMITER: &str = "\u{2013}";

/// How many digits of the second page number are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageRangeFormat {
    /// Chicago Manual of Style, 15th edition (`chicago`, `chicago-15`).
    Chicago15,
    /// Chicago Manual of Style, 16th edition (`chicago-16`).
    Chicago16,
    Expanded,
    /// All digits that repeat are dropped.
    Minimal,
    /// Like `minimal`, but at least two digits are kept.
    Minimal2,
}

impl FromStr for PageRangeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chicago" | "chicago-15" => Ok(PageRangeFormat::Chicago15),
            "chicago-16" => Ok(PageRangeFormat::Chicago16),
            "expanded" => Ok(PageRangeFormat::Expanded),
            "minimal" => Ok(PageRangeFormat::Minimal),
            "minimal-two" => Ok(PageRangeFormat::Minimal2),
            other => Err(format!("unknown page range format: {}", other)),
        }
    }
}

impl fmt::Display for PageRangeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PageRangeFormat::Chicago15 => "chicago-15",
            PageRangeFormat::Chicago16 => "chicago-16",
            PageRangeFormat::Expanded => "expanded",
            PageRangeFormat::Minimal => "minimal",
            PageRangeFormat::Minimal2 => "minimal-two",
        };
        f.write_str(s)
    }
}

impl PageRangeFormat {
    /// Format one range, joining first and last page with `delimiter`.
    pub fn format(self, range: &PageRange, delimiter: &str) -> String {
        let (Some(first), Some(last)) = (range.first.as_deref(), range.last.as_deref()) else {
            return range.literal.replace('-', delimiter);
        };
        if first == last {
            return range.literal.replace('-', delimiter);
        }

        let first_len = first.chars().count();
        let mut last = last.to_string();
        let last_len = last.chars().count();
        if last_len <= first_len {
            if last_len < first_len {
                last = expanded(first, &last);
            }
            last = match self {
                PageRangeFormat::Chicago15 => chicago15(first, &last),
                PageRangeFormat::Chicago16 => chicago16(first, &last),
                PageRangeFormat::Expanded => last,
                PageRangeFormat::Minimal => minimal(first, &last),
                PageRangeFormat::Minimal2 => minimal2(first, &last),
            };
        }
        format!("{}{}{}", first, delimiter, last)
    }

    /// Format every range and join them with `", "`.
    pub fn format_all(self, ranges: &PageRanges, delimiter: &str) -> String {
        ranges
            .iter()
            .map(|r| self.format(r, delimiter))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Leading letters of `s`, if there are some and they are not all of it.
fn alphabetic_prefix(s: &str) -> Option<&str> {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_alphabetic())
        .map(|(i, _)| i)?;
    (end > 0).then(|| &s[..end])
}

/// Compare alphabetic prefixes. `Err` carries the value to use as-is when
/// the prefixes disagree.
fn common_prefix<'a>(first: &'a str, last: &'a str) -> Result<Option<&'a str>, ()> {
    match (alphabetic_prefix(first), alphabetic_prefix(last)) {
        (None, None) => Ok(None),
        (Some(fp), Some(lp)) if fp == lp => Ok(Some(fp)),
        _ => Err(()),
    }
}

fn expanded(first: &str, last: &str) -> String {
    let Ok(prefix) = common_prefix(first, last) else {
        return last.to_string();
    };
    let last = prefix.map_or(last, |p| &last[p.len()..]);
    let keep = first.chars().count().saturating_sub(last.chars().count());
    let mut out: String = first.chars().take(keep).collect();
    out.push_str(last);
    out
}

fn minimal(first: &str, last: &str) -> String {
    let shared = first
        .chars()
        .zip(last.chars())
        .take_while(|(a, b)| a == b)
        .count();
    last.chars().skip(shared).collect()
}

fn minimal2(first: &str, last: &str) -> String {
    let limit = first.chars().count().saturating_sub(2);
    let shared = first
        .chars()
        .zip(last.chars())
        .take(limit)
        .take_while(|(a, b)| a == b)
        .count();
    let rest: String = last.chars().skip(shared).collect();
    rest.trim_start_matches('0').to_string()
}

fn chicago15(first: &str, last: &str) -> String {
    let Ok(prefix) = common_prefix(first, last) else {
        return last.to_string();
    };
    let prefix = prefix.unwrap_or_default();
    let first = &first[prefix.len()..];
    let last = &last[prefix.len()..];

    let (Ok(n_first), Ok(n_last)) = (first.parse::<i64>(), last.parse::<i64>()) else {
        return format!("{}{}", prefix, last);
    };

    let shortened = if n_first > 1000 && n_first <= 9999 && n_first / 100 != n_last / 100 {
        last.to_string()
    } else if n_first > 100 && n_first % 100 > 0 {
        minimal2(first, last)
    } else {
        last.to_string()
    };
    format!("{}{}", prefix, shortened)
}

fn chicago16(first: &str, last: &str) -> String {
    let Ok(prefix) = common_prefix(first, last) else {
        return last.to_string();
    };
    let prefix = prefix.unwrap_or_default();
    let first = &first[prefix.len()..];
    let last = &last[prefix.len()..];

    let (Ok(n_first), Ok(_)) = (first.parse::<i64>(), last.parse::<i64>()) else {
        return format!("{}{}", prefix, last);
    };

    if n_first > 100 && n_first % 100 > 0 {
        format!("{}{}", prefix, minimal2(first, last))
    } else {
        format!("{}{}", prefix, last)
    }
}
