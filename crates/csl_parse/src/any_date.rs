/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Free-text date parser.
//!
//! Recognizes common ways of writing a date (`Feb. 27, 2023`,
//! `27 February 2023`, `2023-02-27`, `2/27/23`, `27.2.2023`, ...) using the
//! month names of a locale. Patterns are tried in order and the first one
//! found anywhere in the input wins. Numeric patterns whose day/month order
//! depends on convention swap the two for locales that write the day first,
//! and a month above 12 is swapped with the day when that is unambiguous.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use csl_core::{DateForm, DatePartName, Locale, LocaleData, MonthNames};
use regex::{Captures, Regex};

const DAY: &str = r"(?P<day>[0-9]{1,2})";
const MONTH: &str = r"(?P<month>[0-9]{1,2})";
const LONG_YEAR: &str = r"(?P<longyear>[0-9]{4,})";

/// Components recovered from free text. Any of them may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl ParsedDate {
    /// `[year, month?, day?]`, stopping at the first missing component.
    /// Empty when there is no year.
    pub fn to_date_parts(self) -> Vec<i32> {
        let mut parts = Vec::with_capacity(3);
        let Some(year) = self.year else {
            return parts;
        };
        parts.push(year);
        if let Some(month) = self.month {
            parts.push(month as i32);
            if let Some(day) = self.day {
                parts.push(day as i32);
            }
        }
        parts
    }
}

#[derive(Debug)]
struct Pattern {
    regex: Regex,
    /// Day and month follow the locale's numeric order.
    swappable: bool,
}

/// Date patterns compiled for one locale.
#[derive(Debug)]
pub struct AnyDateParser {
    patterns: Vec<Pattern>,
    months: Arc<MonthNames>,
    day_before_month: bool,
}

fn month_name_alternation(months: &MonthNames) -> Option<String> {
    let mut long: Vec<&str> = months.long_names().collect();
    let mut short: Vec<&str> = months.short_names().collect();
    if long.is_empty() && short.is_empty() {
        return None;
    }
    long.sort_by_key(|s| std::cmp::Reverse(s.len()));
    short.sort_by_key(|s| std::cmp::Reverse(s.len()));
    let alternatives: Vec<String> = long
        .iter()
        .map(|s| regex::escape(s))
        .chain(short.iter().map(|s| format!(r"{}\.?", regex::escape(s))))
        .collect();
    Some(format!("(?P<monthname>{})", alternatives.join("|")))
}

/// True if the locale's numeric date template puts the day before the month.
fn day_before_month(locale: &Locale) -> bool {
    let Some(numeric) = locale.date_format(DateForm::Numeric) else {
        return false;
    };
    let position = |name: DatePartName| numeric.parts.iter().position(|p| p.name == name);
    match (position(DatePartName::Day), position(DatePartName::Month)) {
        (Some(d), Some(m)) => d < m,
        _ => false,
    }
}

impl AnyDateParser {
    pub fn new(locale: &Locale, data: &LocaleData) -> Self {
        let months = data.months(locale);
        let year = format!(r"(?:{LONG_YEAR}|'?(?P<shortyear>[0-9]{{2}}))");

        let mut sources: Vec<(String, bool)> = Vec::new();
        let month_name = month_name_alternation(&months);
        if let Some(name) = &month_name {
            // Feb. 27, 2023 / February 27th, 2023
            sources.push((format!(r"{name}\s+{DAY}(?:th|st|nd|rd)?(?:\s*,)?\s+{year}"), false));
            // 27 February 2023
            sources.push((format!(r"(?:{DAY}\.?\s+)?{name}\s+{year}"), false));
        }
        // 2023-02-27
        sources.push((format!(r"{LONG_YEAR}-{MONTH}(?:-{DAY})?"), false));
        // 2023.02.27
        sources.push((format!(r"{LONG_YEAR}\.{MONTH}(?:\.{DAY})?"), true));
        if let Some(name) = &month_name {
            // 2023-Feb-27
            sources.push((format!(r"{LONG_YEAR}-{name}(?:-{DAY})?"), false));
            // 27-Feb-2023
            sources.push((format!(r"(?:{DAY}-)?{name}-{year}"), false));
        }
        // 2023/02/27
        sources.push((format!(r"{LONG_YEAR}/{MONTH}(?:/{DAY})?"), false));
        // 02/27/23
        sources.push((format!(r"{MONTH}/{DAY}/{year}"), true));
        if let Some(name) = &month_name {
            // 27/Feb/2023
            sources.push((format!(r"{DAY}/{name}/{year}"), false));
        }
        // 27.02.2023
        sources.push((format!(r"{DAY}\.\s*{MONTH}\.\s*{year}"), true));
        // 2023
        sources.push((year.clone(), false));

        let patterns = sources
            .into_iter()
            .filter_map(|(source, swappable)| {
                match Regex::new(&format!("(?i){}", source)) {
                    Ok(regex) => Some(Pattern { regex, swappable }),
                    Err(e) => {
                        tracing::warn!(locale = %locale.lang, error = %e, "skipping date pattern");
                        None
                    }
                }
            })
            .collect();

        tracing::debug!(locale = %locale.lang, "compiled free-text date patterns");
        Self {
            patterns,
            months,
            day_before_month: day_before_month(locale),
        }
    }

    fn number<T: std::str::FromStr>(caps: &Captures<'_>, group: &str) -> Option<T> {
        caps.name(group).and_then(|m| m.as_str().parse().ok())
    }

    /// Parse `input`, or `None` if no pattern matches.
    pub fn parse(&self, input: &str) -> Option<ParsedDate> {
        let trimmed = input.trim();
        self.patterns.iter().find_map(|pattern| {
            let caps = pattern.regex.captures(trimmed)?;

            let year = Self::number::<i32>(&caps, "longyear")
                .or_else(|| Self::number::<i32>(&caps, "shortyear"))
                .map(|y| if y < 100 { y + 2000 } else { y });

            let mut month = match caps.name("monthname") {
                Some(name) => self.months.lookup(name.as_str()),
                None => Self::number::<u32>(&caps, "month"),
            };
            let mut day = Self::number::<u32>(&caps, "day");

            if self.day_before_month && pattern.swappable {
                std::mem::swap(&mut month, &mut day);
            }
            if month.is_some_and(|m| m > 12) && day.map_or(true, |d| d <= 12) {
                std::mem::swap(&mut month, &mut day);
            }

            Some(ParsedDate { year, month, day })
        })
    }
}

/// Memoizing, thread-safe map of compiled parsers keyed by locale identifier.
#[derive(Debug, Default)]
pub struct AnyDateParsers {
    data: LocaleData,
    parsers: RwLock<HashMap<String, Arc<AnyDateParser>>>,
}

impl AnyDateParsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, locale: &Locale) -> Arc<AnyDateParser> {
        {
            let cache = self.parsers.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(parser) = cache.get(&locale.lang) {
                return Arc::clone(parser);
            }
        }
        let built = Arc::new(AnyDateParser::new(locale, &self.data));
        let mut cache = self.parsers.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(locale.lang.clone()).or_insert(built))
    }

    /// Try each locale in turn.
    pub fn parse(&self, input: &str, locales: &[&Locale]) -> Option<ParsedDate> {
        locales.iter().find_map(|locale| self.get(locale).parse(input))
    }
}
