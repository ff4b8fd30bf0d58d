/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use serde::{Deserialize, Deserializer, Serialize};

/// A date variable in CSL-JSON form.
///
/// A date is either one or two `date-parts` arrays (`[year, month?, day?]`),
/// a season, a literal string, or a raw unparsed string. When several are
/// present, [`Date::value`] decides which one is authoritative.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Date {
    /// One entry for a single date, two for a range.
    #[serde(
        deserialize_with = "deserialize_date_parts",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub date_parts: Vec<Vec<i32>>,
    #[serde(
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// Marks an approximate date.
    #[serde(deserialize_with = "deserialize_circa")]
    pub circa: bool,
}

/// The authoritative representation of a [`Date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue<'a> {
    /// Structured parts. `first` and `last` are the same slice for a
    /// single date.
    Parts { first: &'a [i32], last: &'a [i32] },
    Literal(&'a str),
    Raw(&'a str),
    Season(&'a str),
}

impl Date {
    /// A single date from its parts.
    pub fn from_parts(parts: &[i32]) -> Self {
        Self {
            date_parts: vec![parts.to_vec()],
            ..Default::default()
        }
    }

    /// A two-endpoint range.
    pub fn range(first: &[i32], last: &[i32]) -> Self {
        Self {
            date_parts: vec![first.to_vec(), last.to_vec()],
            ..Default::default()
        }
    }

    pub fn literal(value: &str) -> Self {
        Self {
            literal: Some(value.to_string()),
            ..Default::default()
        }
    }

    pub fn raw(value: &str) -> Self {
        Self {
            raw: Some(value.to_string()),
            ..Default::default()
        }
    }

    pub fn with_circa(mut self, circa: bool) -> Self {
        self.circa = circa;
        self
    }

    pub fn with_season(mut self, season: &str) -> Self {
        self.season = Some(season.to_string());
        self
    }

    /// The representation used for rendering: structured parts first, then
    /// the literal, the raw string, and finally a lone season.
    pub fn value(&self) -> Option<DateValue<'_>> {
        let parts: Vec<&Vec<i32>> = self.date_parts.iter().filter(|p| !p.is_empty()).collect();
        if let (Some(first), Some(last)) = (parts.first(), parts.last()) {
            return Some(DateValue::Parts {
                first: first.as_slice(),
                last: last.as_slice(),
            });
        }
        if let Some(literal) = self.literal.as_deref().filter(|s| !s.is_empty()) {
            return Some(DateValue::Literal(literal));
        }
        if let Some(raw) = self.raw.as_deref().filter(|s| !s.is_empty()) {
            return Some(DateValue::Raw(raw));
        }
        self.season
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(DateValue::Season)
    }

    pub fn is_empty(&self) -> bool {
        self.value().is_none()
    }

    pub fn is_range(&self) -> bool {
        matches!(self.value(), Some(DateValue::Parts { first, last }) if first != last)
    }

    /// The year of the first endpoint, if structured.
    pub fn year(&self) -> Option<i32> {
        match self.value()? {
            DateValue::Parts { first, .. } => first.first().copied(),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl LenientValue {
    fn into_part(self) -> Option<i32> {
        match self {
            LenientValue::Int(n) => i32::try_from(n).ok(),
            LenientValue::Float(f) => Some(f as i32),
            LenientValue::Text(s) => s.trim().parse().ok(),
            LenientValue::Bool(_) => None,
        }
    }
}

/// CSL-JSON allows date parts to be integers or numeric strings. Parts that
/// are neither end the array at that position.
fn deserialize_date_parts<'de, D>(deserializer: D) -> Result<Vec<Vec<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Vec<LenientValue>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|parts| {
            parts
                .into_iter()
                .map_while(LenientValue::into_part)
                .take(3)
                .collect()
        })
        .collect())
}

fn deserialize_circa<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<LenientValue> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(LenientValue::Bool(b)) => b,
        Some(LenientValue::Int(n)) => n != 0,
        Some(LenientValue::Float(f)) => f != 0.0,
        Some(LenientValue::Text(s)) => !s.is_empty() && s != "0" && s != "false",
        None => false,
    })
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<LenientValue> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(LenientValue::Text(s)) => Some(s),
        Some(LenientValue::Int(n)) => Some(n.to_string()),
        Some(LenientValue::Float(f)) => Some(f.to_string()),
        Some(LenientValue::Bool(_)) | None => None,
    })
}
