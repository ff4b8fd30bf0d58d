/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Bibliographic records in CSL-JSON form.
//!
//! A [`Reference`] is immutable input owned by the caller. Fields are split
//! into three typed tables (plain variables, dates, and name lists) when the
//! record is deserialized, so lookups by CSL variable name never need to
//! inspect JSON values at render time. An absent field is simply `None`.

mod date;
mod name;

#[cfg(test)]
mod tests;

pub use date::{Date, DateValue};
pub use name::Name;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// CSL variables holding lists of names.
pub const NAME_VARIABLES: &[&str] = &[
    "author",
    "chair",
    "collection-editor",
    "compiler",
    "composer",
    "container-author",
    "contributor",
    "curator",
    "director",
    "editor",
    "editorial-director",
    "editor-translator",
    "executive-producer",
    "guest",
    "host",
    "illustrator",
    "interviewer",
    "narrator",
    "organizer",
    "original-author",
    "performer",
    "producer",
    "recipient",
    "reviewed-author",
    "script-writer",
    "series-creator",
    "translator",
];

/// CSL variables holding dates.
pub const DATE_VARIABLES: &[&str] = &[
    "accessed",
    "available-date",
    "container",
    "event-date",
    "issued",
    "original-date",
    "submitted",
];

/// A bibliographic record.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct Reference {
    pub id: String,
    /// The CSL item type (`book`, `article-journal`, ...).
    pub ref_type: String,
    variables: IndexMap<String, String>,
    dates: IndexMap<String, Date>,
    names: IndexMap<String, Vec<Name>>,
}

impl Reference {
    pub fn new(id: &str, ref_type: &str) -> Self {
        Self {
            id: id.to_string(),
            ref_type: ref_type.to_string(),
            ..Default::default()
        }
    }

    /// Builder-style setter for a plain (string or number) variable.
    pub fn with_variable(mut self, name: &str, value: &str) -> Self {
        self.variables.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_date(mut self, name: &str, date: Date) -> Self {
        self.dates.insert(name.to_string(), date);
        self
    }

    pub fn with_names(mut self, name: &str, names: Vec<Name>) -> Self {
        self.names.insert(name.to_string(), names);
        self
    }

    /// Look up a plain variable. Empty strings count as absent.
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables
            .get(name)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn date(&self, name: &str) -> Option<&Date> {
        self.dates.get(name).filter(|d| !d.is_empty())
    }

    pub fn names(&self, name: &str) -> Option<&[Name]> {
        self.names
            .get(name)
            .map(Vec::as_slice)
            .filter(|n| !n.is_empty())
    }

    /// The `language` field, used for locale-sensitive decisions.
    pub fn language(&self) -> Option<&str> {
        self.variable("language")
    }
}

impl TryFrom<IndexMap<String, Value>> for Reference {
    type Error = String;

    fn try_from(fields: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        let mut reference = Reference::default();
        for (key, value) in fields {
            match key.as_str() {
                "id" => {
                    reference.id = scalar_to_string(&value)
                        .ok_or_else(|| "expected string or number for id".to_string())?;
                }
                "type" => reference.ref_type = scalar_to_string(&value).unwrap_or_default(),
                k if DATE_VARIABLES.contains(&k) => {
                    let date: Date = serde_json::from_value(value)
                        .map_err(|e| format!("invalid date in `{}`: {}", key, e))?;
                    reference.dates.insert(key, date);
                }
                k if NAME_VARIABLES.contains(&k) => {
                    let names: Vec<Name> = serde_json::from_value(value)
                        .map_err(|e| format!("invalid names in `{}`: {}", key, e))?;
                    reference.names.insert(key, names);
                }
                _ => {
                    if let Some(s) = scalar_to_string(&value) {
                        reference.variables.insert(key, s);
                    } else {
                        tracing::trace!(field = %key, "ignoring non-scalar reference field");
                    }
                }
            }
        }
        Ok(reference)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
