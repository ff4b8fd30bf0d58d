/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::LocaleError;

/// Form for term lookup.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TermForm {
    #[default]
    Long,
    Short,
    Verb,
    VerbShort,
    Symbol,
}

impl TermForm {
    /// The form consulted when a term is not defined in this form.
    pub fn fallback(self) -> Option<TermForm> {
        match self {
            TermForm::Long => None,
            TermForm::Short | TermForm::Verb => Some(TermForm::Long),
            TermForm::VerbShort => Some(TermForm::Verb),
            TermForm::Symbol => Some(TermForm::Short),
        }
    }
}

impl FromStr for TermForm {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "long" => Ok(TermForm::Long),
            "short" => Ok(TermForm::Short),
            "verb" => Ok(TermForm::Verb),
            "verb-short" => Ok(TermForm::VerbShort),
            "symbol" => Ok(TermForm::Symbol),
            other => Err(LocaleError::UnknownTermForm(other.to_string())),
        }
    }
}

impl fmt::Display for TermForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TermForm::Long => "long",
            TermForm::Short => "short",
            TermForm::Verb => "verb",
            TermForm::VerbShort => "verb-short",
            TermForm::Symbol => "symbol",
        };
        f.write_str(s)
    }
}

/// A localized term with singular and plural values.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Term {
    pub name: String,
    #[serde(default)]
    pub form: TermForm,
    pub single: String,
    /// Same as `single` for terms without a plural.
    pub multiple: String,
}

impl Term {
    pub fn new(name: &str, form: TermForm, single: &str, multiple: &str) -> Self {
        Self {
            name: name.to_string(),
            form,
            single: single.to_string(),
            multiple: multiple.to_string(),
        }
    }

    pub fn value(&self, plural: bool) -> &str {
        if plural {
            &self.multiple
        } else {
            &self.single
        }
    }
}

/// Localized date formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateForm {
    Text,
    Numeric,
}

impl FromStr for DateForm {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(DateForm::Text),
            "numeric" => Ok(DateForm::Numeric),
            other => Err(LocaleError::UnknownDateForm(other.to_string())),
        }
    }
}

/// The structural components of a date, in order of significance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatePartName {
    Year,
    Month,
    Day,
}

impl DatePartName {
    /// Position of this part inside a `[year, month, day]` array.
    pub fn index(self) -> usize {
        match self {
            DatePartName::Year => 0,
            DatePartName::Month => 1,
            DatePartName::Day => 2,
        }
    }
}

impl FromStr for DatePartName {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(DatePartName::Year),
            "month" => Ok(DatePartName::Month),
            "day" => Ok(DatePartName::Day),
            other => Err(LocaleError::UnknownDatePart(other.to_string())),
        }
    }
}

/// One styled date part inside a localized date format.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct DatePartTemplate {
    pub name: DatePartName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_case: Option<String>,
    #[serde(default)]
    pub strip_periods: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_delimiter: Option<String>,
}

impl DatePartTemplate {
    pub fn new(name: DatePartName) -> Self {
        Self {
            name,
            form: None,
            prefix: None,
            suffix: None,
            text_case: None,
            strip_periods: false,
            range_delimiter: None,
        }
    }

    pub fn with_form(mut self, form: &str) -> Self {
        self.form = Some(form.to_string());
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = Some(suffix.to_string());
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }
}

/// A localized date format (`text` or `numeric`).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LocaleDate {
    pub form: DateForm,
    pub parts: Vec<DatePartTemplate>,
}
