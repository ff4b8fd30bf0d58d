/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::types::DatePartTemplate;

/// Raw locale format for YAML/JSON parsing.
///
/// Terms are keyed by name. A value is either a plain string (long form,
/// no plural), a `single`/`multiple` pair, or a map from form name to one
/// of those.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct RawLocale {
    /// The locale identifier (e.g., "en-US", "de-DE").
    pub locale: String,
    #[serde(default)]
    pub terms: HashMap<String, RawTermValue>,
    /// Localized date formats keyed by form (`text`, `numeric`).
    #[serde(default)]
    pub dates: HashMap<String, Vec<DatePartTemplate>>,
}

/// A term value that can be a simple string or have singular/plural forms.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawTermValue {
    Simple(String),
    SinglePlural { single: String, multiple: String },
    Forms(HashMap<String, RawTermValue>),
}

impl Default for RawTermValue {
    fn default() -> Self {
        RawTermValue::Simple(String::new())
    }
}

impl RawTermValue {
    /// The `(single, multiple)` pair for a non-form-keyed value.
    pub fn single_multiple(&self) -> Option<(&str, &str)> {
        match self {
            RawTermValue::Simple(s) => Some((s, s)),
            RawTermValue::SinglePlural { single, multiple } => Some((single, multiple)),
            RawTermValue::Forms(_) => None,
        }
    }
}
