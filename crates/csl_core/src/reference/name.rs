/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use serde::{Deserialize, Serialize};

/// A personal or institutional name in CSL-JSON form.
///
/// When `literal` is set the name is rendered verbatim and the structured
/// parts are ignored. This is how corporate authors are represented.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case", default)]
pub struct Name {
    /// Family name (surname).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    /// Particle dropped in short forms (e.g. "de" in "Ludwig de Beethoven").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropping_particle: Option<String>,
    /// Particle kept with the family name (e.g. "van" in "Vincent van Gogh").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_dropping_particle: Option<String>,
    /// Suffix such as "Jr." or "III".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Verbatim name (institutions, unparseable input).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
}

impl Name {
    /// Create a structured name from family and given parts.
    pub fn new(family: &str, given: &str) -> Self {
        Self {
            family: Some(family.to_string()),
            given: Some(given.to_string()),
            ..Default::default()
        }
    }

    /// Create a literal (corporate or verbatim) name.
    pub fn literal(value: &str) -> Self {
        Self {
            literal: Some(value.to_string()),
            ..Default::default()
        }
    }

    pub fn is_literal(&self) -> bool {
        self.literal.is_some()
    }
}
