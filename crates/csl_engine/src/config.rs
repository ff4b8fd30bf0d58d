/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default bound on macro-to-macro nesting.
pub const DEFAULT_MAX_MACRO_DEPTH: usize = 32;

/// Settings that apply to every style compiled by the engine.
///
/// ```yaml
/// max-macro-depth: 16
/// default-locale: de-DE
/// page-range-format: chicago-16
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EngineConfig {
    /// Styles whose macros nest deeper than this are rejected.
    pub max_macro_depth: usize,
    /// Locale used when neither the caller nor the style names one.
    pub default_locale: String,
    /// Overrides the style's `page-range-format` attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_range_format: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_macro_depth: DEFAULT_MAX_MACRO_DEPTH,
            default_locale: "en-US".to_string(),
            page_range_format: None,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
