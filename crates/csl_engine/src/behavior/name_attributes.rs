/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Name options that cascade from `style` through `citation` and
//! `bibliography` down to `names` and `name`.
//!
//! Every field is optional. `None` means "not set here" and is distinct from
//! the field's default, so a nested element only overrides what it spells
//! out. Defaults apply when a value is read.

use crate::error::{Result, StyleError};
use crate::node::StyleNode;

/// How the last name is joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum And {
    /// The locale's `and` term between spaces.
    Text,
    /// `&`.
    Symbol,
}

/// When a delimiter precedes `et al.` or the last name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DelimiterPrecedes {
    #[default]
    Contextual,
    AfterInvertedName,
    Always,
    Never,
}

impl DelimiterPrecedes {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "contextual" => Some(DelimiterPrecedes::Contextual),
            "after-inverted-name" => Some(DelimiterPrecedes::AfterInvertedName),
            "always" => Some(DelimiterPrecedes::Always),
            "never" => Some(DelimiterPrecedes::Never),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameAsSortOrder {
    First,
    All,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameInheritableAttributes {
    pub and: Option<And>,
    pub delimiter_precedes_et_al: Option<DelimiterPrecedes>,
    pub delimiter_precedes_last: Option<DelimiterPrecedes>,
    pub initialize: Option<bool>,
    pub initialize_with: Option<String>,
    pub name_as_sort_order: Option<NameAsSortOrder>,
    pub sort_separator: Option<String>,
    pub et_al_min: Option<usize>,
    pub et_al_use_first: Option<usize>,
}

fn ignored(attribute: &str, value: &str) {
    tracing::debug!(attribute, value, "ignoring unrecognized name attribute value");
}

fn parse_count<N: StyleNode>(node: &N, attribute: &str) -> Option<usize> {
    let value = node.attr(attribute)?;
    let parsed = value.trim().parse().ok();
    if parsed.is_none() {
        ignored(attribute, value);
    }
    parsed
}

impl NameInheritableAttributes {
    /// Read the inheritable name options set on `node`.
    ///
    /// An `and` value other than `text` or `symbol` is an error. Other
    /// unrecognized values are ignored.
    pub fn from_node<N: StyleNode>(node: &N) -> Result<Self> {
        let and = match node.attr("and") {
            None => None,
            Some("text") => Some(And::Text),
            Some("symbol") => Some(And::Symbol),
            Some(other) => {
                tracing::warn!(value = other, "unknown value of `and`");
                return Err(StyleError::UnknownAnd(other.to_string()));
            }
        };

        let delimiter_precedes = |attribute: &str| -> Option<DelimiterPrecedes> {
            let value = node.attr(attribute)?;
            let parsed = DelimiterPrecedes::parse(value);
            if parsed.is_none() {
                ignored(attribute, value);
            }
            parsed
        };

        let name_as_sort_order = match node.attr("name-as-sort-order") {
            Some("first") => Some(NameAsSortOrder::First),
            Some("all") => Some(NameAsSortOrder::All),
            Some(other) => {
                ignored("name-as-sort-order", other);
                None
            }
            None => None,
        };

        Ok(Self {
            and,
            delimiter_precedes_et_al: delimiter_precedes("delimiter-precedes-et-al"),
            delimiter_precedes_last: delimiter_precedes("delimiter-precedes-last"),
            initialize: node.attr_bool("initialize"),
            initialize_with: node.attr("initialize-with").map(str::to_string),
            name_as_sort_order,
            sort_separator: node.attr("sort-separator").map(str::to_string),
            et_al_min: parse_count(node, "et-al-min"),
            et_al_use_first: parse_count(node, "et-al-use-first"),
        })
    }

    /// Fields set in `over` win, all others are kept from `self`.
    pub fn merge(&self, over: &NameInheritableAttributes) -> NameInheritableAttributes {
        NameInheritableAttributes {
            and: over.and.or(self.and),
            delimiter_precedes_et_al: over.delimiter_precedes_et_al.or(self.delimiter_precedes_et_al),
            delimiter_precedes_last: over.delimiter_precedes_last.or(self.delimiter_precedes_last),
            initialize: over.initialize.or(self.initialize),
            initialize_with: over
                .initialize_with
                .clone()
                .or_else(|| self.initialize_with.clone()),
            name_as_sort_order: over.name_as_sort_order.or(self.name_as_sort_order),
            sort_separator: over
                .sort_separator
                .clone()
                .or_else(|| self.sort_separator.clone()),
            et_al_min: over.et_al_min.or(self.et_al_min),
            et_al_use_first: over.et_al_use_first.or(self.et_al_use_first),
        }
    }

    pub fn is_unset(&self) -> bool {
        *self == NameInheritableAttributes::default()
    }

    pub fn delimiter_precedes_et_al(&self) -> DelimiterPrecedes {
        self.delimiter_precedes_et_al.unwrap_or_default()
    }

    pub fn delimiter_precedes_last(&self) -> DelimiterPrecedes {
        self.delimiter_precedes_last.unwrap_or_default()
    }

    pub fn initialize(&self) -> bool {
        self.initialize.unwrap_or(true)
    }

    pub fn initialize_with(&self) -> Option<&str> {
        self.initialize_with.as_deref()
    }

    pub fn sort_separator(&self) -> &str {
        self.sort_separator.as_deref().unwrap_or(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Result<NameInheritableAttributes> {
        let doc = roxmltree::Document::parse(xml).unwrap();
        NameInheritableAttributes::from_node(&doc.root_element())
    }

    #[test]
    fn test_from_node() {
        let a = parse(
            r#"<name and="symbol" et-al-min="4" et-al-use-first="x" delimiter-precedes-last="always"
                     name-as-sort-order="first" initialize="false" sort-separator=" "/>"#,
        )
        .unwrap();
        assert_eq!(a.and, Some(And::Symbol));
        assert_eq!(a.et_al_min, Some(4));
        assert_eq!(a.et_al_use_first, None);
        assert_eq!(a.delimiter_precedes_last(), DelimiterPrecedes::Always);
        assert_eq!(a.delimiter_precedes_et_al(), DelimiterPrecedes::Contextual);
        assert_eq!(a.name_as_sort_order, Some(NameAsSortOrder::First));
        assert!(!a.initialize());
        assert_eq!(a.sort_separator(), " ");
    }

    #[test]
    fn test_unknown_and_is_an_error() {
        let err = parse(r#"<name and="plus"/>"#).unwrap_err();
        assert!(matches!(err, StyleError::UnknownAnd(ref v) if v == "plus"));
    }

    #[test]
    fn test_merge_only_overrides_set_fields() {
        let style = parse(r#"<style et-al-min="3" et-al-use-first="1" initialize-with=". "/>"#).unwrap();
        let name = parse(r#"<name et-al-use-first="2" and="text"/>"#).unwrap();
        let merged = style.merge(&name);
        assert_eq!(merged.et_al_min, Some(3));
        assert_eq!(merged.et_al_use_first, Some(2));
        assert_eq!(merged.initialize_with(), Some(". "));
        assert_eq!(merged.and, Some(And::Text));
        assert!(NameInheritableAttributes::default().is_unset());
        assert_eq!(merged.merge(&NameInheritableAttributes::default()), merged);
    }
}
