/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Read-only access to a parsed style document.
//!
//! Compilation only needs element names, attribute values and child
//! elements, so any tree that can answer those questions can be compiled.
//! An implementation for [`roxmltree::Node`] is provided.

use crate::error::{Result, StyleError};

/// An element of a style document.
pub trait StyleNode: Sized {
    /// The element's local name (`text`, `group`, ...).
    fn name(&self) -> &str;

    fn attr(&self, name: &str) -> Option<&str>;

    /// `Some(true)` only for the literal value `true`.
    fn attr_bool(&self, name: &str) -> Option<bool> {
        self.attr(name).map(|v| v == "true")
    }

    /// Child elements in document order. Text and comments are skipped.
    fn children(&self) -> Vec<Self>;

    fn find_child(&self, name: &str) -> Option<Self> {
        self.children().into_iter().find(|c| c.name() == name)
    }

    /// Text content, for nodes such as `<title>`.
    fn text(&self) -> Option<&str>;
}

impl<'a, 'input: 'a> StyleNode for roxmltree::Node<'a, 'input> {
    fn name(&self) -> &str {
        self.tag_name().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attribute(name)
    }

    fn children(&self) -> Vec<Self> {
        roxmltree::Node::children(self)
            .filter(|c| c.is_element())
            .collect()
    }

    fn text(&self) -> Option<&str> {
        roxmltree::Node::text(self)
    }
}

/// The value of a mandatory attribute.
pub(crate) fn required_attr<'n, N: StyleNode>(node: &'n N, attribute: &'static str) -> Result<&'n str> {
    match node.attr(attribute).filter(|v| !v.is_empty()) {
        Some(value) => Ok(value),
        None => {
            tracing::warn!(element = node.name(), attribute, "missing required attribute");
            Err(StyleError::MissingAttribute {
                element: node.name().to_string(),
                attribute,
            })
        }
    }
}

/// Split a space-separated attribute value.
pub(crate) fn attr_list<N: StyleNode>(node: &N, attribute: &str) -> Vec<String> {
    node.attr(attribute)
        .map(|v| v.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
