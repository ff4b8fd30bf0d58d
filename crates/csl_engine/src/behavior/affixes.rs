/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use crate::context::RenderContext;
use crate::node::StyleNode;
use crate::token::{TokenBuffer, TokenKind};

use super::Behavior;

/// `prefix` and `suffix`, added only around non-empty output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Affixes {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl Affixes {
    pub fn from_node<N: StyleNode>(node: &N) -> Self {
        Self {
            prefix: node.attr("prefix").filter(|s| !s.is_empty()).map(str::to_string),
            suffix: node.attr("suffix").filter(|s| !s.is_empty()).map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_none() && self.suffix.is_none()
    }
}

impl Behavior for Affixes {
    fn apply(&self, _ctx: &RenderContext<'_>, mut buffer: TokenBuffer) -> TokenBuffer {
        if buffer.is_empty() {
            return buffer;
        }
        if let Some(prefix) = &self.prefix {
            buffer.prepend_text(prefix, TokenKind::Prefix);
        }
        if let Some(suffix) = &self.suffix {
            buffer.append_text(suffix, TokenKind::Suffix);
        }
        buffer
    }
}
