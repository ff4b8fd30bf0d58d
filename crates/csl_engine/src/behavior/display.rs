/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use crate::context::RenderContext;
use crate::node::StyleNode;
use crate::token::{Token, TokenBuffer};

use super::Behavior;

/// Block layout of a bibliography entry segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Display {
    Block,
    LeftMargin,
    RightInline,
    Indent,
}

impl Display {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "block" => Some(Display::Block),
            "left-margin" => Some(Display::LeftMargin),
            "right-inline" => Some(Display::RightInline),
            "indent" => Some(Display::Indent),
            _ => None,
        }
    }

    pub fn from_node<N: StyleNode>(node: &N) -> Option<Self> {
        node.attr("display").and_then(Display::parse)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::LeftMargin => "left-margin",
            Display::RightInline => "right-inline",
            Display::Indent => "indent",
        }
    }
}

/// Non-empty output is framed by start and end markers.
impl Behavior for Display {
    fn apply(&self, _ctx: &RenderContext<'_>, mut buffer: TokenBuffer) -> TokenBuffer {
        if !buffer.is_empty() {
            buffer.prepend(Token::DisplayStart(*self));
            buffer.append(Token::DisplayEnd(*self));
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderScope;
    use csl_core::{Locale, Reference};

    #[test]
    fn test_display_markers() {
        let r = Reference::new("r", "book");
        let locale = Locale::en_us();
        let scope = RenderScope::new(&r, &locale);
        let ctx = RenderContext::new(&scope);

        assert!(Display::Indent.apply(&ctx, TokenBuffer::new()).is_empty());
        let out = Display::Block.apply(&ctx, std::iter::once(Token::plain("x")).collect());
        assert_eq!(out.tokens().first(), Some(&Token::DisplayStart(Display::Block)));
        assert_eq!(out.tokens().last(), Some(&Token::DisplayEnd(Display::Block)));
        assert_eq!(Display::parse("margin"), None);
    }
}
