/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use csl_core::TermForm;

use crate::context::RenderContext;
use crate::node::StyleNode;
use crate::token::{TokenBuffer, TokenKind};

use super::Behavior;

const OPEN_QUOTE: &str = "\u{201c}";
const CLOSE_QUOTE: &str = "\u{201d}";

/// `quotes="true"`: wrap non-empty output in the locale's quote terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quotes(pub bool);

impl Quotes {
    pub fn from_node<N: StyleNode>(node: &N) -> Self {
        Quotes(node.attr_bool("quotes").unwrap_or(false))
    }
}

impl Behavior for Quotes {
    fn apply(&self, ctx: &RenderContext<'_>, mut buffer: TokenBuffer) -> TokenBuffer {
        if !self.0 || buffer.is_empty() {
            return buffer;
        }
        let open = ctx.term("open-quote", TermForm::Long, false).unwrap_or(OPEN_QUOTE);
        let close = ctx.term("close-quote", TermForm::Long, false).unwrap_or(CLOSE_QUOTE);
        buffer.prepend_text(open, TokenKind::OpenQuote);
        buffer.append_text(close, TokenKind::CloseQuote);
        buffer
    }
}
