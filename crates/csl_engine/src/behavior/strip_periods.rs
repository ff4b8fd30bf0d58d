/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use crate::context::RenderContext;
use crate::node::StyleNode;
use crate::token::{Token, TokenBuffer};

use super::Behavior;

/// `strip-periods="true"`: remove every `.` from rendered text, whatever
/// the token kind. The element's own affixes are added outside this stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripPeriods(pub bool);

impl StripPeriods {
    pub fn from_node<N: StyleNode>(node: &N) -> Self {
        StripPeriods(node.attr_bool("strip-periods").unwrap_or(false))
    }
}

impl Behavior for StripPeriods {
    fn apply(&self, _ctx: &RenderContext<'_>, buffer: TokenBuffer) -> TokenBuffer {
        if !self.0 {
            return buffer;
        }
        buffer
            .into_iter()
            .filter_map(|token| match token {
                Token::Text {
                    kind,
                    text,
                    formatting,
                } => {
                    let text = text.replace('.', "");
                    (!text.is_empty()).then_some(Token::Text {
                        kind,
                        text,
                        formatting,
                    })
                }
                other => Some(other),
            })
            .collect()
    }
}
