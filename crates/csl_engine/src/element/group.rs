/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::rc::Rc;

use crate::behavior::{render_wrapped, Affixes, Display, FormattingAttributes};
use crate::context::RenderContext;
use crate::error::Result;
use crate::listener::CountingVariableListener;
use crate::node::StyleNode;
use crate::token::TokenKind;

use super::Element;

/// `cs:group`: renders its children with a delimiter between the non-empty
/// ones. The whole group is dropped when it read variables and all of
/// them were empty.
#[derive(Debug, Clone)]
pub struct Group {
    children: Vec<Element>,
    delimiter: Option<String>,
    affixes: Affixes,
    formatting: FormattingAttributes,
    display: Option<Display>,
}

impl Group {
    pub fn compile<N: StyleNode>(node: &N) -> Result<Self> {
        Ok(Self {
            children: Element::compile_children(node)?,
            delimiter: node.attr("delimiter").map(str::to_string),
            affixes: Affixes::from_node(node),
            formatting: FormattingAttributes::from_node(node),
            display: Display::from_node(node),
        })
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        render_wrapped(
            ctx,
            &[&self.display, &self.affixes, &self.formatting],
            |c| self.render_children(c),
        );
    }

    fn render_children(&self, ctx: &mut RenderContext<'_>) {
        let listener = Rc::new(CountingVariableListener::new());
        let id = ctx.add_listener(listener.clone());
        let mut items = ctx.child();
        self.render_items(&self.children, &mut items);
        ctx.remove_listener(id);

        if !listener.all_empty() {
            ctx.emit_buffer(items.into_result());
        }
    }

    /// Branches of a `choose` count as items of the group itself, so the
    /// delimiter also goes between them.
    fn render_items(&self, children: &[Element], out: &mut RenderContext<'_>) {
        for child in children {
            if let Element::Choose(choose) = child {
                self.render_items(choose.select(out), out);
                continue;
            }
            let mut item = out.child();
            child.render(&mut item);
            if item.is_empty() {
                continue;
            }
            if let Some(delimiter) = &self.delimiter {
                if !out.is_empty() {
                    out.emit_kind(delimiter, TokenKind::Delimiter);
                }
            }
            out.emit_buffer(item.into_result());
        }
    }
}
