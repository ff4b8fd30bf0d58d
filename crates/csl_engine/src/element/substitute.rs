/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::rc::Rc;

use crate::context::RenderContext;
use crate::error::Result;
use crate::listener::CollectingVariableListener;
use crate::node::{attr_list, required_attr, StyleNode};

use super::names::Names;
use super::Element;

/// `cs:substitute`: fallbacks for a `cs:names` element that rendered
/// nothing.
#[derive(Debug, Clone)]
pub struct Substitute {
    children: Vec<Element>,
}

impl Substitute {
    /// Every `<names>` child takes the configuration of `parent`; only its
    /// `variable` attribute is kept.
    pub fn compile<N: StyleNode>(node: &N, parent: &Names) -> Result<Self> {
        let mut children = Vec::new();
        for child in node.children() {
            if child.name() == "names" {
                required_attr(&child, "variable")?;
                let variables = attr_list(&child, "variable");
                children.push(Element::Names(parent.with_variables(variables)));
            } else if let Some(element) = Element::compile(&child)? {
                children.push(element);
            }
        }
        Ok(Self { children })
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Render candidates until one produces output. The variables it read
    /// are suppressed for the rest of the render pass.
    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        for element in &self.children {
            let mut candidate = ctx.child();
            let listener = Rc::new(CollectingVariableListener::new());
            let id = candidate.add_listener(listener.clone());
            element.render(&mut candidate);
            candidate.remove_listener(id);

            if !candidate.is_empty() {
                let called = listener.called();
                for variable in &called {
                    ctx.suppress_variable(variable);
                }
                tracing::trace!(suppressed = ?called, "substitute candidate rendered");
                ctx.emit_buffer(candidate.into_result());
                break;
            }
        }
    }
}
