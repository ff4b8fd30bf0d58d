/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Rendering elements.
//!
//! Each element is compiled once from its [`StyleNode`] and rendered any
//! number of times against a [`RenderContext`].

mod choose;
mod date;
mod group;
mod label;
mod name;
mod names;
mod number;
mod substitute;
mod text;

pub use choose::{Choose, Condition, Match};
pub use date::{DateElement, DatePart, DatePartForm, DateParts};
pub use group::Group;
pub use label::{Label, Plural};
pub use name::{initialize_name, Name, NameForm, NamePart};
pub use names::Names;
pub use number::{Number, NumberForm};
pub use substitute::Substitute;
pub use text::{Text, TextSource};

use crate::context::RenderContext;
use crate::error::Result;
use crate::node::{required_attr, StyleNode};

/// A compiled rendering element.
#[derive(Debug, Clone)]
pub enum Element {
    Text(Text),
    Date(DateElement),
    Names(Names),
    Label(Label),
    Group(Group),
    Number(Number),
    Choose(Choose),
}

impl Element {
    /// Compile a rendering element. Unknown elements are skipped with a
    /// warning.
    pub fn compile<N: StyleNode>(node: &N) -> Result<Option<Self>> {
        let element = match node.name() {
            "text" => Element::Text(Text::compile(node)?),
            "date" => Element::Date(DateElement::compile(node)?),
            "names" => Element::Names(Names::compile(node)?),
            "label" => Element::Label(Label::compile(node)?),
            "group" => Element::Group(Group::compile(node)?),
            "number" => Element::Number(Number::compile(node)?),
            "choose" => Element::Choose(Choose::compile(node)?),
            other => {
                tracing::warn!(element = other, "skipping unknown rendering element");
                return Ok(None);
            }
        };
        Ok(Some(element))
    }

    pub fn compile_children<N: StyleNode>(node: &N) -> Result<Vec<Self>> {
        let mut elements = Vec::new();
        for child in node.children() {
            if let Some(element) = Element::compile(&child)? {
                elements.push(element);
            }
        }
        Ok(elements)
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        match self {
            Element::Text(e) => e.render(ctx),
            Element::Date(e) => e.render(ctx),
            Element::Names(e) => e.render(ctx),
            Element::Label(e) => e.render(ctx),
            Element::Group(e) => e.render(ctx),
            Element::Number(e) => e.render(ctx),
            Element::Choose(e) => e.render(ctx),
        }
    }

    /// Names of the macros this element calls, directly or through its
    /// children.
    pub(crate) fn macro_refs<'e>(&'e self, out: &mut Vec<&'e str>) {
        match self {
            Element::Text(text) => {
                if let TextSource::Macro(name) = text.source() {
                    out.push(name);
                }
            }
            Element::Group(group) => group.children().iter().for_each(|c| c.macro_refs(out)),
            Element::Choose(choose) => choose.children().for_each(|c| c.macro_refs(out)),
            Element::Names(names) => {
                if let Some(substitute) = names.substitute() {
                    substitute.children().iter().for_each(|c| c.macro_refs(out));
                }
            }
            Element::Date(_) | Element::Label(_) | Element::Number(_) => {}
        }
    }
}

/// `cs:macro`
#[derive(Debug, Clone)]
pub struct Macro {
    name: String,
    children: Vec<Element>,
}

impl Macro {
    pub fn compile<N: StyleNode>(node: &N) -> Result<Self> {
        Ok(Self {
            name: required_attr(node, "name")?.to_string(),
            children: Element::compile_children(node)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub(crate) fn macro_refs(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for child in &self.children {
            child.macro_refs(&mut out);
        }
        out
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        for child in &self.children {
            child.render(ctx);
        }
    }
}
