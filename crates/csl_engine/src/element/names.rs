/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! `cs:names`: one or more name variables, each rendered with the shared
//! `cs:name` and `cs:label` children, with an optional `cs:substitute`.

use crate::behavior::{render_wrapped, Affixes, Display, FormattingAttributes};
use crate::context::RenderContext;
use crate::error::Result;
use crate::node::{required_attr, StyleNode};
use crate::token::TokenKind;

use super::label::Label;
use super::name::{Name, NameForm};
use super::substitute::Substitute;

#[derive(Debug, Clone)]
pub struct Names {
    variables: Vec<String>,
    name: Name,
    label: Option<Label>,
    label_before_name: bool,
    delimiter: Option<String>,
    substitute: Option<Substitute>,
    affixes: Affixes,
    formatting: FormattingAttributes,
    display: Option<Display>,
}

impl Names {
    pub fn compile<N: StyleNode>(node: &N) -> Result<Self> {
        let mut names = Self::compile_without_substitute(node)?;
        if let Some(substitute) = node.find_child("substitute") {
            names.substitute = Some(Substitute::compile(&substitute, &names)?);
        }
        Ok(names)
    }

    fn compile_without_substitute<N: StyleNode>(node: &N) -> Result<Self> {
        let variables = required_attr(node, "variable")?
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let mut name = None;
        let mut label = None;
        let mut label_before_name = false;
        for child in node.children() {
            match child.name() {
                "name" => name = Some(Name::compile(&child)?),
                "label" if label.is_none() => {
                    label = Some(Label::compile_in_names(&child)?);
                    label_before_name = name.is_none();
                }
                "label" | "substitute" => {}
                other => tracing::debug!(element = other, "ignoring child of names"),
            }
        }

        Ok(Self {
            variables,
            name: name.unwrap_or_default(),
            label,
            label_before_name,
            delimiter: node.attr("delimiter").map(str::to_string),
            substitute: None,
            affixes: Affixes::from_node(node),
            formatting: FormattingAttributes::from_node(node),
            display: Display::from_node(node),
        })
    }

    /// The same configuration applied to other variables, for the
    /// `<names variable="..."/>` shorthand inside `cs:substitute`.
    pub(crate) fn with_variables(&self, variables: Vec<String>) -> Names {
        Names {
            variables,
            name: self.name.clone(),
            label: self.label.clone(),
            label_before_name: self.label_before_name,
            delimiter: self.delimiter.clone(),
            substitute: None,
            affixes: self.affixes.clone(),
            formatting: self.formatting,
            display: self.display,
        }
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub(crate) fn substitute(&self) -> Option<&Substitute> {
        self.substitute.as_ref()
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        let mut out = ctx.child();
        render_wrapped(
            &mut out,
            &[&self.display, &self.affixes, &self.formatting],
            |c| self.render_variables(c),
        );
        if out.is_empty() {
            if let Some(substitute) = &self.substitute {
                substitute.render(&mut out);
            }
        }
        ctx.emit_buffer(out.into_result());
    }

    fn render_variables(&self, ctx: &mut RenderContext<'_>) {
        if self.name.form() == NameForm::Count {
            let total: usize = self
                .variables
                .iter()
                .filter_map(|v| ctx.name_variable(v))
                .map(|names| self.name.count(ctx, names))
                .sum();
            if total > 0 {
                ctx.emit(&total.to_string());
            }
            return;
        }

        for variable in &self.variables {
            let Some(names) = ctx.name_variable(variable) else {
                continue;
            };
            let mut item = ctx.child();
            if self.label_before_name {
                if let Some(label) = &self.label {
                    label.render_for(&mut item, variable, 0);
                }
            }
            self.name.render(&mut item, names);
            if !self.label_before_name {
                if let Some(label) = &self.label {
                    label.render_for(&mut item, variable, 0);
                }
            }
            if item.is_empty() {
                continue;
            }
            if let Some(delimiter) = &self.delimiter {
                if !ctx.is_empty() {
                    ctx.emit_kind(delimiter, TokenKind::Delimiter);
                }
            }
            ctx.emit_buffer(item.into_result());
        }
    }
}
