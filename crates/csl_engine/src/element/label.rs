/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use csl_core::TermForm;
use csl_parse::number::count_numbers;
use csl_parse::parse_locators;

use crate::behavior::{render_wrapped, Affixes, FormattingAttributes, StripPeriods, TextCase};
use crate::context::RenderContext;
use crate::error::{Result, StyleError};
use crate::listener::VariableValue;
use crate::node::{required_attr, StyleNode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Plural {
    #[default]
    Contextual,
    Always,
    Never,
}

/// `cs:label`: the term describing a variable, such as `pp.` or `eds.`
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    variable: Option<String>,
    form: TermForm,
    plural: Plural,
    affixes: Affixes,
    text_case: Option<TextCase>,
    strip_periods: StripPeriods,
    formatting: FormattingAttributes,
}

impl Label {
    /// A standalone label, which must name its variable.
    pub fn compile<N: StyleNode>(node: &N) -> Result<Self> {
        let variable = required_attr(node, "variable")?.to_string();
        let mut label = Self::compile_in_names(node)?;
        label.variable = Some(variable);
        Ok(label)
    }

    /// A label inside `cs:names`, which labels each of the names variables.
    pub fn compile_in_names<N: StyleNode>(node: &N) -> Result<Self> {
        let form = match node.attr("form") {
            Some(form) => form.parse().map_err(|_| {
                tracing::warn!(form, "unknown label form");
                StyleError::UnknownTermForm(form.to_string())
            })?,
            None => TermForm::Long,
        };
        let plural = match node.attr("plural") {
            Some("always") => Plural::Always,
            Some("never") => Plural::Never,
            _ => Plural::Contextual,
        };
        Ok(Self {
            variable: None,
            form,
            plural,
            affixes: Affixes::from_node(node),
            text_case: TextCase::from_node(node),
            strip_periods: StripPeriods::from_node(node),
            formatting: FormattingAttributes::from_node(node),
        })
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        if let Some(variable) = &self.variable {
            self.render_for(ctx, variable, 0);
        }
    }

    /// Render the label of element `index` of this label's own variable.
    pub(crate) fn render_nth(&self, ctx: &mut RenderContext<'_>, index: usize) {
        if let Some(variable) = &self.variable {
            self.render_for(ctx, variable, index);
        }
    }

    /// Render the label of `variable`. For `number` and `locator`, `index`
    /// selects the element of the parsed value whose label is used.
    pub fn render_for(&self, ctx: &mut RenderContext<'_>, variable: &str, index: usize) {
        if index == 0 && matches!(variable, "number" | "locator") {
            ctx.set_last_label(self);
        }
        render_wrapped(
            ctx,
            &[&self.affixes, &self.text_case, &self.strip_periods, &self.formatting],
            |c| self.render_term(c, variable, index),
        );
    }

    fn render_term(&self, ctx: &mut RenderContext<'_>, variable: &str, index: usize) {
        let Some(value) = ctx.variable(variable, true) else {
            return;
        };

        let (term, contextual_plural) = match value {
            VariableValue::Names(names) => (variable, names.len() > 1),
            VariableValue::Date(_) => (variable, false),
            VariableValue::Text(text) if matches!(variable, "number" | "locator") => {
                let elements = parse_locators(text);
                let Some(element) = elements.get(index) else {
                    return;
                };
                let term = match element.label {
                    Some(label) => label,
                    None if index == 0 && variable == "locator" => ctx
                        .item()
                        .and_then(|item| item.label.as_deref())
                        .unwrap_or("page"),
                    None => variable,
                };
                (term, element.plural)
            }
            VariableValue::Text(text) => (variable, count_numbers(text) > 1),
        };

        let plural = match self.plural {
            Plural::Contextual => contextual_plural,
            Plural::Always => true,
            Plural::Never => false,
        };
        if let Some(text) = ctx.term(term, self.form, plural) {
            ctx.emit(text);
        }
    }
}
