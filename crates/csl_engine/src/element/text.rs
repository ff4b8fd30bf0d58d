/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use csl_core::TermForm;
use csl_parse::page_format::DEFAULT_DELIMITER;
use csl_parse::{parse_locators, parse_pages};

use crate::behavior::{
    render_wrapped, Affixes, Display, FormattingAttributes, Quotes, StripPeriods, TextCase,
};
use crate::context::{RenderContext, VariableForm};
use crate::error::{Result, StyleError};
use crate::node::StyleNode;
use crate::token::TokenKind;

#[derive(Debug, Clone, PartialEq)]
pub enum TextSource {
    Variable { name: String, form: VariableForm },
    Macro(String),
    Term { name: String, form: TermForm, plural: bool },
    Value(String),
}

/// `cs:text`
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    source: TextSource,
    affixes: Affixes,
    quotes: Quotes,
    text_case: Option<TextCase>,
    strip_periods: StripPeriods,
    formatting: FormattingAttributes,
    display: Option<Display>,
}

fn non_empty<'n, N: StyleNode>(node: &'n N, attribute: &str) -> Option<&'n str> {
    node.attr(attribute).filter(|v| !v.is_empty())
}

impl Text {
    pub fn compile<N: StyleNode>(node: &N) -> Result<Self> {
        let source = if let Some(variable) = non_empty(node, "variable") {
            let form = match node.attr("form") {
                Some("short") => VariableForm::Short,
                _ => VariableForm::Long,
            };
            TextSource::Variable {
                name: variable.to_string(),
                form,
            }
        } else if let Some(name) = non_empty(node, "macro") {
            TextSource::Macro(name.to_string())
        } else if let Some(term) = non_empty(node, "term") {
            let form = match node.attr("form") {
                Some(form) => form.parse().map_err(|_| {
                    tracing::warn!(form, "unknown term form");
                    StyleError::UnknownTermForm(form.to_string())
                })?,
                None => TermForm::Long,
            };
            TextSource::Term {
                name: term.to_string(),
                form,
                plural: node.attr_bool("plural").unwrap_or(false),
            }
        } else if let Some(value) = node.attr("value") {
            TextSource::Value(value.to_string())
        } else {
            tracing::warn!("text element without variable, macro, term or value");
            return Err(StyleError::MissingAttribute {
                element: node.name().to_string(),
                attribute: "variable",
            });
        };

        Ok(Self {
            source,
            affixes: Affixes::from_node(node),
            quotes: Quotes::from_node(node),
            text_case: TextCase::from_node(node),
            strip_periods: StripPeriods::from_node(node),
            formatting: FormattingAttributes::from_node(node),
            display: Display::from_node(node),
        })
    }

    pub fn source(&self) -> &TextSource {
        &self.source
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        render_wrapped(
            ctx,
            &[
                &self.display,
                &self.affixes,
                &self.quotes,
                &self.text_case,
                &self.strip_periods,
                &self.formatting,
            ],
            |c| self.render_source(c),
        );
    }

    fn render_source(&self, ctx: &mut RenderContext<'_>) {
        match &self.source {
            TextSource::Variable { name, form } => {
                let Some(value) = ctx.string_variable(name, *form) else {
                    return;
                };
                match name.as_str() {
                    "page" => render_page(ctx, value),
                    "locator" | "number" => render_locator(ctx, value),
                    "DOI" => ctx.emit_kind(value, TokenKind::Doi),
                    "URL" => ctx.emit_kind(value, TokenKind::Url),
                    _ => ctx.emit(value),
                }
            }
            TextSource::Macro(name) => {
                if let Some(m) = ctx.macro_named(name) {
                    m.render(ctx);
                }
            }
            TextSource::Term { name, form, plural } => {
                if let Some(term) = ctx.term(name, *form, *plural) {
                    ctx.emit(term);
                }
            }
            TextSource::Value(value) => ctx.emit(value),
        }
    }
}

fn render_page(ctx: &mut RenderContext<'_>, page: &str) {
    let delimiter = ctx
        .term("page-range-delimiter", TermForm::Long, false)
        .unwrap_or(DEFAULT_DELIMITER);
    match ctx.page_range_format() {
        Some(format) => ctx.emit(&format.format_all(&parse_pages(page), delimiter)),
        None => ctx.emit(&page.replace('-', delimiter)),
    }
}

/// Emit each element of a locator. Elements after the first repeat the
/// most recently rendered label.
fn render_locator(ctx: &mut RenderContext<'_>, value: &str) {
    for (i, element) in parse_locators(value).iter().enumerate() {
        if i > 0 && element.label.is_some() {
            if let Some(label) = ctx.last_label() {
                label.render_nth(ctx, i);
            }
        }
        ctx.emit(&element.text);
    }
}
