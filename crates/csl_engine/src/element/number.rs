/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use csl_core::TermForm;
use csl_parse::{is_numeric, tokenize, NumberTokenKind};

use crate::behavior::{render_wrapped, Affixes, Display, FormattingAttributes, TextCase};
use crate::context::{RenderContext, VariableForm};
use crate::error::Result;
use crate::node::{required_attr, StyleNode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NumberForm {
    #[default]
    Numeric,
    Ordinal,
    LongOrdinal,
    Roman,
}

/// `cs:number`
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    variable: String,
    form: NumberForm,
    affixes: Affixes,
    text_case: Option<TextCase>,
    formatting: FormattingAttributes,
    display: Option<Display>,
}

impl Number {
    pub fn compile<N: StyleNode>(node: &N) -> Result<Self> {
        let form = match node.attr("form") {
            Some("ordinal") => NumberForm::Ordinal,
            Some("long-ordinal") => NumberForm::LongOrdinal,
            Some("roman") => NumberForm::Roman,
            _ => NumberForm::Numeric,
        };
        Ok(Self {
            variable: required_attr(node, "variable")?.to_string(),
            form,
            affixes: Affixes::from_node(node),
            text_case: TextCase::from_node(node),
            formatting: FormattingAttributes::from_node(node),
            display: Display::from_node(node),
        })
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        render_wrapped(
            ctx,
            &[&self.display, &self.affixes, &self.text_case, &self.formatting],
            |c| self.render_value(c),
        );
    }

    fn render_value(&self, ctx: &mut RenderContext<'_>) {
        let Some(value) = ctx.string_variable(&self.variable, VariableForm::Long) else {
            return;
        };
        if !is_numeric(value) {
            ctx.emit(value);
            return;
        }
        for token in tokenize(value) {
            match token.kind {
                NumberTokenKind::Number => {
                    let text = self.format_number(ctx, token.text);
                    ctx.emit(&text);
                }
                NumberTokenKind::Separator => match token.text {
                    "," => ctx.emit(", "),
                    "&" => ctx.emit(" & "),
                    other => ctx.emit(other),
                },
            }
        }
    }

    fn format_number(&self, ctx: &RenderContext<'_>, text: &str) -> String {
        let Ok(n) = text.parse::<u32>() else {
            return text.to_string();
        };
        match self.form {
            NumberForm::Numeric => text.to_string(),
            NumberForm::Ordinal => ordinal(ctx, n),
            NumberForm::LongOrdinal => long_ordinal(ctx, n),
            NumberForm::Roman => roman(n).unwrap_or_else(|| text.to_string()),
        }
    }
}

/// `n` followed by the locale's ordinal suffix.
pub(crate) fn ordinal(ctx: &RenderContext<'_>, n: u32) -> String {
    let mut candidates = Vec::with_capacity(3);
    if (11..=13).contains(&(n % 100)) {
        candidates.push(format!("ordinal-{:02}", n % 100));
    }
    candidates.push(format!("ordinal-{:02}", n % 10));
    let suffix = candidates
        .iter()
        .find_map(|name| ctx.term(name, TermForm::Long, false))
        .or_else(|| ctx.term("ordinal", TermForm::Long, false))
        .unwrap_or_default();
    format!("{}{}", n, suffix)
}

/// `first` to `tenth` from the locale, ordinal form otherwise.
pub(crate) fn long_ordinal(ctx: &RenderContext<'_>, n: u32) -> String {
    if (1..=10).contains(&n) {
        if let Some(term) = ctx.term(&format!("long-ordinal-{:02}", n), TermForm::Long, false) {
            return term.to_string();
        }
    }
    ordinal(ctx, n)
}

/// Lowercase roman numeral for 1 to 3999.
pub(crate) fn roman(n: u32) -> Option<String> {
    const NUMERALS: &[(u32, &str)] = &[
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    if !(1..4000).contains(&n) {
        return None;
    }
    let mut rest = n;
    let mut out = String::new();
    for &(value, numeral) in NUMERALS {
        while rest >= value {
            out.push_str(numeral);
            rest -= value;
        }
    }
    Some(out)
}
