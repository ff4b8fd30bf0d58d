/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! `cs:choose` with its `if`, `else-if` and `else` branches.

use csl_parse::{is_numeric, parse_locators};

use crate::context::{RenderContext, VariableForm};
use crate::error::{Result, StyleError};
use crate::listener::VariableValue;
use crate::node::{attr_list, StyleNode};

use super::Element;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Match {
    #[default]
    All,
    Any,
    None,
}

/// The tests of an `if` or `else-if`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    types: Vec<String>,
    variables: Vec<String>,
    is_numeric: Vec<String>,
    numbers: Vec<String>,
    positions: Vec<String>,
    uncertain_dates: Vec<String>,
    match_mode: Match,
}

impl Condition {
    pub fn compile<N: StyleNode>(node: &N) -> Result<Self> {
        let match_mode = match node.attr("match") {
            None | Some("all") => Match::All,
            Some("any") => Match::Any,
            Some("none") => Match::None,
            Some(other) => {
                tracing::warn!(value = other, "unknown match mode");
                return Err(StyleError::UnknownMatch(other.to_string()));
            }
        };
        Ok(Self {
            types: attr_list(node, "type"),
            variables: attr_list(node, "variable"),
            is_numeric: attr_list(node, "is-numeric"),
            numbers: attr_list(node, "number"),
            positions: attr_list(node, "position"),
            uncertain_dates: attr_list(node, "is-uncertain-date"),
            match_mode,
        })
    }

    fn has_tests(&self) -> bool {
        !(self.types.is_empty()
            && self.variables.is_empty()
            && self.is_numeric.is_empty()
            && self.numbers.is_empty()
            && self.positions.is_empty()
            && self.uncertain_dates.is_empty())
    }

    /// Evaluate every test. Lookups here do not notify variable listeners.
    pub fn matches(&self, ctx: &RenderContext<'_>) -> bool {
        if !self.has_tests() {
            return false;
        }

        let reference = ctx.reference();
        let mut results: Vec<bool> = Vec::new();
        results.extend(self.types.iter().map(|t| *t == reference.ref_type));
        results.extend(
            self.variables
                .iter()
                .map(|v| ctx.variable(v, false).is_some()),
        );
        results.extend(self.is_numeric.iter().map(|v| {
            matches!(ctx.variable(v, false), Some(VariableValue::Text(text)) if is_numeric(text))
        }));

        if !self.numbers.is_empty() {
            let first_label = ctx
                .string_variable_silent("number", VariableForm::Long)
                .and_then(|v| parse_locators(v).first().and_then(|e| e.label))
                .unwrap_or("number");
            results.extend(self.numbers.iter().map(|n| n == first_label));
        }

        if !self.positions.is_empty() {
            match ctx.position() {
                Some(position) => {
                    results.extend(self.positions.iter().map(|p| position.satisfies(p)))
                }
                None if self.match_mode == Match::All => return false,
                None => {}
            }
        }

        results.extend(self.uncertain_dates.iter().map(|v| {
            ctx.date_variable(v, false).is_some_and(|d| d.circa)
        }));

        match self.match_mode {
            Match::All => results.iter().all(|r| *r),
            Match::Any => results.iter().any(|r| *r),
            Match::None => !results.iter().any(|r| *r),
        }
    }
}

#[derive(Debug, Clone)]
struct Branch {
    /// `None` for `else`.
    condition: Option<Condition>,
    children: Vec<Element>,
}

/// `cs:choose`
#[derive(Debug, Clone)]
pub struct Choose {
    branches: Vec<Branch>,
}

impl Choose {
    pub fn compile<N: StyleNode>(node: &N) -> Result<Self> {
        let mut branches: Vec<Branch> = Vec::new();
        let mut has_else = false;
        for child in node.children() {
            let condition = match child.name() {
                "if" => {
                    if has_else {
                        return Err(invalid(StyleError::ElementAfterElse("if".into())));
                    }
                    if !branches.is_empty() {
                        return Err(invalid(StyleError::MultipleIf));
                    }
                    Some(Condition::compile(&child)?)
                }
                "else-if" => {
                    if branches.is_empty() {
                        return Err(invalid(StyleError::ElseIfWithoutIf));
                    }
                    if has_else {
                        return Err(invalid(StyleError::ElementAfterElse("else-if".into())));
                    }
                    Some(Condition::compile(&child)?)
                }
                "else" => {
                    if has_else {
                        return Err(invalid(StyleError::MultipleElse));
                    }
                    has_else = true;
                    None
                }
                other => return Err(invalid(StyleError::UnknownConditional(other.to_string()))),
            };
            branches.push(Branch {
                condition,
                children: Element::compile_children(&child)?,
            });
        }
        Ok(Self { branches })
    }

    /// The children of the first matching branch.
    pub fn select(&self, ctx: &RenderContext<'_>) -> &[Element] {
        self.branches
            .iter()
            .find(|b| b.condition.as_ref().map_or(true, |c| c.matches(ctx)))
            .map(|b| b.children.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn children(&self) -> impl Iterator<Item = &Element> {
        self.branches.iter().flat_map(|b| b.children.iter())
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        for element in self.select(ctx) {
            element.render(ctx);
        }
    }
}

fn invalid(error: StyleError) -> StyleError {
    tracing::warn!(%error, "invalid choose element");
    error
}
