/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! `cs:date` and `cs:date-part`.
//!
//! Ranges are merged part by part. A date part whose value and all more
//! significant values agree between the two endpoints is rendered once.
//! Everything else is collected per endpoint and flushed as
//! `left–right` as soon as the next shared part comes along, so
//! `[2019-12-14, 2019-12-24]` becomes `14–24 December 2019` while
//! `[2018-01-01, 2019-12-31]` becomes `01 January 2018–31 December 2019`.

use std::borrow::Cow;

use csl_core::{DateForm, DatePartName, DatePartTemplate, DateValue, TermForm};

use crate::behavior::{
    render_wrapped, Affixes, Display, FormattingAttributes, StripPeriods, TextCase,
};
use crate::context::RenderContext;
use crate::error::{Result, StyleError};
use crate::listener::VariableValue;
use crate::node::{required_attr, StyleNode};
use crate::token::{TokenBuffer, TokenKind};

use super::number::ordinal;

const RANGE_DELIMITER: &str = "\u{2013}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePartForm {
    Long,
    Short,
    Numeric,
    NumericLeadingZeros,
    Ordinal,
}

impl DatePartForm {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "long" => Some(DatePartForm::Long),
            "short" => Some(DatePartForm::Short),
            "numeric" => Some(DatePartForm::Numeric),
            "numeric-leading-zeros" => Some(DatePartForm::NumericLeadingZeros),
            "ordinal" => Some(DatePartForm::Ordinal),
            _ => None,
        }
    }
}

/// Which parts a localized date shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DateParts {
    #[default]
    YearMonthDay,
    YearMonth,
    Year,
}

impl DateParts {
    fn includes(self, name: DatePartName) -> bool {
        match self {
            DateParts::YearMonthDay => true,
            DateParts::YearMonth => name != DatePartName::Day,
            DateParts::Year => name == DatePartName::Year,
        }
    }
}

/// `cs:date-part`
#[derive(Debug, Clone, PartialEq)]
pub struct DatePart {
    name: DatePartName,
    form: Option<DatePartForm>,
    affixes: Affixes,
    text_case: Option<TextCase>,
    strip_periods: StripPeriods,
    formatting: FormattingAttributes,
    range_delimiter: Option<String>,
}

impl DatePart {
    pub fn compile<N: StyleNode>(node: &N) -> Result<Self> {
        let name = required_attr(node, "name")?;
        let name: DatePartName = name.parse().map_err(|_| {
            tracing::warn!(name, "unknown date part");
            StyleError::UnknownDatePart(name.to_string())
        })?;
        Ok(Self {
            name,
            form: node.attr("form").and_then(DatePartForm::parse),
            affixes: Affixes::from_node(node),
            text_case: TextCase::from_node(node),
            strip_periods: StripPeriods::from_node(node),
            formatting: FormattingAttributes::from_node(node),
            range_delimiter: node.attr("range-delimiter").map(str::to_string),
        })
    }

    /// A part taken from a locale's date format.
    pub fn from_template(template: &DatePartTemplate) -> Self {
        Self {
            name: template.name,
            form: template.form.as_deref().and_then(DatePartForm::parse),
            affixes: Affixes {
                prefix: template.prefix.clone().filter(|p| !p.is_empty()),
                suffix: template.suffix.clone().filter(|s| !s.is_empty()),
            },
            text_case: template.text_case.as_deref().and_then(TextCase::parse),
            strip_periods: StripPeriods(template.strip_periods),
            formatting: FormattingAttributes::UNDEFINED,
            range_delimiter: template.range_delimiter.clone(),
        }
    }

    /// Apply what a style's `date-part` child may change on a localized
    /// part. Affixes always come from the locale.
    fn override_with(&mut self, other: &DatePart) {
        if other.form.is_some() {
            self.form = other.form;
        }
        if other.text_case.is_some() {
            self.text_case = other.text_case;
        }
        if other.strip_periods.0 {
            self.strip_periods = other.strip_periods;
        }
        self.formatting = self.formatting.merge(other.formatting);
        if other.range_delimiter.is_some() {
            self.range_delimiter = other.range_delimiter.clone();
        }
    }

    pub fn name(&self) -> DatePartName {
        self.name
    }

    fn range_delimiter(&self) -> &str {
        self.range_delimiter.as_deref().unwrap_or(RANGE_DELIMITER)
    }

    /// Render this part of `date` (`[year, month?, day?]`).
    pub fn render(&self, ctx: &mut RenderContext<'_>, date: &[i32], season: Option<&str>) {
        render_wrapped(
            ctx,
            &[&self.affixes, &self.text_case, &self.strip_periods, &self.formatting],
            |c| {
                if let Some(value) = self.value(c, date, season) {
                    c.emit(&value);
                }
            },
        );
    }

    fn value(&self, ctx: &RenderContext<'_>, date: &[i32], season: Option<&str>) -> Option<String> {
        match self.name {
            DatePartName::Year => date.first().map(|&year| self.year(ctx, year)),
            DatePartName::Month => match date.get(1) {
                Some(&month) => Some(self.month(ctx, month)),
                None => season.map(|s| season_text(ctx, s)),
            },
            DatePartName::Day => date.get(2).map(|&day| self.day(ctx, day)),
        }
    }

    fn year(&self, ctx: &RenderContext<'_>, year: i32) -> String {
        let era = |term: &str| ctx.term(term, TermForm::Long, false).unwrap_or_default();
        if year < 0 {
            format!("{}{}", -year, era("bc"))
        } else if year < 1000 {
            format!("{}{}", year, era("ad"))
        } else if self.form == Some(DatePartForm::Short) {
            format!("{:02}", year % 100)
        } else {
            year.to_string()
        }
    }

    fn month(&self, ctx: &RenderContext<'_>, month: i32) -> String {
        let term = format!("month-{:02}", month);
        let named = |form: TermForm| {
            ctx.term(&term, form, false)
                .map_or_else(|| month.to_string(), str::to_string)
        };
        match self.form {
            Some(DatePartForm::Short) => named(TermForm::Short),
            Some(DatePartForm::Numeric) => month.to_string(),
            Some(DatePartForm::NumericLeadingZeros) => format!("{:02}", month),
            _ => named(TermForm::Long),
        }
    }

    fn day(&self, ctx: &RenderContext<'_>, day: i32) -> String {
        match self.form {
            Some(DatePartForm::NumericLeadingZeros) => format!("{:02}", day),
            Some(DatePartForm::Ordinal) if day > 0 => ordinal(ctx, day as u32),
            _ => day.to_string(),
        }
    }
}

/// A season number (`1` to `4`) as its locale term, anything else verbatim.
fn season_text(ctx: &RenderContext<'_>, season: &str) -> String {
    match season.trim().parse::<u8>() {
        Ok(n @ 1..=4) => ctx
            .term(&format!("season-{:02}", n), TermForm::Long, false)
            .map_or_else(|| season.to_string(), str::to_string),
        _ => season.to_string(),
    }
}

/// `cs:date`
#[derive(Debug, Clone, PartialEq)]
pub struct DateElement {
    variable: String,
    /// Localized form, if any.
    form: Option<DateForm>,
    date_parts: DateParts,
    parts: Vec<DatePart>,
    affixes: Affixes,
    text_case: Option<TextCase>,
    formatting: FormattingAttributes,
    display: Option<Display>,
}

impl DateElement {
    pub fn compile<N: StyleNode>(node: &N) -> Result<Self> {
        let variable = required_attr(node, "variable")?.to_string();

        let mut parts: Vec<DatePart> = Vec::new();
        for child in node.children().iter().filter(|c| c.name() == "date-part") {
            let part = DatePart::compile(child)?;
            if parts.iter().any(|p| p.name == part.name) {
                let name = child.attr("name").unwrap_or_default().to_string();
                tracing::warn!(name = %name, "duplicate date part");
                return Err(StyleError::DuplicateDatePart(name));
            }
            parts.push(part);
        }

        let date_parts = match node.attr("date-parts") {
            Some("year") => DateParts::Year,
            Some("year-month") => DateParts::YearMonth,
            _ => DateParts::YearMonthDay,
        };

        Ok(Self {
            variable,
            form: node.attr("form").and_then(|f| f.parse().ok()),
            date_parts,
            parts,
            affixes: Affixes::from_node(node),
            text_case: TextCase::from_node(node),
            formatting: FormattingAttributes::from_node(node),
            display: Display::from_node(node),
        })
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The parts to render: the style's own, or the locale's format
    /// filtered by `date-parts` with the style's parts as overrides.
    fn effective_parts<'s>(&'s self, ctx: &RenderContext<'_>) -> Cow<'s, [DatePart]> {
        let Some(template) = self.form.and_then(|form| ctx.locale().date_format(form)) else {
            return Cow::Borrowed(&self.parts);
        };
        let parts = template
            .parts
            .iter()
            .filter(|t| self.date_parts.includes(t.name))
            .map(|t| {
                let mut part = DatePart::from_template(t);
                if let Some(own) = self.parts.iter().find(|p| p.name == t.name) {
                    part.override_with(own);
                }
                part
            })
            .collect();
        Cow::Owned(parts)
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        render_wrapped(
            ctx,
            &[&self.display, &self.affixes, &self.text_case, &self.formatting],
            |c| self.render_date(c),
        );
    }

    fn render_date(&self, ctx: &mut RenderContext<'_>) {
        let Some(date) = ctx.date_variable(&self.variable, false) else {
            ctx.report(&self.variable, None);
            return;
        };

        let parts = self.effective_parts(ctx);
        let season = date.season.as_deref().filter(|s| !s.is_empty());
        let mut out = TokenBuffer::new();
        match date.value() {
            Some(DateValue::Parts { first, last }) => {
                // endpoints of different precision cannot be merged
                let last = if first.len() == last.len() { last } else { first };
                out = render_range(ctx, &parts, first, last, season);
            }
            Some(DateValue::Literal(literal)) => out.append_text(literal, TokenKind::Plain),
            Some(DateValue::Raw(raw)) => match ctx.parse_date(raw) {
                Some(parsed) => {
                    let parsed = parsed.to_date_parts();
                    out = render_range(ctx, &parts, &parsed, &parsed, season);
                }
                None => out.append_text(raw, TokenKind::Plain),
            },
            Some(DateValue::Season(season)) => {
                out.append_text(&season_text(ctx, season), TokenKind::Plain)
            }
            None => {}
        }

        let value = (!out.is_empty()).then_some(VariableValue::Date(date));
        ctx.report(&self.variable, value);
        ctx.emit_buffer(out);
    }
}

/// Render `parts` for the range `first`..`last`, merging shared parts.
fn render_range(
    ctx: &RenderContext<'_>,
    parts: &[DatePart],
    first: &[i32],
    last: &[i32],
    season: Option<&str>,
) -> TokenBuffer {
    let mut result = ctx.child();
    let mut pending = Pending::new(ctx);

    for part in parts {
        // parts missing from both endpoints count as shared
        let end = (part.name.index() + 1).min(first.len());
        let shared = first[..end] == last[..end];
        if shared {
            pending.flush_into(&mut result);
            pending = Pending::new(ctx);
            part.render(&mut result, first, season);
        } else {
            pending.push(part, first, last, season);
        }
    }
    pending.flush_into(&mut result);
    result.into_result()
}

/// Parts rendered separately for each endpoint, waiting to be joined.
struct Pending<'c> {
    left: RenderContext<'c>,
    right: RenderContext<'c>,
    /// Delimiter of the most significant pending part.
    delimiter: Option<(usize, String)>,
}

impl<'c> Pending<'c> {
    fn new(ctx: &RenderContext<'c>) -> Self {
        Self {
            left: ctx.child(),
            right: ctx.child(),
            delimiter: None,
        }
    }

    fn push(&mut self, part: &DatePart, first: &[i32], last: &[i32], season: Option<&str>) {
        let index = part.name.index();
        if self.delimiter.as_ref().map_or(true, |(i, _)| index < *i) {
            self.delimiter = Some((index, part.range_delimiter().to_string()));
        }
        part.render(&mut self.left, first, season);
        part.render(&mut self.right, last, season);
    }

    /// Append `left–right` to `result`, dropping the suffix before and the
    /// prefix after the delimiter. A side that rendered nothing is skipped.
    fn flush_into(self, result: &mut RenderContext<'_>) {
        let mut left = self.left.into_result();
        let mut right = self.right.into_result();
        match (left.is_empty(), right.is_empty()) {
            (false, false) => {
                left.trim_last_of_kind(TokenKind::Suffix);
                right.trim_first_of_kind(TokenKind::Prefix);
                let delimiter = self
                    .delimiter
                    .map_or_else(|| RANGE_DELIMITER.to_string(), |(_, d)| d);
                result.emit_buffer(left);
                result.emit(&delimiter);
                result.emit_buffer(right);
            }
            (false, true) => result.emit_buffer(left),
            (true, false) => result.emit_buffer(right),
            (true, true) => {}
        }
    }
}
