/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Numeric variable helpers.
//!
//! Two levels are offered. [`is_numeric`] and [`tokenize`] classify values
//! such as `12`, `12a`, `10-12` or `1, 3 & 5` for `cs:number` and
//! `is-numeric` conditions. [`parse_locators`] goes further and splits
//! locator text like `ch. 2-3, p. 4` into labelled elements.

use once_cell::sync::Lazy;
use regex::Regex;
use winnow::ascii::multispace0;
use winnow::combinator::{alt, preceded, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

const NUMBER: &str = r"([a-zA-Z]*[0-9]+[a-zA-Z]*)";
const SEPARATOR: &str = r"([,\-&])";

static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\s*{NUMBER}(\s*{SEPARATOR}\s*{NUMBER})*\s*$")).unwrap()
});
static EXTRACT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("{NUMBER}|{SEPARATOR}")).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberTokenKind {
    Number,
    Separator,
}

/// A run of a numeric value: a number such as `12a` or a separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberToken<'a> {
    pub text: &'a str,
    pub kind: NumberTokenKind,
}

/// True if `value` is a number or a list/range of numbers.
pub fn is_numeric(value: &str) -> bool {
    NUMERIC_RE.is_match(value)
}

/// Split a value into number and separator runs. Everything else is
/// skipped.
pub fn tokenize(value: &str) -> Vec<NumberToken<'_>> {
    EXTRACT_RE
        .captures_iter(value)
        .filter_map(|caps| {
            if let Some(m) = caps.get(1) {
                Some(NumberToken {
                    text: m.as_str(),
                    kind: NumberTokenKind::Number,
                })
            } else {
                caps.get(2).map(|m| NumberToken {
                    text: m.as_str(),
                    kind: NumberTokenKind::Separator,
                })
            }
        })
        .collect()
}

/// Count of number runs in `value`.
pub fn count_numbers(value: &str) -> usize {
    tokenize(value)
        .iter()
        .filter(|t| t.kind == NumberTokenKind::Number)
        .count()
}

/// One labelled part of a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberElement {
    pub text: String,
    /// Locale term name of the label (`page`, `chapter`, ...).
    pub label: Option<&'static str>,
    pub plural: bool,
}

impl NumberElement {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            label: None,
            plural: false,
        }
    }

    fn labelled(text: &str, label: &'static str, plural: bool) -> Self {
        Self {
            text: text.to_string(),
            label: Some(label),
            plural,
        }
    }
}

/// Recognized label spellings: (spelling, term, plural).
const LABELS: &[(&str, &str, bool)] = &[
    ("p.", "page", false),
    ("pp.", "page", true),
    ("page", "page", false),
    ("pages", "page", true),
    ("ch.", "chapter", false),
    ("chap.", "chapter", false),
    ("chaps.", "chapter", true),
    ("chapter", "chapter", false),
    ("chapters", "chapter", true),
    ("sec.", "section", false),
    ("secs.", "section", true),
    ("section", "section", false),
    ("sections", "section", true),
    ("§", "section", false),
    ("§§", "section", true),
    ("vol.", "volume", false),
    ("vols.", "volume", true),
    ("volume", "volume", false),
    ("volumes", "volume", true),
    ("no.", "number", false),
    ("nos.", "number", true),
    ("fig.", "figure", false),
    ("figs.", "figure", true),
    ("figure", "figure", false),
    ("figures", "figure", true),
    ("para.", "paragraph", false),
    ("paras.", "paragraph", true),
    ("¶", "paragraph", false),
    ("¶¶", "paragraph", true),
    ("l.", "line", false),
    ("ll.", "line", true),
    ("line", "line", false),
    ("lines", "line", true),
    ("n.", "note", false),
    ("nn.", "note", true),
    ("note", "note", false),
    ("notes", "note", true),
    ("pt.", "part", false),
    ("pts.", "part", true),
    ("part", "part", false),
    ("parts", "part", true),
    ("v.", "verse", false),
    ("vv.", "verse", true),
    ("verse", "verse", false),
    ("verses", "verse", true),
    ("bk.", "book", false),
    ("bks.", "book", true),
    ("book", "book", false),
    ("books", "book", true),
    ("col.", "column", false),
    ("cols.", "column", true),
    ("fol.", "folio", false),
    ("fols.", "folio", true),
    ("op.", "opus", false),
    ("opp.", "opus", true),
    ("s.v.", "sub verbo", false),
    ("s.vv.", "sub verbo", true),
];

fn label_for(word: &str) -> Option<(&'static str, bool)> {
    LABELS
        .iter()
        .find(|(spelling, _, _)| spelling.eq_ignore_ascii_case(word))
        .map(|(_, term, plural)| (*term, *plural))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tok<'s> {
    Word(&'s str),
    Comma,
    Semicolon,
    Amp,
    Dash,
}

impl Tok<'_> {
    fn is_list_separator(self) -> bool {
        matches!(self, Tok::Comma | Tok::Semicolon)
    }

    fn is_range_separator(self) -> bool {
        matches!(self, Tok::Comma | Tok::Semicolon | Tok::Amp | Tok::Dash | Tok::Word("and"))
    }
}

fn tok<'s>(input: &mut &'s str) -> Result<Tok<'s>, ErrMode<ContextError>> {
    preceded(
        multispace0,
        alt((
            ','.value(Tok::Comma),
            ';'.value(Tok::Semicolon),
            '&'.value(Tok::Amp),
            alt(('-', '\u{2013}')).value(Tok::Dash),
            take_while(1.., |c: char| {
                !c.is_whitespace() && !matches!(c, ',' | ';' | '&' | '-' | '\u{2013}')
            })
            .map(Tok::Word),
        )),
    )
    .parse_next(input)
}

fn toks<'s>(input: &mut &'s str) -> Result<Vec<Tok<'s>>, ErrMode<ContextError>> {
    let toks = repeat(0.., tok).parse_next(input)?;
    multispace0.parse_next(input)?;
    Ok(toks)
}

fn is_item(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        || word
            .chars()
            .all(|c| matches!(c.to_ascii_uppercase(), 'I' | 'V' | 'X' | 'L' | 'C' | 'D' | 'M'))
}

/// Number of items if `toks` is a list of numbers joined by separators.
fn list_items(toks: &[Tok<'_>]) -> Option<usize> {
    let mut items = 0;
    let mut expect_item = true;
    for t in toks {
        match t {
            Tok::Word(w) if *w != "and" && is_item(w) => {
                if !expect_item {
                    return None;
                }
                items += 1;
                expect_item = false;
            }
            t if t.is_range_separator() => {
                if items == 0 {
                    return None;
                }
                expect_item = true;
            }
            _ => return None,
        }
    }
    (items > 0 && !expect_item).then_some(items)
}

fn render_list(toks: &[Tok<'_>]) -> String {
    let mut out = String::new();
    for t in toks {
        match t {
            Tok::Comma => out.push_str(", "),
            Tok::Semicolon => out.push_str("; "),
            Tok::Amp => out.push_str(" & "),
            Tok::Dash => out.push('\u{2013}'),
            Tok::Word("and") => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
                out.push_str("and ");
            }
            Tok::Word(w) => out.push_str(w),
        }
    }
    out
}

fn render_text(toks: &[Tok<'_>]) -> String {
    let mut out = String::new();
    let mut space = false;
    for t in toks {
        match t {
            Tok::Word(w) => {
                if space {
                    out.push(' ');
                }
                out.push_str(w);
                space = true;
            }
            Tok::Comma => {
                out.push(',');
                space = true;
            }
            Tok::Semicolon => {
                out.push(';');
                space = true;
            }
            Tok::Amp => {
                out.push_str(" & ");
                space = false;
            }
            Tok::Dash => {
                out.push('-');
                space = false;
            }
        }
    }
    out
}

struct Segment<'s> {
    label: Option<(&'static str, bool)>,
    toks: Vec<Tok<'s>>,
    trailing: Option<Tok<'s>>,
}

impl Segment<'_> {
    fn into_element(self) -> NumberElement {
        let (text, items) = match list_items(&self.toks) {
            Some(items) => (render_list(&self.toks), items),
            None => (render_text(&self.toks), 0),
        };
        let mut text = text;
        match self.trailing {
            Some(Tok::Semicolon) => text.push_str("; "),
            Some(_) => text.push_str(", "),
            None => {}
        }
        match self.label {
            Some((term, plural)) => NumberElement::labelled(&text, term, plural || items > 1),
            None => NumberElement {
                text,
                label: None,
                plural: items > 1,
            },
        }
    }
}

/// Label at position `i`: a known label spelling followed by more text.
fn label_at(toks: &[Tok<'_>], i: usize) -> Option<(&'static str, bool)> {
    match toks.get(i) {
        Some(Tok::Word(w)) if i + 1 < toks.len() => label_for(w),
        _ => None,
    }
}

/// Split locator text into labelled elements.
///
/// A label is only recognized at the start of the text or right after a
/// `,` or `;`. Consecutive elements with the same label are merged.
/// Numeric lists are normalized (`1,2` becomes `1, 2`, `10-12` becomes
/// `10–12`) and mark their element as plural.
pub fn parse_locators(value: &str) -> Vec<NumberElement> {
    let mut input = value;
    let all = match toks(&mut input) {
        Ok(all) if input.is_empty() && !all.is_empty() => all,
        _ => return vec![NumberElement::new(value.trim())],
    };

    let mut segments: Vec<Segment<'_>> = Vec::new();
    let mut at_start = true;
    let mut i = 0;
    while i < all.len() {
        let t = all[i];
        if at_start {
            at_start = false;
            if let Some(label) = label_at(&all, i) {
                segments.push(Segment {
                    label: Some(label),
                    toks: Vec::new(),
                    trailing: None,
                });
                i += 1;
                continue;
            }
            segments.push(Segment {
                label: None,
                toks: Vec::new(),
                trailing: None,
            });
        }
        if t.is_list_separator() && label_at(&all, i + 1).is_some() {
            if let Some(current) = segments.last_mut() {
                current.trailing = Some(t);
            }
            at_start = true;
            i += 1;
            continue;
        }
        if let Some(current) = segments.last_mut() {
            current.toks.push(t);
        }
        i += 1;
    }

    if let Some(last) = segments.last_mut() {
        while last.toks.last().is_some_and(|t| t.is_list_separator()) {
            last.toks.pop();
        }
    }

    let mut elements: Vec<NumberElement> = Vec::new();
    for element in segments.into_iter().map(Segment::into_element) {
        match elements.last_mut() {
            Some(prev) if prev.label.is_some() && prev.label == element.label => {
                prev.text.push_str(&element.text);
                prev.plural = true;
            }
            _ => elements.push(element),
        }
    }
    elements
}
