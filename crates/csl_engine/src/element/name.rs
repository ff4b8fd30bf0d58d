/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! `cs:name`: formatting of one list of personal or corporate names.

use csl_core::TermForm;

use crate::behavior::{
    Affixes, And, Behavior, DelimiterPrecedes, FormattingAttributes, NameAsSortOrder,
    NameInheritableAttributes, TextCase,
};
use crate::context::RenderContext;
use crate::error::{Result, StyleError};
use crate::node::{required_attr, StyleNode};
use crate::token::{Token, TokenBuffer, TokenKind};

const DEFAULT_DELIMITER: &str = ", ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NameForm {
    #[default]
    Long,
    Short,
    Count,
}

/// Styling of the `family` or `given` part (`cs:name-part`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamePart {
    affixes: Affixes,
    text_case: Option<TextCase>,
    formatting: FormattingAttributes,
}

impl NamePart {
    fn compile<N: StyleNode>(node: &N) -> Self {
        Self {
            affixes: Affixes::from_node(node),
            text_case: TextCase::from_node(node),
            formatting: FormattingAttributes::from_node(node),
        }
    }

    fn transform(&self, ctx: &RenderContext<'_>, text: &str) -> String {
        match self.text_case {
            Some(case) => case.transform(text, ctx.locale().language() == "en"),
            None => text.to_string(),
        }
    }

    fn token(&self, ctx: &RenderContext<'_>, text: &str) -> Token {
        Token::Text {
            kind: TokenKind::Plain,
            text: self.transform(ctx, text),
            formatting: self.formatting,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Name {
    form: NameForm,
    delimiter: Option<String>,
    attributes: NameInheritableAttributes,
    family: NamePart,
    given: NamePart,
    affixes: Affixes,
    formatting: FormattingAttributes,
}

impl Name {
    pub fn compile<N: StyleNode>(node: &N) -> Result<Self> {
        let form = match node.attr("form") {
            Some("short") => NameForm::Short,
            Some("count") => NameForm::Count,
            _ => NameForm::Long,
        };

        let mut family = None;
        let mut given = None;
        for child in node.children().iter().filter(|c| c.name() == "name-part") {
            let part_name = required_attr(child, "name")?;
            let slot = match part_name {
                "family" => &mut family,
                "given" => &mut given,
                other => {
                    tracing::warn!(name = other, "unknown name part");
                    return Err(StyleError::UnknownNamePart(other.to_string()));
                }
            };
            if slot.is_some() {
                return Err(StyleError::DuplicateNamePart(part_name.to_string()));
            }
            *slot = Some(NamePart::compile(child));
        }

        Ok(Self {
            form,
            delimiter: node.attr("delimiter").map(str::to_string),
            attributes: NameInheritableAttributes::from_node(node)?,
            family: family.unwrap_or_default(),
            given: given.unwrap_or_default(),
            affixes: Affixes::from_node(node),
            formatting: FormattingAttributes::from_node(node),
        })
    }

    pub fn form(&self) -> NameForm {
        self.form
    }

    fn delimiter(&self) -> &str {
        self.delimiter.as_deref().unwrap_or(DEFAULT_DELIMITER)
    }

    /// How many names of `names` would be rendered, after et-al truncation.
    pub fn count(&self, ctx: &RenderContext<'_>, names: &[csl_core::Name]) -> usize {
        let attributes = ctx.name_attributes().merge(&self.attributes);
        match et_al_limit(&attributes, names.len()) {
            Some(limit) => limit.min(names.len()),
            None => names.len(),
        }
    }

    /// Render one list of names. Count form renders nothing here, the
    /// enclosing `names` element sums counts across its variables.
    pub fn render(&self, ctx: &mut RenderContext<'_>, names: &[csl_core::Name]) {
        if names.is_empty() || self.form == NameForm::Count {
            return;
        }
        let attributes = ctx.name_attributes().merge(&self.attributes);
        let limit = et_al_limit(&attributes, names.len());
        if limit == Some(0) {
            return;
        }

        let delimiter = self.delimiter();
        let and = match attributes.and {
            Some(And::Text) => {
                let term = ctx.term("and", TermForm::Long, false).unwrap_or("and");
                format!(" {} ", term)
            }
            Some(And::Symbol) => " & ".to_string(),
            None => delimiter.to_string(),
        };

        let mut buffer = TokenBuffer::new();
        for (i, name) in names.iter().enumerate() {
            let sort_order = match attributes.name_as_sort_order {
                Some(NameAsSortOrder::All) => true,
                Some(NameAsSortOrder::First) => i == 0,
                None => false,
            };
            buffer.append_buffer(self.render_name(ctx, name, sort_order, &attributes));

            if i + 1 == names.len() {
                break;
            }
            if Some(i + 1) == limit {
                let appended = self.append_delimiter(
                    &mut buffer,
                    attributes.delimiter_precedes_et_al(),
                    sort_order,
                    i + 1 > 1,
                );
                let et_al = ctx.term("et-al", TermForm::Long, false).unwrap_or("et al.");
                if appended {
                    buffer.append_text(et_al, TokenKind::Plain);
                } else {
                    buffer.append_text(&format!(" {}", et_al), TokenKind::Plain);
                }
                break;
            }
            if i + 2 == names.len() {
                let appended = self.append_delimiter(
                    &mut buffer,
                    attributes.delimiter_precedes_last(),
                    sort_order,
                    names.len() > 2,
                );
                if !appended {
                    buffer.append_text(&and, TokenKind::Delimiter);
                } else if and != delimiter {
                    // the delimiter already supplies the leading space
                    buffer.append_text(and.trim_start(), TokenKind::Delimiter);
                }
            } else {
                buffer.append_text(delimiter, TokenKind::Delimiter);
            }
        }

        let stages: [&dyn Behavior; 2] = [&self.affixes, &self.formatting];
        let buffer = stages
            .iter()
            .rev()
            .fold(buffer, |buffer, stage| stage.apply(ctx, buffer));
        ctx.emit_buffer(buffer);
    }

    fn append_delimiter(
        &self,
        buffer: &mut TokenBuffer,
        precedes: DelimiterPrecedes,
        sort_order: bool,
        contextual: bool,
    ) -> bool {
        let append = match precedes {
            DelimiterPrecedes::Contextual => contextual,
            DelimiterPrecedes::Always => true,
            DelimiterPrecedes::AfterInvertedName => sort_order,
            DelimiterPrecedes::Never => false,
        };
        if append {
            buffer.append_text(self.delimiter(), TokenKind::Delimiter);
        }
        append
    }

    fn render_name(
        &self,
        ctx: &RenderContext<'_>,
        name: &csl_core::Name,
        sort_order: bool,
        attributes: &NameInheritableAttributes,
    ) -> TokenBuffer {
        let mut out = TokenBuffer::new();
        if let Some(literal) = &name.literal {
            out.append_text(literal, TokenKind::Plain);
            return out;
        }

        let mut family = TokenBuffer::new();
        if let Some(family_name) = name.family.as_deref().filter(|f| !f.is_empty()) {
            family.append(self.family.token(ctx, family_name));
            if let Some(particle) = non_empty(&name.non_dropping_particle) {
                family.prepend_text(" ", TokenKind::Delimiter);
                family.prepend(self.family.token(ctx, particle));
            }
            if self.form == NameForm::Short {
                return self.family.affixes.apply(ctx, family);
            }
            if let Some(particle) = non_empty(&name.dropping_particle) {
                family.prepend_text(" ", TokenKind::Delimiter);
                family.prepend(self.given.token(ctx, particle));
            }
            if let Some(suffix) = non_empty(&name.suffix) {
                family.append_text(" ", TokenKind::Delimiter);
                family.append_text(suffix, TokenKind::Plain);
            }
        }
        let family = self.family.affixes.apply(ctx, family);

        let mut given = TokenBuffer::new();
        if let Some(given_name) = name.given.as_deref().filter(|g| !g.is_empty()) {
            let given_name = match attributes.initialize_with() {
                Some(with) if !family.is_empty() => {
                    initialize_name(given_name, with, !attributes.initialize())
                }
                _ => given_name.to_string(),
            };
            if !given_name.is_empty() {
                given.append(self.given.token(ctx, &given_name));
            }
        }
        let given = self.given.affixes.apply(ctx, given);

        let (first, separator, second) = if sort_order {
            (family, attributes.sort_separator(), given)
        } else {
            (given, " ", family)
        };
        let both = !first.is_empty() && !second.is_empty();
        out.append_buffer(first);
        if both {
            out.append_text(separator, TokenKind::Delimiter);
        }
        out.append_buffer(second);
        out
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// The number of names to keep, if et-al truncation applies.
fn et_al_limit(attributes: &NameInheritableAttributes, len: usize) -> Option<usize> {
    match (attributes.et_al_min, attributes.et_al_use_first) {
        (Some(min), Some(use_first)) if len >= min => Some(use_first),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Word<'a> {
    /// A single letter, or the first letter of a word being initialized.
    Initial(&'a str),
    /// A word written with a trailing period, like `Cpt.`.
    Abbreviation(&'a str),
    Full(&'a str),
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | '-' | '\u{2013}')
}

/// Words of a given name and whether a hyphen precedes each of them.
fn given_words(given: &str) -> Vec<(bool, &str, bool)> {
    let mut words = Vec::new();
    let mut hyphen = false;
    let mut rest = given;
    while let Some(start) = rest.find(|c: char| !is_separator(c)) {
        hyphen |= rest[..start].contains(['-', '\u{2013}']);
        let word_rest = &rest[start..];
        let end = word_rest.find(is_separator).unwrap_or(word_rest.len());
        let word = &word_rest[..end];
        let dotted = word_rest[end..].starts_with('.');
        words.push((hyphen, word, dotted));
        hyphen = false;
        rest = &word_rest[end..];
    }
    words
}

fn first_char(word: &str) -> &str {
    word.char_indices()
        .nth(1)
        .map_or(word, |(i, _)| &word[..i])
}

/// Initialize a given name with `initialize_with` (e.g. `Jean-Luc` and
/// `". "` become `J.-L.`). With `only_normalize`, full words are kept and
/// only existing initials are reformatted.
pub fn initialize_name(given: &str, initialize_with: &str, only_normalize: bool) -> String {
    let parsed = given_words(given);
    let words: Vec<(bool, Word<'_>)> = parsed
        .iter()
        .map(|&(hyphen, word, dotted)| {
            let single = word.chars().nth(1).is_none();
            let kind = if single {
                Word::Initial(word)
            } else if dotted {
                Word::Abbreviation(word)
            } else if only_normalize {
                Word::Full(word)
            } else {
                Word::Initial(first_char(word))
            };
            (hyphen, kind)
        })
        .collect();

    let trimmed = initialize_with.trim_end();
    let mut out = String::new();
    for (i, (_, word)) in words.iter().enumerate() {
        let next = words.get(i + 1);
        match word {
            Word::Full(text) => {
                out.push_str(text);
                match next {
                    Some((true, _)) => out.push('-'),
                    Some((false, _)) => out.push(' '),
                    None => {}
                }
            }
            Word::Initial(text) | Word::Abbreviation(text) => {
                out.push_str(text);
                match next {
                    Some((true, _)) => {
                        out.push_str(trimmed);
                        out.push('-');
                    }
                    Some((false, Word::Full(_))) => {
                        out.push_str(trimmed);
                        out.push(' ');
                    }
                    Some((false, _)) => out.push_str(initialize_with),
                    None => out.push_str(trimmed),
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize() {
        let cases: &[(&str, &str, &str)] = &[
            ("Jean Luc", ". ", "J. L."),
            ("Jean-Luc", ". ", "J.-L."),
            ("J.-L.", " ", "J-L"),
            ("J.L.", "", "JL"),
            ("Je. Luc", ".", "Je.L."),
            ("Je. Luc", " ", "Je L"),
            ("Cpt. Jean-Luc", ".", "Cpt.J.-L."),
            ("Cpt. Jean-Luc", ". ", "Cpt. J.-L."),
            ("JL", ". ", "J."),
            ("James T", ". ", "J. T."),
            ("Jean L", "", "JL"),
        ];
        for (given, with, expected) in cases {
            assert_eq!(initialize_name(given, with, false), *expected, "{:?} {:?}", given, with);
        }
    }

    #[test]
    fn test_initialize_normalizes_input() {
        assert_eq!(initialize_name(" Jean   Luc ", ". ", false), "J. L.");
        assert_eq!(initialize_name(" Jean -   Luc ", ". ", false), "J.-L.");
        assert_eq!(initialize_name("Jean\u{2013} Luc ", ". ", false), "J.-L.");
        assert_eq!(initialize_name("J..L.", ". ", false), "J. L.");
        assert_eq!(initialize_name("J . .- L. ", ". ", false), "J.-L.");
        assert_eq!(initialize_name("", ". ", false), "");
    }

    #[test]
    fn test_only_normalize() {
        let cases: &[(&str, &str, &str)] = &[
            ("Jean Luc", ". ", "Jean Luc"),
            ("Jean-Luc", " ", "Jean-Luc"),
            ("J.-L.", " ", "J-L"),
            ("J.L.", ". ", "J. L."),
            ("J-Luc", ".", "J.-Luc"),
            ("Jean-L", ".", "Jean-L."),
            ("J Luc", "", "J Luc"),
            ("J Luc", ".", "J. Luc"),
            ("Je. Luc", " ", "Je Luc"),
            ("Je. Luc", ".", "Je. Luc"),
            ("Cpt. Jean-Luc", ". ", "Cpt. Jean-Luc"),
            ("JL", ".", "JL"),
            ("James T", ". ", "James T."),
            (" Jean -   Luc ", ". ", "Jean-Luc"),
        ];
        for (given, with, expected) in cases {
            assert_eq!(initialize_name(given, with, true), *expected, "{:?} {:?}", given, with);
        }
    }

    #[test]
    fn test_first_char_is_char_aligned() {
        assert_eq!(first_char("Élodie"), "É");
        assert_eq!(first_char("x"), "x");
    }
}
