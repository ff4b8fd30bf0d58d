/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Human name parser.
//!
//! Splits a BibTeX-style name list (`A and B and C`) into structured
//! [`Name`]s. Each name may be written as `First von Last`,
//! `von Last, First`, `von Last, Jr, First` or `First Last, Jr`. A name
//! written entirely inside braces (`{Barnes and Noble, Inc.}`) is kept
//! verbatim as a literal name.

use csl_core::Name;
use winnow::ascii::multispace0;
use winnow::combinator::{alt, delimited, preceded, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{any, none_of, take_while};

const SUFFIXES: &[&str] = &["jr", "jr.", "sr", "sr.", "ii", "iii", "iv"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    /// Text of a `{...}` group, braces removed and escapes resolved.
    Braced(String),
    Comma,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Word {
    text: String,
    protected: bool,
}

impl Word {
    /// Lowercase words form the `von` part. Braced words never do.
    fn is_lowercase(&self) -> bool {
        !self.protected && self.text.chars().next().is_some_and(char::is_lowercase)
    }
}

fn braced(input: &mut &str) -> Result<String, ErrMode<ContextError>> {
    delimited(
        '{',
        repeat(0.., alt((preceded('\\', any), none_of(['}'])))).fold(
            String::new,
            |mut acc, c| {
                acc.push(c);
                acc
            },
        ),
        '}',
    )
    .parse_next(input)
}

fn word<'s>(input: &mut &'s str) -> Result<&'s str, ErrMode<ContextError>> {
    take_while(1.., |c: char| !c.is_whitespace() && c != ',' && c != '{').parse_next(input)
}

fn token(input: &mut &str) -> Result<Token, ErrMode<ContextError>> {
    preceded(
        multispace0,
        alt((
            ','.value(Token::Comma),
            braced.map(Token::Braced),
            word.map(|w: &str| Token::Word(w.to_string())),
        )),
    )
    .parse_next(input)
}

fn tokens(input: &mut &str) -> Result<Vec<Token>, ErrMode<ContextError>> {
    let tokens = repeat(0.., token).parse_next(input)?;
    multispace0.parse_next(input)?;
    Ok(tokens)
}

fn join(words: &[Word]) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    Some(
        words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn is_suffix(words: &[Word]) -> bool {
    matches!(words, [w] if SUFFIXES.contains(&w.text.to_lowercase().as_str()))
}

/// `First von Last`.
fn first_von_last(words: &[Word]) -> Option<Name> {
    let (last, rest) = words.split_last()?;
    if last.is_lowercase() {
        return None;
    }
    let first_lower = rest.iter().position(Word::is_lowercase);
    let (given, von, family) = match first_lower {
        Some(start) => {
            let end = rest.iter().rposition(Word::is_lowercase).unwrap_or(start);
            (&rest[..start], &rest[start..=end], &words[end + 1..])
        }
        None => (rest, &rest[..0], std::slice::from_ref(last)),
    };
    Some(Name {
        family: join(family),
        given: join(given),
        non_dropping_particle: join(von),
        ..Default::default()
    })
}

/// `von Last`, used before the first comma.
fn von_last(words: &[Word]) -> Option<Name> {
    let (_, rest) = words.split_last()?;
    let split = rest.iter().rposition(Word::is_lowercase).map_or(0, |i| i + 1);
    Some(Name {
        family: join(&words[split..]),
        non_dropping_particle: join(&words[..split]),
        ..Default::default()
    })
}

fn parse_name(tokens: &[Token]) -> Option<Name> {
    if let [Token::Braced(literal)] = tokens {
        return Some(Name::literal(literal));
    }

    let parts: Vec<Vec<Word>> = tokens
        .split(|t| *t == Token::Comma)
        .map(|part| {
            part.iter()
                .filter_map(|t| match t {
                    Token::Word(text) => Some(Word {
                        text: text.clone(),
                        protected: false,
                    }),
                    Token::Braced(text) => Some(Word {
                        text: text.clone(),
                        protected: true,
                    }),
                    Token::Comma => None,
                })
                .collect()
        })
        .collect();

    let name = match parts.as_slice() {
        [only] => first_von_last(only)?,
        [head, tail] if is_suffix(tail) => Name {
            suffix: join(tail),
            ..first_von_last(head)?
        },
        [head, given] => Name {
            given: join(given),
            ..von_last(head)?
        },
        [head, suffix, given] => Name {
            given: join(given),
            suffix: join(suffix),
            ..von_last(head)?
        },
        _ => return None,
    };
    name.family.is_some().then_some(name)
}

/// Parse a list of names separated by `and`.
///
/// Always returns at least one name. When any part of the input cannot be
/// parsed the whole input becomes a single literal name.
pub fn parse_names(input: &str) -> Vec<Name> {
    let fallback = || {
        tracing::trace!(names = %input, "name list kept as literal");
        vec![Name::literal(input)]
    };

    let mut rest = input;
    let Ok(all) = tokens(&mut rest) else {
        return fallback();
    };
    if !rest.is_empty() || all.is_empty() {
        return fallback();
    }

    let mut names = Vec::new();
    for group in all.split(|t| matches!(t, Token::Word(w) if w == "and")) {
        match parse_name(group) {
            Some(name) => names.push(name),
            None => return fallback(),
        }
    }
    names
}

/// Apply `transform` to the text outside top-level brace groups. Brace
/// groups are copied through unchanged, braces included.
///
/// Useful for converting markup in a raw name field without touching the
/// parts that must stay verbatim, e.g. `{ACME} Labs`.
pub fn map_unbraced<F>(input: &str, transform: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut out = String::with_capacity(input.len());
    let mut plain = String::new();
    let mut rest = input;
    while !rest.is_empty() {
        let mut attempt = rest;
        if rest.starts_with('{') && braced(&mut attempt).is_ok() {
            out.push_str(&transform(&plain));
            plain.clear();
            out.push_str(&rest[..rest.len() - attempt.len()]);
            rest = attempt;
            continue;
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            plain.push(c);
        }
        rest = chars.as_str();
    }
    out.push_str(&transform(&plain));
    out
}
