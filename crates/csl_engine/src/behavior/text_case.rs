/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! `text-case` transformations.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::RenderContext;
use crate::node::StyleNode;
use crate::token::TokenBuffer;

use super::Behavior;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}\p{M}'\u{2019}]*").unwrap());

/// Words kept lowercase by title case unless they open the text.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "down", "for", "from", "in", "into", "nor", "of",
    "on", "onto", "or", "over", "so", "the", "till", "to", "up", "via", "with", "yet",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextCase {
    Lowercase,
    Uppercase,
    CapitalizeFirst,
    CapitalizeAll,
    Title,
}

impl TextCase {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "lowercase" => Some(TextCase::Lowercase),
            "uppercase" => Some(TextCase::Uppercase),
            "capitalize-first" => Some(TextCase::CapitalizeFirst),
            "capitalize-all" => Some(TextCase::CapitalizeAll),
            "title" => Some(TextCase::Title),
            _ => None,
        }
    }

    /// Read `text-case`. Absent and unknown values both mean no change.
    pub fn from_node<N: StyleNode>(node: &N) -> Option<Self> {
        let value = node.attr("text-case")?;
        let parsed = TextCase::parse(value);
        if parsed.is_none() {
            tracing::debug!(value, "ignoring unknown text-case");
        }
        parsed
    }

    /// Transform one piece of text. Title case only applies to English.
    pub fn transform(self, text: &str, english: bool) -> String {
        match self {
            TextCase::Lowercase => text.to_lowercase(),
            TextCase::Uppercase => text.to_uppercase(),
            TextCase::CapitalizeFirst => capitalize(text),
            TextCase::CapitalizeAll => text
                .split(' ')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" "),
            TextCase::Title if english => title_case(text),
            TextCase::Title => text.to_string(),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (i, m) in WORD_RE.find_iter(text).enumerate() {
        out.push_str(&text[last..m.start()]);
        let word = m.as_str();
        let lowercase = !word.chars().any(char::is_uppercase);
        if lowercase && (i == 0 || !STOP_WORDS.contains(&word)) {
            out.push_str(&capitalize(word));
        } else {
            out.push_str(word);
        }
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

impl Behavior for TextCase {
    fn apply(&self, ctx: &RenderContext<'_>, mut buffer: TokenBuffer) -> TokenBuffer {
        let english = ctx.locale().language() == "en";
        buffer.map_text(|text| self.transform(text, english));
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_cases() {
        assert_eq!(TextCase::Lowercase.transform("The NASA Way", true), "the nasa way");
        assert_eq!(TextCase::Uppercase.transform("straße", false), "STRASSE");
        assert_eq!(TextCase::CapitalizeFirst.transform("edited by", true), "Edited by");
        assert_eq!(TextCase::CapitalizeAll.transform("edited by  x", true), "Edited By  X");
        assert_eq!(TextCase::CapitalizeFirst.transform("", true), "");
    }

    #[test]
    fn test_title_case_english_only() {
        assert_eq!(
            TextCase::Title.transform("the lord of the rings and iPhone", true),
            "The Lord of the Rings and iPhone"
        );
        assert_eq!(TextCase::Title.transform("of mice", true), "Of Mice");
        assert_eq!(TextCase::Title.transform("der herr der ringe", false), "der herr der ringe");
    }

    #[test]
    fn test_parse() {
        assert_eq!(TextCase::parse("capitalize-all"), Some(TextCase::CapitalizeAll));
        assert_eq!(TextCase::parse("sentence"), None);
    }
}
