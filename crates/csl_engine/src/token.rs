/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The engine's output: an ordered sequence of tagged text fragments.
//!
//! Tokens appear in document order. Behaviors wrap or filter them but
//! never reorder them. An [`crate::render::OutputFormat`] turns the final
//! buffer into markup.

use crate::behavior::{Display, FormattingAttributes};

/// What a text token stands for. Formatters may treat kinds differently,
/// e.g. by linking `Url` tokens or collapsing punctuation at `Suffix`es.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plain,
    Prefix,
    Suffix,
    OpenQuote,
    CloseQuote,
    Delimiter,
    Url,
    Doi,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text {
        kind: TokenKind,
        text: String,
        formatting: FormattingAttributes,
    },
    /// Start of a `display` group.
    DisplayStart(Display),
    /// End of a `display` group.
    DisplayEnd(Display),
}

impl Token {
    pub fn text(text: impl Into<String>, kind: TokenKind) -> Self {
        Token::Text {
            kind,
            text: text.into(),
            formatting: FormattingAttributes::UNDEFINED,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Token::text(text, TokenKind::Plain)
    }

    /// The kind of a text token; markers have none.
    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            Token::Text { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Token::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn formatting(&self) -> FormattingAttributes {
        match self {
            Token::Text { formatting, .. } => *formatting,
            _ => FormattingAttributes::UNDEFINED,
        }
    }

    pub fn is_kind(&self, expected: TokenKind) -> bool {
        self.kind() == Some(expected)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
}

impl TokenBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Append a text token. Empty text is dropped so that emptiness of a
    /// buffer always means "nothing rendered".
    pub fn append_text(&mut self, text: &str, kind: TokenKind) {
        if !text.is_empty() {
            self.append(Token::text(text, kind));
        }
    }

    pub fn prepend(&mut self, token: Token) {
        self.tokens.insert(0, token);
    }

    pub fn prepend_text(&mut self, text: &str, kind: TokenKind) {
        if !text.is_empty() {
            self.prepend(Token::text(text, kind));
        }
    }

    pub fn append_buffer(&mut self, other: TokenBuffer) {
        self.tokens.extend(other.tokens);
    }

    pub fn prepend_buffer(&mut self, other: TokenBuffer) {
        let mut tokens = other.tokens;
        tokens.append(&mut self.tokens);
        self.tokens = tokens;
    }

    /// Remove and return the last token if it is a text token of `kind`.
    pub fn trim_last_of_kind(&mut self, kind: TokenKind) -> Option<Token> {
        if self.tokens.last()?.is_kind(kind) {
            self.tokens.pop()
        } else {
            None
        }
    }

    /// Remove and return the first token if it is a text token of `kind`.
    pub fn trim_first_of_kind(&mut self, kind: TokenKind) -> Option<Token> {
        if self.tokens.first()?.is_kind(kind) {
            Some(self.tokens.remove(0))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Rewrite the text of every text token, keeping its kind.
    pub fn map_text<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for token in &mut self.tokens {
            if let Token::Text { text, .. } = token {
                *text = f(text);
            }
        }
        self.tokens
            .retain(|t| !matches!(t, Token::Text { text, .. } if text.is_empty()));
    }

    /// Put `outer` underneath the formatting of every text token.
    pub fn wrap_formatting(&mut self, outer: FormattingAttributes) {
        for token in &mut self.tokens {
            if let Token::Text { formatting, .. } = token {
                *formatting = outer.merge(*formatting);
            }
        }
    }

    /// Concatenated text, markers and formatting ignored.
    pub fn to_plain_string(&self) -> String {
        self.tokens.iter().filter_map(Token::as_text).collect()
    }
}

impl IntoIterator for TokenBuffer {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenBuffer {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl FromIterator<Token> for TokenBuffer {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::FontStyle;

    fn buffer(parts: &[(&str, TokenKind)]) -> TokenBuffer {
        parts.iter().map(|(t, k)| Token::text(*t, *k)).collect()
    }

    #[test]
    fn test_append_skips_empty_text() {
        let mut b = TokenBuffer::new();
        b.append_text("", TokenKind::Plain);
        b.prepend_text("", TokenKind::Prefix);
        assert!(b.is_empty());
        b.append_text("a", TokenKind::Plain);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_prepend_and_append_buffers() {
        let mut b = buffer(&[("b", TokenKind::Plain)]);
        b.prepend_buffer(buffer(&[("a", TokenKind::Prefix)]));
        b.append_buffer(buffer(&[("c", TokenKind::Suffix)]));
        assert_eq!(b.to_plain_string(), "abc");
        assert_eq!(b.tokens()[0].kind(), Some(TokenKind::Prefix));
    }

    #[test]
    fn test_trim_of_kind_only_touches_ends() {
        let mut b = buffer(&[
            ("(", TokenKind::Prefix),
            ("x", TokenKind::Plain),
            (" ", TokenKind::Suffix),
        ]);
        assert!(b.trim_first_of_kind(TokenKind::Suffix).is_none());
        assert!(b.trim_last_of_kind(TokenKind::Prefix).is_none());
        assert_eq!(b.trim_last_of_kind(TokenKind::Suffix), Some(Token::text(" ", TokenKind::Suffix)));
        assert_eq!(b.trim_first_of_kind(TokenKind::Prefix), Some(Token::text("(", TokenKind::Prefix)));
        assert_eq!(b.to_plain_string(), "x");

        let mut empty = TokenBuffer::new();
        assert!(empty.trim_last_of_kind(TokenKind::Suffix).is_none());
        assert!(empty.trim_first_of_kind(TokenKind::Prefix).is_none());
    }

    #[test]
    fn test_markers_are_not_text() {
        let mut b = buffer(&[("x", TokenKind::Plain)]);
        b.prepend(Token::DisplayStart(Display::Block));
        b.append(Token::DisplayEnd(Display::Block));
        assert_eq!(b.to_plain_string(), "x");
        b.map_text(|t| t.to_uppercase());
        assert_eq!(b.len(), 3);
        assert_eq!(b.to_plain_string(), "X");
    }

    #[test]
    fn test_wrap_formatting_keeps_inner_values() {
        let inner = FormattingAttributes::UNDEFINED.with_font_style(FontStyle::Normal);
        let mut b: TokenBuffer = vec![
            Token::Text {
                kind: TokenKind::Plain,
                text: "a".into(),
                formatting: inner,
            },
            Token::plain("b"),
        ]
        .into_iter()
        .collect();
        b.wrap_formatting(FormattingAttributes::UNDEFINED.with_font_style(FontStyle::Italic));
        assert_eq!(b.tokens()[0].formatting().font_style(), Some(FontStyle::Normal));
        assert_eq!(b.tokens()[1].formatting().font_style(), Some(FontStyle::Italic));
    }
}
