/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Output format trait for serializing token buffers.

use crate::behavior::{Display, FontStyle, FontVariant, FontWeight, TextDecoration, VerticalAlign};
use crate::token::{Token, TokenBuffer, TokenKind};

/// How a [`TokenBuffer`] is turned into markup.
///
/// Implementations only say how each piece of formatting is written. The
/// walk over the tokens is shared by [`OutputFormat::format`].
pub trait OutputFormat {
    /// Escape raw text for the target format.
    fn text(&self, s: &str) -> String;

    /// Italic or oblique text.
    fn emph(&self, content: String) -> String;

    fn strong(&self, content: String) -> String;

    fn small_caps(&self, content: String) -> String;

    fn underline(&self, content: String) -> String {
        content
    }

    fn superscript(&self, content: String) -> String {
        content
    }

    fn subscript(&self, content: String) -> String {
        content
    }

    /// Hyperlink `content` to `url`.
    fn link(&self, _url: &str, content: String) -> String {
        content
    }

    /// Wrap the output of one `display` group.
    fn display(&self, _display: Display, content: String) -> String {
        content
    }

    /// Serialize `buffer`.
    fn format(&self, buffer: &TokenBuffer) -> String {
        let mut stack: Vec<(Option<Display>, String)> = vec![(None, String::new())];
        for token in buffer {
            match token {
                Token::Text {
                    kind,
                    text,
                    formatting,
                } => {
                    let mut out = self.text(text);
                    out = match kind {
                        TokenKind::Url => self.link(text, out),
                        TokenKind::Doi => self.link(&doi_url(text), out),
                        _ => out,
                    };
                    if matches!(formatting.font_style(), Some(FontStyle::Italic | FontStyle::Oblique)) {
                        out = self.emph(out);
                    }
                    if formatting.font_weight() == Some(FontWeight::Bold) {
                        out = self.strong(out);
                    }
                    if formatting.font_variant() == Some(FontVariant::SmallCaps) {
                        out = self.small_caps(out);
                    }
                    if formatting.text_decoration() == Some(TextDecoration::Underline) {
                        out = self.underline(out);
                    }
                    out = match formatting.vertical_align() {
                        Some(VerticalAlign::Sup) => self.superscript(out),
                        Some(VerticalAlign::Sub) => self.subscript(out),
                        _ => out,
                    };
                    if let Some((_, current)) = stack.last_mut() {
                        current.push_str(&out);
                    }
                }
                Token::DisplayStart(display) => stack.push((Some(*display), String::new())),
                Token::DisplayEnd(_) => close_group(self, &mut stack),
            }
        }
        // unbalanced markers are closed at the end
        while stack.len() > 1 {
            close_group(self, &mut stack);
        }
        stack.pop().map(|(_, out)| out).unwrap_or_default()
    }
}

fn close_group<F: OutputFormat + ?Sized>(format: &F, stack: &mut Vec<(Option<Display>, String)>) {
    if stack.len() < 2 {
        return;
    }
    if let Some((display, content)) = stack.pop() {
        let wrapped = match display {
            Some(display) => format.display(display, content),
            None => content,
        };
        if let Some((_, parent)) = stack.last_mut() {
            parent.push_str(&wrapped);
        }
    }
}

fn doi_url(doi: &str) -> String {
    if doi.starts_with("http://") || doi.starts_with("https://") {
        doi.to_string()
    } else {
        format!("https://doi.org/{}", doi)
    }
}
