/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! HTML output format.

use super::format::OutputFormat;
use crate::behavior::Display;

#[derive(Debug, Default, Clone, Copy)]
pub struct Html;

impl OutputFormat for Html {
    fn text(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                _ => out.push(c),
            }
        }
        out
    }

    fn emph(&self, content: String) -> String {
        format!("<i>{}</i>", content)
    }

    fn strong(&self, content: String) -> String {
        format!("<b>{}</b>", content)
    }

    fn small_caps(&self, content: String) -> String {
        format!(r#"<span style="font-variant:small-caps">{}</span>"#, content)
    }

    fn underline(&self, content: String) -> String {
        format!(r#"<span style="text-decoration:underline">{}</span>"#, content)
    }

    fn superscript(&self, content: String) -> String {
        format!("<sup>{}</sup>", content)
    }

    fn subscript(&self, content: String) -> String {
        format!("<sub>{}</sub>", content)
    }

    fn link(&self, url: &str, content: String) -> String {
        format!(r#"<a href="{}">{}</a>"#, self.text(url), content)
    }

    fn display(&self, display: Display, content: String) -> String {
        format!(r#"<div class="csl-{}">{}</div>"#, display.as_str(), content)
    }
}
