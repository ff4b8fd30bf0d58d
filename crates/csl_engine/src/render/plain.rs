/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Plain text output format.

use super::format::OutputFormat;

/// Text only, with light markdown-style emphasis.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainText;

impl OutputFormat for PlainText {
    fn text(&self, s: &str) -> String {
        s.to_string()
    }

    fn emph(&self, content: String) -> String {
        if content.is_empty() {
            return content;
        }
        format!("_{}_", content)
    }

    fn strong(&self, content: String) -> String {
        if content.is_empty() {
            return content;
        }
        format!("**{}**", content)
    }

    fn small_caps(&self, content: String) -> String {
        content
    }
}
