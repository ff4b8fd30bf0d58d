/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use csl_core::{Date, Locale, Name, Reference};
use csl_engine::{CitationItem, OutputFormat, PlainText, Style, StyleError};

// --- Helper Functions for Style Construction ---

/// Compile a style whose citation layout holds `layout`.
pub fn style(layout: &str) -> Style {
    style_with_macros("", layout)
}

/// Compile a style with the given macro definitions and citation layout.
pub fn style_with_macros(macros: &str, layout: &str) -> Style {
    let xml = format!(
        "<style>{}<citation><layout>{}</layout></citation></style>",
        macros, layout
    );
    Style::from_xml(&xml).unwrap_or_else(|e| panic!("style failed to compile: {}", e))
}

/// Compile a style expected to be rejected.
pub fn style_error(layout: &str) -> StyleError {
    let xml = format!("<style><citation><layout>{}</layout></citation></style>", layout);
    match Style::from_xml(&xml) {
        Ok(_) => panic!("style compiled but should not have: {}", layout),
        Err(e) => e,
    }
}

// --- Helper Functions for Rendering ---

pub fn render(style: &Style, reference: &Reference) -> String {
    render_with_locale(style, reference, &Locale::en_us())
}

pub fn render_with_locale(style: &Style, reference: &Reference, locale: &Locale) -> String {
    PlainText.format(&style.render_citation_item(reference, locale, None))
}

pub fn render_item(style: &Style, reference: &Reference, item: &CitationItem) -> String {
    PlainText.format(&style.render_citation_item(reference, &Locale::en_us(), Some(item)))
}

/// Render `layout` against `reference` in one step.
pub fn render_layout(layout: &str, reference: &Reference) -> String {
    render(&style(layout), reference)
}

// --- Helper Functions for Test Data Construction ---

/// A book with one author, an issued year and a title.
pub fn make_book(id: &str, family: &str, given: &str, year: i32, title: &str) -> Reference {
    Reference::new(id, "book")
        .with_names("author", vec![Name::new(family, given)])
        .with_date("issued", Date::from_parts(&[year]))
        .with_variable("title", title)
}

/// A book by several authors.
pub fn make_book_multi_author(id: &str, authors: &[(&str, &str)], year: i32, title: &str) -> Reference {
    let names = authors
        .iter()
        .map(|(family, given)| Name::new(family, given))
        .collect();
    Reference::new(id, "book")
        .with_names("author", names)
        .with_date("issued", Date::from_parts(&[year]))
        .with_variable("title", title)
}

pub fn make_article(id: &str, title: &str, container: &str, page: &str) -> Reference {
    Reference::new(id, "article-journal")
        .with_variable("title", title)
        .with_variable("container-title", container)
        .with_variable("page", page)
}
