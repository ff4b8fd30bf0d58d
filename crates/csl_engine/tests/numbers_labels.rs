/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod common;
use common::*;

use csl_core::Reference;
use csl_engine::{CitationItem, EngineConfig, Style, StyleError};

fn paged(page: &str) -> Reference {
    make_article("item1", "Title", "Journal", page)
}

fn page_style(format: Option<&str>) -> Style {
    let attribute = format
        .map(|f| format!(r#" page-range-format="{}""#, f))
        .unwrap_or_default();
    Style::from_xml(&format!(
        r#"<style{}><citation><layout><text variable="page"/></layout></citation></style>"#,
        attribute
    ))
    .unwrap()
}

#[test]
fn test_page_delimiter_from_locale() {
    assert_eq!(render(&page_style(None), &paged("100-104")), "100\u{2013}104");
}

#[test]
fn test_page_range_formats() {
    assert_eq!(render(&page_style(Some("minimal")), &paged("100-104")), "100\u{2013}4");
    assert_eq!(render(&page_style(Some("expanded")), &paged("100-4")), "100\u{2013}104");
    assert_eq!(
        render(&page_style(Some("chicago-16")), &paged("321-325, 1536-1538")),
        "321\u{2013}25, 1536\u{2013}38"
    );
    // unknown values in a style are ignored
    assert_eq!(render(&page_style(Some("tiny")), &paged("100-104")), "100\u{2013}104");
}

#[test]
fn test_huge_page_numbers() {
    assert_eq!(
        render(&page_style(Some("minimal")), &paged("0-4294967295, 1-2")),
        "0\u{2013}4294967295, 1\u{2013}2"
    );
}

#[test]
fn test_page_range_format_from_config() {
    let xml = r#"<style page-range-format="minimal"><citation><layout><text variable="page"/></layout></citation></style>"#;
    let config = EngineConfig {
        page_range_format: Some("expanded".to_string()),
        ..Default::default()
    };
    let style = Style::from_xml_with_config(xml, &config).unwrap();
    assert_eq!(render(&style, &paged("100-4")), "100\u{2013}104");

    let config = EngineConfig {
        page_range_format: Some("tiny".to_string()),
        ..Default::default()
    };
    let err = Style::from_xml_with_config(xml, &config).unwrap_err();
    assert!(matches!(err, StyleError::UnknownPageRangeFormat(ref f) if f == "tiny"));
}

#[test]
fn test_page_label_plural() {
    let style = style(r#"<label variable="page" form="short" suffix=" "/><text variable="page"/>"#);
    assert_eq!(render(&style, &paged("12")), "p. 12");
    assert_eq!(render(&style, &paged("12-15")), "pp. 12\u{2013}15");
    assert_eq!(render(&style, &Reference::new("item1", "book")), "");

    let never = style_with_macros("", r#"<label variable="page" form="short" plural="never"/>"#);
    assert_eq!(render(&never, &paged("12-15")), "p.");
}

#[test]
fn test_label_requires_variable() {
    let err = style_error(r#"<label form="short"/>"#);
    assert!(matches!(err, StyleError::MissingAttribute { attribute: "variable", .. }));
    let err = style_error(r#"<label variable="page" form="tiny"/>"#);
    assert!(matches!(err, StyleError::UnknownTermForm(ref f) if f == "tiny"));
}

#[test]
fn test_locator_labels() {
    let style = style(r#"<label variable="locator" form="short" suffix=" "/><text variable="locator"/>"#);
    let reference = Reference::new("item1", "book");
    let cite = |locator: &str, label: Option<&str>| CitationItem {
        locator: Some(locator.to_string()),
        label: label.map(str::to_string),
        ..Default::default()
    };

    assert_eq!(render_item(&style, &reference, &cite("3", Some("chapter"))), "chap. 3");
    assert_eq!(render_item(&style, &reference, &cite("3", None)), "p. 3");
    assert_eq!(render_item(&style, &reference, &cite("p. 4", None)), "p. 4");
    assert_eq!(
        render_item(&style, &reference, &cite("ch. 2, 3; p. 4, 5", None)),
        "chaps. 2, 3; pp. 4, 5"
    );
}

#[test]
fn test_number_forms() {
    let cases = [
        ("numeric", "2", "2"),
        ("ordinal", "2", "2nd"),
        ("ordinal", "13", "13th"),
        ("long-ordinal", "2", "second"),
        ("roman", "12", "xii"),
        ("roman", "1-3", "i-iii"),
        ("ordinal", "Revised", "Revised"),
    ];
    for (form, value, expected) in cases {
        let layout = format!(r#"<number variable="edition" form="{}"/>"#, form);
        let reference = Reference::new("item1", "book").with_variable("edition", value);
        assert_eq!(render_layout(&layout, &reference), expected, "{} {}", form, value);
    }
}

#[test]
fn test_number_text_case() {
    let style = style(r#"<number variable="volume" form="roman" text-case="uppercase" prefix="vol. "/>"#);
    let reference = Reference::new("item1", "book").with_variable("volume", "4");
    assert_eq!(render(&style, &reference), "vol. IV");
}
