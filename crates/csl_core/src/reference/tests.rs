/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use super::*;

#[test]
fn test_parse_csl_json() {
    let json = r#"{
        "id": "kuhn1962",
        "type": "book",
        "author": [{"family": "Kuhn", "given": "Thomas S."}],
        "title": "The Structure of Scientific Revolutions",
        "issued": {"date-parts": [[1962]]},
        "publisher": "University of Chicago Press",
        "publisher-place": "Chicago",
        "volume": 2
    }"#;

    let reference: Reference = serde_json::from_str(json).unwrap();
    assert_eq!(reference.id, "kuhn1962");
    assert_eq!(reference.ref_type, "book");
    assert_eq!(
        reference.names("author").unwrap()[0].family.as_deref(),
        Some("Kuhn")
    );
    assert_eq!(reference.date("issued").unwrap().year(), Some(1962));
    assert_eq!(reference.variable("publisher-place"), Some("Chicago"));
    assert_eq!(reference.variable("volume"), Some("2"));
    assert_eq!(reference.variable("edition"), None);
}

#[test]
fn test_numeric_id_and_string_date_parts() {
    let json = r#"{
        "id": 42,
        "type": "article-journal",
        "issued": {"date-parts": [["2019", "12", 14], [2019, 12, "24"]], "circa": "1"}
    }"#;

    let reference: Reference = serde_json::from_str(json).unwrap();
    assert_eq!(reference.id, "42");
    let issued = reference.date("issued").unwrap();
    assert!(issued.circa);
    assert!(issued.is_range());
    assert_eq!(
        issued.value(),
        Some(DateValue::Parts {
            first: &[2019, 12, 14],
            last: &[2019, 12, 24],
        })
    );
}

#[test]
fn test_date_value_priority() {
    let raw = Date::raw("Spring 2004");
    assert_eq!(raw.value(), Some(DateValue::Raw("Spring 2004")));

    let literal = Date {
        literal: Some("n.d.".to_string()),
        raw: Some("ignored".to_string()),
        ..Default::default()
    };
    assert_eq!(literal.value(), Some(DateValue::Literal("n.d.")));

    let empty = Date {
        date_parts: vec![vec![]],
        ..Default::default()
    };
    assert!(empty.is_empty());
}

#[test]
fn test_empty_fields_are_absent() {
    let reference = Reference::new("x", "book")
        .with_variable("title", "")
        .with_names("author", vec![]);
    assert_eq!(reference.variable("title"), None);
    assert_eq!(reference.names("author"), None);
}

#[test]
fn test_literal_name() {
    let json = r#"{"id": "a", "author": [{"literal": "World Health Organization"}]}"#;
    let reference: Reference = serde_json::from_str(json).unwrap();
    let author = &reference.names("author").unwrap()[0];
    assert!(author.is_literal());
    assert_eq!(author.family, None);
}
