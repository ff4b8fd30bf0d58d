/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod common;
use common::*;

use csl_core::{Name, Reference};

#[test]
fn test_substituted_variable_is_not_rendered_again() {
    let style = style(
        r#"<names variable="author">
             <name/>
             <substitute><text variable="title"/></substitute>
           </names>
           <text variable="title" prefix=", "/>
           <date variable="issued" prefix=", "><date-part name="year"/></date>"#,
    );
    let anonymous = Reference::new("item1", "book")
        .with_variable("title", "Beowulf")
        .with_date("issued", csl_core::Date::from_parts(&[1000]));
    assert_eq!(render(&style, &anonymous), "Beowulf, 1000");

    let authored = make_book("item1", "Heaney", "Seamus", 1999, "Beowulf");
    assert_eq!(render(&style, &authored), "Seamus Heaney, Beowulf, 1999");
}

#[test]
fn test_first_non_empty_candidate_wins() {
    let style = style(
        r#"<names variable="author">
             <substitute>
               <names variable="editor"/>
               <text variable="container-title"/>
               <text variable="title"/>
             </substitute>
           </names>"#,
    );
    let reference = Reference::new("item1", "article")
        .with_variable("title", "Title")
        .with_variable("container-title", "Journal");
    assert_eq!(render(&style, &reference), "Journal");
}

#[test]
fn test_bare_names_inherit_parent_configuration() {
    let style = style(
        r#"<names variable="author" prefix="[" suffix="]">
             <name and="text" initialize-with=". "/>
             <label form="short" prefix=" (" suffix=")"/>
             <substitute><names variable="editor"/></substitute>
           </names>
           <names variable="editor" prefix=" / "/>"#,
    );
    let reference = Reference::new("item1", "book")
        .with_names("editor", vec![Name::new("Doe", "Jane"), Name::new("Roe", "Rick")]);
    assert_eq!(render(&style, &reference), "[J. Doe and R. Roe (eds.)]");
}

#[test]
fn test_configured_names_inherit_parent_configuration() {
    let style = style(
        r#"<names variable="author">
             <name and="symbol"/>
             <substitute>
               <names variable="editor" prefix="ignored: "><name form="short"/><label form="short"/></names>
             </substitute>
           </names>"#,
    );
    let reference = Reference::new("item1", "book")
        .with_names("editor", vec![Name::new("Doe", "Jane"), Name::new("Roe", "Rick")]);
    assert_eq!(render(&style, &reference), "Jane Doe & Rick Roe");
}

#[test]
fn test_nothing_to_substitute() {
    let style = style(
        r#"<names variable="author" suffix=". ">
             <substitute><names variable="editor"/><text variable="title"/></substitute>
           </names>
           <text value="end"/>"#,
    );
    assert_eq!(render(&style, &Reference::new("item1", "book")), "end");
}

#[test]
fn test_substitute_through_macro() {
    let style = style_with_macros(
        r#"<macro name="title"><text variable="title" font-style="italic"/></macro>"#,
        r#"<names variable="author"><substitute><text macro="title"/></substitute></names>
           <text macro="title" prefix=" "/>"#,
    );
    let reference = Reference::new("item1", "book").with_variable("title", "Anonymous");
    assert_eq!(render(&style, &reference), "_Anonymous_");
}
