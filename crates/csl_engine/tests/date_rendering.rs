/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod common;
use common::*;

use csl_core::{Date, Reference};
use csl_engine::StyleError;

const DAY_MONTH_YEAR: &str = r#"<date variable="issued">
    <date-part name="day" suffix=" "/>
    <date-part name="month" suffix=" "/>
    <date-part name="year"/>
</date>"#;

fn issued(date: Date) -> Reference {
    Reference::new("item1", "book").with_date("issued", date)
}

#[test]
fn test_single_date_joins_parts_by_affixes_only() {
    let style = style(
        r#"<date variable="issued">
             <date-part name="year" suffix=", "/>
             <date-part name="month" form="short"/>
           </date>"#,
    );
    assert_eq!(render(&style, &issued(Date::from_parts(&[2020, 5, 1]))), "2020, May");
    assert_eq!(render(&style, &issued(Date::from_parts(&[2020]))), "2020, ");
}

#[test]
fn test_range_within_month_merges_month_and_year() {
    let style = style(DAY_MONTH_YEAR);
    let date = Date::range(&[2019, 12, 14], &[2019, 12, 24]);
    assert_eq!(render(&style, &issued(date)), "14\u{2013}24 December 2019");
}

#[test]
fn test_range_across_years_joins_full_dates_once() {
    let style = style(
        r#"<date variable="issued">
             <date-part name="day" form="numeric-leading-zeros" suffix=" "/>
             <date-part name="month" suffix=" "/>
             <date-part name="year"/>
           </date>"#,
    );
    let date = Date::range(&[2018, 1, 1], &[2019, 12, 31]);
    assert_eq!(
        render(&style, &issued(date)),
        "01 January 2018\u{2013}31 December 2019"
    );
}

#[test]
fn test_range_across_months_shares_year() {
    let style = style(DAY_MONTH_YEAR);
    let date = Date::range(&[2019, 11, 28], &[2019, 12, 3]);
    assert_eq!(
        render(&style, &issued(date)),
        "28 November\u{2013}3 December 2019"
    );
}

#[test]
fn test_range_delimiter_from_date_part() {
    let style = style(
        r#"<date variable="issued">
             <date-part name="year" range-delimiter=" to "/>
           </date>"#,
    );
    let date = Date::range(&[1990], &[1995]);
    assert_eq!(render(&style, &issued(date)), "1990 to 1995");
}

#[test]
fn test_unequal_endpoints_render_first_only() {
    let style = style(
        r#"<date variable="issued">
             <date-part name="month" suffix=" "/>
             <date-part name="year"/>
           </date>"#,
    );
    let date = Date::range(&[2019, 5], &[2020]);
    assert_eq!(render(&style, &issued(date)), "May 2019");
}

#[test]
fn test_localized_forms() {
    let text = style(r#"<date variable="issued" form="text"/>"#);
    let numeric = style(r#"<date variable="issued" form="numeric"/>"#);
    let year_month = style(r#"<date variable="issued" form="text" date-parts="year-month"/>"#);
    let year = style(r#"<date variable="issued" form="numeric" date-parts="year"/>"#);

    let reference = issued(Date::from_parts(&[2020, 3, 15]));
    assert_eq!(render(&text, &reference), "March 15, 2020");
    assert_eq!(render(&numeric, &reference), "03/15/2020");
    assert_eq!(render(&year_month, &reference), "March 2020");
    assert_eq!(render(&year, &reference), "2020");
}

#[test]
fn test_localized_form_with_override() {
    let style = style(
        r#"<date variable="issued" form="text">
             <date-part name="month" form="short" strip-periods="true"/>
           </date>"#,
    );
    let reference = issued(Date::from_parts(&[2020, 3, 15]));
    assert_eq!(render(&style, &reference), "Mar 15, 2020");
}

#[test]
fn test_localized_range() {
    let style = style(r#"<date variable="issued" form="text"/>"#);
    let date = Date::range(&[2020, 3, 15], &[2020, 3, 20]);
    assert_eq!(render(&style, &issued(date)), "March 15\u{2013}20, 2020");
}

#[test]
fn test_literal_raw_and_season() {
    let style = style(
        r#"<date variable="issued" form="text"/>"#,
    );
    assert_eq!(render(&style, &issued(Date::literal("ca. 1900"))), "ca. 1900");
    assert_eq!(render(&style, &issued(Date::raw("2020-05-01"))), "May 1, 2020");
    assert_eq!(render(&style, &issued(Date::raw("sometime soon"))), "sometime soon");
    assert_eq!(
        render(&style, &issued(Date::default().with_season("Midsummer"))),
        "Midsummer"
    );
}

#[test]
fn test_season_replaces_missing_month() {
    let style = style(
        r#"<date variable="issued">
             <date-part name="month" suffix=" "/>
             <date-part name="year"/>
           </date>"#,
    );
    let date = Date::from_parts(&[2019]).with_season("1");
    assert_eq!(render(&style, &issued(date)), "spring 2019");
}

#[test]
fn test_eras() {
    let style = style(r#"<date variable="issued"><date-part name="year"/></date>"#);
    assert_eq!(render(&style, &issued(Date::from_parts(&[-44]))), "44BC");
    assert_eq!(render(&style, &issued(Date::from_parts(&[79]))), "79AD");
}

#[test]
fn test_missing_date_empties_group() {
    let style = style(
        r#"<group delimiter=" ">
             <text value="Published"/>
             <date variable="issued"><date-part name="year"/></date>
           </group>"#,
    );
    assert_eq!(render(&style, &Reference::new("item1", "book")), "");
    assert_eq!(
        render(&style, &issued(Date::from_parts(&[2020]))),
        "Published 2020"
    );
}

#[test]
fn test_uncertain_date() {
    let style = style(
        r#"<choose>
             <if is-uncertain-date="issued"><text term="circa" form="short" suffix=" "/></if>
           </choose>
           <date variable="issued"><date-part name="year"/></date>"#,
    );
    let date = Date::from_parts(&[1850]).with_circa(true);
    assert_eq!(render(&style, &issued(date)), "c. 1850");
    assert_eq!(render(&style, &issued(Date::from_parts(&[1850]))), "1850");
}

#[test]
fn test_date_configuration_errors() {
    let err = style_error(r#"<date><date-part name="year"/></date>"#);
    assert!(matches!(
        err,
        StyleError::MissingAttribute { ref element, attribute: "variable" } if element == "date"
    ));

    let err = style_error(
        r#"<date variable="issued"><date-part name="year"/><date-part name="year"/></date>"#,
    );
    assert!(matches!(err, StyleError::DuplicateDatePart(ref name) if name == "year"));

    let err = style_error(r#"<date variable="issued"><date-part name="hour"/></date>"#);
    assert!(matches!(err, StyleError::UnknownDatePart(_)));
}
