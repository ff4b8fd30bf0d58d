/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Value parsers for bibliographic data.
//!
//! Every high-level entry point in this crate is total: input that does not
//! match the expected grammar degrades to a literal or raw representation
//! instead of returning an error. The low-level `winnow` parsers used to build
//! them are exposed where they are useful on their own.

pub mod any_date;
pub mod date;
pub mod names;
pub mod number;
pub mod page;
pub mod page_format;

pub use any_date::{AnyDateParser, AnyDateParsers, ParsedDate};
pub use names::parse_names;
pub use number::{is_numeric, parse_locators, tokenize, NumberElement, NumberToken, NumberTokenKind};
pub use page::{parse_pages, PageRange, PageRanges};
pub use page_format::PageRangeFormat;
