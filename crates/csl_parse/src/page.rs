/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Page expression parser.
//!
//! Accepts comma-separated pages and ranges such as `10-20, 30--40, 45`.
//! Range dashes may be repeated hyphens or en-dashes, optionally surrounded
//! by spaces. `??` stands for an unknown page.

use winnow::ascii::space0;
use winnow::combinator::{alt, delimited, opt, preceded, separated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

const UNKNOWN_PAGE: &str = "??";

/// A single page or page range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    /// Normalized text of the range (`10-20`), or the input itself when it
    /// could not be parsed.
    pub literal: String,
    pub first: Option<String>,
    pub last: Option<String>,
    /// `None` when either end is not a plain number.
    pub number_of_pages: Option<u32>,
    /// True for anything written as a range, even `10-10`.
    pub multiple_pages: bool,
}

impl PageRange {
    /// A range that carries only its literal text.
    pub fn literal(text: &str) -> Self {
        Self {
            literal: text.to_string(),
            first: None,
            last: None,
            number_of_pages: None,
            multiple_pages: false,
        }
    }
}

/// The ranges of one page expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRanges {
    ranges: Vec<PageRange>,
}

impl PageRanges {
    pub fn ranges(&self) -> &[PageRange] {
        &self.ranges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageRange> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PageRange> {
        self.ranges.get(index)
    }

    /// All literals joined with `", "`.
    pub fn literal(&self) -> String {
        self.ranges
            .iter()
            .map(|r| r.literal.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The lowest numeric first page, or the first range's first page when
    /// no range starts with a number.
    pub fn first(&self) -> Option<&str> {
        self.ranges
            .iter()
            .filter_map(|r| {
                let first = r.first.as_deref()?;
                first.parse::<u32>().ok().map(|n| (n, first))
            })
            .min_by_key(|(n, _)| *n)
            .map(|(_, first)| first)
            .or_else(|| self.ranges.first().and_then(|r| r.first.as_deref()))
    }

    /// Sum over all ranges; `None` if any range has an unknown count or the
    /// sum does not fit.
    pub fn number_of_pages(&self) -> Option<u32> {
        self.ranges
            .iter()
            .try_fold(0u32, |total, r| total.checked_add(r.number_of_pages?))
    }

    pub fn is_multiple_pages(&self) -> bool {
        self.ranges.len() > 1 || self.ranges.iter().any(|r| r.multiple_pages)
    }
}

impl<'a> IntoIterator for &'a PageRanges {
    type Item = &'a PageRange;
    type IntoIter = std::slice::Iter<'a, PageRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

fn page<'s>(input: &mut &'s str) -> Result<&'s str, ErrMode<ContextError>> {
    alt((
        UNKNOWN_PAGE,
        take_while(1.., |c: char| c.is_alphanumeric()),
    ))
    .parse_next(input)
}

fn dash(input: &mut &str) -> Result<(), ErrMode<ContextError>> {
    delimited(space0, take_while(1.., ['-', '\u{2013}']), space0)
        .void()
        .parse_next(input)
}

fn range(input: &mut &str) -> Result<PageRange, ErrMode<ContextError>> {
    let ((first, last), taken) = (page, opt(preceded(dash, page)))
        .with_taken()
        .parse_next(input)?;
    Ok(build_range(first, last, taken))
}

/// Parse a page expression into its ranges.
pub fn ranges(input: &mut &str) -> Result<Vec<PageRange>, ErrMode<ContextError>> {
    separated(1.., range, (space0, ',', space0)).parse_next(input)
}

fn build_range(first: &str, last: Option<&str>, taken: &str) -> PageRange {
    let Some(last) = last else {
        return PageRange {
            literal: first.to_string(),
            first: Some(first.to_string()),
            last: Some(first.to_string()),
            number_of_pages: first.parse::<u32>().ok().map(|_| 1),
            multiple_pages: false,
        };
    };

    if first == UNKNOWN_PAGE || last == UNKNOWN_PAGE {
        return PageRange {
            literal: taken.to_string(),
            first: Some(first.to_string()),
            last: Some(last.to_string()),
            number_of_pages: None,
            multiple_pages: true,
        };
    }

    let number_of_pages = match (first.parse::<u32>(), last.parse::<u32>()) {
        (Ok(f), Ok(l)) if l >= f => (l - f).checked_add(1),
        _ => None,
    };
    let literal = if first == last {
        first.to_string()
    } else {
        format!("{}-{}", first, last)
    };
    PageRange {
        literal,
        first: Some(first.to_string()),
        last: Some(last.to_string()),
        number_of_pages,
        multiple_pages: true,
    }
}

/// Parse a page expression. Unparsable input yields a single literal range.
pub fn parse_pages(pages: &str) -> PageRanges {
    let trimmed = pages.trim();
    let mut input = trimmed;
    match ranges(&mut input) {
        Ok(ranges) if input.trim().is_empty() => PageRanges { ranges },
        _ => {
            tracing::trace!(pages = %pages, "page expression kept as literal");
            PageRanges {
                ranges: vec![PageRange::literal(pages)],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page() {
        let prs = parse_pages("10");
        assert_eq!(prs.number_of_pages(), Some(1));
        assert!(!prs.is_multiple_pages());
        assert_eq!(prs.len(), 1);
        let pr = prs.get(0).unwrap();
        assert_eq!(pr.first.as_deref(), Some("10"));
        assert_eq!(pr.last.as_deref(), Some("10"));
    }

    #[test]
    fn test_simple_range_spellings() {
        for input in ["10-20", "10 - 20", "10--20", "10---20", "10\u{2013}20"] {
            let prs = parse_pages(input);
            assert_eq!(prs.literal(), "10-20", "{}", input);
            assert_eq!(prs.first(), Some("10"));
            assert_eq!(prs.number_of_pages(), Some(11));
            assert!(prs.is_multiple_pages());
            assert_eq!(prs.get(0).unwrap().last.as_deref(), Some("20"));
        }
    }

    #[test]
    fn test_complex() {
        let prs = parse_pages("10-20, 30--40, 45, 50\u{2013}55, 5");
        assert_eq!(prs.literal(), "10-20, 30-40, 45, 50-55, 5");
        assert_eq!(prs.first(), Some("5"));
        assert_eq!(prs.number_of_pages(), Some(30));
        assert!(prs.is_multiple_pages());
        assert_eq!(prs.len(), 5);
        assert!(!prs.get(2).unwrap().multiple_pages);
        assert_eq!(prs.get(3).unwrap().number_of_pages, Some(6));
    }

    #[test]
    fn test_unknown_pages() {
        let prs = parse_pages("10 - ??");
        assert_eq!(prs.literal(), "10 - ??");
        assert_eq!(prs.first(), Some("10"));
        assert_eq!(prs.number_of_pages(), None);
        assert!(prs.is_multiple_pages());

        let prs = parse_pages("??");
        assert_eq!(prs.first(), Some("??"));
        assert!(!prs.is_multiple_pages());
        assert_eq!(prs.number_of_pages(), None);
    }

    #[test]
    fn test_single_page_range() {
        let prs = parse_pages("10-10");
        assert_eq!(prs.literal(), "10");
        assert_eq!(prs.number_of_pages(), Some(1));
        assert!(prs.is_multiple_pages());
    }

    #[test]
    fn test_two_pages() {
        let prs = parse_pages("10,11");
        assert_eq!(prs.literal(), "10, 11");
        assert_eq!(prs.number_of_pages(), Some(2));
        assert!(prs.is_multiple_pages());
        assert!(!prs.get(0).unwrap().multiple_pages);
    }

    #[test]
    fn test_literal_fallback() {
        for input in ["A page", "A,,page"] {
            let prs = parse_pages(input);
            assert_eq!(prs.literal(), input);
            assert_eq!(prs.first(), None);
            assert_eq!(prs.number_of_pages(), None);
            assert!(!prs.is_multiple_pages());
        }
    }

    #[test]
    fn test_page_counts_that_do_not_fit() {
        let prs = parse_pages("0-4294967295");
        assert_eq!(prs.get(0).unwrap().number_of_pages, None);
        assert_eq!(prs.number_of_pages(), None);
        assert!(prs.is_multiple_pages());

        let prs = parse_pages("1-4294967295, 1-2");
        assert_eq!(prs.get(0).unwrap().number_of_pages, Some(u32::MAX));
        assert_eq!(prs.get(1).unwrap().number_of_pages, Some(2));
        assert_eq!(prs.number_of_pages(), None);
    }
}
