/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Locale definitions.
//!
//! A locale provides language-specific terms (looked up by name, form and
//! plurality) and the localized `text`/`numeric` date formats.

mod months;
pub mod raw;
mod types;

pub use months::{LocaleData, MonthNames};
pub use raw::{RawLocale, RawTermValue};
pub use types::*;

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while loading locale data.
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("unknown term form: {0}")]
    UnknownTermForm(String),

    #[error("unknown date form: {0}")]
    UnknownDateForm(String),

    #[error("unknown date part: {0}")]
    UnknownDatePart(String),

    #[error("failed to parse locale YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse locale JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A locale: terms plus localized date formats.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawLocale")]
pub struct Locale {
    /// The locale identifier (e.g., "en-US", "de-DE").
    pub lang: String,
    terms: HashMap<TermForm, HashMap<String, Term>>,
    dates: HashMap<DateForm, LocaleDate>,
}

impl Locale {
    /// An empty locale for `lang`.
    pub fn new(lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
            ..Default::default()
        }
    }

    /// The primary language subtag ("en" for "en-US").
    pub fn language(&self) -> &str {
        self.lang.split(['-', '_']).next().unwrap_or_default()
    }

    /// Add or replace a term.
    pub fn set_term(&mut self, term: Term) {
        self.terms
            .entry(term.form)
            .or_default()
            .insert(term.name.clone(), term);
    }

    /// Builder-style [`Locale::set_term`].
    pub fn with_term(mut self, name: &str, form: TermForm, single: &str, multiple: &str) -> Self {
        self.set_term(Term::new(name, form, single, multiple));
        self
    }

    pub fn set_date_format(&mut self, date: LocaleDate) {
        self.dates.insert(date.form, date);
    }

    /// Look up a term. Missing forms fall back (`verb-short` to `verb`,
    /// `symbol` to `short`, and anything to `long`).
    pub fn term(&self, name: &str, form: TermForm, plural: bool) -> Option<&str> {
        let mut current = Some(form);
        while let Some(f) = current {
            if let Some(term) = self.terms.get(&f).and_then(|m| m.get(name)) {
                return Some(term.value(plural));
            }
            current = f.fallback();
        }
        None
    }

    pub fn date_format(&self, form: DateForm) -> Option<&LocaleDate> {
        self.dates.get(&form)
    }

    /// Overlay another locale's terms and date formats on this one. Used for
    /// locale overrides embedded in a style.
    pub fn merge(&mut self, other: &Locale) {
        for terms in other.terms.values() {
            for term in terms.values() {
                self.set_term(term.clone());
            }
        }
        for date in other.dates.values() {
            self.set_date_format(date.clone());
        }
    }

    /// Load a locale from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LocaleError> {
        let raw: RawLocale = serde_yaml::from_str(yaml)?;
        Self::try_from(raw)
    }

    /// Load a locale from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, LocaleError> {
        let raw: RawLocale = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Create a new English (US) locale with the built-in terms.
    pub fn en_us() -> Self {
        let mut locale = Locale::new("en-US");

        let simple: &[(&str, &str)] = &[
            ("and", "and"),
            ("and others", "and others"),
            ("anonymous", "anonymous"),
            ("at", "at"),
            ("accessed", "accessed"),
            ("available at", "available at"),
            ("by", "by"),
            ("circa", "circa"),
            ("et-al", "et al."),
            ("forthcoming", "forthcoming"),
            ("from", "from"),
            ("ibid", "ibid."),
            ("in", "in"),
            ("in press", "in press"),
            ("no date", "no date"),
            ("online", "online"),
            ("presented at", "presented at the"),
            ("retrieved", "retrieved"),
            ("ad", "AD"),
            ("bc", "BC"),
            ("open-quote", "\u{201c}"),
            ("close-quote", "\u{201d}"),
            ("open-inner-quote", "\u{2018}"),
            ("close-inner-quote", "\u{2019}"),
            ("page-range-delimiter", "\u{2013}"),
            ("ordinal", "th"),
            ("ordinal-01", "st"),
            ("ordinal-02", "nd"),
            ("ordinal-03", "rd"),
            ("ordinal-11", "th"),
            ("ordinal-12", "th"),
            ("ordinal-13", "th"),
            ("long-ordinal-01", "first"),
            ("long-ordinal-02", "second"),
            ("long-ordinal-03", "third"),
            ("long-ordinal-04", "fourth"),
            ("long-ordinal-05", "fifth"),
            ("long-ordinal-06", "sixth"),
            ("long-ordinal-07", "seventh"),
            ("long-ordinal-08", "eighth"),
            ("long-ordinal-09", "ninth"),
            ("long-ordinal-10", "tenth"),
            ("season-01", "spring"),
            ("season-02", "summer"),
            ("season-03", "autumn"),
            ("season-04", "winter"),
        ];
        for (name, value) in simple {
            locale.set_term(Term::new(name, TermForm::Long, value, value));
        }
        locale.set_term(Term::new("circa", TermForm::Short, "c.", "c."));
        locale.set_term(Term::new("no date", TermForm::Short, "n.d.", "n.d."));
        locale.set_term(Term::new("and", TermForm::Symbol, "&", "&"));

        let months = [
            ("January", "Jan."),
            ("February", "Feb."),
            ("March", "Mar."),
            ("April", "Apr."),
            ("May", "May"),
            ("June", "Jun."),
            ("July", "Jul."),
            ("August", "Aug."),
            ("September", "Sept."),
            ("October", "Oct."),
            ("November", "Nov."),
            ("December", "Dec."),
        ];
        for (i, (long, short)) in months.iter().enumerate() {
            let name = format!("month-{:02}", i + 1);
            locale.set_term(Term::new(&name, TermForm::Long, long, long));
            locale.set_term(Term::new(&name, TermForm::Short, short, short));
        }

        // (name, long single, long plural, short single, short plural)
        let labels: &[(&str, &str, &str, &str, &str)] = &[
            ("book", "book", "books", "bk.", "bks."),
            ("chapter", "chapter", "chapters", "chap.", "chaps."),
            ("column", "column", "columns", "col.", "cols."),
            ("figure", "figure", "figures", "fig.", "figs."),
            ("folio", "folio", "folios", "fol.", "fols."),
            ("issue", "issue", "issues", "no.", "nos."),
            ("line", "line", "lines", "l.", "ll."),
            ("note", "note", "notes", "n.", "nn."),
            ("number", "number", "numbers", "no.", "nos."),
            ("opus", "opus", "opera", "op.", "opp."),
            ("page", "page", "pages", "p.", "pp."),
            ("paragraph", "paragraph", "paragraph", "para.", "paras."),
            ("part", "part", "parts", "pt.", "pts."),
            ("section", "section", "sections", "sec.", "secs."),
            ("sub verbo", "sub verbo", "sub verbis", "s.v.", "s.vv."),
            ("verse", "verse", "verses", "v.", "vv."),
            ("volume", "volume", "volumes", "vol.", "vols."),
            ("edition", "edition", "editions", "ed.", "eds."),
            ("editor", "editor", "editors", "ed.", "eds."),
            ("translator", "translator", "translators", "tran.", "trans."),
            ("director", "director", "directors", "dir.", "dirs."),
            ("illustrator", "illustrator", "illustrators", "ill.", "ills."),
            (
                "editortranslator",
                "editor & translator",
                "editors & translators",
                "ed. & tran.",
                "eds. & trans.",
            ),
        ];
        for (name, long, longs, short, shorts) in labels {
            locale.set_term(Term::new(name, TermForm::Long, long, longs));
            locale.set_term(Term::new(name, TermForm::Short, short, shorts));
        }
        locale.set_term(Term::new("page", TermForm::Symbol, "p.", "pp."));
        locale.set_term(Term::new("section", TermForm::Symbol, "§", "§§"));
        locale.set_term(Term::new("paragraph", TermForm::Symbol, "¶", "¶¶"));

        let verbs: &[(&str, &str, &str)] = &[
            ("editor", "edited by", "ed."),
            ("translator", "translated by", "trans."),
            ("director", "directed by", "dir."),
            ("illustrator", "illustrated by", "illus."),
            ("editortranslator", "edited & translated by", "ed. & trans."),
        ];
        for (name, verb, verb_short) in verbs {
            locale.set_term(Term::new(name, TermForm::Verb, verb, verb));
            locale.set_term(Term::new(name, TermForm::VerbShort, verb_short, verb_short));
        }

        locale.set_date_format(LocaleDate {
            form: DateForm::Text,
            parts: vec![
                DatePartTemplate::new(DatePartName::Month).with_suffix(" "),
                DatePartTemplate::new(DatePartName::Day).with_suffix(", "),
                DatePartTemplate::new(DatePartName::Year),
            ],
        });
        locale.set_date_format(LocaleDate {
            form: DateForm::Numeric,
            parts: vec![
                DatePartTemplate::new(DatePartName::Month)
                    .with_form("numeric-leading-zeros")
                    .with_suffix("/"),
                DatePartTemplate::new(DatePartName::Day)
                    .with_form("numeric-leading-zeros")
                    .with_suffix("/"),
                DatePartTemplate::new(DatePartName::Year),
            ],
        });

        locale
    }
}

impl TryFrom<RawLocale> for Locale {
    type Error = LocaleError;

    fn try_from(raw: RawLocale) -> Result<Self, Self::Error> {
        let mut locale = Locale::new(&raw.locale);
        for (name, value) in &raw.terms {
            match value {
                RawTermValue::Forms(forms) => {
                    for (form, v) in forms {
                        let form: TermForm = form.parse()?;
                        if let Some((single, multiple)) = v.single_multiple() {
                            locale.set_term(Term::new(name, form, single, multiple));
                        }
                    }
                }
                other => {
                    if let Some((single, multiple)) = other.single_multiple() {
                        locale.set_term(Term::new(name, TermForm::Long, single, multiple));
                    }
                }
            }
        }
        for (form, parts) in raw.dates {
            locale.set_date_format(LocaleDate {
                form: form.parse()?,
                parts,
            });
        }
        Ok(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_lookup_and_fallback() {
        let locale = Locale::en_us();
        assert_eq!(locale.term("page", TermForm::Long, false), Some("page"));
        assert_eq!(locale.term("page", TermForm::Short, true), Some("pp."));
        // no verb-short for "and": falls back through verb to long
        assert_eq!(locale.term("and", TermForm::VerbShort, false), Some("and"));
        assert_eq!(locale.term("and", TermForm::Symbol, false), Some("&"));
        assert_eq!(locale.term("volume", TermForm::Symbol, false), Some("vol."));
        assert_eq!(locale.term("nonexistent", TermForm::Long, false), None);
    }

    #[test]
    fn test_language() {
        assert_eq!(Locale::en_us().language(), "en");
        assert_eq!(Locale::new("de_AT").language(), "de");
        assert_eq!(Locale::new("fr").language(), "fr");
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
locale: de-DE
terms:
  and: und
  et-al: u. a.
  page:
    long: { single: Seite, multiple: Seiten }
    short: S.
  month-01:
    long: Januar
    short: Jan.
dates:
  text:
    - name: day
      suffix: ". "
    - name: month
      suffix: " "
    - name: year
"#;
        let locale = Locale::from_yaml_str(yaml).unwrap();
        assert_eq!(locale.language(), "de");
        assert_eq!(locale.term("and", TermForm::Long, false), Some("und"));
        assert_eq!(locale.term("page", TermForm::Long, true), Some("Seiten"));
        assert_eq!(locale.term("page", TermForm::Short, true), Some("S."));
        assert_eq!(locale.term("month-01", TermForm::Long, false), Some("Januar"));
        let text = locale.date_format(DateForm::Text).unwrap();
        assert_eq!(text.parts[0].name, DatePartName::Day);
        assert_eq!(text.parts[0].suffix.as_deref(), Some(". "));
    }

    #[test]
    fn test_unknown_term_form_is_rejected() {
        let yaml = "locale: xx\nterms:\n  page:\n    tiny: p\n";
        assert!(matches!(
            Locale::from_yaml_str(yaml),
            Err(LocaleError::UnknownTermForm(_))
        ));
    }

    #[test]
    fn test_merge_overrides_terms() {
        let mut locale = Locale::en_us();
        let overrides = Locale::new("en-US").with_term("et-al", TermForm::Long, "and colleagues", "and colleagues");
        locale.merge(&overrides);
        assert_eq!(locale.term("et-al", TermForm::Long, false), Some("and colleagues"));
        assert_eq!(locale.term("and", TermForm::Long, false), Some("and"));
    }
}
