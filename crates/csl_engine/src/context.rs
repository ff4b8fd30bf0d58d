/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Per-render state.
//!
//! A [`RenderScope`] holds what one render pass shares: the record, the
//! locale, the style's macros, the set of suppressed variables and the
//! registered variable listeners. A [`RenderContext`] is a view of the
//! scope with its own output buffer. Every behavior and composite element
//! renders into a [`RenderContext::child`] to inspect the result before
//! merging it upward.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use csl_core::{Date, Locale, Name, Reference, TermForm};
use csl_parse::{AnyDateParsers, PageRangeFormat, ParsedDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::behavior::NameInheritableAttributes;
use crate::element::{Label, Macro};
use crate::listener::{ListenerId, VariableListener, VariableValue};
use crate::token::{Token, TokenBuffer, TokenKind};

/// Where a cite stands relative to earlier cites of the same item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    First,
    Subsequent,
    Ibid,
    IbidWithLocator,
    NearNote,
}

impl Position {
    /// Whether a `position` condition value holds at this position.
    pub fn satisfies(self, test: &str) -> bool {
        match test {
            "first" => self == Position::First,
            "subsequent" => self != Position::First,
            "ibid" => matches!(self, Position::Ibid | Position::IbidWithLocator),
            "ibid-with-locator" => self == Position::IbidWithLocator,
            "near-note" => self == Position::NearNote,
            _ => false,
        }
    }
}

/// Per-cite data supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CitationItem {
    pub locator: Option<String>,
    /// Locator label term, such as `page` or `chapter`.
    pub label: Option<String>,
    pub position: Option<Position>,
}

/// Form requested for a string variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VariableForm {
    #[default]
    Long,
    Short,
}

/// Variables with a `-short` counterpart used for `form="short"`.
const SHORT_FORMS: &[&str] = &["title", "container-title", "collection-title"];

/// State shared by all contexts of one render pass.
pub struct RenderScope<'a> {
    reference: &'a Reference,
    locale: &'a Locale,
    macros: Option<&'a IndexMap<String, Macro>>,
    item: Option<&'a CitationItem>,
    date_parsers: Option<&'a AnyDateParsers>,
    fallback_locale: Option<&'a Locale>,
    page_range_format: Option<PageRangeFormat>,
    suppressed: RefCell<HashSet<String>>,
    listeners: RefCell<Vec<(ListenerId, Rc<dyn VariableListener>)>>,
    next_listener: Cell<usize>,
    last_label: RefCell<Option<Label>>,
}

impl<'a> RenderScope<'a> {
    pub fn new(reference: &'a Reference, locale: &'a Locale) -> Self {
        Self {
            reference,
            locale,
            macros: None,
            item: None,
            date_parsers: None,
            fallback_locale: None,
            page_range_format: None,
            suppressed: RefCell::new(HashSet::new()),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            last_label: RefCell::new(None),
        }
    }

    pub fn with_macros(mut self, macros: &'a IndexMap<String, Macro>) -> Self {
        self.macros = Some(macros);
        self
    }

    pub fn with_item(mut self, item: Option<&'a CitationItem>) -> Self {
        self.item = item;
        self
    }

    /// Enable free-text parsing of raw dates, trying the active locale
    /// first and then `fallback`.
    pub fn with_date_parsers(mut self, parsers: &'a AnyDateParsers, fallback: &'a Locale) -> Self {
        self.date_parsers = Some(parsers);
        self.fallback_locale = Some(fallback);
        self
    }

    pub fn with_page_range_format(mut self, format: Option<PageRangeFormat>) -> Self {
        self.page_range_format = format;
        self
    }
}

/// A view of a [`RenderScope`] with its own output buffer.
pub struct RenderContext<'a> {
    scope: &'a RenderScope<'a>,
    names: Rc<NameInheritableAttributes>,
    result: TokenBuffer,
}

impl<'a> RenderContext<'a> {
    pub fn new(scope: &'a RenderScope<'a>) -> Self {
        Self {
            scope,
            names: Rc::new(NameInheritableAttributes::default()),
            result: TokenBuffer::new(),
        }
    }

    /// A context sharing everything but the output buffer.
    pub fn child(&self) -> RenderContext<'a> {
        RenderContext {
            scope: self.scope,
            names: Rc::clone(&self.names),
            result: TokenBuffer::new(),
        }
    }

    /// A child whose inherited name attributes are overridden by the fields
    /// set in `attributes`.
    pub fn child_with_name_attributes(&self, attributes: &NameInheritableAttributes) -> RenderContext<'a> {
        RenderContext {
            scope: self.scope,
            names: Rc::new(self.names.merge(attributes)),
            result: TokenBuffer::new(),
        }
    }

    pub fn name_attributes(&self) -> &NameInheritableAttributes {
        &self.names
    }

    pub fn locale(&self) -> &'a Locale {
        self.scope.locale
    }

    pub fn reference(&self) -> &'a Reference {
        self.scope.reference
    }

    pub fn item(&self) -> Option<&'a CitationItem> {
        self.scope.item
    }

    pub fn position(&self) -> Option<Position> {
        self.scope.item.and_then(|i| i.position)
    }

    pub fn page_range_format(&self) -> Option<PageRangeFormat> {
        self.scope.page_range_format
    }

    pub fn macro_named(&self, name: &str) -> Option<&'a Macro> {
        self.scope.macros.and_then(|m| m.get(name))
    }

    fn notify(&self, name: &str, value: Option<VariableValue<'_>>) {
        // Listeners may be registered while one is running, so iterate a copy.
        let listeners: Vec<Rc<dyn VariableListener>> = self
            .scope
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener.on_fetch(name, value);
        }
    }

    /// Report a fetch made without going through the lookup methods.
    pub fn report(&self, name: &str, value: Option<VariableValue<'_>>) {
        self.notify(name, value);
    }

    fn lookup_string(&self, name: &str, form: VariableForm) -> Option<&'a str> {
        if self.is_suppressed(name) {
            return None;
        }
        let reference = self.scope.reference;
        if name == "locator" {
            if let Some(locator) = self.scope.item.and_then(|i| i.locator.as_deref()) {
                return Some(locator).filter(|l| !l.is_empty());
            }
        }
        if form == VariableForm::Short && SHORT_FORMS.contains(&name) {
            if let Some(short) = reference.variable(&format!("{}-short", name)) {
                return Some(short);
            }
        }
        reference.variable(name)
    }

    /// A string variable. `year-suffix` never notifies listeners.
    pub fn string_variable(&self, name: &str, form: VariableForm) -> Option<&'a str> {
        let value = self.lookup_string(name, form);
        if name != "year-suffix" {
            self.notify(name, value.map(VariableValue::Text));
        }
        value
    }

    /// A string variable, without notifying listeners.
    pub fn string_variable_silent(&self, name: &str, form: VariableForm) -> Option<&'a str> {
        self.lookup_string(name, form)
    }

    /// A date variable. With `notify` off the caller is expected to
    /// [`report`](Self::report) the outcome itself.
    pub fn date_variable(&self, name: &str, notify: bool) -> Option<&'a Date> {
        let value = if self.is_suppressed(name) {
            None
        } else {
            self.scope.reference.date(name)
        };
        if notify {
            self.notify(name, value.map(VariableValue::Date));
        }
        value
    }

    pub fn name_variable(&self, name: &str) -> Option<&'a [Name]> {
        let value = if self.is_suppressed(name) {
            None
        } else {
            self.scope.reference.names(name)
        };
        self.notify(name, value.map(VariableValue::Names));
        value
    }

    /// Any kind of variable, checked as string, date, then name list.
    pub fn variable(&self, name: &str, notify: bool) -> Option<VariableValue<'a>> {
        let value = if self.is_suppressed(name) {
            None
        } else {
            self.lookup_string(name, VariableForm::Long)
                .map(VariableValue::Text)
                .or_else(|| self.scope.reference.date(name).map(VariableValue::Date))
                .or_else(|| self.scope.reference.names(name).map(VariableValue::Names))
        };
        if notify {
            self.notify(name, value);
        }
        value
    }

    pub fn term(&self, name: &str, form: TermForm, plural: bool) -> Option<&'a str> {
        self.scope.locale.term(name, form, plural)
    }

    /// Free-text parse of a raw date string.
    pub fn parse_date(&self, raw: &str) -> Option<ParsedDate> {
        let parsers = self.scope.date_parsers?;
        let mut locales = vec![self.scope.locale];
        if let Some(fallback) = self.scope.fallback_locale {
            if fallback.lang != self.scope.locale.lang {
                locales.push(fallback);
            }
        }
        parsers.parse(raw, &locales).filter(|d| d.year.is_some())
    }

    pub fn suppress_variable(&self, name: &str) {
        self.scope.suppressed.borrow_mut().insert(name.to_string());
    }

    pub fn is_suppressed(&self, name: &str) -> bool {
        self.scope.suppressed.borrow().contains(name)
    }

    pub fn add_listener(&self, listener: Rc<dyn VariableListener>) -> ListenerId {
        let id = ListenerId(self.scope.next_listener.get());
        self.scope.next_listener.set(id.0 + 1);
        self.scope.listeners.borrow_mut().push((id, listener));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) {
        self.scope.listeners.borrow_mut().retain(|(i, _)| *i != id);
    }

    pub(crate) fn set_last_label(&self, label: &Label) {
        *self.scope.last_label.borrow_mut() = Some(label.clone());
    }

    pub(crate) fn last_label(&self) -> Option<Label> {
        self.scope.last_label.borrow().clone()
    }

    pub fn emit(&mut self, text: &str) {
        self.result.append_text(text, TokenKind::Plain);
    }

    pub fn emit_kind(&mut self, text: &str, kind: TokenKind) {
        self.result.append_text(text, kind);
    }

    pub fn emit_token(&mut self, token: Token) {
        self.result.append(token);
    }

    pub fn emit_buffer(&mut self, buffer: TokenBuffer) {
        self.result.append_buffer(buffer);
    }

    pub fn result(&self) -> &TokenBuffer {
        &self.result
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    pub fn into_result(self) -> TokenBuffer {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::{CollectingVariableListener, CountingVariableListener};

    fn reference() -> Reference {
        Reference::new("r1", "book")
            .with_variable("title", "A Long Title")
            .with_variable("title-short", "Short")
            .with_variable("container-title", "Journal")
            .with_variable("year-suffix", "a")
            .with_date("issued", Date::from_parts(&[2020]))
            .with_names("author", vec![Name::new("Doe", "Jane")])
    }

    #[test]
    fn test_short_form_falls_back() {
        let r = reference();
        let locale = Locale::en_us();
        let scope = RenderScope::new(&r, &locale);
        let ctx = RenderContext::new(&scope);
        assert_eq!(ctx.string_variable("title", VariableForm::Short), Some("Short"));
        assert_eq!(ctx.string_variable("title", VariableForm::Long), Some("A Long Title"));
        assert_eq!(
            ctx.string_variable("container-title", VariableForm::Short),
            Some("Journal")
        );
    }

    #[test]
    fn test_listeners_and_suppression() {
        let r = reference();
        let locale = Locale::en_us();
        let scope = RenderScope::new(&r, &locale);
        let ctx = RenderContext::new(&scope);

        let collecting = Rc::new(CollectingVariableListener::new());
        let counting = Rc::new(CountingVariableListener::new());
        let a = ctx.add_listener(collecting.clone());
        let b = ctx.child().add_listener(counting.clone());

        ctx.string_variable("title", VariableForm::Long);
        ctx.string_variable("year-suffix", VariableForm::Long);
        ctx.child().name_variable("editor");
        ctx.date_variable("issued", false);
        ctx.variable("author", false);
        ctx.remove_listener(a);
        ctx.variable("issued", true);
        ctx.remove_listener(b);

        assert_eq!(collecting.called(), ["title", "editor"]);
        assert_eq!((counting.called(), counting.empty()), (3, 1));

        ctx.child().suppress_variable("title");
        assert!(ctx.is_suppressed("title"));
        assert_eq!(ctx.string_variable("title", VariableForm::Long), None);
        assert!(ctx.variable("title", false).is_none());
    }

    #[test]
    fn test_locator_comes_from_item() {
        let r = reference().with_variable("locator", "99");
        let locale = Locale::en_us();
        let item = CitationItem {
            locator: Some("12".into()),
            label: Some("chapter".into()),
            position: Some(Position::Ibid),
        };
        let scope = RenderScope::new(&r, &locale).with_item(Some(&item));
        let ctx = RenderContext::new(&scope);
        assert_eq!(ctx.string_variable("locator", VariableForm::Long), Some("12"));
        assert_eq!(ctx.position(), Some(Position::Ibid));
    }

    #[test]
    fn test_child_buffers_are_separate() {
        let r = reference();
        let locale = Locale::en_us();
        let scope = RenderScope::new(&r, &locale);
        let mut ctx = RenderContext::new(&scope);
        let mut child = ctx.child();
        child.emit("x");
        assert!(ctx.is_empty());
        ctx.emit_buffer(child.into_result());
        ctx.emit("");
        assert_eq!(ctx.result().to_plain_string(), "x");
    }

    #[test]
    fn test_parse_date_needs_parsers() {
        let r = reference();
        let locale = Locale::en_us();
        let parsers = AnyDateParsers::new();
        let plain = RenderScope::new(&r, &locale);
        assert!(RenderContext::new(&plain).parse_date("2020-05-01").is_none());

        let scope = RenderScope::new(&r, &locale).with_date_parsers(&parsers, &locale);
        let parsed = RenderContext::new(&scope).parse_date("2020-05-01").unwrap();
        assert_eq!(parsed.to_date_parts(), [2020, 5, 1]);
    }

    #[test]
    fn test_position_conditions() {
        assert!(Position::First.satisfies("first"));
        assert!(!Position::First.satisfies("subsequent"));
        assert!(Position::IbidWithLocator.satisfies("ibid"));
        assert!(Position::IbidWithLocator.satisfies("subsequent"));
        assert!(!Position::Ibid.satisfies("ibid-with-locator"));
        assert!(!Position::NearNote.satisfies("unknown"));
    }
}
