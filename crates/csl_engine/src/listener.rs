/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Observers of variable lookups.
//!
//! Every variable an element fetches while rendering is reported to the
//! listeners registered on the render context, together with the value
//! found (or `None`). `substitute` uses this to learn which variables a
//! winning candidate consumed, and `group` to learn whether all of its
//! variables were empty.

use std::cell::{Cell, RefCell};

use csl_core::{Date, Name};

/// A fetched value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariableValue<'a> {
    Text(&'a str),
    Date(&'a Date),
    Names(&'a [Name]),
}

pub trait VariableListener {
    fn on_fetch(&self, name: &str, value: Option<VariableValue<'_>>);
}

/// Handle returned when a listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) usize);

/// Records the names of all fetched variables, in order, once each.
#[derive(Debug, Default)]
pub struct CollectingVariableListener {
    called: RefCell<Vec<String>>,
}

impl CollectingVariableListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn called(&self) -> Vec<String> {
        self.called.borrow().clone()
    }
}

impl VariableListener for CollectingVariableListener {
    fn on_fetch(&self, name: &str, _value: Option<VariableValue<'_>>) {
        let mut called = self.called.borrow_mut();
        if !called.iter().any(|c| c == name) {
            called.push(name.to_string());
        }
    }
}

/// Counts fetches, and how many of them found nothing.
#[derive(Debug, Default)]
pub struct CountingVariableListener {
    called: Cell<usize>,
    empty: Cell<usize>,
}

impl CountingVariableListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn called(&self) -> usize {
        self.called.get()
    }

    pub fn empty(&self) -> usize {
        self.empty.get()
    }

    /// True if at least one variable was fetched and none had a value.
    pub fn all_empty(&self) -> bool {
        self.called() > 0 && self.called() == self.empty()
    }
}

impl VariableListener for CountingVariableListener {
    fn on_fetch(&self, _name: &str, value: Option<VariableValue<'_>>) {
        self.called.set(self.called.get() + 1);
        if value.is_none() {
            self.empty.set(self.empty.get() + 1);
        }
    }
}
