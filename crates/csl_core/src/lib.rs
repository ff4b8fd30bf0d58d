/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Core data model for the CSL rendering engine.
//!
//! This crate holds the values the engine reads but never mutates:
//! bibliographic records ([`Reference`], [`Name`], [`Date`]) and locale
//! data ([`Locale`] with its terms and localized date templates). It also
//! provides [`LocaleData`], a thread-safe memoizing cache of month-name
//! lookup tables keyed by locale identifier.

pub mod locale;
pub mod reference;

pub use locale::{
    DateForm, DatePartName, DatePartTemplate, Locale, LocaleDate, LocaleData, LocaleError,
    MonthNames, Term, TermForm,
};
pub use reference::{Date, DateValue, Name, Reference};
