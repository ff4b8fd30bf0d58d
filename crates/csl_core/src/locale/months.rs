/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::{Locale, TermForm};

/// Month-name to month-number lookup for one locale.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MonthNames {
    long: HashMap<String, u32>,
    short: HashMap<String, u32>,
}

impl MonthNames {
    /// Build the table from the locale's `month-01` .. `month-12` terms.
    pub fn from_locale(locale: &Locale) -> Self {
        let mut names = MonthNames::default();
        for month in 1..=12u32 {
            let term = format!("month-{:02}", month);
            if let Some(long) = locale.term(&term, TermForm::Long, false) {
                names.long.insert(long.to_lowercase(), month);
            }
            if let Some(short) = locale.term(&term, TermForm::Short, false) {
                names
                    .short
                    .insert(short.trim_end_matches('.').to_lowercase(), month);
            }
        }
        names
    }

    /// Case-insensitive lookup of a long or short month name. Short names
    /// may carry a trailing period.
    pub fn lookup(&self, name: &str) -> Option<u32> {
        let name = name.trim().to_lowercase();
        if let Some(m) = self.long.get(&name) {
            return Some(*m);
        }
        self.short.get(name.trim_end_matches('.')).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.long.is_empty() && self.short.is_empty()
    }

    /// Lowercased long month names.
    pub fn long_names(&self) -> impl Iterator<Item = &str> {
        self.long.keys().map(String::as_str)
    }

    /// Lowercased short month names, without trailing periods.
    pub fn short_names(&self) -> impl Iterator<Item = &str> {
        self.short.keys().map(String::as_str)
    }
}

/// Memoizing, thread-safe cache of locale-derived lookup tables keyed by
/// locale identifier.
///
/// Tables are built on first use and shared afterwards. Populating an entry
/// takes the write lock only after the table has been computed, so readers
/// are never blocked by a build.
#[derive(Debug, Default)]
pub struct LocaleData {
    months: RwLock<HashMap<String, Arc<MonthNames>>>,
}

impl LocaleData {
    pub fn new() -> Self {
        Self::default()
    }

    /// The month table for `locale`, building it on first request.
    pub fn months(&self, locale: &Locale) -> Arc<MonthNames> {
        {
            let cache = self.months.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(names) = cache.get(&locale.lang) {
                return Arc::clone(names);
            }
        }

        let built = Arc::new(MonthNames::from_locale(locale));
        tracing::debug!(locale = %locale.lang, "built month-name table");
        let mut cache = self.months.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(locale.lang.clone()).or_insert(built))
    }

    /// Number of locales with a cached table.
    pub fn len(&self) -> usize {
        self.months
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_long_and_short() {
        let names = MonthNames::from_locale(&Locale::en_us());
        assert_eq!(names.lookup("December"), Some(12));
        assert_eq!(names.lookup("dec"), Some(12));
        assert_eq!(names.lookup("Dec."), Some(12));
        assert_eq!(names.lookup("Sept."), Some(9));
        assert_eq!(names.lookup("Smarch"), None);
    }

    #[test]
    fn test_cache_is_shared() {
        let data = LocaleData::new();
        let en = Locale::en_us();
        let a = data.months(&en);
        let b = data.months(&en);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_cache_concurrent_populate() {
        let data = Arc::new(LocaleData::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let data = Arc::clone(&data);
                std::thread::spawn(move || data.months(&Locale::en_us()).lookup("May"))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(5));
        }
        assert_eq!(data.len(), 1);
    }
}
