//! Translation catalog data model
//!
//! A two-level mapping `locale -> key -> string` with explicit presence
//! checks at each level. Empty strings count as missing translations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved key overwriting the document title
pub const PAGE_TITLE_KEY: &str = "page-title";

/// Reserved key overwriting the description metadata
pub const META_DESCRIPTION_KEY: &str = "meta-description";

/// Translations for a single locale, keyed by translation key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleTable {
    entries: BTreeMap<String, String>,
}

impl LocaleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a translation; empty strings are treated as absent
    pub fn translation(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    pub fn page_title(&self) -> Option<&str> {
        self.translation(PAGE_TITLE_KEY)
    }

    pub fn meta_description(&self) -> Option<&str> {
        self.translation(META_DESCRIPTION_KEY)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Every locale table loaded from the translation resource
///
/// Built once per session and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationCatalog {
    locales: BTreeMap<String, LocaleTable>,
}

impl TranslationCatalog {
    /// Parse a catalog from a JSON body shaped `{ locale: { key: text } }`
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    pub fn table(&self, locale: &str) -> Option<&LocaleTable> {
        self.locales.get(locale)
    }

    /// Locale codes in sorted order
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, LocaleTable)> for TranslationCatalog {
    fn from_iter<I: IntoIterator<Item = (K, LocaleTable)>>(iter: I) -> Self {
        Self {
            locales: iter.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        }
    }
}
