//! Initial locale resolution
//!
//! Walks the fallback chain: persisted preference, then browser-locale prefix
//! rules, then the configured default. Every step except the default checks
//! catalog membership before accepting a candidate.

use super::catalog::TranslationCatalog;
use crate::config::{Config, DEFAULT_LOCALE};
use serde::{Deserialize, Serialize};

/// Maps a browser-locale prefix to a catalog locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixRule {
    /// Prefix matched against the browser-reported locale
    pub prefix: String,
    /// Locale selected when the prefix matches and the catalog has it
    pub locale: String,
}

impl PrefixRule {
    pub fn new(prefix: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            locale: locale.into(),
        }
    }

    fn accepts(&self, catalog: &TranslationCatalog, browser_locale: &str) -> bool {
        browser_locale.starts_with(&self.prefix) && catalog.contains(&self.locale)
    }
}

/// Ordered fallback chain deciding the initial locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleResolver {
    rules: Vec<PrefixRule>,
    default_locale: String,
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE, Vec::new())
    }
}

impl LocaleResolver {
    /// Build the chain `en`, `extra_rules...`, `th`, falling back to `default_locale`
    pub fn new(default_locale: impl Into<String>, extra_rules: Vec<PrefixRule>) -> Self {
        let mut rules = Vec::with_capacity(extra_rules.len() + 2);
        rules.push(PrefixRule::new("en", "en"));
        rules.extend(extra_rules);
        rules.push(PrefixRule::new("th", "th"));

        Self {
            rules,
            default_locale: default_locale.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_locale.clone(), config.extra_rules.clone())
    }

    pub fn rules(&self) -> &[PrefixRule] {
        &self.rules
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Pick the initial locale; first accepted candidate wins
    ///
    /// The default is returned even when the catalog lacks it.
    pub fn resolve(
        &self,
        catalog: &TranslationCatalog,
        persisted: Option<&str>,
        browser_locale: &str,
    ) -> String {
        if let Some(saved) = persisted.filter(|s| !s.is_empty()) {
            if catalog.contains(saved) {
                return saved.to_string();
            }
            log::debug!("Saved language {} is not in the catalog", saved);
        }

        self.rules
            .iter()
            .find(|rule| rule.accepts(catalog, browser_locale))
            .map(|rule| rule.locale.clone())
            .unwrap_or_else(|| self.default_locale.clone())
    }
}

/// Resolve with the stock chain and the `zh-CN` default
pub fn resolve(
    catalog: &TranslationCatalog,
    persisted: Option<&str>,
    browser_locale: &str,
) -> String {
    LocaleResolver::default().resolve(catalog, persisted, browser_locale)
}
