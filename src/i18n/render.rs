//! Applying a locale to a rendered page
//!
//! The page is reached only through [`RenderTarget`], so the policy here can
//! run against the in-memory [`PageDocument`](crate::document::PageDocument)
//! or any other host surface.

use super::catalog::TranslationCatalog;
use crate::error::LocaleError;

/// Opaque handle of an element inside a render target
pub type ElementId = usize;

/// An element carrying a translation-key marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedElement {
    pub id: ElementId,
    pub key: String,
}

/// Mutable view of the page the applier writes into
///
/// Every element is optional; a missing element disables only its own update.
pub trait RenderTarget {
    /// Elements tagged with a translation key, in document order
    fn tagged_elements(&self) -> Vec<TaggedElement>;

    /// Replace the visible text of an element
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Overwrite the document title; `false` when the page has no title element
    fn set_title(&mut self, title: &str) -> bool;

    /// Overwrite the description metadata; `false` when the page has none
    fn set_meta_description(&mut self, content: &str) -> bool;

    /// Set the document's declared language
    fn set_document_lang(&mut self, lang: &str);

    /// Whether the page carries a language-selector control
    fn has_language_selector(&self) -> bool {
        false
    }

    /// Set the selector's displayed value without firing its change handler
    fn set_selector_value(&mut self, _locale: &str) -> bool {
        false
    }
}

/// What a successful apply touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub locale: String,
    pub elements_updated: usize,
    pub elements_skipped: usize,
    pub title_updated: bool,
    pub description_updated: bool,
}

/// Render `locale` from `catalog` into `target`
///
/// An unknown locale is logged and leaves the target untouched. Keys with no
/// translation keep their original content. Applying the same locale twice
/// produces the same state as applying it once.
pub fn apply<T: RenderTarget + ?Sized>(
    catalog: &TranslationCatalog,
    locale: &str,
    target: &mut T,
) -> Result<ApplyReport, LocaleError> {
    let Some(table) = catalog.table(locale) else {
        log::warn!("No translations found for language: {}", locale);
        return Err(LocaleError::UnknownLocale(locale.to_string()));
    };

    let mut report = ApplyReport {
        locale: locale.to_string(),
        ..ApplyReport::default()
    };

    for element in target.tagged_elements() {
        match table.translation(&element.key) {
            Some(text) => {
                target.set_text(element.id, text);
                report.elements_updated += 1;
            }
            None => report.elements_skipped += 1,
        }
    }

    if let Some(title) = table.page_title() {
        report.title_updated = target.set_title(title);
    }
    if let Some(description) = table.meta_description() {
        report.description_updated = target.set_meta_description(description);
    }

    target.set_document_lang(locale);

    log::debug!(
        "Applied {}: {} element(s) updated, {} untranslated",
        locale,
        report.elements_updated,
        report.elements_skipped
    );
    Ok(report)
}
