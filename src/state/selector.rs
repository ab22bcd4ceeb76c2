//! Language selector binding
//!
//! Mirrors the page's single-choice language control. The change handler
//! itself lives on [`LocaleSession`](super::LocaleSession) since it needs the
//! catalog and the preference store.

use crate::i18n::RenderTarget;

/// Binding to the page's language control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSelector {
    value: Option<String>,
}

impl LanguageSelector {
    /// Bind to the target's control, if it has one
    pub fn probe<T: RenderTarget + ?Sized>(target: &T) -> Option<Self> {
        target.has_language_selector().then(Self::default)
    }

    /// Displayed locale
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Show `locale` without running the change handler
    pub fn sync<T: RenderTarget + ?Sized>(&mut self, target: &mut T, locale: &str) {
        if target.set_selector_value(locale) {
            self.value = Some(locale.to_string());
        }
    }
}
