//! Page-lifetime localization session
//!
//! Created once when the page is ready. Owns the catalog (assigned at most
//! once, at construction), the render target, the preference store and the
//! selector binding, and runs the load → resolve → apply → sync pipeline.

use super::preference::{KeyValueStorage, PreferenceStore};
use super::selector::LanguageSelector;
use crate::config::Config;
use crate::error::{LoadError, LocaleError};
use crate::i18n::{
    self, ApplyReport, CatalogSource, LocaleResolver, RenderTarget, TranslationCatalog,
};

/// Localization state for one page lifetime
pub struct LocaleSession<T, S> {
    catalog: Option<TranslationCatalog>,
    load_error: Option<LoadError>,
    resolver: LocaleResolver,
    target: T,
    preferences: PreferenceStore<S>,
    selector: Option<LanguageSelector>,
    active_locale: Option<String>,
}

impl<T: RenderTarget, S: KeyValueStorage> LocaleSession<T, S> {
    /// Load the catalog once and render the initial locale
    ///
    /// A failed load leaves the target's original markup in place; the
    /// session is still returned so the selector stays usable.
    pub async fn start<C: CatalogSource + ?Sized>(
        config: &Config,
        source: &C,
        target: T,
        storage: S,
        browser_locale: &str,
    ) -> Self {
        let selector = LanguageSelector::probe(&target);
        let preferences = PreferenceStore::new(storage, config.preference_key.clone());

        let (catalog, load_error) = match i18n::load(source).await {
            Ok(catalog) => (Some(catalog), None),
            Err(e) => (None, Some(e)),
        };

        let mut session = Self {
            catalog,
            load_error,
            resolver: LocaleResolver::from_config(config),
            target,
            preferences,
            selector,
            active_locale: None,
        };
        session.initialize(browser_locale);
        session
    }

    fn initialize(&mut self, browser_locale: &str) {
        let Some(catalog) = &self.catalog else {
            return;
        };

        let saved = self.preferences.get();
        let initial = self
            .resolver
            .resolve(catalog, saved.as_deref(), browser_locale);
        log::info!("Initial language: {}", initial);

        if let Some(selector) = &mut self.selector {
            selector.sync(&mut self.target, &initial);
        }
        // Failure is already logged by the applier
        let _ = self.apply_locale(&initial);
    }

    /// Change handler of the language selector: apply, then persist
    ///
    /// The choice is persisted even when the locale could not be applied.
    pub fn on_language_change(&mut self, locale: &str) -> Option<ApplyReport> {
        if let Some(selector) = &mut self.selector {
            selector.sync(&mut self.target, locale);
        }

        let report = self.apply_locale(locale).ok();
        self.preferences.set(locale);
        report
    }

    fn apply_locale(&mut self, locale: &str) -> Result<ApplyReport, LocaleError> {
        let Some(catalog) = &self.catalog else {
            log::warn!("Translations not loaded, keeping default content");
            return Err(LocaleError::UnknownLocale(locale.to_string()));
        };

        let report = i18n::apply(catalog, locale, &mut self.target)?;
        self.active_locale = Some(report.locale.clone());
        Ok(report)
    }

    /// Locale currently rendered, if any was applied
    pub fn active_locale(&self) -> Option<&str> {
        self.active_locale.as_deref()
    }

    pub fn catalog(&self) -> Option<&TranslationCatalog> {
        self.catalog.as_ref()
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    pub fn selector(&self) -> Option<&LanguageSelector> {
        self.selector.as_ref()
    }

    /// Locales the selector can offer
    pub fn available_locales(&self) -> Vec<String> {
        self.catalog
            .as_ref()
            .map(|c| c.locales().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn preferences(&self) -> &PreferenceStore<S> {
        &self.preferences
    }

    pub fn into_target(self) -> T {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PREFERENCE_KEY;
    use crate::document::{LanguageSwitcher, PageDocument, PageElement};
    use crate::error::{LoadResult, StorageResult};
    use crate::i18n::{ElementId, FetchResponse, TaggedElement};
    use crate::state::MemoryStorage;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::rc::Rc;

    const CATALOG: &str = r#"{
        "en": {"page-title": "Tea House", "hero": "Welcome"},
        "th": {"page-title": "ร้านชา", "hero": "ยินดีต้อนรับ"},
        "zh-CN": {"page-title": "茶馆", "hero": "欢迎"}
    }"#;

    struct StaticSource(FetchResponse);

    #[async_trait]
    impl CatalogSource for StaticSource {
        fn location(&self) -> String {
            "translations.json".to_string()
        }

        async fn fetch(&self) -> LoadResult<FetchResponse> {
            Ok(self.0.clone())
        }
    }

    type EventLog = Rc<RefCell<Vec<String>>>;

    /// Page wrapper recording each apply and selector update
    struct RecordingPage {
        page: PageDocument,
        events: EventLog,
    }

    impl RenderTarget for RecordingPage {
        fn tagged_elements(&self) -> Vec<TaggedElement> {
            self.page.tagged_elements()
        }

        fn set_text(&mut self, element: ElementId, text: &str) {
            self.page.set_text(element, text)
        }

        fn set_title(&mut self, title: &str) -> bool {
            self.page.set_title(title)
        }

        fn set_meta_description(&mut self, content: &str) -> bool {
            self.page.set_meta_description(content)
        }

        fn set_document_lang(&mut self, lang: &str) {
            self.events.borrow_mut().push(format!("apply:{}", lang));
            self.page.set_document_lang(lang)
        }

        fn has_language_selector(&self) -> bool {
            self.page.has_language_selector()
        }

        fn set_selector_value(&mut self, locale: &str) -> bool {
            self.events.borrow_mut().push(format!("selector:{}", locale));
            self.page.set_selector_value(locale)
        }
    }

    struct RecordingStorage {
        inner: MemoryStorage,
        events: EventLog,
    }

    impl KeyValueStorage for RecordingStorage {
        fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
            self.events.borrow_mut().push(format!("store:{}", value));
            self.inner.set_item(key, value)
        }
    }

    fn page() -> PageDocument {
        PageDocument {
            lang: Some("zh-CN".to_string()),
            title: Some("茶馆".to_string()),
            meta_description: None,
            elements: vec![PageElement::tagged("hero", "欢迎")],
            language_switcher: Some(LanguageSwitcher {
                value: "zh-CN".to_string(),
                options: vec!["zh-CN".to_string(), "en".to_string(), "th".to_string()],
            }),
        }
    }

    async fn recording_session(
        saved: Option<&str>,
        browser_locale: &str,
    ) -> (LocaleSession<RecordingPage, RecordingStorage>, EventLog) {
        let events = EventLog::default();
        let mut inner = MemoryStorage::new();
        if let Some(saved) = saved {
            inner = inner.with_item(DEFAULT_PREFERENCE_KEY, saved);
        }
        let target = RecordingPage {
            page: page(),
            events: events.clone(),
        };
        let storage = RecordingStorage {
            inner,
            events: events.clone(),
        };
        let source = StaticSource(FetchResponse::ok(CATALOG));

        let session =
            LocaleSession::start(&Config::default(), &source, target, storage, browser_locale)
                .await;
        (session, events)
    }

    #[tokio::test]
    async fn test_start_applies_browser_locale_without_persisting() {
        let (session, events) = recording_session(None, "th-TH").await;

        assert_eq!(session.active_locale(), Some("th"));
        assert_eq!(session.target().page.elements[0].text, "ยินดีต้อนรับ");
        assert_eq!(session.target().page.title.as_deref(), Some("ร้านชา"));
        assert_eq!(session.selector().unwrap().value(), Some("th"));
        assert_eq!(*events.borrow(), vec!["selector:th", "apply:th"]);
    }

    #[tokio::test]
    async fn test_saved_preference_wins() {
        let (session, _) = recording_session(Some("en"), "th-TH").await;
        assert_eq!(session.active_locale(), Some("en"));
        assert_eq!(
            session.target().page.language_switcher.as_ref().unwrap().value,
            "en"
        );
    }

    #[tokio::test]
    async fn test_selection_applies_then_persists_once() {
        let (mut session, events) = recording_session(None, "en-US").await;
        events.borrow_mut().clear();

        let report = session.on_language_change("zh-CN").unwrap();

        assert_eq!(report.elements_updated, 1);
        assert_eq!(
            *events.borrow(),
            vec!["selector:zh-CN", "apply:zh-CN", "store:zh-CN"]
        );
        assert_eq!(session.active_locale(), Some("zh-CN"));
        assert_eq!(session.preferences().get().as_deref(), Some("zh-CN"));
    }

    #[tokio::test]
    async fn test_unknown_selection_still_persists() {
        let (mut session, events) = recording_session(None, "en-US").await;
        events.borrow_mut().clear();

        assert!(session.on_language_change("xx").is_none());

        assert_eq!(*events.borrow(), vec!["selector:xx", "store:xx"]);
        assert_eq!(session.active_locale(), Some("en"));
        assert_eq!(session.target().page.elements[0].text, "Welcome");
    }

    #[tokio::test]
    async fn test_failed_load_keeps_original_markup() {
        let events = EventLog::default();
        let target = RecordingPage {
            page: page(),
            events: events.clone(),
        };
        let source = StaticSource(FetchResponse {
            status: 404,
            body: Vec::new(),
        });

        let session = LocaleSession::start(
            &Config::default(),
            &source,
            target,
            MemoryStorage::new(),
            "en-US",
        )
        .await;

        assert!(matches!(
            session.load_error(),
            Some(LoadError::Status { status: 404, .. })
        ));
        assert!(session.catalog().is_none());
        assert!(session.active_locale().is_none());
        assert!(session.available_locales().is_empty());
        assert_eq!(session.into_target().page, page());
        assert!(events.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_selection_after_failed_load_persists_only() {
        let source = StaticSource(FetchResponse {
            status: 500,
            body: Vec::new(),
        });
        let mut session = LocaleSession::start(
            &Config::default(),
            &source,
            page(),
            MemoryStorage::new(),
            "th-TH",
        )
        .await;

        assert!(session.on_language_change("en").is_none());

        assert!(session.active_locale().is_none());
        assert_eq!(session.preferences().get().as_deref(), Some("en"));
        let rendered = session.into_target();
        assert_eq!(rendered.lang.as_deref(), Some("zh-CN"));
        assert_eq!(rendered.elements[0].text, "欢迎");
        assert_eq!(rendered.title.as_deref(), Some("茶馆"));
    }

    #[tokio::test]
    async fn test_absent_default_leaves_page_untouched() {
        let source = StaticSource(FetchResponse::ok(r#"{"en": {"hero": "Welcome"}}"#));
        let session = LocaleSession::start(
            &Config::default(),
            &source,
            page(),
            MemoryStorage::new(),
            "de-DE",
        )
        .await;

        assert!(session.active_locale().is_none());
        let rendered = session.into_target();
        assert_eq!(rendered.elements[0].text, "欢迎");
        assert_eq!(rendered.lang.as_deref(), Some("zh-CN"));
        // The control still shows the resolved default
        assert_eq!(rendered.language_switcher.unwrap().value, "zh-CN");
    }

    #[tokio::test]
    async fn test_available_locales() {
        let (session, _) = recording_session(None, "en").await;
        assert_eq!(session.available_locales(), vec!["en", "th", "zh-CN"]);
    }
}
