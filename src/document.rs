//! In-memory page snapshot
//!
//! A JSON model of the parts of a static page the translation layer touches:
//! the document language, the title, the description metadata, the tagged
//! content elements and the language switcher. Hosts without a live DOM read
//! a snapshot, render into it and write it back out.

use crate::error::{PageError, PageResult};
use crate::i18n::{ElementId, RenderTarget, TaggedElement};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Page snapshot rendered by the translation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDocument {
    /// Declared document language
    #[serde(default)]
    pub lang: Option<String>,

    /// Title element content, `None` when the page has no title element
    #[serde(default)]
    pub title: Option<String>,

    /// Description metadata content, `None` when the page has no such element
    #[serde(default)]
    pub meta_description: Option<String>,

    /// Content elements in document order
    #[serde(default)]
    pub elements: Vec<PageElement>,

    /// Language selector control, if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_switcher: Option<LanguageSwitcher>,
}

/// A content element of the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageElement {
    /// Element id attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Translation key marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang_key: Option<String>,

    /// Visible text
    #[serde(default)]
    pub text: String,
}

impl PageElement {
    pub fn tagged(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: None,
            lang_key: Some(key.into()),
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            id: None,
            lang_key: None,
            text: text.into(),
        }
    }
}

/// Single-choice language control
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSwitcher {
    /// Currently displayed locale
    #[serde(default)]
    pub value: String,

    /// Locales offered by the control
    #[serde(default)]
    pub options: Vec<String>,
}

impl PageDocument {
    /// Read a snapshot from disk
    pub fn load(path: &Path) -> PageResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| PageError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content).map_err(|source| PageError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the snapshot to disk
    pub fn save(&self, path: &Path) -> PageResult<()> {
        let content = self.to_json().map_err(|e| PageError::WriteError {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        std::fs::write(path, content).map_err(|source| PageError::WriteError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find an element by its id attribute
    pub fn element_by_id(&self, id: &str) -> Option<&PageElement> {
        self.elements.iter().find(|e| e.id.as_deref() == Some(id))
    }
}

impl RenderTarget for PageDocument {
    fn tagged_elements(&self) -> Vec<TaggedElement> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(id, element)| {
                element.lang_key.as_ref().map(|key| TaggedElement {
                    id,
                    key: key.clone(),
                })
            })
            .collect()
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(element) = self.elements.get_mut(element) {
            element.text = text.to_string();
        }
    }

    fn set_title(&mut self, title: &str) -> bool {
        match &mut self.title {
            Some(current) => {
                *current = title.to_string();
                true
            }
            None => false,
        }
    }

    fn set_meta_description(&mut self, content: &str) -> bool {
        match &mut self.meta_description {
            Some(current) => {
                *current = content.to_string();
                true
            }
            None => false,
        }
    }

    fn set_document_lang(&mut self, lang: &str) {
        self.lang = Some(lang.to_string());
    }

    fn has_language_selector(&self) -> bool {
        self.language_switcher.is_some()
    }

    fn set_selector_value(&mut self, locale: &str) -> bool {
        match &mut self.language_switcher {
            Some(switcher) => {
                switcher.value = locale.to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "lang": "zh-CN",
        "title": "茶馆",
        "elements": [
            {"id": "hero", "lang_key": "hero", "text": "欢迎"},
            {"text": "© 2024"}
        ],
        "language_switcher": {"value": "zh-CN", "options": ["zh-CN", "en", "th"]}
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let page = PageDocument::from_json(PAGE).unwrap();
        assert_eq!(page.lang.as_deref(), Some("zh-CN"));
        assert!(page.meta_description.is_none());
        assert_eq!(page.element_by_id("hero").unwrap().text, "欢迎");
        assert!(page.has_language_selector());
    }

    #[test]
    fn test_only_marked_elements_are_tagged() {
        let page = PageDocument::from_json(PAGE).unwrap();
        assert_eq!(
            page.tagged_elements(),
            vec![TaggedElement {
                id: 0,
                key: "hero".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_selector_is_reported() {
        let mut page = PageDocument::default();
        assert!(!page.has_language_selector());
        assert!(!page.set_selector_value("en"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        let mut page = PageDocument::from_json(PAGE).unwrap();
        page.set_document_lang("en");

        page.save(&path).unwrap();
        assert_eq!(PageDocument::load(&path).unwrap(), page);
    }

    #[test]
    fn test_load_missing_page() {
        let err = PageDocument::load(Path::new("/nonexistent/index.json")).unwrap_err();
        assert!(matches!(err, PageError::ReadError { .. }));
    }
}
