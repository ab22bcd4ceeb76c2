//! Translation catalog loading
//!
//! Fetches the single translation resource over an async transport and parses
//! it into a [`TranslationCatalog`]. A load is a single shot: there is no
//! retry, no timeout and no caching of the raw body.

use super::catalog::TranslationCatalog;
use crate::error::{LoadError, LoadResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// User agent sent with HTTP catalog requests
const USER_AGENT: &str = concat!("site-locale/", env!("CARGO_PKG_VERSION"));

/// Raw response of a catalog fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP-style status code
    pub status: u16,
    /// Undecoded body
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport delivering the translation resource
#[async_trait]
pub trait CatalogSource {
    /// Human-readable location used in logs and errors
    fn location(&self) -> String;

    /// Perform the request
    async fn fetch(&self) -> LoadResult<FetchResponse>;
}

/// Catalog served over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: reqwest::Url,
}

impl HttpSource {
    /// Resolve `location` against the page's base URL
    pub fn new(base_url: &str, location: &str) -> LoadResult<Self> {
        let url = reqwest::Url::parse(base_url)
            .and_then(|base| base.join(location))
            .map_err(|e| LoadError::Transport {
                location: location.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { url })
    }

    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn location(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> LoadResult<FetchResponse> {
        let transport_error = |e: reqwest::Error| LoadError::Transport {
            location: self.location(),
            reason: e.to_string(),
        };

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(transport_error)?;

        let response = client
            .get(self.url.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;

        Ok(FetchResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Catalog read from the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve `location` against the directory holding the page
    pub fn relative_to_page(page: &Path, location: &str) -> Self {
        let dir = page.parent().unwrap_or_else(|| Path::new("."));
        Self::new(dir.join(location))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> LoadResult<FetchResponse> {
        match tokio::fs::read(&self.path).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            // Mirror what a static file server answers for a missing file
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FetchResponse {
                status: 404,
                body: Vec::new(),
            }),
            Err(e) => Err(LoadError::Transport {
                location: self.location(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Fetch and parse the translation catalog
///
/// Failures are logged here; callers only decide whether to continue.
pub async fn load<S: CatalogSource + ?Sized>(source: &S) -> LoadResult<TranslationCatalog> {
    let location = source.location();
    log::debug!("Loading translations from {}", location);

    let result = fetch_catalog(source, &location).await;
    match &result {
        Ok(catalog) => log::debug!(
            "Translations loaded: {} locale(s) [{}]",
            catalog.len(),
            catalog.locales().collect::<Vec<_>>().join(", ")
        ),
        Err(e) => log::error!("Error loading translations: {}", e),
    }
    result
}

async fn fetch_catalog<S: CatalogSource + ?Sized>(
    source: &S,
    location: &str,
) -> LoadResult<TranslationCatalog> {
    let response = source.fetch().await?;

    if !response.is_success() {
        return Err(LoadError::Status {
            location: location.to_string(),
            status: response.status,
        });
    }

    TranslationCatalog::from_json(&response.body).map_err(|source| LoadError::Parse {
        location: location.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

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

    #[tokio::test]
    async fn test_load_success() {
        let source = StaticSource(FetchResponse::ok(r#"{"en": {"hero": "Hi"}}"#));
        let catalog = load(&source).await.unwrap();
        assert_eq!(
            catalog.table("en").and_then(|t| t.translation("hero")),
            Some("Hi")
        );
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let source = StaticSource(FetchResponse {
            status: 500,
            body: br#"{"en": {}}"#.to_vec(),
        });
        let err = load(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let source = StaticSource(FetchResponse::ok("<html>not json</html>"));
        let err = load(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_file_source_relative_to_page() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("translations.json")).unwrap();
        write!(file, r#"{{"th": {{"hero": "สวัสดี"}}}}"#).unwrap();

        let page = dir.path().join("index.json");
        let source = FileSource::relative_to_page(&page, "translations.json");
        let catalog = load(&source).await.unwrap();
        assert!(catalog.contains("th"));
    }

    #[tokio::test]
    async fn test_file_source_missing_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("translations.json"));
        let err = load(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 404, .. }));
    }

    #[test]
    fn test_http_source_joins_relative_location() {
        let source =
            HttpSource::new("https://example.com/site/index.html", "translations.json").unwrap();
        assert_eq!(
            source.url().as_str(),
            "https://example.com/site/translations.json"
        );
    }

    #[test]
    fn test_http_source_rejects_bad_base() {
        assert!(HttpSource::new("not a url", "translations.json").is_err());
    }
}
