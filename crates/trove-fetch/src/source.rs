//! Document sources
//!
//! The fetcher never talks to the network directly. It asks a
//! [`DocumentSource`] for the raw response, which lets tests script pages,
//! statuses, delays and transport errors.

use crate::config::FetchConfig;
use crate::error::{FetchError, SourceError};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// A raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// HTTP status code
    pub status: u16,
    /// `Content-Type` header, if sent
    pub content_type: Option<String>,
    /// Response body as text
    pub body: String,
}

impl RawDocument {
    /// A 200 response with an HTML body
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: body.into(),
        }
    }

    /// A 200 response with a plain-text body
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: Some("text/plain; charset=utf-8".to_string()),
            body: body.into(),
        }
    }

    /// An empty response with the given status
    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: String::new(),
        }
    }
}

/// Something that can GET a URL
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch `url`; non-success statuses are returned, not raised
    async fn get(&self, url: &str) -> Result<RawDocument, SourceError>;
}

#[async_trait]
impl<S: DocumentSource + ?Sized> DocumentSource for Arc<S> {
    async fn get(&self, url: &str) -> Result<RawDocument, SourceError> {
        (**self).get(url).await
    }
}

/// `reqwest`-backed source with browser-like headers
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Build a client from the fetch configuration
    ///
    /// The client timeout is the longer of the two mode timeouts; the
    /// fetcher enforces the mode-specific one itself.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,text/plain;q=0.8,*/*;q=0.5",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.5"),
        );

        let client = reqwest::Client::builder()
            .timeout(config.direct_timeout().max(config.reader_timeout()))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn get(&self, url: &str) -> Result<RawDocument, SourceError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout
            } else if e.is_builder() {
                SourceError::InvalidUrl(e.to_string())
            } else {
                SourceError::Connection(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout
            } else {
                SourceError::Body(e.to_string())
            }
        })?;

        debug!(url, status, bytes = body.len(), "Fetched document");
        Ok(RawDocument {
            status,
            content_type,
            body,
        })
    }
}

#[derive(Debug, Clone)]
struct Scripted {
    response: Result<RawDocument, SourceError>,
    delay: Option<Duration>,
}

/// Scripted source for deterministic tests
///
/// Unknown URLs answer 404. Clones share the script and call log.
///
/// # Examples
///
/// ```
/// use trove_fetch::{DocumentSource, MockSource, RawDocument};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let source = MockSource::new().with_document("https://a.example", RawDocument::status(403));
/// let doc = rt.block_on(source.get("https://a.example")).unwrap();
/// assert_eq!(doc.status, 403);
/// assert_eq!(source.calls(), vec!["https://a.example".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    script: Arc<Mutex<HashMap<String, Scripted>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSource {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `document`
    pub fn with_document(self, url: impl Into<String>, document: RawDocument) -> Self {
        self.script(url, Ok(document), None)
    }

    /// Answer `url` with a 200 HTML page
    pub fn with_html(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.with_document(url, RawDocument::html(html))
    }

    /// Fail `url` with a transport error
    pub fn with_error(self, url: impl Into<String>, error: SourceError) -> Self {
        self.script(url, Err(error), None)
    }

    /// Answer `url` with `document` after `delay`
    pub fn with_delayed(
        self,
        url: impl Into<String>,
        document: RawDocument,
        delay: Duration,
    ) -> Self {
        self.script(url, Ok(document), Some(delay))
    }

    fn script(
        self,
        url: impl Into<String>,
        response: Result<RawDocument, SourceError>,
        delay: Option<Duration>,
    ) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert(url.into(), Scripted { response, delay });
        self
    }

    /// URLs requested so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentSource for MockSource {
    async fn get(&self, url: &str) -> Result<RawDocument, SourceError> {
        self.calls.lock().unwrap().push(url.to_string());

        let scripted = self.script.lock().unwrap().get(url).cloned();
        let Some(scripted) = scripted else {
            return Ok(RawDocument::status(404));
        };

        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        scripted.response
    }
}
