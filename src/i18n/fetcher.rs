//! Resource document fetching over HTTP or from a local asset directory.

use std::fmt;
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};

use crate::i18n::sources::SourceLocation;
use crate::i18n::translations::ResourceDocument;

/// Query parameter carrying the cache-defeating nonce when none is configured.
pub const DEFAULT_CACHE_BUST_PARAM: &str = "v";

/// Why a source produced no document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    /// Server answered with a non-success status.
    Status(u16),
    /// Body was not a JSON object.
    Malformed(String),
    /// Transport failure, invalid location or missing file.
    Unreachable(String),
}

impl fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "HTTP status {code}"),
            Self::Malformed(detail) => write!(f, "malformed document: {detail}"),
            Self::Unreachable(detail) => write!(f, "unreachable: {detail}"),
        }
    }
}

/// Result of a single fetch; absence is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A usable document.
    Found(ResourceDocument),
    /// Nothing usable at this source.
    Absent(AbsentReason),
}

impl FetchOutcome {
    /// Convert into the document, dropping the absence reason.
    #[must_use]
    pub fn into_document(self) -> Option<ResourceDocument> {
        match self {
            Self::Found(document) => Some(document),
            Self::Absent(_) => None,
        }
    }

    /// Whether the fetch produced a document.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Classify a body: object documents are found, anything else is malformed.
    fn from_body(bytes: &[u8]) -> Self {
        match ResourceDocument::from_json_slice(bytes) {
            Ok(document) => Self::Found(document),
            Err(e) => Self::Absent(AbsentReason::Malformed(e)),
        }
    }
}

/// Retrieves resource documents from source locations.
///
/// Implementations must be total: every failure is reported as
/// [`FetchOutcome::Absent`] so callers can drive the fallback chain without
/// error handling.
pub trait ResourceFetcher: Send + Sync {
    /// Fetch the document at `source`.
    fn fetch(&self, source: &SourceLocation) -> impl Future<Output = FetchOutcome> + Send;
}

/// HTTP fetcher with cache-defeating requests.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    cache_bust_param: String,
}

impl HttpFetcher {
    /// What: Build an HTTP fetcher.
    ///
    /// Inputs:
    /// - `cache_bust_param`: Query parameter name for the per-request nonce
    /// - `timeout`: Optional whole-request timeout; `None` keeps the transport default
    ///
    /// Output:
    /// - `HttpFetcher` instance
    ///
    /// Details:
    /// - Sends `Cache-Control: no-cache` and `Pragma: no-cache` on every request
    /// - Falls back to a default client if the configured builder fails
    #[must_use]
    pub fn new(cache_bust_param: &str, timeout: Option<Duration>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let mut builder = reqwest::Client::builder()
            .user_agent(format!("langgate/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to build HTTP client; using defaults");
            reqwest::Client::new()
        });

        let cache_bust_param = if cache_bust_param.trim().is_empty() {
            DEFAULT_CACHE_BUST_PARAM.to_string()
        } else {
            cache_bust_param.trim().to_string()
        };

        Self {
            client,
            cache_bust_param,
        }
    }

    /// What: Build the request URL for a source with a fresh nonce.
    ///
    /// Inputs:
    /// - `source`: Absolute `http(s)` source location
    ///
    /// Output:
    /// - `Ok(Url)` with the nonce appended, or `Err` for locations that are not absolute URLs
    ///
    /// # Errors
    /// - Returns `Err` when the location cannot be parsed as an absolute URL
    pub fn request_url(&self, source: &SourceLocation) -> Result<Url, String> {
        let mut url = Url::parse(source.as_str())
            .map_err(|e| format!("invalid source URL '{source}': {e}"))?;
        url.query_pairs_mut()
            .append_pair(&self.cache_bust_param, &cache_bust_nonce());
        Ok(url)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_BUST_PARAM, None)
    }
}

impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, source: &SourceLocation) -> FetchOutcome {
        let url = match self.request_url(source) {
            Ok(url) => url,
            Err(e) => return FetchOutcome::Absent(AbsentReason::Unreachable(e)),
        };

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%source, error = %e, "resource request failed");
                return FetchOutcome::Absent(AbsentReason::Unreachable(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%source, status = status.as_u16(), "resource request rejected");
            return FetchOutcome::Absent(AbsentReason::Status(status.as_u16()));
        }

        match response.bytes().await {
            Ok(body) => {
                tracing::trace!(%source, bytes = body.len(), "resource body received");
                FetchOutcome::from_body(&body)
            }
            Err(e) => FetchOutcome::Absent(AbsentReason::Unreachable(e.to_string())),
        }
    }
}

/// Request-time nonce: current Unix time in milliseconds.
fn cache_bust_nonce() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

/// Fetcher reading source locations from a local asset directory.
///
/// A source such as `/i18n/fr.json` maps to `<root>/i18n/fr.json`. Local
/// reads have no cache to defeat, so no nonce is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    /// Create a fetcher rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// What: Map a source location onto a file under the root.
    ///
    /// Inputs:
    /// - `source`: Source location (leading `/` optional, `file://` prefix accepted)
    ///
    /// Output:
    /// - `Some(PathBuf)` inside the root, or `None` for paths escaping it
    ///
    /// Details:
    /// - `..` components are rejected so sources cannot read outside the asset directory
    #[must_use]
    pub fn resolve_path(&self, source: &SourceLocation) -> Option<PathBuf> {
        let raw = source.as_str();
        let raw = raw.strip_prefix("file://").unwrap_or(raw);
        let path = Path::new(raw);
        let relative = path.strip_prefix(&self.root).unwrap_or(path);

        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::RootDir | Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) => return None,
            }
        }
        Some(resolved)
    }

    /// Asset directory root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceFetcher for FileFetcher {
    async fn fetch(&self, source: &SourceLocation) -> FetchOutcome {
        let Some(path) = self.resolve_path(source) else {
            return FetchOutcome::Absent(AbsentReason::Unreachable(format!(
                "source '{source}' escapes the asset directory"
            )));
        };

        let read_path = path.clone();
        let read = tokio::task::spawn_blocking(move || std::fs::read(&read_path)).await;
        match read {
            Ok(Ok(bytes)) => {
                tracing::trace!(path = %path.display(), bytes = bytes.len(), "resource file read");
                FetchOutcome::from_body(&bytes)
            }
            Ok(Err(e)) => {
                tracing::debug!(path = %path.display(), error = %e, "resource file unavailable");
                FetchOutcome::Absent(AbsentReason::Unreachable(format!(
                    "{}: {e}",
                    path.display()
                )))
            }
            Err(e) => FetchOutcome::Absent(AbsentReason::Unreachable(format!(
                "read task failed: {e}"
            ))),
        }
    }
}

/// Fetcher chosen from configuration: HTTP for URL bases, files otherwise.
#[derive(Debug, Clone)]
pub enum AssetFetcher {
    /// Remote asset host.
    Http(HttpFetcher),
    /// Local asset directory.
    File(FileFetcher),
}

impl AssetFetcher {
    /// What: Pick a fetcher for a configured base.
    ///
    /// Inputs:
    /// - `base`: Source base from configuration
    /// - `cache_bust_param`: Nonce parameter for HTTP requests
    /// - `timeout`: Optional HTTP request timeout
    ///
    /// Output:
    /// - `AssetFetcher::Http` for `http://`/`https://` bases, `AssetFetcher::File` otherwise
    ///
    /// Details:
    /// - File sources already carry the base as prefix, so the base doubles as the file root
    #[must_use]
    pub fn for_base(base: &str, cache_bust_param: &str, timeout: Option<Duration>) -> Self {
        let lowered = base.trim().to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            Self::Http(HttpFetcher::new(cache_bust_param, timeout))
        } else {
            let root = if base.trim().is_empty() {
                PathBuf::from(".")
            } else {
                PathBuf::from(base.trim())
            };
            Self::File(FileFetcher::new(root))
        }
    }
}

impl ResourceFetcher for AssetFetcher {
    async fn fetch(&self, source: &SourceLocation) -> FetchOutcome {
        match self {
            Self::Http(fetcher) => fetcher.fetch(source).await,
            Self::File(fetcher) => fetcher.fetch(source).await,
        }
    }
}
