//! `i18n.yml` configuration.
//!
//! ```yaml
//! default_locale: en
//! locales: [en, fr, de, es]
//! base: https://example.org        # or a local asset directory
//! sources:
//!   - /i18n/{locale}.json
//!   - /{locale}.json
//!   - /locales/{locale}.json
//! query_param: lang
//! storage_key: yb_lang
//! cache_bust_param: v
//! request_timeout_secs: 10         # optional; transport default when omitted
//! placeholder_on_switch: false
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::i18n::{
    AssetFetcher, ContextOptions, DEFAULT_CACHE_BUST_PARAM, DEFAULT_QUERY_PARAM,
    DEFAULT_SOURCE_PATTERNS, DEFAULT_STORAGE_KEY, FileStore, SourceEnumerator, SupportedLocales,
};

/// Parsed `i18n.yml`; every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale used when nothing else matches.
    pub default_locale: String,
    /// Supported locale codes.
    pub locales: Vec<String>,
    /// Prefix for source patterns: origin URL or asset directory.
    pub base: String,
    /// Source patterns containing `{locale}`, highest priority first.
    pub sources: Vec<String>,
    /// Query parameter carrying a locale code.
    pub query_param: String,
    /// Key of the persisted locale choice.
    pub storage_key: String,
    /// Query parameter for the cache-defeating nonce.
    pub cache_bust_param: String,
    /// Optional whole-request timeout for HTTP sources.
    pub request_timeout_secs: Option<u64>,
    /// Show an empty document while switching locales.
    pub placeholder_on_switch: bool,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            locales: ["en", "fr", "de", "es"].map(String::from).to_vec(),
            base: String::new(),
            sources: DEFAULT_SOURCE_PATTERNS.map(String::from).to_vec(),
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            cache_bust_param: DEFAULT_CACHE_BUST_PARAM.to_string(),
            request_timeout_secs: None,
            placeholder_on_switch: false,
        }
    }
}

impl I18nConfig {
    /// What: Parse configuration from YAML text.
    ///
    /// Inputs:
    /// - `yaml_content`: `i18n.yml` contents
    ///
    /// Output:
    /// - `Result<I18nConfig, String>`
    ///
    /// # Errors
    /// - Returns `Err` when the YAML cannot be parsed
    pub fn from_yaml(yaml_content: &str) -> Result<Self, String> {
        if yaml_content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_norway::from_str(yaml_content).map_err(|e| format!("Failed to parse YAML: {e}"))
    }

    /// What: Validated supported locale set.
    ///
    /// # Errors
    /// - Returns `Err` when a configured code or the default is malformed
    pub fn supported_locales(&self) -> Result<SupportedLocales, String> {
        SupportedLocales::new(&self.locales, &self.default_locale)
    }

    /// Candidate-source policy from `base` and `sources`.
    #[must_use]
    pub fn source_enumerator(&self) -> SourceEnumerator {
        SourceEnumerator::new(&self.base, &self.sources)
    }

    /// Fetcher matching `base` (HTTP for URLs, files otherwise).
    #[must_use]
    pub fn fetcher(&self) -> AssetFetcher {
        AssetFetcher::for_base(
            &self.base,
            &self.cache_bust_param,
            self.request_timeout_secs.map(Duration::from_secs),
        )
    }

    /// Locale context options.
    #[must_use]
    pub fn context_options(&self) -> ContextOptions {
        let query_param = if self.query_param.trim().is_empty() {
            DEFAULT_QUERY_PARAM.to_string()
        } else {
            self.query_param.trim().to_string()
        };
        ContextOptions {
            query_param,
            placeholder_on_switch: self.placeholder_on_switch,
        }
    }

    /// File-backed preference store at `path` using `storage_key`.
    #[must_use]
    pub fn preference_store(&self, path: &Path) -> FileStore {
        FileStore::new(path, &self.storage_key)
    }

    /// Whether `base` names a remote origin.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        let lowered = self.base.trim().to_ascii_lowercase();
        lowered.starts_with("http://") || lowered.starts_with("https://")
    }
}

/// What: Load configuration from a file.
///
/// Inputs:
/// - `path`: Path to `i18n.yml`
///
/// Output:
/// - `Result<I18nConfig, String>`
///
/// # Errors
/// - Returns `Err` when the file cannot be read
/// - Returns `Err` when the YAML cannot be parsed
///
/// Details:
/// - A relative local `base` is resolved against the config file's directory
pub fn load_config(path: &Path) -> Result<I18nConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
    let mut config = I18nConfig::from_yaml(&contents)
        .map_err(|e| format!("{e} in {}. Please check YAML syntax.", path.display()))?;

    if !config.is_remote()
        && !config.base.trim().is_empty()
        && Path::new(config.base.trim()).is_relative()
        && let Some(dir) = path.parent()
    {
        config.base = dir.join(config.base.trim()).display().to_string();
    }

    tracing::debug!(
        path = %path.display(),
        default_locale = %config.default_locale,
        locales = ?config.locales,
        base = %config.base,
        "loaded i18n config"
    );
    Ok(config)
}
