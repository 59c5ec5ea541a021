//! Initial locale resolution and the URL path-prefix contract.

use std::fmt;

use reqwest::Url;

use crate::i18n::detection::primary_subtag;
use crate::i18n::locale::{Locale, SupportedLocales};

/// Base used to parse bare paths such as `/fr/team?lang=de`.
const PATH_BASE: &str = "http://localhost/";

/// Raw, unvalidated locale hints gathered from the environment.
///
/// Every field is optional; anything unknown or malformed is ignored during
/// resolution rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleSignals {
    /// Current URL path (e.g. `/fr/team`).
    pub path: Option<String>,
    /// Value of the locale query parameter.
    pub query: Option<String>,
    /// Previously persisted explicit choice.
    pub persisted: Option<String>,
    /// Browser or environment reported language (e.g. `fr-CH`).
    pub browser: Option<String>,
}

impl LocaleSignals {
    /// What: Extract path and query signals from a location.
    ///
    /// Inputs:
    /// - `location`: Absolute URL or bare path, optionally with a query string
    /// - `query_param`: Name of the locale query parameter (e.g. "lang")
    ///
    /// Output:
    /// - Signals with `path` and `query` filled; `persisted`/`browser` left empty
    ///
    /// Details:
    /// - Unparsable locations yield empty signals instead of an error
    #[must_use]
    pub fn from_location(location: &str, query_param: &str) -> Self {
        let Some(url) = parse_location(location) else {
            tracing::debug!(location, "could not parse location; ignoring URL signals");
            return Self::default();
        };
        let query = url
            .query_pairs()
            .find(|(name, _)| name == query_param)
            .map(|(_, value)| value.into_owned());
        Self {
            path: Some(url.path().to_string()),
            query,
            ..Self::default()
        }
    }

    /// Attach the persisted choice.
    #[must_use]
    pub fn with_persisted(mut self, persisted: Option<String>) -> Self {
        self.persisted = persisted;
        self
    }

    /// Attach the browser/environment language.
    #[must_use]
    pub fn with_browser(mut self, browser: Option<String>) -> Self {
        self.browser = browser;
        self
    }
}

/// Which signal produced the resolved locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSignal {
    /// First path segment.
    Path,
    /// Query parameter.
    Query,
    /// Persisted user choice.
    Persisted,
    /// Browser/environment language.
    Browser,
    /// Nothing matched.
    Default,
}

impl fmt::Display for LocaleSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Persisted => "persisted",
            Self::Browser => "browser",
            Self::Default => "default",
        })
    }
}

/// What: Resolve the initial locale from the ordered signals.
///
/// Inputs:
/// - `signals`: Raw locale hints
/// - `supported`: Supported locale set
///
/// Output:
/// - A supported `Locale`; the default when no signal matches
///
/// Details:
/// - Precedence: path -> query -> persisted -> browser (primary subtag) -> default
/// - Pure: reads only the provided signals
#[must_use]
pub fn resolve_initial_locale(signals: &LocaleSignals, supported: &SupportedLocales) -> Locale {
    resolve_with_signal(signals, supported).0
}

/// What: Resolve the initial locale and report the winning signal.
///
/// Inputs:
/// - `signals`: Raw locale hints
/// - `supported`: Supported locale set
///
/// Output:
/// - Tuple of (resolved locale, signal that produced it)
#[must_use]
pub fn resolve_with_signal(
    signals: &LocaleSignals,
    supported: &SupportedLocales,
) -> (Locale, LocaleSignal) {
    let candidates = [
        (
            LocaleSignal::Path,
            signals.path.as_deref().and_then(first_path_segment),
        ),
        (LocaleSignal::Query, signals.query.clone()),
        (LocaleSignal::Persisted, signals.persisted.clone()),
        (
            LocaleSignal::Browser,
            signals.browser.as_deref().and_then(primary_subtag),
        ),
    ];

    for (signal, candidate) in candidates {
        let Some(code) = candidate else {
            continue;
        };
        if let Some(locale) = supported.get(&code) {
            tracing::debug!(%locale, %signal, "initial locale resolved");
            return (locale, signal);
        }
        tracing::debug!(code = %code, %signal, "ignoring unsupported locale signal");
    }

    let locale = supported.default_locale().clone();
    tracing::debug!(%locale, "no locale signal matched; using default");
    (locale, LocaleSignal::Default)
}

/// First non-empty path segment, if any.
fn first_path_segment(path: &str) -> Option<String> {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Parse an absolute URL or a bare path against a placeholder origin.
fn parse_location(location: &str) -> Option<Url> {
    Url::parse(location)
        .ok()
        .filter(|url| !url.cannot_be_a_base())
        .or_else(|| Url::parse(PATH_BASE).ok()?.join(location).ok())
}

/// What: Rewrite a path for a target locale.
///
/// Inputs:
/// - `path`: Current path (e.g. `/fr/team`)
/// - `target`: Locale being switched to
/// - `supported`: Supported locale set
///
/// Output:
/// - Path carrying the target prefix: `/de/team`, or `/team` for the default locale
///
/// Details:
/// - Only a leading segment that is a supported locale is treated as a prefix
/// - The rest of the path is kept as-is; the root becomes `/` or `/<locale>/`
#[must_use]
pub fn localized_path(path: &str, target: &Locale, supported: &SupportedLocales) -> String {
    let trimmed = path.trim_start_matches('/');
    let rest = match trimmed.split_once('/') {
        Some((first, rest)) if supported.contains(first) => rest,
        None if supported.contains(trimmed) => "",
        _ => trimmed,
    };
    if supported.is_default(target) {
        format!("/{rest}")
    } else {
        format!("/{target}/{rest}")
    }
}

/// What: Rewrite a full location (path, query, fragment) for a target locale.
///
/// Inputs:
/// - `location`: Current absolute URL or bare path
/// - `target`: Locale being switched to
/// - `supported`: Supported locale set
/// - `query_param`: Name of the locale query parameter
///
/// Output:
/// - Rewritten location in the same shape as the input (absolute stays absolute)
///
/// Details:
/// - The path prefix follows [`localized_path`]
/// - An existing locale query parameter is updated so it cannot contradict the path;
///   one is never added when absent
/// - Unparsable input falls back to rewriting it as a plain path
#[must_use]
pub fn localized_location(
    location: &str,
    target: &Locale,
    supported: &SupportedLocales,
    query_param: &str,
) -> String {
    let absolute = Url::parse(location)
        .ok()
        .filter(|url| !url.cannot_be_a_base());
    let Some(mut url) = absolute.clone().or_else(|| parse_location(location)) else {
        return localized_path(location, target, supported);
    };

    let new_path = localized_path(url.path(), target, supported);
    url.set_path(&new_path);

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if pairs.iter().any(|(k, _)| k == query_param) {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (k, v) in &pairs {
            if k == query_param {
                query.append_pair(k, target.as_str());
            } else {
                query.append_pair(k, v);
            }
        }
    }

    if absolute.is_some() {
        return url.to_string();
    }
    let mut out = url.path().to_string();
    if let Some(query) = url.query() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = url.fragment() {
        out.push('#');
        out.push_str(fragment);
    }
    out
}
