//! Candidate source enumeration for resource documents.

use std::fmt;

use crate::i18n::locale::Locale;

/// Placeholder substituted with the locale code in source patterns.
pub const LOCALE_PLACEHOLDER: &str = "{locale}";

/// Source patterns tried in order when none are configured.
pub const DEFAULT_SOURCE_PATTERNS: [&str; 3] = [
    "/i18n/{locale}.json",
    "/{locale}.json",
    "/locales/{locale}.json",
];

/// Opaque name of a place a resource document may be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation(String);

impl SourceLocation {
    /// Wrap a raw location string.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// The location as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ranked source policy: where documents for a locale may live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEnumerator {
    base: String,
    patterns: Vec<String>,
}

impl Default for SourceEnumerator {
    fn default() -> Self {
        Self::new("", DEFAULT_SOURCE_PATTERNS)
    }
}

impl SourceEnumerator {
    /// What: Build an enumerator from a base and ordered patterns.
    ///
    /// Inputs:
    /// - `base`: Prefix for every pattern (origin URL, asset directory, or empty)
    /// - `patterns`: Path patterns containing `{locale}`, highest priority first
    ///
    /// Output:
    /// - `SourceEnumerator` instance
    ///
    /// Details:
    /// - Trailing slashes on `base` are dropped; patterns get a leading slash when missing
    /// - Patterns without `{locale}` are kept but logged, since they name the same source for every locale
    /// - An empty pattern list falls back to the defaults
    pub fn new<I, S>(base: &str, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            if !pattern.contains(LOCALE_PLACEHOLDER) {
                tracing::warn!(pattern, "source pattern has no {{locale}} placeholder");
            }
            let pattern = if pattern.starts_with('/') {
                pattern.to_string()
            } else {
                format!("/{pattern}")
            };
            if !normalized.contains(&pattern) {
                normalized.push(pattern);
            }
        }
        if normalized.is_empty() {
            normalized = DEFAULT_SOURCE_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect();
        }
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
            patterns: normalized,
        }
    }

    /// What: Produce the ordered candidate sources for a locale.
    ///
    /// Inputs:
    /// - `locale`: Locale whose document is wanted
    ///
    /// Output:
    /// - Source locations, highest priority first, without duplicates
    #[must_use]
    pub fn sources_for(&self, locale: &Locale) -> Vec<SourceLocation> {
        let mut sources: Vec<SourceLocation> = Vec::with_capacity(self.patterns.len());
        for pattern in &self.patterns {
            let location = SourceLocation(format!(
                "{}{}",
                self.base,
                pattern.replace(LOCALE_PLACEHOLDER, locale.as_str())
            ));
            if !sources.contains(&location) {
                sources.push(location);
            }
        }
        sources
    }

    /// Configured base prefix.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}
