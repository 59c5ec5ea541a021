//! Supported locale set and the `Locale` value type.

use std::fmt;

use serde::Serialize;

/// A locale code known to be a member of a [`SupportedLocales`] set.
///
/// Values can only be obtained through [`SupportedLocales::get`] or
/// [`SupportedLocales::default_locale`], so holding a `Locale` means the code
/// was validated against the configured set. Codes are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Locale code as a string slice (e.g., "fr").
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fixed, finite set of locales the site can render, with one default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedLocales {
    locales: Vec<Locale>,
    default: Locale,
}

impl SupportedLocales {
    /// What: Build a validated locale set.
    ///
    /// Inputs:
    /// - `codes`: Supported locale codes, in display order
    /// - `default_code`: Code of the default locale
    ///
    /// Output:
    /// - `Ok(SupportedLocales)` or `Err` describing the first invalid entry
    ///
    /// # Errors
    /// - Returns `Err` when any code has an invalid format
    /// - Returns `Err` when the default code is empty or invalid
    ///
    /// Details:
    /// - Codes are lowercased and de-duplicated (first occurrence wins)
    /// - The default locale is added to the set when the list omits it
    pub fn new<I, S>(codes: I, default_code: &str) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let default = normalize_code(default_code)
            .ok_or_else(|| format!("Invalid default locale code: '{default_code}'"))?;

        let mut locales: Vec<Locale> = Vec::new();
        for code in codes {
            let raw = code.as_ref();
            let normalized =
                normalize_code(raw).ok_or_else(|| format!("Invalid locale code: '{raw}'"))?;
            if !locales.iter().any(|l| l.0 == normalized) {
                locales.push(Locale(normalized));
            }
        }

        let default = Locale(default);
        if !locales.contains(&default) {
            tracing::warn!(
                default = %default,
                "default locale missing from supported list; adding it"
            );
            locales.insert(0, default.clone());
        }

        Ok(Self { locales, default })
    }

    /// Look up a code in the set (case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn get(&self, code: &str) -> Option<Locale> {
        let normalized = normalize_code(code)?;
        self.locales.iter().find(|l| l.0 == normalized).cloned()
    }

    /// Whether `code` names a supported locale.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Coerce any externally observed value into the set, using the default when unknown.
    #[must_use]
    pub fn coerce(&self, code: &str) -> Locale {
        self.get(code).unwrap_or_else(|| self.default.clone())
    }

    /// The default locale.
    #[must_use]
    pub const fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Whether `locale` is the default locale.
    #[must_use]
    pub fn is_default(&self, locale: &Locale) -> bool {
        *locale == self.default
    }

    /// All supported locales in configured order.
    #[must_use]
    pub fn all(&self) -> &[Locale] {
        &self.locales
    }
}

/// What: Validate locale code format.
///
/// Inputs:
/// - `locale`: Locale code to validate
///
/// Output:
/// - `true` if format looks valid, `false` otherwise
///
/// Details:
/// - Allows simple language codes (e.g., "en") or full codes (e.g., "pt-br")
/// - Rejects empty codes, spaces, special characters and stray hyphens
pub(crate) fn is_valid_locale_format(locale: &str) -> bool {
    if locale.is_empty() || locale.len() > 20 {
        return false;
    }

    locale.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !locale.starts_with('-')
        && !locale.ends_with('-')
        && !locale.contains("--")
}

/// Trim and lowercase a code, returning `None` when it is malformed.
fn normalize_code(code: &str) -> Option<String> {
    let lowered = code.trim().to_ascii_lowercase();
    is_valid_locale_format(&lowered).then_some(lowered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site_locales() -> SupportedLocales {
        SupportedLocales::new(["en", "fr", "de", "es"], "en").expect("valid locale set")
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let locales = site_locales();
        assert_eq!(locales.get("FR").map(|l| l.to_string()), Some("fr".into()));
        assert_eq!(locales.get(" de ").map(|l| l.to_string()), Some("de".into()));
        assert!(locales.get("it").is_none());
        assert!(locales.get("").is_none());
        assert!(locales.get("f r").is_none());
    }

    #[test]
    fn test_coerce_unknown_to_default() {
        let locales = site_locales();
        for code in ["xx", "zz-ZZ", "", "../etc", "en US", "--"] {
            assert_eq!(locales.coerce(code).as_str(), "en", "code {code:?}");
        }
        assert_eq!(locales.coerce("es").as_str(), "es");
    }

    #[test]
    fn test_default_added_when_missing() {
        let locales = SupportedLocales::new(["fr", "de"], "EN").expect("valid locale set");
        assert_eq!(locales.default_locale().as_str(), "en");
        assert_eq!(
            locales
                .all()
                .iter()
                .map(Locale::as_str)
                .collect::<Vec<_>>(),
            vec!["en", "fr", "de"]
        );
    }

    #[test]
    fn test_rejects_invalid_codes() {
        assert!(SupportedLocales::new(["en", "fr fr"], "en").is_err());
        assert!(SupportedLocales::new(["en"], "").is_err());
        assert!(SupportedLocales::new(["en", "-de"], "en").is_err());
    }

    #[test]
    fn test_duplicates_collapse() {
        let locales = SupportedLocales::new(["en", "FR", "fr"], "en").expect("valid locale set");
        assert_eq!(locales.all().len(), 2);
    }

    #[test]
    fn test_is_valid_locale_format() {
        assert!(is_valid_locale_format("en"));
        assert!(is_valid_locale_format("pt-br"));
        assert!(is_valid_locale_format("zh-hans-cn"));

        assert!(!is_valid_locale_format(""));
        assert!(!is_valid_locale_format("-en"));
        assert!(!is_valid_locale_format("en-"));
        assert!(!is_valid_locale_format("en--us"));
        assert!(!is_valid_locale_format("en us"));
        assert!(!is_valid_locale_format("en@us"));
        assert!(!is_valid_locale_format(&"x".repeat(21)));
    }
}
