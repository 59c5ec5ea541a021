//! Environment language detection utilities.
//!
//! These stand in for the browser-reported language when the resolver runs
//! outside a browser (CLI, server-side pre-rendering).

use std::env;

/// What: Detect the environment's preferred language from locale variables.
///
/// Inputs:
/// - None (reads from environment)
///
/// Output:
/// - `Option<String>` containing locale code (e.g., "de-DE") or None if not detectable
///
/// Details:
/// - Checks `LC_ALL`, `LC_MESSAGES`, and `LANG` environment variables in order
/// - Parses locale strings like "de_DE.UTF-8" -> "de-DE"
/// - Returns None if no valid locale found
pub fn detect_system_locale() -> Option<String> {
    let locale_vars = ["LC_ALL", "LC_MESSAGES", "LANG"];

    for var_name in &locale_vars {
        if let Ok(locale_str) = env::var(var_name)
            && let Some(parsed) = parse_locale_string(&locale_str)
        {
            return Some(parsed);
        }
    }

    None
}

/// What: Parse a locale string from environment variables into a standardized format.
///
/// Inputs:
/// - `locale_str`: Locale string like "de_DE.UTF-8", "de-DE", "en_US.utf8"
///
/// Output:
/// - `Option<String>` with standardized format (e.g., "de-DE") or None if invalid
///
/// Details:
/// - Converts underscores to hyphens
/// - Removes encoding suffix (.UTF-8, .utf8, etc.) and `@modifier` sections
/// - Handles both "de_DE" and "de-DE" formats
pub(crate) fn parse_locale_string(locale_str: &str) -> Option<String> {
    let trimmed = locale_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    // "de_DE.UTF-8@euro" -> "de_DE"
    let locale_part = trimmed.split(['.', '@']).next()?;
    let normalized = locale_part.replace('_', "-");

    let parts: Vec<&str> = normalized.split('-').filter(|p| !p.is_empty()).collect();
    match parts.as_slice() {
        [] => None,
        [language] => Some(language.to_lowercase()),
        [language, region] => Some(format!(
            "{}-{}",
            language.to_lowercase(),
            region.to_uppercase()
        )),
        [language, script, region] => Some(format!(
            "{}-{}-{}",
            language.to_lowercase(),
            script,
            region.to_uppercase()
        )),
        _ => None,
    }
}

/// What: Pick the first language out of an `Accept-Language` style list.
///
/// Inputs:
/// - `header`: Value like "fr-CH, fr;q=0.9, en;q=0.8"
///
/// Output:
/// - First listed tag without its quality weight, or None for an empty list
///
/// Details:
/// - Entries are taken in listed order; browsers already sort by preference
/// - The wildcard `*` is skipped
#[must_use]
pub fn first_accepted_language(header: &str) -> Option<String> {
    header
        .split(',')
        .filter_map(|entry| entry.split(';').next())
        .map(str::trim)
        .find(|tag| !tag.is_empty() && *tag != "*")
        .map(ToString::to_string)
}

/// What: Truncate a language tag to its primary subtag.
///
/// Inputs:
/// - `tag`: Language tag like "fr-CH", "de_DE.UTF-8" or "EN"
///
/// Output:
/// - Lowercase primary subtag ("fr", "de", "en"), or None for an empty tag
#[must_use]
pub fn primary_subtag(tag: &str) -> Option<String> {
    let parsed = parse_locale_string(tag)?;
    parsed
        .split('-')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale_string() {
        assert_eq!(
            parse_locale_string("de_DE.UTF-8"),
            Some("de-DE".to_string())
        );
        assert_eq!(parse_locale_string("en_US.utf8"), Some("en-US".to_string()));
        assert_eq!(parse_locale_string("de-DE"), Some("de-DE".to_string()));
        assert_eq!(parse_locale_string("en"), Some("en".to_string()));
        assert_eq!(
            parse_locale_string("zh_Hans_CN.UTF-8"),
            Some("zh-Hans-CN".to_string())
        );
        assert_eq!(
            parse_locale_string("de_DE@euro"),
            Some("de-DE".to_string())
        );
        assert_eq!(parse_locale_string(""), None);
        assert_eq!(parse_locale_string("   "), None);
        assert_eq!(parse_locale_string("a_b_c_d"), None);
    }

    #[test]
    fn test_parse_locale_string_posix_values() {
        // Not languages, but harmless: they never match a supported locale
        assert_eq!(parse_locale_string("C"), Some("c".to_string()));
        assert_eq!(parse_locale_string("POSIX"), Some("posix".to_string()));
    }

    #[test]
    fn test_first_accepted_language() {
        assert_eq!(
            first_accepted_language("fr-CH, fr;q=0.9, en;q=0.8"),
            Some("fr-CH".to_string())
        );
        assert_eq!(
            first_accepted_language("*, de;q=0.5"),
            Some("de".to_string())
        );
        assert_eq!(first_accepted_language("es"), Some("es".to_string()));
        assert_eq!(first_accepted_language(""), None);
        assert_eq!(first_accepted_language(" , ;q=1"), None);
    }

    #[test]
    fn test_primary_subtag() {
        assert_eq!(primary_subtag("fr-CH"), Some("fr".to_string()));
        assert_eq!(primary_subtag("de_DE.UTF-8"), Some("de".to_string()));
        assert_eq!(primary_subtag("EN"), Some("en".to_string()));
        assert_eq!(primary_subtag(""), None);
    }

    #[test]
    fn test_detect_system_locale_with_env() {
        let _guard = crate::test_utils::env_lock();
        let original_lang = env::var("LANG").ok();
        let original_lc_all = env::var("LC_ALL").ok();
        let original_lc_messages = env::var("LC_MESSAGES").ok();

        unsafe {
            env::set_var("LANG", "de_DE.UTF-8");
            env::remove_var("LC_ALL");
            env::remove_var("LC_MESSAGES");
        }
        assert_eq!(detect_system_locale(), Some("de-DE".to_string()));

        unsafe {
            env::set_var("LC_ALL", "fr_FR.UTF-8");
        }
        assert_eq!(detect_system_locale(), Some("fr-FR".to_string()));

        unsafe {
            env::set_var("LC_ALL", "es_ES.UTF-8");
            env::set_var("LC_MESSAGES", "it_IT.UTF-8");
        }
        assert_eq!(detect_system_locale(), Some("es-ES".to_string()));

        unsafe {
            env::remove_var("LC_ALL");
            env::remove_var("LC_MESSAGES");
            env::remove_var("LANG");
        }
        assert_eq!(detect_system_locale(), None);

        unsafe {
            if let Some(val) = original_lang {
                env::set_var("LANG", val);
            }
            if let Some(val) = original_lc_all {
                env::set_var("LC_ALL", val);
            }
            if let Some(val) = original_lc_messages {
                env::set_var("LC_MESSAGES", val);
            }
        }
    }
}
