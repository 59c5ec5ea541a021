//! Locale resolution report for a location.

use langgate::config::I18nConfig;
use langgate::i18n::{LocaleSignals, PreferenceStore, resolve_with_signal};

use crate::args::utils;

/// What: Print the locale a location resolves to and its candidate sources.
///
/// Inputs:
/// - `config`: Loaded configuration
/// - `location`: URL or path
/// - `browser_lang`: Browser language list from the command line, if any
///
/// Output:
/// - `Ok(true)` after printing the report
///
/// # Errors
/// - Returns `Err` when the configured locale set is invalid
///
/// Details:
/// - Reads the persisted choice but never writes it
pub fn handle_resolve(
    config: &I18nConfig,
    location: &str,
    browser_lang: Option<&str>,
) -> Result<bool, String> {
    let locales = config.supported_locales()?;
    let signals = LocaleSignals::from_location(location, &config.context_options().query_param)
        .with_persisted(utils::preference_store(config).load())
        .with_browser(utils::browser_language(browser_lang));
    let (locale, signal) = resolve_with_signal(&signals, &locales);
    tracing::info!(location, %locale, %signal, "resolved locale from CLI");

    println!("locale: {locale} (from {signal})");
    println!("sources:");
    let enumerator = config.source_enumerator();
    for source in enumerator.sources_for(&locale) {
        println!("  {source}");
    }
    if !locales.is_default(&locale) {
        println!("fallback:");
        for source in enumerator.sources_for(locales.default_locale()) {
            println!("  {source}");
        }
    }
    Ok(true)
}
