//! Shared utilities for argument processing.

use std::path::Path;

use langgate::config::{I18nConfig, load_config};
use langgate::i18n::{
    AssetFetcher, FileStore, ResolutionPipeline, detect_system_locale, first_accepted_language,
};
use langgate::paths;

/// What: Determine the log level based on command-line arguments and environment variables.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
/// - `LANGGATE_TRACE=1` enables TRACE level for per-source fetch timing.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else if std::env::var("LANGGATE_TRACE").ok().as_deref() == Some("1") {
        "trace".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Load `i18n.yml` or fall back to built-in defaults.
///
/// Inputs:
/// - `explicit`: Path from `--config`, if given
///
/// Output:
/// - Parsed configuration
///
/// # Errors
/// - Returns `Err` when a found or explicit file cannot be read or parsed
pub fn load_settings(explicit: Option<&Path>) -> Result<I18nConfig, String> {
    match paths::find_config_file(explicit) {
        Some(path) => load_config(&path),
        None => {
            tracing::info!("i18n.yml not found, using built-in defaults");
            Ok(I18nConfig::default())
        }
    }
}

/// What: Build the resolution pipeline described by the configuration.
///
/// # Errors
/// - Returns `Err` when the configured locale set is invalid
pub fn build_pipeline(config: &I18nConfig) -> Result<ResolutionPipeline<AssetFetcher>, String> {
    let locales = config.supported_locales()?;
    Ok(ResolutionPipeline::new(
        config.fetcher(),
        config.source_enumerator(),
        locales,
    ))
}

/// Preference store in the per-user config directory.
pub fn preference_store(config: &I18nConfig) -> FileStore {
    config.preference_store(&paths::preference_file())
}

/// What: Pick the browser-language signal.
///
/// Inputs:
/// - `flag`: `Accept-Language` style list from the command line
///
/// Output:
/// - First listed language, else the environment locale, else `None`
pub fn browser_language(flag: Option<&str>) -> Option<String> {
    flag.and_then(first_accepted_language)
        .or_else(detect_system_locale)
}
