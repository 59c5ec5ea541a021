//! Translation completeness audit.

use langgate::config::I18nConfig;
use langgate::i18n::{Locale, missing_keys};

use crate::args::utils;

/// What: Report keys present in the default locale but missing in others.
///
/// Inputs:
/// - `config`: Loaded configuration
/// - `against`: Locale codes to check; empty means every non-default locale
///
/// Output:
/// - `Ok(true)` when nothing is missing, `Ok(false)` otherwise
///
/// # Errors
/// - Returns `Err` when the configured locale set is invalid
/// - Returns `Err` when the default locale's document cannot be loaded
///
/// Details:
/// - Loads each document without default-locale fallback
/// - Unsupported codes in `against` are skipped with a warning
pub async fn handle_audit(config: &I18nConfig, against: &[String]) -> Result<bool, String> {
    let pipeline = utils::build_pipeline(config)?;
    let locales = pipeline.locales();
    let default = locales.default_locale().clone();

    let Some(reference) = pipeline.load_exact(&default).await else {
        return Err(format!("No document found for default locale {default}"));
    };

    let targets: Vec<Locale> = if against.is_empty() {
        locales
            .all()
            .iter()
            .filter(|l| !locales.is_default(l))
            .cloned()
            .collect()
    } else {
        against
            .iter()
            .filter_map(|code| {
                let found = locales.get(code);
                if found.is_none() {
                    tracing::warn!(code = %code, "skipping unsupported locale in audit");
                }
                found
            })
            .collect()
    };

    let mut complete = true;
    for locale in &targets {
        let Some(document) = pipeline.load_exact(locale).await else {
            complete = false;
            println!("{locale}: no document");
            continue;
        };
        let missing = missing_keys(&reference, &document);
        if missing.is_empty() {
            println!("{locale}: complete");
            continue;
        }
        complete = false;
        println!("{locale}: {} missing", missing.len());
        for key in missing {
            println!("  {key}");
        }
    }
    Ok(complete)
}
