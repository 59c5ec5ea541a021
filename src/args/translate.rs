//! Translation lookup from the command line.

use langgate::config::I18nConfig;
use langgate::i18n::{Localizer, MemoryStore, PreferenceStore, translate};

use crate::args::utils;

/// What: Load a document and print the translation of each key.
///
/// Inputs:
/// - `config`: Loaded configuration
/// - `location`: URL or path used to resolve the locale
/// - `locale`: Explicit locale code overriding resolution
/// - `keys`: Dot-notation keys to print
///
/// Output:
/// - `Ok(true)` when every key was found, `Ok(false)` otherwise
///
/// # Errors
/// - Returns `Err` when the configured locale set is invalid
///
/// Details:
/// - Missing keys print as the key itself, like presentation code sees them
/// - Never writes the persisted choice
pub async fn handle_translate(
    config: &I18nConfig,
    location: &str,
    locale: Option<&str>,
    keys: &[String],
) -> Result<bool, String> {
    let pipeline = utils::build_pipeline(config)?;

    let (served, document) = if let Some(code) = locale {
        let target = pipeline.locales().coerce(code);
        let resolution = pipeline.resolve(&target).await;
        (resolution.served, resolution.document)
    } else {
        // Read-only view of the persisted choice
        let store = utils::preference_store(config)
            .load()
            .map_or_else(MemoryStore::default, |value| MemoryStore::with_value(&value));
        let localizer = Localizer::bootstrap(
            pipeline,
            store,
            config.context_options(),
            location,
            utils::browser_language(None),
        );
        localizer.load_initial().await;
        let state = localizer.context().snapshot();
        (state.served_locale, (*state.document).clone())
    };

    match &served {
        Some(served) => println!("# served: {served}"),
        None => println!("# served: nothing (all sources failed)"),
    }

    let mut all_found = true;
    for key in keys {
        if document.lookup(key).is_none() {
            all_found = false;
        }
        println!("{key} = {}", translate(&document, key));
    }
    Ok(all_found)
}
