//! Explicit locale switch from the command line.

use langgate::config::I18nConfig;
use langgate::i18n::{CommitOutcome, LoadStatus, Localizer};

use crate::args::utils;

/// What: Switch to a locale the way a language switcher would.
///
/// Inputs:
/// - `config`: Loaded configuration
/// - `code`: Target locale code; unsupported codes become the default locale
/// - `location`: Location to rewrite
///
/// Output:
/// - `Ok(true)` when the switch committed with a document, `Ok(false)` on total failure
///
/// # Errors
/// - Returns `Err` when the configured locale set is invalid
///
/// Details:
/// - Persists the committed choice to the preference file
/// - Prints the rewritten location
pub async fn handle_switch(
    config: &I18nConfig,
    code: &str,
    location: &str,
) -> Result<bool, String> {
    let pipeline = utils::build_pipeline(config)?;
    let localizer = Localizer::bootstrap(
        pipeline,
        utils::preference_store(config),
        config.context_options(),
        location,
        utils::browser_language(None),
    );
    localizer.load_initial().await;

    let outcome = localizer.change_locale_code(code).await;
    let state = localizer.context().snapshot();
    println!("locale: {}", state.active_locale);
    println!("status: {}", state.status);
    if let Some(served) = &state.served_locale
        && *served != state.active_locale
    {
        println!("served: {served} (fallback)");
    }
    println!("location: {}", state.location);

    Ok(matches!(
        outcome,
        CommitOutcome::Committed(LoadStatus::Ready)
    ))
}
