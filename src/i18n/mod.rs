//! Locale negotiation, resource loading and translation lookup.
//!
//! # Overview
//!
//! The i18n layer supports:
//! - **Locale Resolution**: Picks the initial locale from the URL path, a query parameter,
//!   the persisted choice, the browser/environment language, then the default
//! - **Source Enumeration**: Lists where a locale's document may live (`/i18n/fr.json`,
//!   `/fr.json`, `/locales/fr.json`), highest priority first
//! - **Fetching**: Retrieves documents over HTTP (cache-defeating nonce) or from a local
//!   asset directory; failures are reported as `Absent`, never as errors
//! - **Fallback**: Falls back to the default locale once, then to an empty document
//! - **Locale Context**: Reactive state observed by presentation code and mutated only by
//!   the [`Localizer`]
//! - **Translation Lookup**: `t()` resolves dotted keys and returns the key when missing
//!
//! # Resource Documents
//!
//! Documents are nested JSON objects:
//!
//! ```json
//! { "nav": { "contact": "Contact Us" } }
//! ```
//!
//! The value above is reachable as `nav.contact`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use langgate::i18n::{
//!     ContextOptions, HttpFetcher, Localizer, MemoryStore, ResolutionPipeline,
//!     SourceEnumerator, SupportedLocales,
//! };
//!
//! # async fn demo() -> Result<(), String> {
//! let locales = SupportedLocales::new(["en", "fr", "de", "es"], "en")?;
//! let sources = SourceEnumerator::new("https://example.org", ["/i18n/{locale}.json"]);
//! let pipeline = ResolutionPipeline::new(HttpFetcher::default(), sources, locales);
//! let localizer = Localizer::bootstrap(
//!     pipeline,
//!     MemoryStore::default(),
//!     ContextOptions::default(),
//!     "/fr/team",
//!     None,
//! );
//! localizer.load_initial().await;
//!
//! let ctx = localizer.context();
//! println!("{}", ctx.t("nav.contact"));
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - Unknown or malformed locale codes fall through to the next signal
//! - Unreachable or malformed sources are skipped; the default locale is tried once
//! - Total failure leaves an empty document in place and lookups return their keys
//! - Nothing here panics or returns an error to presentation code

mod context;
mod detection;
mod fetcher;
mod locale;
mod pipeline;
mod resolver;
mod sources;
pub mod store;
pub mod translations;

pub use context::{
    CommitOutcome, ContextOptions, ContextState, DEFAULT_QUERY_PARAM, LoadStatus, LocaleContext,
    Localizer,
};
pub use detection::{detect_system_locale, first_accepted_language, primary_subtag};
pub use fetcher::{
    AbsentReason, AssetFetcher, DEFAULT_CACHE_BUST_PARAM, FetchOutcome, FileFetcher, HttpFetcher,
    ResourceFetcher,
};
pub use locale::{Locale, SupportedLocales};
pub use pipeline::{Resolution, ResolutionPipeline};
pub use resolver::{
    LocaleSignal, LocaleSignals, localized_location, localized_path, resolve_initial_locale,
    resolve_with_signal,
};
pub use sources::{DEFAULT_SOURCE_PATTERNS, SourceEnumerator, SourceLocation};
pub use store::{DEFAULT_STORAGE_KEY, FileStore, MemoryStore, PreferenceStore};
pub use translations::{ResourceDocument, missing_keys, translate, translate_fmt};

/// What: Get a translation for a given key from a locale context.
///
/// Inputs:
/// - `ctx`: Locale context handle
/// - `key`: Dot-notation key (e.g., "nav.contact")
///
/// Output:
/// - Translated string, or the key itself if translation not found
#[must_use]
pub fn t(ctx: &LocaleContext, key: &str) -> String {
    ctx.t(key)
}

/// What: Get a translation with a single format argument (convenience function).
///
/// Inputs:
/// - `ctx`: Locale context handle
/// - `key`: Dot-notation key
/// - `arg`: Single format argument
///
/// Output:
/// - Formatted translated string
#[must_use]
pub fn t_fmt1<T: std::fmt::Display>(ctx: &LocaleContext, key: &str, arg: T) -> String {
    ctx.t_fmt(key, &[&arg])
}
