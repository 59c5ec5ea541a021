//! Locale context: the shared reactive state and its single mutation point.
//!
//! [`Localizer`] owns the state and is the only place it changes.
//! Presentation code receives [`LocaleContext`] handles, which can read and
//! observe the state but never write it.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::i18n::fetcher::ResourceFetcher;
use crate::i18n::locale::Locale;
use crate::i18n::pipeline::{Resolution, ResolutionPipeline};
use crate::i18n::resolver::{LocaleSignals, localized_location, resolve_with_signal};
use crate::i18n::store::PreferenceStore;
use crate::i18n::translations::{ResourceDocument, translate, translate_fmt};

/// Query parameter carrying a locale when none is configured.
pub const DEFAULT_QUERY_PARAM: &str = "lang";

/// Load status of the active document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// A document for the active locale is being fetched.
    Loading,
    /// A document is in place (possibly the default locale's).
    Ready,
    /// Every source failed; the empty document is in place and lookups return keys.
    Failed,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        })
    }
}

/// Snapshot of the locale context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextState {
    /// Locale the user is on (or switching to while `Loading`).
    pub active_locale: Locale,
    /// Document currently used for lookups.
    pub document: Arc<ResourceDocument>,
    /// Load status of `document` relative to `active_locale`.
    pub status: LoadStatus,
    /// Locale whose document is shown; `None` while nothing was loaded or on total failure.
    pub served_locale: Option<Locale>,
    /// Current location (path and query) reflecting the committed locale.
    pub location: String,
}

impl ContextState {
    fn loading(locale: Locale, location: String) -> Self {
        Self {
            active_locale: locale,
            document: Arc::new(ResourceDocument::empty()),
            status: LoadStatus::Loading,
            served_locale: None,
            location,
        }
    }
}

/// Read-only handle to the locale context.
///
/// Cheap to clone; every clone observes the same state.
#[derive(Debug, Clone)]
pub struct LocaleContext {
    rx: watch::Receiver<ContextState>,
}

impl LocaleContext {
    /// Active locale.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.rx.borrow().active_locale.clone()
    }

    /// Current load status.
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.rx.borrow().status
    }

    /// Current location reflecting the committed locale.
    #[must_use]
    pub fn location(&self) -> String {
        self.rx.borrow().location.clone()
    }

    /// What: Translate a key against the current document.
    ///
    /// Inputs:
    /// - `key`: Dot-notation key
    ///
    /// Output:
    /// - Translated string, or the key itself
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        translate(&self.rx.borrow().document, key)
    }

    /// Translate a key and fill `{}` placeholders in order.
    #[must_use]
    pub fn t_fmt(&self, key: &str, args: &[&dyn fmt::Display]) -> String {
        translate_fmt(&self.rx.borrow().document, key, args)
    }

    /// Clone of the full current state.
    #[must_use]
    pub fn snapshot(&self) -> ContextState {
        self.rx.borrow().clone()
    }

    /// What: Wait for the next state change.
    ///
    /// Output:
    /// - `true` when the state changed, `false` once the owning `Localizer` is gone
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// What: Wait until the state satisfies `predicate`.
    ///
    /// Inputs:
    /// - `predicate`: Condition checked against the current and every later state
    ///
    /// Output:
    /// - Matching state, or `None` once the owning `Localizer` is gone
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&ContextState) -> bool,
    ) -> Option<ContextState> {
        self.rx.wait_for(predicate).await.ok().map(|state| state.clone())
    }

    /// Wait until the active locale's load settles (`Ready` or `Failed`).
    pub async fn settled(&mut self) -> Option<ContextState> {
        self.wait_for(|state| state.status != LoadStatus::Loading)
            .await
    }
}

/// Whether a finished load was applied to the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Result applied; carries the resulting status.
    Committed(LoadStatus),
    /// The active locale changed while loading; result dropped.
    Discarded,
}

/// Context behaviour knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextOptions {
    /// Query parameter carrying a locale code.
    pub query_param: String,
    /// Show an empty document while switching instead of the previous one.
    pub placeholder_on_switch: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            placeholder_on_switch: false,
        }
    }
}

/// Owner of the locale context and its only mutation entry point.
pub struct Localizer<F, S> {
    pipeline: ResolutionPipeline<F>,
    store: S,
    options: ContextOptions,
    state: watch::Sender<ContextState>,
}

impl<F: ResourceFetcher, S: PreferenceStore> Localizer<F, S> {
    /// What: Create the context with a synchronous initial locale guess.
    ///
    /// Inputs:
    /// - `pipeline`: Resolution pipeline (fetcher, sources, locale set)
    /// - `store`: Preference store, read once here
    /// - `options`: Context options
    /// - `location`: Current URL or path
    /// - `browser`: Browser/environment language, if known
    ///
    /// Output:
    /// - `Localizer` in `Loading` status with an empty document
    ///
    /// Details:
    /// - No network access; call [`Self::load_initial`] to fetch the first document
    pub fn bootstrap(
        pipeline: ResolutionPipeline<F>,
        store: S,
        options: ContextOptions,
        location: &str,
        browser: Option<String>,
    ) -> Self {
        let signals = LocaleSignals::from_location(location, &options.query_param)
            .with_persisted(store.load())
            .with_browser(browser);
        let (locale, signal) = resolve_with_signal(&signals, pipeline.locales());
        tracing::info!(%locale, %signal, location, "locale context created");

        let (state, _) = watch::channel(ContextState::loading(locale, location.to_string()));
        Self {
            pipeline,
            store,
            options,
            state,
        }
    }

    /// New read-only handle to the context.
    #[must_use]
    pub fn context(&self) -> LocaleContext {
        LocaleContext {
            rx: self.state.subscribe(),
        }
    }

    /// Pipeline backing this context.
    pub const fn pipeline(&self) -> &ResolutionPipeline<F> {
        &self.pipeline
    }

    /// What: Fetch the document for the initially resolved locale.
    ///
    /// Output:
    /// - `CommitOutcome::Committed` with the resulting status, or `Discarded` if a
    ///   locale change happened meanwhile
    ///
    /// Details:
    /// - Does not persist anything: the initial locale is not an explicit choice
    pub async fn load_initial(&self) -> CommitOutcome {
        let target = self.state.borrow().active_locale.clone();
        let resolution = self.pipeline.resolve(&target).await;
        self.commit(&target, resolution, false)
    }

    /// What: Switch to `target` and load its document.
    ///
    /// Inputs:
    /// - `target`: Locale chosen by the user
    ///
    /// Output:
    /// - `Committed` with the resulting status, or `Discarded` when a later change superseded it
    ///
    /// Details:
    /// - Enters `Loading` immediately, keeping the previous document visible unless
    ///   `placeholder_on_switch` is set
    /// - The result is applied only if `target` is still the active locale on completion
    /// - On commit: persists the choice and rewrites the context location
    pub async fn change_locale(&self, target: Locale) -> CommitOutcome {
        let placeholder = self.options.placeholder_on_switch;
        self.state.send_modify(|state| {
            tracing::debug!(from = %state.active_locale, to = %target, "locale change requested");
            state.active_locale = target.clone();
            state.status = LoadStatus::Loading;
            if placeholder {
                state.document = Arc::new(ResourceDocument::empty());
                state.served_locale = None;
            }
        });

        let resolution = self.pipeline.resolve(&target).await;
        self.commit(&target, resolution, true)
    }

    /// What: Switch using an unvalidated code.
    ///
    /// Inputs:
    /// - `code`: Raw locale code; unsupported values are coerced to the default locale
    ///
    /// Output:
    /// - Same as [`Self::change_locale`]
    pub async fn change_locale_code(&self, code: &str) -> CommitOutcome {
        let target = self.pipeline.locales().coerce(code);
        self.change_locale(target).await
    }

    /// Apply a finished resolution if it still matches the active locale.
    fn commit(&self, target: &Locale, resolution: Resolution, explicit: bool) -> CommitOutcome {
        let supported = self.pipeline.locales();
        let query_param = self.options.query_param.as_str();
        let status = if resolution.is_total_failure() {
            LoadStatus::Failed
        } else {
            LoadStatus::Ready
        };
        let served = resolution.served.clone();

        let committed = self.state.send_if_modified(|state| {
            if state.active_locale != *target {
                return false;
            }
            state.document = Arc::new(resolution.document);
            state.served_locale = served;
            state.status = status;
            if explicit {
                state.location =
                    localized_location(&state.location, target, supported, query_param);
            }
            true
        });

        if !committed {
            tracing::debug!(
                stale = %target,
                active = %self.state.borrow().active_locale,
                "discarding stale locale load"
            );
            return CommitOutcome::Discarded;
        }

        if explicit && let Err(e) = self.store.save(target) {
            tracing::warn!(locale = %target, error = %e, "failed to persist locale choice");
        }
        tracing::info!(
            locale = %target,
            %status,
            fallback = resolution.served.as_ref().is_some_and(|s| s != target),
            "locale committed"
        );
        CommitOutcome::Committed(status)
    }
}
