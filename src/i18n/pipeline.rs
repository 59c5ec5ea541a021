//! Resolution pipeline: candidate sources, fetch order and default-locale fallback.

use crate::i18n::fetcher::{FetchOutcome, ResourceFetcher};
use crate::i18n::locale::{Locale, SupportedLocales};
use crate::i18n::sources::SourceEnumerator;
use crate::i18n::translations::ResourceDocument;

/// Outcome of resolving a document for a requested locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Locale that was asked for.
    pub requested: Locale,
    /// Locale whose document was obtained; `None` when every source failed.
    pub served: Option<Locale>,
    /// Obtained document, or an empty one on total failure.
    pub document: ResourceDocument,
}

impl Resolution {
    /// Whether the default locale stood in for the requested one.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.served
            .as_ref()
            .is_some_and(|served| *served != self.requested)
    }

    /// Whether every source, including the default locale's, failed.
    #[must_use]
    pub const fn is_total_failure(&self) -> bool {
        self.served.is_none()
    }
}

/// Fetcher + source policy + locale set, wired together.
#[derive(Debug, Clone)]
pub struct ResolutionPipeline<F> {
    fetcher: F,
    sources: SourceEnumerator,
    locales: SupportedLocales,
}

impl<F: ResourceFetcher> ResolutionPipeline<F> {
    /// Wire a pipeline from its parts.
    pub const fn new(fetcher: F, sources: SourceEnumerator, locales: SupportedLocales) -> Self {
        Self {
            fetcher,
            sources,
            locales,
        }
    }

    /// Supported locale set used by this pipeline.
    pub const fn locales(&self) -> &SupportedLocales {
        &self.locales
    }

    /// Source policy used by this pipeline.
    pub const fn sources(&self) -> &SourceEnumerator {
        &self.sources
    }

    /// What: Load the document for a locale.
    ///
    /// Inputs:
    /// - `locale`: Requested locale
    ///
    /// Output:
    /// - The first document found, the default locale's document, or an empty document
    ///
    /// Details:
    /// - Never fails and never surfaces transport errors; see [`Self::resolve`]
    pub async fn load_locale(&self, locale: &Locale) -> ResourceDocument {
        self.resolve(locale).await.document
    }

    /// What: Resolve a locale's document and report where it came from.
    ///
    /// Inputs:
    /// - `locale`: Requested locale
    ///
    /// Output:
    /// - `Resolution` with the served locale and document
    ///
    /// Details:
    /// - Tries every candidate source for `locale` in priority order; first hit wins
    /// - If all miss and `locale` is not the default, tries the default locale once
    /// - If that misses too, returns an empty document with `served == None`
    pub async fn resolve(&self, locale: &Locale) -> Resolution {
        if let Some(document) = self.load_exact(locale).await {
            return Resolution {
                requested: locale.clone(),
                served: Some(locale.clone()),
                document,
            };
        }

        let default = self.locales.default_locale();
        if locale != default {
            tracing::warn!(
                requested = %locale,
                fallback = %default,
                "no source produced a document; falling back to default locale"
            );
            if let Some(document) = self.load_exact(default).await {
                return Resolution {
                    requested: locale.clone(),
                    served: Some(default.clone()),
                    document,
                };
            }
        }

        tracing::error!(
            requested = %locale,
            "all resource sources failed; serving untranslated keys"
        );
        Resolution {
            requested: locale.clone(),
            served: None,
            document: ResourceDocument::empty(),
        }
    }

    /// What: Load `locale`'s own document, without default-locale fallback.
    ///
    /// Inputs:
    /// - `locale`: Locale whose candidate sources are tried in order
    ///
    /// Output:
    /// - First document found, or `None` when every candidate is absent
    pub async fn load_exact(&self, locale: &Locale) -> Option<ResourceDocument> {
        for source in self.sources.sources_for(locale) {
            match self.fetcher.fetch(&source).await {
                FetchOutcome::Found(document) => {
                    tracing::debug!(%locale, %source, "resource document loaded");
                    return Some(document);
                }
                FetchOutcome::Absent(reason) => {
                    tracing::debug!(%locale, %source, %reason, "resource source absent");
                }
            }
        }
        None
    }
}
