//! Test utilities for common test setup.
//!
//! This module provides shared test doubles used across multiple test modules.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use serde_json::Value;
use tokio::sync::Notify;

use crate::i18n::{
    AbsentReason, FetchOutcome, Locale, PreferenceStore, ResourceDocument, ResourceFetcher,
    SourceLocation, SupportedLocales,
};

/// What: Provide the site's locale set (`en` default, plus `fr`, `de`, `es`).
///
/// Output: Validated `SupportedLocales`
pub fn site_locales() -> SupportedLocales {
    SupportedLocales::new(["en", "fr", "de", "es"], "en").expect("valid locale set")
}

/// Canned response for one source.
#[derive(Clone)]
enum Canned {
    Document(ResourceDocument),
    Malformed,
}

#[derive(Default)]
struct StubInner {
    responses: HashMap<String, Canned>,
    gates: HashMap<String, Arc<Notify>>,
    calls: Mutex<Vec<String>>,
}

/// In-memory fetcher keyed by source location.
///
/// Unknown sources are `Absent`. A gated source waits for its `Notify`
/// before answering, which lets tests control completion order.
#[derive(Clone, Default)]
pub struct StubFetcher {
    inner: Arc<StubInner>,
}

impl StubFetcher {
    /// Empty stub: every source is absent.
    pub fn new() -> Self {
        Self::default()
    }

    fn inner_mut(&mut self) -> &mut StubInner {
        Arc::get_mut(&mut self.inner).expect("configure StubFetcher before cloning it")
    }

    /// Serve `document` (must be a JSON object) at `source`.
    pub fn with(mut self, source: &str, document: Value) -> Self {
        let document: ResourceDocument =
            serde_json::from_value(document).expect("stub document must be an object");
        self.inner_mut()
            .responses
            .insert(source.to_string(), Canned::Document(document));
        self
    }

    /// Serve a malformed body at `source`.
    pub fn with_malformed(mut self, source: &str) -> Self {
        self.inner_mut()
            .responses
            .insert(source.to_string(), Canned::Malformed);
        self
    }

    /// Hold answers for `source` until the returned `Notify` fires.
    pub fn gate(mut self, source: &str) -> (Self, Arc<Notify>) {
        let notify = Arc::new(Notify::new());
        self.inner_mut()
            .gates
            .insert(source.to_string(), Arc::clone(&notify));
        (self, notify)
    }

    /// Sources requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.inner
            .calls
            .lock()
            .expect("calls mutex poisoned")
            .clone()
    }
}

impl ResourceFetcher for StubFetcher {
    async fn fetch(&self, source: &SourceLocation) -> FetchOutcome {
        self.inner
            .calls
            .lock()
            .expect("calls mutex poisoned")
            .push(source.as_str().to_string());

        if let Some(gate) = self.inner.gates.get(source.as_str()) {
            gate.notified().await;
        }

        match self.inner.responses.get(source.as_str()) {
            Some(Canned::Document(document)) => FetchOutcome::Found(document.clone()),
            Some(Canned::Malformed) => {
                FetchOutcome::Absent(AbsentReason::Malformed("stub malformed body".into()))
            }
            None => FetchOutcome::Absent(AbsentReason::Status(404)),
        }
    }
}

/// In-memory preference store that records every save.
#[derive(Clone, Default)]
pub struct RecordingStore {
    initial: Option<String>,
    saved: Arc<Mutex<Vec<String>>>,
}

impl RecordingStore {
    /// Store that reports `initial` as the persisted choice.
    pub fn with_initial(initial: &str) -> Self {
        Self {
            initial: Some(initial.to_string()),
            saved: Arc::default(),
        }
    }

    /// Locales saved so far, in order.
    pub fn saved(&self) -> Vec<String> {
        self.saved.lock().expect("saved mutex poisoned").clone()
    }
}

impl PreferenceStore for RecordingStore {
    fn load(&self) -> Option<String> {
        self.initial.clone()
    }

    fn save(&self, locale: &Locale) -> Result<(), String> {
        self.saved
            .lock()
            .expect("saved mutex poisoned")
            .push(locale.to_string());
        Ok(())
    }
}

/// What: Serialize tests that mutate process environment variables.
///
/// Output: Guard held for the duration of the test
pub fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
