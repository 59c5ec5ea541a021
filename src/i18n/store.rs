//! Durable storage of the user's explicit locale choice.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::i18n::locale::Locale;
use crate::util::config::{find_value, upsert_value};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "yb_lang";

/// Single-key durable store for the last explicitly chosen locale.
///
/// Read once at start-up and written once per committed locale change.
pub trait PreferenceStore: Send + Sync {
    /// Raw persisted value, unvalidated.
    fn load(&self) -> Option<String>;

    /// Persist `locale` as the user's choice.
    ///
    /// # Errors
    /// - Returns `Err` with a readable message when the value cannot be written
    fn save(&self, locale: &Locale) -> Result<(), String>;
}

/// File-backed store using `key = value` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
    key: String,
}

impl FileStore {
    /// What: Create a store for `key` inside the file at `path`.
    ///
    /// Inputs:
    /// - `path`: Settings file (created on first save)
    /// - `key`: Storage key (defaults to `yb_lang` when blank)
    ///
    /// Output:
    /// - `FileStore` instance
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, key: &str) -> Self {
        let key = if key.trim().is_empty() {
            DEFAULT_STORAGE_KEY
        } else {
            key.trim()
        };
        Self {
            path: path.into(),
            key: key.to_string(),
        }
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn load(&self) -> Option<String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %e,
                    "[Store] No persisted locale available"
                );
                return None;
            }
        };
        find_value(&contents, &self.key).filter(|v| !v.is_empty())
    }

    fn save(&self, locale: &Locale) -> Result<(), String> {
        let existing = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            // Unreadable files are left untouched
            Err(e) => return Err(format!("Failed to read {}: {e}", self.path.display())),
        };
        let updated = upsert_value(&existing, &self.key, locale.as_str());
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
        fs::write(&self.path, updated)
            .map_err(|e| format!("Failed to write {}: {e}", self.path.display()))?;
        tracing::debug!(
            path = %self.path.display(),
            key = %self.key,
            %locale,
            "[Store] Locale choice persisted"
        );
        Ok(())
    }
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Store pre-filled with `value`.
    #[must_use]
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Mutex::new(Some(value.to_string())),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.value.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, locale: &Locale) -> Result<(), String> {
        let mut guard = self
            .value
            .lock()
            .map_err(|_| "memory store lock poisoned".to_string())?;
        *guard = Some(locale.to_string());
        Ok(())
    }
}
