//! Resource documents and dotted-key translation lookup.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Nested key/value translation bundle for one locale.
///
/// Always a JSON object at the top level; leaves are strings or further
/// objects. Other JSON values are tolerated but never returned by lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceDocument(Map<String, Value>);

impl ResourceDocument {
    /// Empty document; every lookup falls back to the key.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// What: Parse a JSON body into a document.
    ///
    /// Inputs:
    /// - `bytes`: Raw response or file body
    ///
    /// Output:
    /// - `Ok(ResourceDocument)` or `Err` with the parse problem
    ///
    /// # Errors
    /// - Returns `Err` when the body is not valid JSON
    /// - Returns `Err` when the top-level value is not an object
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, String> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| format!("invalid JSON: {e}"))?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(&other)
            )),
        }
    }

    /// Whether the document holds no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// What: Resolve a dot-delimited key to its string value.
    ///
    /// Inputs:
    /// - `key`: Dot-notation key (e.g., "nav.contact")
    ///
    /// Output:
    /// - `Some(&str)` when the path exists and ends on a string, `None` otherwise
    ///
    /// Details:
    /// - Walks one segment at a time; stops as soon as a node is not an object
    ///   or the next segment is missing
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let mut node = self.0.get(segments.next()?)?;
        for segment in segments {
            node = node.as_object()?.get(segment)?;
        }
        node.as_str()
    }

    /// What: Flatten the document into dot-notation keys for all string leaves.
    ///
    /// Output:
    /// - Sorted set of keys such as `nav.contact`
    ///
    /// Details:
    /// - Non-string leaves (numbers, arrays, null) are skipped since lookups never return them
    #[must_use]
    pub fn flatten(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        for (key, value) in &self.0 {
            flatten_value(value, key, &mut keys);
        }
        keys
    }
}

impl From<Map<String, Value>> for ResourceDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Recursively collect string leaves under `prefix`.
fn flatten_value(value: &Value, prefix: &str, keys: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_value(val, &format!("{prefix}.{key}"), keys);
            }
        }
        Value::String(_) => {
            keys.insert(prefix.to_string());
        }
        _ => {}
    }
}

/// Short name of a JSON value kind for error messages.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// What: Look up a translation, falling back to the key itself.
///
/// Inputs:
/// - `document`: Resource document for the active locale
/// - `key`: Dot-notation key
///
/// Output:
/// - Translated string, or `key` unchanged when missing or not a string
///
/// Details:
/// - Never fails, so presentation code can call it unconditionally
/// - Missing keys are logged at debug level to keep them discoverable without flooding logs
#[must_use]
pub fn translate(document: &ResourceDocument, key: &str) -> String {
    if let Some(translation) = document.lookup(key) {
        return translation.to_string();
    }
    tracing::debug!(key, "missing translation key; returning key as-is");
    key.to_string()
}

/// What: Look up a translation and fill `{}` placeholders in order.
///
/// Inputs:
/// - `document`: Resource document for the active locale
/// - `key`: Dot-notation key
/// - `args`: Format arguments (as Display trait objects)
///
/// Output:
/// - Formatted translated string
///
/// Details:
/// - First `{}` gets first arg, etc.; surplus args are ignored
/// - Single pass over the template: `{}` inside an argument is left as-is
/// - A missing key yields the key itself (which usually has no placeholders)
#[must_use]
pub fn translate_fmt(
    document: &ResourceDocument,
    key: &str,
    args: &[&dyn std::fmt::Display],
) -> String {
    let template = translate(document, key);
    let mut result = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template.as_str();
    while let Some(pos) = rest.find("{}") {
        result.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => result.push_str(&arg.to_string()),
            None => result.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    result.push_str(rest);
    result
}

/// What: List keys present in `reference` but not resolvable in `other`.
///
/// Inputs:
/// - `reference`: Document treated as complete (normally the default locale)
/// - `other`: Document to audit
///
/// Output:
/// - Sorted missing keys
#[must_use]
pub fn missing_keys(reference: &ResourceDocument, other: &ResourceDocument) -> Vec<String> {
    reference
        .flatten()
        .into_iter()
        .filter(|key| other.lookup(key).is_none())
        .collect()
}
