//! Translation registry: dotted-key lookup tables per language.
//!
//! Bundles are JSON objects keyed by language code. Nested objects are
//! flattened into dotted keys, so `{"en": {"A": {"b": "x"}}}` registers
//! `A.b = "x"` for `en`.

use crate::i18n::language::label_key;
use crate::i18n::strings::BUNDLED_LABELS;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Translations for every known language.
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    languages: HashMap<String, HashMap<String, String>>,
}

impl TranslationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with the bundled language labels under `language`.
    pub fn with_bundled_labels(language: &str) -> Self {
        let mut store = Self::new();
        for entry in BUNDLED_LABELS {
            store.insert(language, &label_key(entry.code), entry.label);
        }
        store
    }

    /// Register a single translation, replacing any previous value.
    pub fn insert(&mut self, language: &str, key: &str, value: &str) {
        self.languages
            .entry(language.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Look up a translation for an exact language and key.
    pub fn get(&self, language: &str, key: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
    }

    /// Check whether a language has any translations at all.
    pub fn has_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Number of keys registered for a language.
    pub fn key_count(&self, language: &str) -> usize {
        self.languages.get(language).map(HashMap::len).unwrap_or(0)
    }

    /// Merge a JSON bundle into the store.
    ///
    /// Values from the bundle override existing ones. Non-string leaves
    /// (numbers, booleans, arrays, null) are skipped.
    pub fn merge_json(&mut self, json: &str) -> Result<usize> {
        let root: Value = serde_json::from_str(json).context("Invalid translation bundle JSON")?;

        let Value::Object(languages) = root else {
            bail!("Translation bundle must be an object keyed by language code");
        };

        let mut added = 0;
        for (language, tree) in languages {
            let mut flat = Vec::new();
            flatten_into(&tree, String::new(), &mut flat);
            for (key, value) in flat {
                self.insert(&language, &key, &value);
                added += 1;
            }
        }

        Ok(added)
    }

    /// Merge a JSON bundle read from disk.
    pub fn merge_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read translation bundle {}", path.display()))?;
        let added = self.merge_json(&content)?;
        debug!("Loaded {} translations from {}", added, path.display());
        Ok(added)
    }
}

fn flatten_into(value: &Value, prefix: String, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let next = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(child, next, out);
            }
        }
        Value::String(text) if !prefix.is_empty() => out.push((prefix, text.clone())),
        _ => {}
    }
}
