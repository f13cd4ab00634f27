//! The internationalization context a component reads from.
//!
//! Components never own language state. They receive an [`I18nContext`] and
//! only read the current language, the supported set and translations.

use crate::i18n::registry::TranslationStore;
use crate::i18n::SwitcherMetrics;
use std::sync::Arc;

/// Read-only view of the application's language state.
pub trait I18nContext: Send + Sync {
    /// Currently active language code.
    fn language(&self) -> &str;

    /// Supported language codes in display order, if configured.
    ///
    /// The returned `Arc` is the identity of the set: callers may reuse work
    /// derived from it for as long as the pointer stays the same.
    fn supported_languages(&self) -> Option<Arc<[String]>>;

    /// Resolve a component translation, returning `default_value` on a miss.
    fn translate_component(&self, key: &str, default_value: &str) -> String;
}

/// Standard context backed by a [`TranslationStore`].
///
/// Lookups try the current language first, then the fallback language.
#[derive(Debug, Clone)]
pub struct I18n {
    language: String,
    fallback_language: String,
    supported: Option<Arc<[String]>>,
    store: Arc<TranslationStore>,
}

impl I18n {
    pub fn new(
        language: impl Into<String>,
        fallback_language: impl Into<String>,
        supported: Option<Vec<String>>,
        store: TranslationStore,
    ) -> Self {
        Self {
            language: language.into(),
            fallback_language: fallback_language.into(),
            supported: supported.map(Arc::from),
            store: Arc::new(store),
        }
    }

    /// Same context with a different current language.
    ///
    /// The supported set and translation store are shared, not copied.
    pub fn with_language(&self, language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..self.clone()
        }
    }

    pub fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    pub fn store(&self) -> &TranslationStore {
        &self.store
    }
}

impl I18nContext for I18n {
    fn language(&self) -> &str {
        &self.language
    }

    fn supported_languages(&self) -> Option<Arc<[String]>> {
        self.supported.clone()
    }

    fn translate_component(&self, key: &str, default_value: &str) -> String {
        let metrics = SwitcherMetrics::global();

        let found = self
            .store
            .get(&self.language, key)
            .or_else(|| self.store.get(&self.fallback_language, key));

        match found {
            Some(value) => {
                metrics.record_translation_hit();
                value.to_string()
            }
            None => {
                metrics.record_translation_fallback();
                default_value.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    fn store() -> TranslationStore {
        let mut store = TranslationStore::new();
        store.insert("en", "Title", "Dashboard");
        store.insert("en", "Only.english", "English only");
        store.insert("de", "Title", "Übersicht");
        store
    }

    #[test]
    fn test_translate_current_language() {
        let i18n = I18n::new("de", "en", None, store());
        assert_eq!(i18n.translate_component("Title", "fallback"), "Übersicht");
    }

    #[test]
    fn test_translate_falls_back_to_fallback_language() {
        let i18n = I18n::new("de", "en", None, store());
        assert_eq!(
            i18n.translate_component("Only.english", "fallback"),
            "English only"
        );
    }

    #[test]
    fn test_translate_default_value_on_miss() {
        let i18n = I18n::new("de", "en", None, store());
        assert_eq!(i18n.translate_component("Missing.key", "de"), "de");
    }

    #[test]
    fn test_translate_empty_store_uses_default() {
        let i18n = I18n::new("de", "en", None, TranslationStore::new());
        assert_eq!(
            i18n.translate_component("LanguageSelector.availableLanguages.de", "de"),
            "de"
        );
    }

    #[test]
    fn test_supported_absent() {
        let i18n = I18n::new("en", "en", None, TranslationStore::new());
        assert!(i18n.supported_languages().is_none());
    }

    #[test]
    fn test_supported_keeps_order() {
        let i18n = I18n::new("en", "en", Some(codes(&["fr", "en", "de"])), store());
        let supported = i18n.supported_languages().expect("configured");
        assert_eq!(&*supported, codes(&["fr", "en", "de"]).as_slice());
    }

    #[test]
    fn test_with_language_shares_supported_set() {
        let i18n = I18n::new("en", "en", Some(codes(&["en", "de"])), store());
        let german = i18n.with_language("de");

        assert_eq!(german.language(), "de");
        assert_eq!(i18n.language(), "en");

        let a = i18n.supported_languages().expect("configured");
        let b = german.supported_languages().expect("configured");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_fallback_language_accessor() {
        let i18n = I18n::new("de", "en", None, store());
        assert_eq!(i18n.fallback_language(), "en");
        assert_eq!(i18n.store().get("de", "Title"), Some("Übersicht"));
    }
}
