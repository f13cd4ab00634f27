//! Internationalization (i18n) context consumed by the language switcher.
//!
//! # Architecture
//!
//! - `language`: language code helpers, the reserved sentinel and the label key template
//! - `registry`: translation store with dotted keys, loaded from JSON bundles
//! - `context`: read-only `I18nContext` trait and the store-backed `I18n`
//! - `strings`: bundled language labels (endonyms)
//! - `validator`: startup checks on the language configuration
//! - `metrics`: label lookup and switch counters
//!
//! # Example
//!
//! ```rust
//! use language_switcher::i18n::{I18n, I18nContext, TranslationStore};
//!
//! let store = TranslationStore::with_bundled_labels("en");
//! let i18n = I18n::new("de", "en", Some(vec!["en".into(), "de".into()]), store);
//!
//! let label = i18n.translate_component("LanguageSelector.availableLanguages.de", "de");
//! assert_eq!(label, "Deutsch");
//! ```

mod context;
mod language;
mod metrics;
mod registry;
mod strings;
mod validator;

pub use context::{I18n, I18nContext};
pub use language::{is_sentinel, label_key, selectable_languages, LABEL_NAMESPACE, SENTINEL_CODE};
pub use metrics::{MetricsReport, SwitcherMetrics};
pub use registry::TranslationStore;
pub use strings::{bundled_label, LanguageLabel, BUNDLED_LABELS};
pub use validator::{TranslationValidator, ValidationReport};
