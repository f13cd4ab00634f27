//! Language codes: opaque identifiers with one reserved value.
//!
//! Codes are compared by equality and used as display keys, nothing more.
//! The only code with special meaning is the sentinel, a debugging locale
//! that must never be offered to users.

/// Reserved debug locale, never selectable.
pub const SENTINEL_CODE: &str = "cimode";

/// Namespace under which every language label lives.
pub const LABEL_NAMESPACE: &str = "LanguageSelector.availableLanguages";

/// Check whether a code is the reserved sentinel.
pub fn is_sentinel(code: &str) -> bool {
    code == SENTINEL_CODE
}

/// Build the translation key for a language's display label.
///
/// # Example
/// ```
/// use language_switcher::i18n::label_key;
///
/// assert_eq!(label_key("fr"), "LanguageSelector.availableLanguages.fr");
/// ```
pub fn label_key(code: &str) -> String {
    format!("{}.{}", LABEL_NAMESPACE, code)
}

/// Remove the sentinel from a supported set, keeping the original order.
///
/// An absent set is treated as empty.
pub fn selectable_languages(supported: Option<&[String]>) -> Vec<String> {
    supported
        .unwrap_or_default()
        .iter()
        .filter(|code| !is_sentinel(code))
        .cloned()
        .collect()
}
