//! Language configuration validation module.
//!
//! This module checks that the configured language set and the translation
//! store agree with each other before the switcher is served: every
//! selectable language should have a label, codes should look like locale
//! tags, and nothing should be listed twice.

use crate::i18n::language::{is_sentinel, label_key};
use crate::i18n::{I18n, I18nContext};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about the language setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make the switcher misbehave
    pub errors: Vec<String>,

    /// Problems that only degrade how the switcher looks
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for the language configuration.
pub struct TranslationValidator;

// Loose BCP-47 shape: primary subtag plus optional subtags
static LOCALE_TAG_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate a context's supported set against its translation store.
    ///
    /// This function checks that:
    /// - the fallback language is set
    /// - no code appears twice in the supported set
    /// - the fallback (default) language is one of the selectable codes
    /// - every selectable code has a label in the current or fallback language
    /// - every selectable code looks like a locale tag
    pub fn validate(i18n: &I18n) -> ValidationReport {
        let mut report = ValidationReport::new();

        if i18n.fallback_language().trim().is_empty() {
            report
                .errors
                .push("Fallback language is empty".to_string());
        }

        let Some(supported) = i18n.supported_languages() else {
            report
                .warnings
                .push("No supported languages configured; switcher stays hidden".to_string());
            return report;
        };

        let mut seen = HashSet::new();
        for code in supported.iter() {
            if !seen.insert(code.as_str()) {
                report
                    .errors
                    .push(format!("Language '{}' is listed more than once", code));
            }
        }

        let fallback = i18n.fallback_language();
        let offered = !is_sentinel(fallback) && supported.iter().any(|code| code == fallback);
        if !fallback.trim().is_empty() && !offered {
            report.warnings.push(format!(
                "Default language '{}' is not selectable; the menu will not offer it",
                fallback
            ));
        }

        for code in supported.iter().filter(|code| !is_sentinel(code)) {
            if !Self::is_locale_tag(code) {
                report
                    .warnings
                    .push(format!("Language code '{}' does not look like a locale tag", code));
            }

            let key = label_key(code);
            let has_label = i18n.store().get(i18n.language(), &key).is_some()
                || i18n.store().get(i18n.fallback_language(), &key).is_some();
            if !has_label {
                report.warnings.push(format!(
                    "No label for '{}' (key {}); the raw code will be shown",
                    code, key
                ));
            }
        }

        report
    }

    /// Check whether a code has the shape of a BCP-47 locale tag.
    pub fn is_locale_tag(code: &str) -> bool {
        let regex = LOCALE_TAG_REGEX.get_or_init(|| {
            Regex::new(r"^[A-Za-z]{2,8}(-[A-Za-z0-9]{1,8})*$").expect("Invalid locale tag regex")
        });
        regex.is_match(code)
    }
}
