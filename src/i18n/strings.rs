/// Display label for a language code, written in that language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageLabel {
    pub code: &'static str,
    pub label: &'static str,
}

// ==================== Bundled Labels ====================

/// Labels shipped with the crate.
///
/// These are registered under the default language, so any language without
/// its own bundle still shows endonyms instead of raw codes.
pub const BUNDLED_LABELS: &[LanguageLabel] = &[
    LanguageLabel { code: "ar", label: "العربية" },
    LanguageLabel { code: "de", label: "Deutsch" },
    LanguageLabel { code: "en", label: "English" },
    LanguageLabel { code: "es", label: "Español" },
    LanguageLabel { code: "fr", label: "Français" },
    LanguageLabel { code: "it", label: "Italiano" },
    LanguageLabel { code: "ja", label: "日本語" },
    LanguageLabel { code: "ko", label: "한국어" },
    LanguageLabel { code: "nl", label: "Nederlands" },
    LanguageLabel { code: "pl", label: "Polski" },
    LanguageLabel { code: "pt-BR", label: "Português (Brasil)" },
    LanguageLabel { code: "ru", label: "Русский" },
    LanguageLabel { code: "tr", label: "Türkçe" },
    LanguageLabel { code: "uk", label: "Українська" },
    LanguageLabel { code: "zh-CN", label: "中文" },
];

/// Find the bundled label for a code.
pub fn bundled_label(code: &str) -> Option<&'static str> {
    BUNDLED_LABELS
        .iter()
        .find(|entry| entry.code == code)
        .map(|entry| entry.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bundled_label_found() {
        assert_eq!(bundled_label("pl"), Some("Polski"));
        assert_eq!(bundled_label("pt-BR"), Some("Português (Brasil)"));
    }

    #[test]
    fn test_bundled_label_missing() {
        assert_eq!(bundled_label("xx"), None);
        assert_eq!(bundled_label("cimode"), None);
    }

    #[test]
    fn test_bundled_codes_are_unique() {
        let codes: HashSet<_> = BUNDLED_LABELS.iter().map(|l| l.code).collect();
        assert_eq!(codes.len(), BUNDLED_LABELS.len());
    }

    #[test]
    fn test_bundled_labels_not_empty() {
        for entry in BUNDLED_LABELS {
            assert!(!entry.label.trim().is_empty(), "empty label for {}", entry.code);
        }
    }
}
