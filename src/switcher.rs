//! Language switcher control.
//!
//! The switcher reads an [`I18nContext`], offers every supported language
//! except the sentinel, and on selection asks a [`LanguageApi`] to switch
//! before sending the browser to the URL it returns.
//!
//! A deployment with one selectable language (or none) shows no switcher.

use crate::api_client::{LanguageApi, SwitchError};
use crate::i18n::{label_key, selectable_languages, I18nContext, SwitcherMetrics};
use crate::navigation::Navigator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

/// Icons the control draws, by design-system name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Globe,
}

impl Icon {
    pub fn name(&self) -> &'static str {
        match self {
            Icon::Globe => "Globe",
        }
    }
}

/// Button that opens the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub icon: Icon,
    pub label: String,
}

/// One selectable language in the dropdown menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Unique key: the language code itself
    pub key: String,
    pub label: String,
}

/// Everything needed to draw a visible switcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitcherView {
    pub trigger: Trigger,
    pub items: Vec<MenuItem>,
    /// A switch is in flight; further selections are refused
    pub disabled: bool,
}

// Cached filter result, keyed on the identity of the supported set
struct Memo {
    supported: Option<Arc<[String]>>,
    available: Arc<[String]>,
}

impl Memo {
    fn matches(&self, supported: &Option<Arc<[String]>>) -> bool {
        match (&self.supported, supported) {
            (Some(cached), Some(current)) => Arc::ptr_eq(cached, current),
            (None, None) => true,
            _ => false,
        }
    }
}

// Clears the in-flight flag when a selection finishes or is dropped
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct LanguageSwitcher {
    api: Arc<dyn LanguageApi>,
    navigator: Arc<dyn Navigator>,
    memo: Arc<Mutex<Option<Memo>>>,
    pending: AtomicBool,
}

impl LanguageSwitcher {
    pub fn new(api: Arc<dyn LanguageApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            navigator,
            memo: Arc::new(Mutex::new(None)),
            pending: AtomicBool::new(false),
        }
    }

    /// A switcher that navigates through `navigator` but shares this one's
    /// API and cached language list.
    ///
    /// The in-flight guard is not shared: each page gets its own.
    pub fn with_navigator(&self, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api: Arc::clone(&self.api),
            navigator,
            memo: Arc::clone(&self.memo),
            pending: AtomicBool::new(false),
        }
    }

    /// Supported languages minus the sentinel, in configured order.
    ///
    /// The result is reused for as long as the context hands out the same
    /// supported set.
    pub fn available_languages(&self, i18n: &dyn I18nContext) -> Arc<[String]> {
        let supported = i18n.supported_languages();

        let Ok(mut memo) = self.memo.lock() else {
            return selectable_languages(supported.as_deref()).into();
        };

        if let Some(cached) = memo.as_ref().filter(|m| m.matches(&supported)) {
            return Arc::clone(&cached.available);
        }

        let available: Arc<[String]> = selectable_languages(supported.as_deref()).into();
        *memo = Some(Memo {
            supported,
            available: Arc::clone(&available),
        });
        available
    }

    /// Whether a switch request is currently in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Build the view, or `None` when there is nothing to switch between.
    pub fn render(&self, i18n: &dyn I18nContext) -> Option<SwitcherView> {
        let available = self.available_languages(i18n);
        if available.len() <= 1 {
            return None;
        }

        let current = i18n.language();
        let trigger = Trigger {
            icon: Icon::Globe,
            label: language_label(i18n, current),
        };

        let items = available
            .iter()
            .map(|code| MenuItem {
                key: code.clone(),
                label: language_label(i18n, code),
            })
            .collect();

        Some(SwitcherView {
            trigger,
            items,
            disabled: self.is_pending(),
        })
    }

    /// Switch to `code` and navigate to the URL the API answers with.
    ///
    /// Navigation only happens once the API call has succeeded. Errors are
    /// returned to the caller untouched. While one switch is in flight any
    /// other selection fails with [`SwitchError::InFlight`].
    pub async fn select(&self, code: &str) -> Result<String, SwitchError> {
        let metrics = SwitcherMetrics::global();

        if self
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            metrics.record_rejected_selection();
            warn!("Ignoring switch to '{}': another switch is in progress", code);
            return Err(SwitchError::InFlight);
        }
        let _pending = PendingGuard(&self.pending);

        metrics.record_switch_request();
        info!("Switching language to '{}'", code);

        match self.api.switch_language(code).await {
            Ok(target) => {
                self.navigator.navigate(&target);
                Ok(target)
            }
            Err(e) => {
                metrics.record_switch_failure();
                error!("Language switch to '{}' failed: {}", code, e);
                Err(e)
            }
        }
    }
}

/// Display label for a language code; the code itself when untranslated.
pub fn language_label(i18n: &dyn I18nContext, code: &str) -> String {
    i18n.translate_component(&label_key(code), code)
}
