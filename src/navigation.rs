//! Browser navigation seam for the switcher.

use std::sync::Mutex;
use tracing::debug;

/// Write-only handle on the browser location.
///
/// `navigate` is a full page replace: the current page state is abandoned
/// and the target URL is loaded from scratch.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str);
}

/// Navigator that turns the last requested target into an HTTP redirect.
///
/// When several navigations land on the same navigator, the last one wins,
/// as it would for `window.location` in a browser.
#[derive(Debug, Default)]
pub struct RedirectNavigator {
    target: Mutex<Option<String>>,
    count: Mutex<usize>,
}

impl RedirectNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending redirect target, leaving none behind.
    pub fn take_target(&self) -> Option<String> {
        self.target.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Peek at the pending redirect target.
    pub fn target(&self) -> Option<String> {
        self.target.lock().ok().and_then(|slot| slot.clone())
    }

    /// Number of navigations requested so far.
    pub fn navigation_count(&self) -> usize {
        self.count.lock().map(|count| *count).unwrap_or(0)
    }
}

impl Navigator for RedirectNavigator {
    fn navigate(&self, target: &str) {
        debug!("Navigating to {}", target);
        if let Ok(mut slot) = self.target.lock() {
            *slot = Some(target.to_string());
        }
        if let Ok(mut count) = self.count.lock() {
            *count += 1;
        }
    }
}
