//! Switcher metrics and observability module.
//!
//! This module tracks how often labels resolve through the translation store
//! versus falling back to raw codes, and how language switches fare.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global switcher metrics singleton.
pub struct SwitcherMetrics {
    /// Number of label lookups answered by the translation store
    translation_hits: AtomicUsize,

    /// Number of label lookups that fell back to the default value
    translation_fallbacks: AtomicUsize,

    /// Number of switch requests sent to the API
    switch_requests: AtomicUsize,

    /// Number of switch requests that failed
    switch_failures: AtomicUsize,

    /// Number of selections refused because a switch was already in flight
    rejected_selections: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<SwitcherMetrics> = OnceLock::new();

impl SwitcherMetrics {
    /// Create a standalone set of counters, all zero.
    pub fn new() -> Self {
        Self {
            translation_hits: AtomicUsize::new(0),
            translation_fallbacks: AtomicUsize::new(0),
            switch_requests: AtomicUsize::new(0),
            switch_failures: AtomicUsize::new(0),
            rejected_selections: AtomicUsize::new(0),
        }
    }

    /// Get the global metrics instance.
    ///
    /// This method initializes the metrics on first call and returns a reference
    /// to the singleton instance on subsequent calls.
    pub fn global() -> &'static SwitcherMetrics {
        METRICS.get_or_init(SwitcherMetrics::new)
    }

    pub fn record_translation_hit(&self) {
        self.translation_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_translation_fallback(&self) {
        self.translation_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_switch_request(&self) {
        self.switch_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_switch_failure(&self) {
        self.switch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_selection(&self) {
        self.rejected_selections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn translation_hits(&self) -> usize {
        self.translation_hits.load(Ordering::Relaxed)
    }

    pub fn translation_fallbacks(&self) -> usize {
        self.translation_fallbacks.load(Ordering::Relaxed)
    }

    pub fn switch_requests(&self) -> usize {
        self.switch_requests.load(Ordering::Relaxed)
    }

    pub fn switch_failures(&self) -> usize {
        self.switch_failures.load(Ordering::Relaxed)
    }

    pub fn rejected_selections(&self) -> usize {
        self.rejected_selections.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.translation_hits();
        let fallbacks = self.translation_fallbacks();
        let lookups = hits + fallbacks;
        let translation_hit_rate = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        let requests = self.switch_requests();
        let failures = self.switch_failures();
        let switch_success_rate = if requests > 0 {
            (requests.saturating_sub(failures) as f64 / requests as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            translation_hits: hits,
            translation_fallbacks: fallbacks,
            translation_hit_rate,
            switch_requests: requests,
            switch_failures: failures,
            switch_success_rate,
            rejected_selections: self.rejected_selections(),
        }
    }
}

impl Default for SwitcherMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Metrics report containing current switcher statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub translation_hits: usize,
    pub translation_fallbacks: usize,

    /// Share of label lookups answered by the store, as a percentage (0-100)
    pub translation_hit_rate: f64,

    pub switch_requests: usize,
    pub switch_failures: usize,

    /// Share of switch requests that succeeded, as a percentage (0-100)
    pub switch_success_rate: f64,

    pub rejected_selections: usize,
}

impl MetricsReport {
    /// Format the report as a single log line.
    pub fn format_summary(&self) -> String {
        format!(
            "labels: {} hits / {} fallbacks ({:.1}% hit rate) | switches: {} requests / {} failures ({:.1}% success) | {} rejected",
            self.translation_hits,
            self.translation_fallbacks,
            self.translation_hit_rate,
            self.switch_requests,
            self.switch_failures,
            self.switch_success_rate,
            self.rejected_selections,
        )
    }
}
