//! Routing and dictionary metrics.
//!
//! Counters are plain relaxed atomics. One instance is shared by the router
//! and the dictionary loader for the lifetime of the process.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct RoutingMetrics {
    /// Requests answered with a locale redirect
    redirects: AtomicUsize,

    /// Requests that already carried a locale segment
    pass_throughs: AtomicUsize,

    /// Requests excluded from locale routing (API, assets, favicon)
    skipped: AtomicUsize,

    /// Dictionary loads served from the cache
    dictionary_hits: AtomicUsize,

    /// Dictionary loads that had to parse the resource
    dictionary_misses: AtomicUsize,

    /// Dictionary loads for a tag with no resource, served by the default
    dictionary_fallbacks: AtomicUsize,
}

impl RoutingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_redirect(&self) {
        self.redirects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_pass_through(&self) {
        self.pass_throughs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dictionary_hit(&self) {
        self.dictionary_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dictionary_miss(&self) {
        self.dictionary_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dictionary_fallback(&self) {
        self.dictionary_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::Relaxed)
    }

    pub fn pass_throughs(&self) -> usize {
        self.pass_throughs.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }

    pub fn dictionary_hits(&self) -> usize {
        self.dictionary_hits.load(Ordering::Relaxed)
    }

    pub fn dictionary_misses(&self) -> usize {
        self.dictionary_misses.load(Ordering::Relaxed)
    }

    pub fn dictionary_fallbacks(&self) -> usize {
        self.dictionary_fallbacks.load(Ordering::Relaxed)
    }

    /// Snapshot of all counters plus derived rates.
    pub fn report(&self) -> MetricsReport {
        let redirects = self.redirects();
        let pass_throughs = self.pass_throughs();
        let routed = redirects + pass_throughs;
        let redirect_rate = if routed > 0 {
            (redirects as f64 / routed as f64) * 100.0
        } else {
            0.0
        };

        let hits = self.dictionary_hits();
        let misses = self.dictionary_misses();
        let loads = hits + misses;
        let dictionary_hit_rate = if loads > 0 {
            (hits as f64 / loads as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            redirects,
            pass_throughs,
            skipped: self.skipped(),
            redirect_rate,
            dictionary_hits: hits,
            dictionary_misses: misses,
            dictionary_fallbacks: self.dictionary_fallbacks(),
            dictionary_hit_rate,
        }
    }
}

/// Point-in-time view of `RoutingMetrics`, served as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub redirects: usize,
    pub pass_throughs: usize,
    pub skipped: usize,

    /// Share of routed requests that were redirected (0-100)
    pub redirect_rate: f64,

    pub dictionary_hits: usize,
    pub dictionary_misses: usize,
    pub dictionary_fallbacks: usize,

    /// Share of dictionary loads served from cache (0-100)
    pub dictionary_hit_rate: f64,
}
