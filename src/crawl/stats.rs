// src/crawl/stats.rs
// =============================================================================
// Counters collected while crawling, reported once the run is over.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct CrawlStats {
    fetched: AtomicUsize,
    saved: AtomicUsize,
    duplicates: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
    sentinels: AtomicUsize,
}

/// A snapshot of [`CrawlStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Pages downloaded successfully
    pub fetched: usize,
    /// Pages written to the output directory
    pub saved: usize,
    /// Tasks dropped because their URL was already accepted
    pub duplicates: usize,
    /// Pages dropped because their content type is not text
    pub skipped: usize,
    /// Tasks that ended with an error
    pub failed: usize,
    /// Sentinel tasks discarded by the dispatch loop
    pub sentinels: usize,
}

impl CrawlStats {
    pub fn record_fetched(&self) {
        self.fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_saved(&self) {
        self.saved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sentinel(&self) {
        self.sentinels.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self) -> CrawlSummary {
        CrawlSummary {
            fetched: self.fetched.load(Ordering::Relaxed),
            saved: self.saved.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            sentinels: self.sentinels.load(Ordering::Relaxed),
        }
    }
}
