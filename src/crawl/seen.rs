// src/crawl/seen.rs
// =============================================================================
// The dedup gate: remembers every URL that was ever accepted for crawling.
//
// accept_once() tests and inserts under one lock, so exactly one caller
// sees `true` for a given URL, no matter how many workers race on it.
// =============================================================================

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct SeenUrls {
    urls: Mutex<HashSet<String>>,
}

impl SeenUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time `url` is presented, false ever after.
    pub fn accept_once(&self, url: &str) -> bool {
        let mut urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_accept_once() {
        let seen = SeenUrls::new();
        assert!(seen.accept_once("http://a.test/"));
        assert!(!seen.accept_once("http://a.test/"));
        assert!(seen.accept_once("http://a.test/x"));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_urls_are_compared_exactly() {
        let seen = SeenUrls::new();
        assert!(seen.accept_once("http://a.test/"));
        assert!(seen.accept_once("http://a.test"));
        assert!(seen.accept_once("http://a.test/#top"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_exactly_one_winner_under_contention() {
        let seen = Arc::new(SeenUrls::new());
        let winners = Arc::new(AtomicUsize::new(0));

        let racers: Vec<_> = (0..64)
            .map(|_| {
                let seen = Arc::clone(&seen);
                let winners = Arc::clone(&winners);
                tokio::spawn(async move {
                    for i in 0..10 {
                        if seen.accept_once(&format!("http://a.test/{}", i)) {
                            winners.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                })
            })
            .collect();
        futures::future::join_all(racers).await;

        assert_eq!(winners.load(Ordering::SeqCst), 10);
        assert_eq!(seen.len(), 10);
    }
}
