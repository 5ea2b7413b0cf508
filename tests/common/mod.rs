//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use mini_spider::config::SpiderConfig;
use mini_spider::error::FetchError;
use mini_spider::fetch::{Fetcher, Page};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// A fetcher serving a fixed link graph from memory.
///
/// Records when each URL was requested and how many fetches overlapped.
/// Unknown URLs answer 404.
#[derive(Default)]
pub struct GraphFetcher {
    pages: HashMap<String, Page>,
    delay: Duration,
    started: Mutex<Vec<(String, Instant)>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl GraphFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an HTML page at `url` linking to `links`.
    pub fn page(mut self, url: &str, links: &[&str]) -> Self {
        let anchors: String = links
            .iter()
            .map(|link| format!(r#"<a href="{}">{}</a>"#, link, link))
            .collect();
        let html = format!("<html><body>{}</body></html>", anchors);
        self.pages.insert(
            url.to_string(),
            Page {
                body: html.into_bytes(),
                content_type: "text/html; charset=utf-8".to_string(),
            },
        );
        self
    }

    /// Every fetch takes this long.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.started
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == url)
            .count()
    }

    pub fn total_fetches(&self) -> usize {
        self.started.lock().unwrap().len()
    }

    /// When `url` was first requested.
    pub fn started_at(&self, url: &str) -> Option<Instant> {
        self.started
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, at)| *at)
    }

    /// Start times of every request whose URL begins with `prefix`, in order.
    pub fn starts_with_prefix(&self, prefix: &str) -> Vec<Instant> {
        self.started
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u.starts_with(prefix))
            .map(|(_, at)| *at)
            .collect()
    }

    /// Most fetches that were ever running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for GraphFetcher {
    async fn fetch(&self, url: &str, _limit: Duration) -> Result<Page, FetchError> {
        self.started
            .lock()
            .unwrap()
            .push((url.to_string(), Instant::now()));

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.pages
            .get(url)
            .cloned()
            .ok_or(FetchError::NonSuccessStatus(404))
    }
}

/// A valid config writing to `output_dir`.
pub fn spider_config(output_dir: &Path, max_depth: usize, workers: usize) -> SpiderConfig {
    SpiderConfig {
        url_list_file: "unused.json".into(),
        output_directory: output_dir.to_path_buf(),
        max_depth,
        crawl_interval: 0,
        crawl_timeout: 5,
        target_url_pattern: ".*x$".to_string(),
        worker_count: workers,
    }
}

pub fn seeds(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|u| u.to_string()).collect()
}

/// The file a saved page for `url` ends up in.
pub fn saved_file(output_dir: &Path, url: &str) -> std::path::PathBuf {
    output_dir.join(mini_spider::storage::file_name_for(url).unwrap())
}
