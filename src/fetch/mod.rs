// src/fetch/mod.rs
// =============================================================================
// Downloading pages.
//
// The crawl engine only knows the Fetcher trait: "give me the bytes and the
// content type of this URL, within this much time". HttpFetcher is the real
// implementation; tests plug in in-memory link graphs instead.
// =============================================================================

mod http;

use async_trait::async_trait;
use std::time::Duration;

use crate::error::FetchError;

pub use http::{HttpFetcher, USER_AGENT};

/// A downloaded page, still in its original encoding.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub body: Vec<u8>,
    /// The raw Content-Type header, empty if the server sent none
    pub content_type: String,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, giving up after `limit`.
    ///
    /// Exactly one result is returned, and nothing keeps running in the
    /// background once it has been returned.
    async fn fetch(&self, url: &str, limit: Duration) -> Result<Page, FetchError>;
}
