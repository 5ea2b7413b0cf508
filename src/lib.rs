// src/lib.rs
// =============================================================================
// mini-spider: a polite, bounded-concurrency batch web crawler.
//
// Starting from seed URLs it follows links up to a maximum depth, saves the
// pages whose URL matches a pattern, waits between requests to the same host
// and never crawls a URL twice.
//
// Modules:
// - config: spider.yaml and the seed list
// - crawl: the engine (frontier, workers, politeness, dedup, termination)
// - fetch: time-boxed HTTP downloads
// - page: charset decoding and link extraction
// - storage: writing matched pages to disk
// - logging: tracing setup for the binary
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod page;
pub mod storage;

pub use crawl::{CrawlSummary, Scheduler};
pub use error::{ConfigError, TaskError};
