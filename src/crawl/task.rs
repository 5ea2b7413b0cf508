// src/crawl/task.rs
// =============================================================================
// A Task is one unit of work: crawl a single URL at a known depth.
//
// Seeds start at depth 0 and every discovered link is one level deeper than
// the page it was found on. Tasks never change after creation.
// =============================================================================

use regex::Regex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Settings every task reads, shared behind an `Arc` and never mutated.
#[derive(Debug)]
pub struct TaskConfig {
    pub crawl_timeout: Duration,
    pub output_directory: PathBuf,
    pub target_url: Regex,
}

impl TaskConfig {
    /// True if the page at `url` should be saved.
    pub fn is_target(&self, url: &str) -> bool {
        self.target_url.is_match(url)
    }
}

#[derive(Debug, Clone)]
pub struct Task {
    pub url: String,
    pub depth: usize,
    pub config: Arc<TaskConfig>,
}

impl Task {
    pub fn seed(url: impl Into<String>, config: Arc<TaskConfig>) -> Self {
        Self {
            url: url.into(),
            depth: 0,
            config,
        }
    }

    /// A task for a link found on this task's page.
    pub fn child(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            depth: self.depth + 1,
            config: Arc::clone(&self.config),
        }
    }

    /// A no-op task pushed by every finished worker.
    ///
    /// Its depth equals `max_depth`, so the dispatch loop drops it as soon as
    /// it is popped. Its only job is to make a finished worker visible in the
    /// frontier before the worker's slot is released.
    pub fn sentinel(max_depth: usize, config: Arc<TaskConfig>) -> Self {
        Self {
            url: String::new(),
            depth: max_depth,
            config,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.url.is_empty()
    }
}
