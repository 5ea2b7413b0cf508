// src/crawl/executor.rs
// =============================================================================
// Runs one task, start to finish.
//
// Steps, in order. Any of them may end the task early:
// 1. Depth check     (done by the dispatch loop, see Scheduler)
// 2. Dedup check     URL already accepted? drop it
// 3. Politeness      wait for the host's turn
// 4. Fetch           time-boxed GET
// 5. Content type    not text? drop it
// 6. Decode          to UTF-8
// 7. Save            only if the URL matches the target pattern
// 8. Extract links   every <a href> on the page
// 9. Emit children   one task per link, one level deeper
//
// However the task ends, the worker pushes a sentinel task and leaves the
// frontier's in-flight count in one step, then gives back its worker slot.
// The dispatch loop relies on that to tell "nothing left to do" from "a worker
// hasn't pushed its links yet".
// =============================================================================

use std::sync::Arc;
use tokio::sync::OwnedSemaphorePermit;
use tracing::{debug, info, warn};

use super::frontier::Frontier;
use super::limiter::{hostname_of, HostLimiter};
use super::seen::SeenUrls;
use super::stats::CrawlStats;
use super::task::Task;
use crate::error::TaskError;
use crate::fetch::Fetcher;
use crate::page::{decode, extract_links, is_textual};
use crate::storage::save_page;

/// How a task ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The URL was accepted earlier by another task
    Duplicate,
    /// The page was fetched but isn't text
    NotText { content_type: String },
    /// The page was crawled; these are the links found on it
    Crawled { links: Vec<String>, saved: bool },
}

/// State shared by every worker.
pub struct TaskExecutor {
    frontier: Arc<Frontier>,
    seen: SeenUrls,
    limiter: HostLimiter,
    fetcher: Arc<dyn Fetcher>,
    stats: CrawlStats,
    max_depth: usize,
}

impl TaskExecutor {
    pub fn new(
        frontier: Arc<Frontier>,
        limiter: HostLimiter,
        fetcher: Arc<dyn Fetcher>,
        max_depth: usize,
    ) -> Self {
        Self {
            frontier,
            seen: SeenUrls::new(),
            limiter,
            fetcher,
            stats: CrawlStats::default(),
            max_depth,
        }
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Step 1: tasks this deep are dropped without doing anything.
    pub fn is_too_deep(&self, task: &Task) -> bool {
        task.depth >= self.max_depth
    }

    /// Runs `task` on the worker slot held by `permit`, then frees the slot.
    /// The caller must have counted the task with [`Frontier::begin_task`].
    pub async fn run(&self, task: Task, permit: OwnedSemaphorePermit) {
        let _slot = SlotGuard {
            frontier: Arc::clone(&self.frontier),
            sentinel: Some(Task::sentinel(self.max_depth, Arc::clone(&task.config))),
            _permit: permit,
        };

        match self.execute(&task).await {
            Ok(TaskOutcome::Crawled { links, saved }) => {
                info!(url = %task.url, depth = task.depth, links = links.len(), saved, "crawled");
                for link in links {
                    self.frontier.push(task.child(link));
                }
            }
            Ok(TaskOutcome::Duplicate) => {
                self.stats.record_duplicate();
                debug!(url = %task.url, "already seen");
            }
            Ok(TaskOutcome::NotText { content_type }) => {
                self.stats.record_skipped();
                info!(url = %task.url, %content_type, "not a text page, skipped");
            }
            Err(e) => {
                self.stats.record_failed();
                warn!(url = %task.url, depth = task.depth, error = %e, "task failed");
            }
        }
    }

    /// Steps 2 to 8. Returns the links to turn into child tasks.
    pub async fn execute(&self, task: &Task) -> Result<TaskOutcome, TaskError> {
        if !self.seen.accept_once(&task.url) {
            return Ok(TaskOutcome::Duplicate);
        }

        let host = hostname_of(&task.url)?;
        self.limiter.wait(&host).await;

        debug!(url = %task.url, %host, "fetching");
        let page = self
            .fetcher
            .fetch(&task.url, task.config.crawl_timeout)
            .await?;
        self.stats.record_fetched();

        if !is_textual(&page.content_type) {
            return Ok(TaskOutcome::NotText {
                content_type: page.content_type,
            });
        }

        let text = decode(&page.body, &page.content_type)?;

        let saved = task.config.is_target(&task.url);
        if saved {
            let path = save_page(text.as_bytes(), &task.url, &task.config.output_directory).await?;
            self.stats.record_saved();
            debug!(url = %task.url, path = %path.display(), "saved");
        }

        let links = extract_links(&text, &task.url)?;
        Ok(TaskOutcome::Crawled { links, saved })
    }
}

// Finishes the task in the frontier when dropped: the sentinel push and the
// in-flight decrement happen under one lock. Fields drop after drop() returns,
// so the permit (the worker slot) is released after that. Being a drop guard,
// this also holds when the task panics.
struct SlotGuard {
    frontier: Arc<Frontier>,
    sentinel: Option<Task>,
    _permit: OwnedSemaphorePermit,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        if let Some(sentinel) = self.sentinel.take() {
            self.frontier.finish_task(sentinel);
        }
    }
}
