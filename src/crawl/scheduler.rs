// src/crawl/scheduler.rs
// =============================================================================
// The dispatch loop.
//
// How it works:
// 1. Seed the frontier with depth-0 tasks
// 2. Pop a task; drop it right away if it is too deep (this is where
//    sentinels end up)
// 3. Take a worker slot, waiting if all `worker_count` slots are busy
// 4. Count the task as in flight and spawn it on that slot; the worker
//    pushes its sentinel and leaves the in-flight count in one step
// 5. Stop when pop() reports an empty frontier with nothing in flight
//
// Step 5 is decided by the frontier under its own lock, so a worker can't
// finish between "is the queue empty" and "is anything still running".
// Only this loop starts tasks, so once both are true nothing can add work.
// =============================================================================

use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, trace};

use super::executor::TaskExecutor;
use super::frontier::Frontier;
use super::limiter::HostLimiter;
use super::stats::CrawlSummary;
use super::task::{Task, TaskConfig};
use crate::config::{compile_target_pattern, SpiderConfig};
use crate::error::ConfigError;
use crate::fetch::Fetcher;

pub struct Scheduler {
    executor: Arc<TaskExecutor>,
    slots: Arc<Semaphore>,
    worker_count: usize,
}

impl Scheduler {
    /// Builds a scheduler with `seeds` queued at depth 0.
    pub fn new(
        config: &SpiderConfig,
        seeds: Vec<String>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, ConfigError> {
        let task_config = Arc::new(TaskConfig {
            crawl_timeout: config.crawl_timeout(),
            output_directory: config.output_directory.clone(),
            target_url: compile_target_pattern(&config.target_url_pattern)?,
        });

        let frontier = Arc::new(Frontier::new());
        for seed in seeds {
            frontier.push(Task::seed(seed, Arc::clone(&task_config)));
        }

        let executor = TaskExecutor::new(
            frontier,
            HostLimiter::new(config.crawl_interval()),
            fetcher,
            config.max_depth,
        );

        Ok(Self {
            executor: Arc::new(executor),
            slots: Arc::new(Semaphore::new(config.worker_count)),
            worker_count: config.worker_count,
        })
    }

    /// Crawls until there is nothing left to do.
    pub async fn run(self) -> CrawlSummary {
        info!(
            seeds = self.executor.frontier().len(),
            workers = self.worker_count,
            "start to run tasks"
        );

        while let Some(task) = self.executor.frontier().pop().await {
            if self.executor.is_too_deep(&task) {
                if task.is_sentinel() {
                    self.executor.stats().record_sentinel();
                } else {
                    trace!(url = %task.url, depth = task.depth, "beyond max depth, dropped");
                }
                continue;
            }

            let permit = match Arc::clone(&self.slots).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    // Only happens if the semaphore is closed, which nothing does
                    error!(error = %e, "worker pool closed, stopping");
                    break;
                }
            };

            self.executor.frontier().begin_task();
            let executor = Arc::clone(&self.executor);
            tokio::spawn(async move {
                executor.run(task, permit).await;
            });
        }

        let summary = self.executor.stats().summary();
        info!(?summary, "all tasks have been done");
        summary
    }
}
