// src/crawl/mod.rs
// =============================================================================
// The crawl engine.
//
// Pieces, smallest first:
// - task: one URL at one depth
// - frontier: the queue of tasks waiting to run
// - limiter: per-host politeness delay
// - seen: remembers which URLs were already accepted
// - executor: runs one task (fetch, decode, save, extract links)
// - scheduler: the dispatch loop, worker slots and termination
// =============================================================================

mod executor;
mod frontier;
mod limiter;
mod scheduler;
mod seen;
mod stats;
mod task;

pub use executor::{TaskExecutor, TaskOutcome};
pub use frontier::Frontier;
pub use limiter::{hostname_of, HostLimiter};
pub use scheduler::Scheduler;
pub use seen::SeenUrls;
pub use stats::{CrawlStats, CrawlSummary};
pub use task::{Task, TaskConfig};
