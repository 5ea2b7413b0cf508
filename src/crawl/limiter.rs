// src/crawl/limiter.rs
// =============================================================================
// Per-host politeness delay.
//
// For every hostname we remember the earliest instant it may be crawled
// again. A caller reserves the next free instant for its host, moves the
// entry one interval further, and sleeps until its reservation. This way:
// - the first request to a new host never waits
// - requests to one host are at least `interval` apart, even when several
//   workers ask for the same host at the same moment
// - different hosts never wait on each other
//
// Entries are never removed; the table lives as long as the crawl.
//
// Intervals are capped at FAR_FUTURE and a reservation that would overflow
// Instant stays where it is, so any Duration is accepted.
// =============================================================================

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

use crate::error::TaskError;

// About 30 years; stands in for "never" without overflowing Instant
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

#[derive(Debug)]
pub struct HostLimiter {
    interval: Duration,
    next_allowed: Mutex<HashMap<String, Instant>>,
}

impl HostLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.min(FAR_FUTURE),
            next_allowed: Mutex::new(HashMap::new()),
        }
    }

    /// Waits until `host` may be crawled.
    pub async fn wait(&self, host: &str) {
        let now = Instant::now();

        // The lock is released before sleeping
        let slot = {
            let mut hosts = self
                .next_allowed
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            match hosts.entry(host.to_string()) {
                Entry::Vacant(entry) => {
                    entry.insert(self.after(now));
                    return;
                }
                Entry::Occupied(mut entry) => {
                    let slot = (*entry.get()).max(now);
                    entry.insert(self.after(slot));
                    slot
                }
            }
        };

        tokio::time::sleep_until(slot).await;
    }

    fn after(&self, at: Instant) -> Instant {
        at.checked_add(self.interval).unwrap_or(at)
    }

    /// Number of hosts seen so far.
    pub fn host_count(&self) -> usize {
        self.next_allowed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// The host part of `url`, without a port.
pub fn hostname_of(url: &str) -> Result<String, TaskError> {
    let parsed = Url::parse(url).map_err(|e| TaskError::NoHost(format!("{}: {}", url, e)))?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(TaskError::NoHost(format!("{}: empty host", url))),
    }
}
