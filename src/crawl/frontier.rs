// src/crawl/frontier.rs
// =============================================================================
// The frontier: tasks waiting to be dispatched, plus a count of tasks that are
// running and may still push more.
//
// - Unbounded FIFO: a push never waits and never fails
// - Many pushers (the workers), one popper (the dispatch loop)
// - pop() waits while the queue is empty but some task is still in flight,
//   and returns None once the queue is empty and nothing is in flight
//
// The queue and the in-flight count share one lock. A worker pushes its
// sentinel and leaves the in-flight count in the same critical section, so
// pop() can never see "queue empty" from before the push together with
// "still in flight" from after it.
//
// The same URL may sit in the frontier several times. The seen set, not the
// frontier, decides whether a URL is crawled.
// =============================================================================

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

use super::task::Task;

#[derive(Debug, Default)]
struct State {
    tasks: VecDeque<Task>,
    in_flight: usize,
}

#[derive(Debug, Default)]
pub struct Frontier {
    state: Mutex<State>,
    changed: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, task: Task) {
        self.lock().tasks.push_back(task);
        self.wake();
    }

    /// Marks one more task as running. Call before handing it to a worker.
    pub fn begin_task(&self) {
        self.lock().in_flight += 1;
    }

    /// Pushes the finished task's sentinel and marks it as no longer running.
    pub fn finish_task(&self, sentinel: Task) {
        {
            let mut state = self.lock();
            state.tasks.push_back(sentinel);
            state.in_flight = state.in_flight.saturating_sub(1);
        }
        self.wake();
    }

    /// Takes the oldest task. Waits while the queue is empty and a task is
    /// in flight; returns `None` once there is nothing left to do.
    pub async fn pop(&self) -> Option<Task> {
        loop {
            {
                let mut state = self.lock();
                if let Some(task) = state.tasks.pop_front() {
                    return Some(task);
                }
                if state.in_flight == 0 {
                    return None;
                }
            }
            self.changed.notified().await;
        }
    }

    pub fn len(&self) -> usize {
        self.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().tasks.is_empty()
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }

    // notify_one keeps a permit if the popper isn't waiting yet, so a change
    // between its check and its await is never lost
    fn wake(&self) {
        self.changed.notify_one();
    }

    // A panicking pusher can't leave the state half-modified, so a poisoned
    // lock is still safe to use. push() must never fail.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
