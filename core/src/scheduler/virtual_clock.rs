//! Virtual-clock scheduler
//!
//! Time only moves when the caller advances it. Tasks are kept in a map keyed
//! by `(fire_at, seq)` so iteration order is the readiness order.

use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, trace};

use super::{Scheduler, Task, TaskContext, TaskHandle};

#[derive(Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<TaskHandle, Task>,
    fired: u64,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks waiting to fire
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total number of `schedule()` calls, including tasks already fired
    pub fn scheduled_count(&self) -> u64 {
        self.next_seq
    }

    pub fn fired_count(&self) -> u64 {
        self.fired
    }

    /// Fire time of the next ready task, if any
    pub fn next_fire_at(&self) -> Option<Duration> {
        self.queue.keys().next().map(|handle| handle.fire_at)
    }

    /// Remove a task that has not fired yet
    ///
    /// Returns false if the task already fired or was cancelled before.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let removed = self.queue.remove(&handle).is_some();
        if removed {
            debug!(seq = handle.seq, "Cancelled task");
        }
        removed
    }

    /// Fire the next task in readiness order, moving the clock to its fire time
    pub fn run_next(&mut self) -> Option<TaskHandle> {
        let (handle, task) = self.queue.pop_first()?;
        if handle.fire_at > self.now {
            self.now = handle.fire_at;
        }
        self.fire(handle, task);
        Some(handle)
    }

    /// Advance the clock by `delta`, firing every task that becomes ready
    ///
    /// Returns the number of tasks fired.
    pub fn advance_by(&mut self, delta: Duration) -> usize {
        let target = self.now.saturating_add(delta);
        let mut fired = 0;

        while let Some(fire_at) = self.next_fire_at() {
            if fire_at > target {
                break;
            }
            self.run_next();
            fired += 1;
        }

        self.now = target;
        fired
    }

    /// Fire everything that is queued
    ///
    /// Returns the number of tasks fired.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while self.run_next().is_some() {
            fired += 1;
        }
        fired
    }

    fn fire(&mut self, handle: TaskHandle, task: Task) {
        trace!(
            seq = handle.seq,
            fire_at_ms = handle.fire_at.as_millis() as u64,
            "Firing task"
        );
        self.fired += 1;
        task(&TaskContext {
            now: self.now,
            handle,
        });
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, task: Task, delay: Duration) -> TaskHandle {
        let handle = TaskHandle {
            fire_at: self.now.saturating_add(delay),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.insert(handle, task);
        handle
    }
}

impl std::fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualScheduler")
            .field("now", &self.now)
            .field("pending", &self.queue.len())
            .field("scheduled", &self.next_seq)
            .field("fired", &self.fired)
            .finish()
    }
}
