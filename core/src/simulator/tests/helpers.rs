//! Test helpers for simulator tests

use crate::scheduler::{Scheduler, Task, TaskHandle, VirtualScheduler};
use crate::simulator::{CaptureSimulator, ExecutionLog};
use crate::types::{BindingPolicy, DelayPlan};
use std::time::Duration;

/// Run a loop on a fresh virtual scheduler and drain it
///
/// Returns the log together with the scheduler so tests can inspect the
/// clock and counters afterwards.
pub fn run_to_completion(
    iterations: i64,
    policy: BindingPolicy,
    delays: DelayPlan,
) -> (ExecutionLog, VirtualScheduler) {
    let mut scheduler = VirtualScheduler::new();
    let log = CaptureSimulator::new()
        .run(&mut scheduler, iterations, policy, delays)
        .expect("Simulator run failed");
    scheduler.run_until_idle();
    (log, scheduler)
}

/// Scheduler that records every call and forwards to a virtual scheduler
///
/// Lets tests look at the log while the loop is still scheduling.
pub struct SpyScheduler {
    pub inner: VirtualScheduler,
    pub delays: Vec<Duration>,
    pub log_len_at_schedule: Vec<usize>,
    pub watched: Option<ExecutionLog>,
}

impl SpyScheduler {
    pub fn watching(log: &ExecutionLog) -> Self {
        Self {
            inner: VirtualScheduler::new(),
            delays: Vec::new(),
            log_len_at_schedule: Vec::new(),
            watched: Some(log.clone()),
        }
    }
}

impl Scheduler for SpyScheduler {
    fn schedule(&mut self, task: Task, delay: Duration) -> TaskHandle {
        self.delays.push(delay);
        if let Some(log) = &self.watched {
            self.log_len_at_schedule.push(log.len());
        }
        self.inner.schedule(task, delay)
    }
}
