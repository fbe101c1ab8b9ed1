//! # Deferred-task scheduling
//!
//! The simulator never runs observations itself. It hands each one to a
//! [`Scheduler`], which guarantees:
//!
//! 1. **Deferral**: a task never runs inside `schedule()`, even with a zero delay
//! 2. **Readiness order**: earliest fire time first
//! 3. **FIFO ties**: tasks with the same fire time run in scheduling order
//!
//! [`VirtualScheduler`] implements this with a manually advanced clock for
//! deterministic runs; [`realtime::run_realtime`] replays the same queue
//! against wall-clock time.

pub mod realtime;
pub mod virtual_clock;

use std::time::Duration;

pub use virtual_clock::VirtualScheduler;

/// Context handed to a task when it fires
#[derive(Debug, Clone, Copy)]
pub struct TaskContext {
    /// Scheduler clock at firing time
    pub now: Duration,
    pub handle: TaskHandle,
}

/// A deferred unit of work. Consumed when it fires.
pub type Task = Box<dyn FnOnce(&TaskContext)>;

/// Identifies a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle {
    pub(crate) fire_at: Duration,
    pub(crate) seq: u64,
}

impl TaskHandle {
    /// Scheduler time at which the task becomes ready
    pub fn fire_at(&self) -> Duration {
        self.fire_at
    }

    /// Position in scheduling order
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Deferred-task scheduler consumed by the simulator
pub trait Scheduler {
    /// Queue `task` to run once `delay` has elapsed and the current
    /// synchronous execution has finished.
    fn schedule(&mut self, task: Task, delay: Duration) -> TaskHandle;
}
