//! # Capture Simulator
//!
//! Runs a loop under a binding policy, schedules one deferred observation per
//! iteration, and exposes what each observation sees when it finally fires.
//!
//! ## Execution Model
//!
//! 1. **Synchronous loop**: every iteration binds its slot and schedules its
//!    observation before control returns to the caller
//! 2. **Deferred firing**: nothing fires until the caller drives the scheduler
//! 3. **Late read**: an observation records its slot's value at firing time
//!
//! Under `Shared` every observation reads the loop variable after the loop has
//! finished, so the log is `n` copies of `n`. Under `PerIteration` and
//! `ArgumentCopy` each observation owns a slot holding its own index.

pub mod binding;
pub mod log;
pub mod observation;

#[cfg(test)]
mod tests;

use tracing::{debug, info};

use crate::errors::CaptureError;
use crate::scheduler::{Scheduler, TaskHandle, VirtualScheduler};
use crate::types::{BindingPolicy, DelayPlan};

pub use binding::{IterationBinding, LoopScope, Slot};
pub use log::ExecutionLog;
pub use observation::DeferredObservation;

/// State left behind by a loop once it has finished scheduling
#[derive(Debug)]
pub struct CompletedLoop {
    /// One binding per iteration, in iteration order
    pub bindings: Vec<IterationBinding>,
    /// One handle per scheduled observation, in iteration order
    pub handles: Vec<TaskHandle>,
    /// The loop variable itself, if the policy has one
    pub loop_slot: Option<Slot>,
}

#[derive(Debug, Clone, Default)]
pub struct CaptureSimulator {
    label: Option<String>,
}

impl CaptureSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp every log entry produced by this simulator with `label`
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Run the loop and return a fresh log that fills as the scheduler fires
    pub fn run<S: Scheduler + ?Sized>(
        &self,
        scheduler: &mut S,
        iterations: i64,
        policy: BindingPolicy,
        delays: DelayPlan,
    ) -> Result<ExecutionLog, CaptureError> {
        let log = ExecutionLog::new();
        self.run_into(scheduler, &log, iterations, policy, delays)?;
        Ok(log)
    }

    /// Run the loop, appending observations to an existing log
    ///
    /// Arguments are validated before anything is scheduled, so an error
    /// leaves both the scheduler and the log untouched.
    pub fn run_into<S: Scheduler + ?Sized>(
        &self,
        scheduler: &mut S,
        log: &ExecutionLog,
        iterations: i64,
        policy: BindingPolicy,
        delays: DelayPlan,
    ) -> Result<CompletedLoop, CaptureError> {
        validate(iterations, &delays)?;

        info!(
            label = self.label.as_deref().unwrap_or(""),
            iterations,
            policy = %policy,
            delays = %delays,
            "Running capture loop"
        );

        let mut scope = LoopScope::new(policy);
        let mut bindings = Vec::new();
        let mut handles = Vec::new();

        for index in 0..iterations {
            let binding = scope.bind(index);
            let delay = delays.delay_for(index, iterations).ok_or_else(|| {
                CaptureError::InvalidArgument(format!("Delay for iteration {} overflows", index))
            })?;

            let observation =
                DeferredObservation::new(binding.slot.clone(), log.clone(), self.label.clone());
            let handle = scheduler.schedule(observation.into_task(), delay);
            debug!(index, delay_ms = delay.as_millis() as u64, "Scheduled observation");

            bindings.push(binding);
            handles.push(handle);
        }

        scope.finish(iterations);

        Ok(CompletedLoop {
            bindings,
            handles,
            loop_slot: scope.loop_slot().cloned(),
        })
    }
}

/// Reject arguments the loop cannot run with
pub fn validate(iterations: i64, delays: &DelayPlan) -> Result<(), CaptureError> {
    if iterations < 0 {
        return Err(CaptureError::InvalidArgument(format!(
            "Iteration count must be non-negative, got {}",
            iterations
        )));
    }
    delays.validate(iterations)
}

/// Run one loop on a fresh virtual scheduler and drain it
pub fn simulate(
    iterations: i64,
    policy: BindingPolicy,
    delays: DelayPlan,
) -> Result<Vec<i64>, CaptureError> {
    let mut scheduler = VirtualScheduler::new();
    let log = CaptureSimulator::new().run(&mut scheduler, iterations, policy, delays)?;
    scheduler.run_until_idle();
    Ok(log.values())
}
