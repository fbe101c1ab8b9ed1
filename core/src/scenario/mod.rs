//! Scenarios: several capture loops sharing one scheduler
//!
//! Loops in a scenario run back to back in one synchronous pass, so their
//! observations interleave by fire time in a single log. Each entry carries
//! the label of the loop that produced it.
//!
//! Scenarios are plain data and load from TOML:
//!
//! ```toml
//! name = "loop-scope"
//!
//! [[loops]]
//! label = "var i"
//! iterations = 3
//! policy = "shared"
//! delays = { order = "uniform", delay_ms = 100 }
//! ```

pub mod builtin;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::errors::CaptureError;
use crate::scheduler::{Scheduler, VirtualScheduler};
use crate::simulator::{self, CaptureSimulator, ExecutionLog};
use crate::types::{BindingPolicy, DelayPlan};

pub use builtin::{builtin, catalogue};

/// One loop inside a scenario
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoopSpec {
    pub label: String,
    pub iterations: i64,
    pub policy: BindingPolicy,
    pub delays: DelayPlan,
}

impl LoopSpec {
    pub fn new(
        label: impl Into<String>,
        iterations: i64,
        policy: BindingPolicy,
        delays: DelayPlan,
    ) -> Self {
        Self {
            label: label.into(),
            iterations,
            policy,
            delays,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub loops: Vec<LoopSpec>,
}

impl Scenario {
    pub fn from_toml_str(source: &str) -> Result<Self, CaptureError> {
        let scenario: Scenario = toml::from_str(source)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check every loop before any of them schedules
    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.loops.is_empty() {
            return Err(CaptureError::InvalidScenario(format!(
                "Scenario '{}' has no loops",
                self.name
            )));
        }
        for spec in &self.loops {
            simulator::validate(spec.iterations, &spec.delays).map_err(|e| {
                CaptureError::InvalidScenario(format!("Loop '{}': {}", spec.label, e))
            })?;
        }
        Ok(())
    }

    /// Schedule every loop on `scheduler`, recording into one shared log
    pub fn run<S: Scheduler + ?Sized>(&self, scheduler: &mut S) -> Result<ExecutionLog, CaptureError> {
        self.validate()?;

        info!(
            scenario = %self.name,
            loops = self.loops.len(),
            "Running scenario"
        );

        let log = ExecutionLog::new();
        for spec in &self.loops {
            CaptureSimulator::with_label(spec.label.clone()).run_into(
                scheduler,
                &log,
                spec.iterations,
                spec.policy,
                spec.delays,
            )?;
        }
        Ok(log)
    }

    /// Run on a fresh virtual scheduler and drain it
    pub fn run_to_completion(&self) -> Result<ExecutionLog, CaptureError> {
        let mut scheduler = VirtualScheduler::new();
        let log = self.run(&mut scheduler)?;
        scheduler.run_until_idle();
        Ok(log)
    }
}
