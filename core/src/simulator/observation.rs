//! Deferred observations

use tracing::debug;

use super::binding::Slot;
use super::log::ExecutionLog;
use crate::scheduler::{Task, TaskContext};

/// Reads its slot when fired and appends the value to the log
///
/// The value is read at firing time, not at scheduling time.
#[derive(Debug)]
pub struct DeferredObservation {
    slot: Slot,
    log: ExecutionLog,
    label: Option<String>,
}

impl DeferredObservation {
    pub fn new(slot: Slot, log: ExecutionLog, label: Option<String>) -> Self {
        Self { slot, log, label }
    }

    /// Consume the observation, recording the slot's current value
    pub fn fire(self, ctx: &TaskContext) {
        let value = self.slot.get();
        debug!(
            label = self.label.as_deref().unwrap_or(""),
            value,
            fired_at_ms = ctx.now.as_millis() as u64,
            "Observation fired"
        );
        self.log.record(self.label, value, ctx.now);
    }

    pub fn into_task(self) -> Task {
        Box::new(move |ctx: &TaskContext| self.fire(ctx))
    }
}
