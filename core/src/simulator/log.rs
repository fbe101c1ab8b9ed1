//! Execution log shared between the caller and fired observations

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::types::LogEntry;

/// Append-only record of values seen by fired observations
///
/// Cloning yields another handle to the same log. Only observations append;
/// callers get read-only views.
#[derive(Debug, Clone, Default)]
pub struct ExecutionLog {
    entries: Rc<RefCell<Vec<LogEntry>>>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, label: Option<String>, value: i64, fired_at: Duration) {
        self.entries.borrow_mut().push(LogEntry {
            label,
            value,
            fired_at,
        });
    }

    /// Recorded values in firing order
    pub fn values(&self) -> Vec<i64> {
        self.entries.borrow().iter().map(|e| e.value).collect()
    }

    /// Snapshot of every entry in firing order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Values recorded under `label`, in firing order
    pub fn values_for(&self, label: &str) -> Vec<i64> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.label.as_deref() == Some(label))
            .map(|e| e.value)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
