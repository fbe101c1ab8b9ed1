use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::simulator::ExecutionLog;
use crate::types::LogEntry;

/// Rendered result of one simulator or scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub id: Uuid,
    pub scenario: String,
    pub started_at: DateTime<Utc>,
    pub entries: Vec<LogEntry>,
}

impl RunReport {
    pub fn new(scenario: impl Into<String>, started_at: DateTime<Utc>, log: &ExecutionLog) -> Self {
        Self {
            id: Uuid::new_v4(),
            scenario: scenario.into(),
            started_at,
            entries: log.entries(),
        }
    }

    pub fn values(&self) -> Vec<i64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// One line per entry, in the shape of a console transcript
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let line = match &entry.label {
                Some(label) => format!("{}: {}", label, entry.value),
                None => format!("[+{}ms] {}", entry.fired_at.as_millis(), entry.value),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
