use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CaptureError;

/// How a loop binds its iteration variable
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BindingPolicy {
    /// One mutable slot reused by every iteration (`var i`)
    Shared,
    /// A fresh slot per iteration (`let i`)
    PerIteration,
    /// Shared loop slot, copied into a fresh slot per iteration (IIFE fix)
    ArgumentCopy,
}

impl BindingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingPolicy::Shared => "shared",
            BindingPolicy::PerIteration => "per-iteration",
            BindingPolicy::ArgumentCopy => "argument-copy",
        }
    }
}

impl std::fmt::Display for BindingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for BindingPolicy {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shared" | "var" => Ok(BindingPolicy::Shared),
            "per-iteration" | "per_iteration" | "let" => Ok(BindingPolicy::PerIteration),
            "argument-copy" | "argument_copy" | "iife" => Ok(BindingPolicy::ArgumentCopy),
            _ => Err(CaptureError::InvalidArgument(format!(
                "Invalid policy: {}. Must be one of: shared, per-iteration, argument-copy",
                s
            ))),
        }
    }
}

/// Delay assigned to each iteration's deferred observation
///
/// `Uniform` is the classic demonstration. The ramped plans change the firing
/// order without changing what each observation captures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "order", rename_all = "kebab-case")]
pub enum DelayPlan {
    Uniform {
        #[serde(with = "duration_ms", rename = "delay_ms")]
        delay: Duration,
    },
    Ascending {
        #[serde(with = "duration_ms", rename = "base_ms")]
        base: Duration,
        #[serde(with = "duration_ms", rename = "step_ms")]
        step: Duration,
    },
    Descending {
        #[serde(with = "duration_ms", rename = "base_ms")]
        base: Duration,
        #[serde(with = "duration_ms", rename = "step_ms")]
        step: Duration,
    },
}

impl DelayPlan {
    pub fn uniform(delay: Duration) -> Self {
        DelayPlan::Uniform { delay }
    }

    pub fn uniform_ms(ms: u64) -> Self {
        DelayPlan::Uniform {
            delay: Duration::from_millis(ms),
        }
    }

    /// Delay for `index` in a loop of `iterations`
    ///
    /// Returns `None` if the delay does not fit in a `Duration`.
    pub fn delay_for(&self, index: i64, iterations: i64) -> Option<Duration> {
        match *self {
            DelayPlan::Uniform { delay } => Some(delay),
            DelayPlan::Ascending { base, step } => {
                let factor = u32::try_from(index).ok()?;
                base.checked_add(step.checked_mul(factor)?)
            }
            DelayPlan::Descending { base, step } => {
                let factor = u32::try_from(iterations - 1 - index).ok()?;
                base.checked_add(step.checked_mul(factor)?)
            }
        }
    }

    /// Check that every delay in a loop of `iterations` is representable
    pub fn validate(&self, iterations: i64) -> Result<(), CaptureError> {
        if iterations <= 0 {
            return Ok(());
        }
        // The extreme delay sits at one end of the loop for every plan
        for index in [0, iterations - 1] {
            if self.delay_for(index, iterations).is_none() {
                return Err(CaptureError::InvalidArgument(format!(
                    "Delay for iteration {} of {} overflows ({:?})",
                    index, iterations, self
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for DelayPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DelayPlan::Uniform { delay } => write!(f, "uniform {}ms", delay.as_millis()),
            DelayPlan::Ascending { base, step } => {
                write!(f, "ascending {}ms +{}ms", base.as_millis(), step.as_millis())
            }
            DelayPlan::Descending { base, step } => {
                write!(f, "descending {}ms +{}ms", base.as_millis(), step.as_millis())
            }
        }
    }
}

/// One recorded value in an execution log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub label: Option<String>,
    pub value: i64,
    /// Virtual time at which the observation fired
    #[serde(with = "duration_ms", rename = "fired_at_ms")]
    pub fired_at: Duration,
}

/// Serialize `Duration` as whole milliseconds
pub(crate) mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
