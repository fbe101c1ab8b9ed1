//! Built-in demonstration scenarios

use super::{LoopSpec, Scenario};
use crate::errors::CaptureError;
use crate::types::{BindingPolicy, DelayPlan};

/// Every built-in scenario, in display order
pub fn catalogue() -> Vec<Scenario> {
    vec![loop_scope(), closure_iife(), closure_demo(), closure_gotchas()]
}

/// Look up a built-in scenario by name
pub fn builtin(name: &str) -> Result<Scenario, CaptureError> {
    catalogue()
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| {
            let known: Vec<String> = catalogue().into_iter().map(|s| s.name).collect();
            CaptureError::InvalidScenario(format!(
                "Unknown scenario '{}'. Available: {}",
                name,
                known.join(", ")
            ))
        })
}

fn loop_scope() -> Scenario {
    Scenario {
        name: "loop-scope".to_string(),
        description: "One shared loop variable vs a fresh binding per iteration".to_string(),
        loops: vec![
            LoopSpec::new("var i", 3, BindingPolicy::Shared, DelayPlan::uniform_ms(100)),
            LoopSpec::new("let j", 3, BindingPolicy::PerIteration, DelayPlan::uniform_ms(100)),
        ],
    }
}

fn closure_iife() -> Scenario {
    Scenario {
        name: "closure-iife".to_string(),
        description: "Copying the loop variable into a new scope per iteration".to_string(),
        loops: vec![LoopSpec::new(
            "Index",
            3,
            BindingPolicy::ArgumentCopy,
            DelayPlan::uniform_ms(100),
        )],
    }
}

fn closure_demo() -> Scenario {
    Scenario {
        name: "closure-demo".to_string(),
        description: "The broken loop and both fixes, all firing after one second".to_string(),
        loops: vec![
            LoopSpec::new("var loop", 3, BindingPolicy::Shared, DelayPlan::uniform_ms(1000)),
            LoopSpec::new(
                "let loop",
                3,
                BindingPolicy::PerIteration,
                DelayPlan::uniform_ms(1000),
            ),
            LoopSpec::new(
                "closure with var",
                3,
                BindingPolicy::ArgumentCopy,
                DelayPlan::uniform_ms(1000),
            ),
        ],
    }
}

fn closure_gotchas() -> Scenario {
    Scenario {
        name: "closure-gotchas".to_string(),
        description: "The broken loop at 100ms, then the IIFE fix at 200ms".to_string(),
        loops: vec![
            LoopSpec::new("Timeout", 3, BindingPolicy::Shared, DelayPlan::uniform_ms(100)),
            LoopSpec::new(
                "Fixed timeout",
                3,
                BindingPolicy::ArgumentCopy,
                DelayPlan::uniform_ms(200),
            ),
        ],
    }
}
