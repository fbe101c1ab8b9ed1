//! Tests for argument validation

use crate::errors::CaptureError;
use crate::scheduler::VirtualScheduler;
use crate::simulator::{simulate, CaptureSimulator, ExecutionLog};
use crate::types::{BindingPolicy, DelayPlan};
use std::time::Duration;

#[test]
fn test_negative_count_schedules_nothing() {
    for policy in [
        BindingPolicy::Shared,
        BindingPolicy::PerIteration,
        BindingPolicy::ArgumentCopy,
    ] {
        let mut scheduler = VirtualScheduler::new();
        let result =
            CaptureSimulator::new().run(&mut scheduler, -1, policy, DelayPlan::uniform_ms(100));

        match result {
            Err(CaptureError::InvalidArgument(message)) => {
                assert!(message.contains("non-negative"))
            }
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
        assert_eq!(scheduler.scheduled_count(), 0);
    }
}

#[test]
fn test_negative_count_leaves_log_untouched() {
    let mut scheduler = VirtualScheduler::new();
    let log = ExecutionLog::new();

    let result = CaptureSimulator::new().run_into(
        &mut scheduler,
        &log,
        -5,
        BindingPolicy::Shared,
        DelayPlan::uniform_ms(0),
    );

    assert!(result.is_err());
    assert!(log.is_empty());
    assert!(scheduler.is_idle());
}

#[test]
fn test_overflowing_delay_rejected_before_scheduling() {
    let mut scheduler = VirtualScheduler::new();
    let plan = DelayPlan::Ascending {
        base: Duration::MAX,
        step: Duration::from_secs(1),
    };

    let result = CaptureSimulator::new().run(&mut scheduler, 3, BindingPolicy::Shared, plan);

    assert!(matches!(result, Err(CaptureError::InvalidArgument(_))));
    assert_eq!(scheduler.scheduled_count(), 0);
}

#[test]
fn test_simulate_propagates_error() {
    let result = simulate(-1, BindingPolicy::PerIteration, DelayPlan::uniform_ms(100));
    assert!(matches!(result, Err(CaptureError::InvalidArgument(_))));
}
