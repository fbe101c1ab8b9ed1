//! Tests for the shared (single mutable slot) policy

use super::helpers::{run_to_completion, SpyScheduler};
use crate::scheduler::VirtualScheduler;
use crate::simulator::{simulate, CaptureSimulator, ExecutionLog};
use crate::types::{BindingPolicy, DelayPlan};
use std::time::Duration;

#[test]
fn test_shared_sees_terminal_value() {
    let values = simulate(3, BindingPolicy::Shared, DelayPlan::uniform_ms(100)).unwrap();
    assert_eq!(values, vec![3, 3, 3]);
}

#[test]
fn test_shared_zero_delay_still_deferred() {
    let values = simulate(1, BindingPolicy::Shared, DelayPlan::uniform_ms(0)).unwrap();
    assert_eq!(values, vec![1]);
}

#[test]
fn test_shared_zero_iterations() {
    let (log, scheduler) = run_to_completion(0, BindingPolicy::Shared, DelayPlan::uniform_ms(100));
    assert!(log.is_empty());
    assert_eq!(scheduler.scheduled_count(), 0);
}

#[test]
fn test_shared_slot_after_loop() {
    let mut scheduler = VirtualScheduler::new();
    let log = ExecutionLog::new();

    let done = CaptureSimulator::new()
        .run_into(
            &mut scheduler,
            &log,
            4,
            BindingPolicy::Shared,
            DelayPlan::uniform_ms(100),
        )
        .unwrap();

    // Loop has finished but nothing fired yet
    assert!(log.is_empty());
    assert_eq!(scheduler.pending(), 4);

    let loop_slot = done.loop_slot.expect("Shared loop has a loop variable");
    assert_eq!(loop_slot.get(), 4);
    for binding in &done.bindings {
        assert!(binding.slot.same_location(&loop_slot));
    }

    scheduler.run_until_idle();
    assert_eq!(log.values(), vec![4, 4, 4, 4]);
}

#[test]
fn test_shared_nothing_fires_during_loop() {
    let log = ExecutionLog::new();
    let mut spy = SpyScheduler::watching(&log);

    CaptureSimulator::new()
        .run_into(&mut spy, &log, 3, BindingPolicy::Shared, DelayPlan::uniform_ms(0))
        .unwrap();

    assert_eq!(spy.log_len_at_schedule, vec![0, 0, 0]);
    assert_eq!(spy.delays, vec![Duration::ZERO; 3]);

    spy.inner.run_until_idle();
    assert_eq!(log.values(), vec![3, 3, 3]);
}

#[test]
fn test_shared_log_fills_incrementally() {
    let mut scheduler = VirtualScheduler::new();
    let log = CaptureSimulator::new()
        .run(
            &mut scheduler,
            3,
            BindingPolicy::Shared,
            DelayPlan::Ascending {
                base: Duration::from_millis(100),
                step: Duration::from_millis(100),
            },
        )
        .unwrap();

    scheduler.advance_by(Duration::from_millis(150));
    assert_eq!(log.values(), vec![3]);

    scheduler.advance_by(Duration::from_millis(100));
    assert_eq!(log.values(), vec![3, 3]);

    scheduler.advance_by(Duration::from_millis(100));
    assert_eq!(log.values(), vec![3, 3, 3]);
}
