//! Tests for the per-iteration (fresh slot) policy

use super::helpers::run_to_completion;
use crate::scheduler::VirtualScheduler;
use crate::simulator::{simulate, CaptureSimulator, ExecutionLog};
use crate::types::{BindingPolicy, DelayPlan};
use std::time::Duration;

#[test]
fn test_per_iteration_sees_own_index() {
    let values = simulate(3, BindingPolicy::PerIteration, DelayPlan::uniform_ms(100)).unwrap();
    assert_eq!(values, vec![0, 1, 2]);
}

#[test]
fn test_per_iteration_zero_iterations() {
    let values = simulate(0, BindingPolicy::PerIteration, DelayPlan::uniform_ms(100)).unwrap();
    assert!(values.is_empty());
}

#[test]
fn test_per_iteration_slots_untouched_after_loop() {
    let mut scheduler = VirtualScheduler::new();
    let log = ExecutionLog::new();

    let done = CaptureSimulator::new()
        .run_into(
            &mut scheduler,
            &log,
            3,
            BindingPolicy::PerIteration,
            DelayPlan::uniform_ms(100),
        )
        .unwrap();

    assert!(done.loop_slot.is_none());
    let held: Vec<i64> = done.bindings.iter().map(|b| b.slot.get()).collect();
    assert_eq!(held, vec![0, 1, 2]);
    assert!(!done.bindings[0].slot.same_location(&done.bindings[1].slot));
}

#[test]
fn test_per_iteration_entries_record_fire_time() {
    let (log, scheduler) =
        run_to_completion(2, BindingPolicy::PerIteration, DelayPlan::uniform_ms(250));

    let entries = log.entries();
    assert_eq!(entries.len(), 2);
    assert!(entries
        .iter()
        .all(|e| e.fired_at == Duration::from_millis(250) && e.label.is_none()));
    assert_eq!(scheduler.now(), Duration::from_millis(250));
}

#[test]
fn test_repeated_runs_are_independent() {
    let first = simulate(3, BindingPolicy::PerIteration, DelayPlan::uniform_ms(100)).unwrap();
    let second = simulate(3, BindingPolicy::PerIteration, DelayPlan::uniform_ms(100)).unwrap();
    assert_eq!(first, second);

    // Two runs on one scheduler still get separate logs
    let mut scheduler = VirtualScheduler::new();
    let sim = CaptureSimulator::new();
    let a = sim
        .run(&mut scheduler, 2, BindingPolicy::Shared, DelayPlan::uniform_ms(10))
        .unwrap();
    let b = sim
        .run(&mut scheduler, 2, BindingPolicy::Shared, DelayPlan::uniform_ms(10))
        .unwrap();
    scheduler.run_until_idle();

    assert_eq!(a.values(), vec![2, 2]);
    assert_eq!(b.values(), vec![2, 2]);
}
