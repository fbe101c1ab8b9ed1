//! Wall-clock replay of a virtual schedule
//!
//! Drains a [`VirtualScheduler`] by sleeping on the tokio timer until each
//! task's fire time. Firing order is still decided by the virtual queue, so a
//! realtime replay produces the same log as `run_until_idle()`.

use tokio::time::{sleep_until, Instant};
use tracing::debug;

use super::VirtualScheduler;

/// Fire every queued task at its wall-clock deadline
///
/// Deadlines are measured from the moment this function is called, relative
/// to the scheduler's current virtual time. Returns the number of tasks fired.
pub async fn run_realtime(scheduler: &mut VirtualScheduler) -> usize {
    let started = Instant::now();
    let origin = scheduler.now();
    let mut fired = 0;

    while let Some(fire_at) = scheduler.next_fire_at() {
        let offset = fire_at.saturating_sub(origin);
        sleep_until(started + offset).await;

        if let Some(handle) = scheduler.run_next() {
            debug!(
                seq = handle.seq(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Fired task in realtime"
            );
            fired += 1;
        }
    }

    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{Scheduler, TaskContext};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_realtime_waits_for_fire_time() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = VirtualScheduler::new();

        for (label, ms) in [("late", 200), ("early", 100)] {
            let seen = seen.clone();
            scheduler.schedule(
                Box::new(move |_: &TaskContext| seen.borrow_mut().push(label)),
                Duration::from_millis(ms),
            );
        }

        let started = Instant::now();
        let fired = run_realtime(&mut scheduler).await;

        assert_eq!(fired, 2);
        assert_eq!(*seen.borrow(), vec!["early", "late"]);
        assert!(started.elapsed() >= Duration::from_millis(200));
        assert!(scheduler.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_on_empty_scheduler() {
        let mut scheduler = VirtualScheduler::new();
        assert_eq!(run_realtime(&mut scheduler).await, 0);
    }
}
