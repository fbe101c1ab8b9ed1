//! Loop-variable storage
//!
//! A [`Slot`] is the storage location a closure captures. [`LoopScope`] decides,
//! per binding policy, which slot each iteration hands to its observation.

use std::cell::Cell;
use std::rc::Rc;

use crate::types::BindingPolicy;

/// Shared mutable integer cell
///
/// Single-threaded by construction: observations and the loop run on one
/// thread, so no synchronization is needed.
#[derive(Debug, Clone)]
pub struct Slot(Rc<Cell<i64>>);

impl Slot {
    pub fn new(value: i64) -> Self {
        Slot(Rc::new(Cell::new(value)))
    }

    pub fn get(&self) -> i64 {
        self.0.get()
    }

    pub(crate) fn set(&self, value: i64) {
        self.0.set(value);
    }

    /// Whether both handles refer to the same storage location
    pub fn same_location(&self, other: &Slot) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// The slot one iteration's observation refers to
#[derive(Debug, Clone)]
pub struct IterationBinding {
    pub index: i64,
    pub policy: BindingPolicy,
    pub slot: Slot,
}

/// Binding state of a single loop
#[derive(Debug)]
pub struct LoopScope {
    policy: BindingPolicy,
    /// The loop's own variable. Absent under `PerIteration`, where every
    /// iteration gets a new one.
    loop_slot: Option<Slot>,
}

impl LoopScope {
    /// Set up the loop before its first iteration
    pub fn new(policy: BindingPolicy) -> Self {
        let loop_slot = match policy {
            BindingPolicy::Shared | BindingPolicy::ArgumentCopy => Some(Slot::new(0)),
            BindingPolicy::PerIteration => None,
        };
        Self { policy, loop_slot }
    }

    /// Produce the binding for iteration `index`
    pub fn bind(&mut self, index: i64) -> IterationBinding {
        let slot = match (&self.loop_slot, self.policy) {
            (Some(shared), BindingPolicy::Shared) => {
                shared.set(index);
                shared.clone()
            }
            (Some(shared), BindingPolicy::ArgumentCopy) => {
                shared.set(index);
                // The IIFE parameter: a new location holding a copy
                Slot::new(shared.get())
            }
            _ => Slot::new(index),
        };

        IterationBinding {
            index,
            policy: self.policy,
            slot,
        }
    }

    /// Apply the loop's final increment, leaving the loop variable one past
    /// the last index
    pub fn finish(&mut self, iterations: i64) {
        if let Some(shared) = &self.loop_slot {
            shared.set(iterations);
        }
    }

    pub fn loop_slot(&self) -> Option<&Slot> {
        self.loop_slot.as_ref()
    }
}
