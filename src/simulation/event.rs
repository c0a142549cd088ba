//! Machine completion events.
//!
//! A min-heap of "machine finishes its current task" events ordered by
//! `(time, machine)`. Events sharing the earliest time are drained together
//! as one batch.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::models::{MachineId, Time};

/// A machine finishing its active task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionEvent {
    /// When the active task, change-over included, ends.
    pub time: Time,
    /// The machine that becomes free.
    pub machine: MachineId,
}

impl Ord for CompletionEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.machine.cmp(&self.machine))
    }
}

impl PartialOrd for CompletionEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending completion events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: BinaryHeap<CompletionEvent>,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `machine` to finish at `time`.
    pub fn schedule(&mut self, time: Time, machine: MachineId) {
        self.events.push(CompletionEvent { time, machine });
    }

    /// Time of the earliest pending event.
    pub fn peek_time(&self) -> Option<Time> {
        self.events.peek().map(|e| e.time)
    }

    /// Removes every event at the earliest pending time.
    ///
    /// Returns that time and the finishing machines in ascending id order.
    pub fn pop_next_batch(&mut self) -> Option<(Time, Vec<MachineId>)> {
        let now = self.peek_time()?;
        let mut machines = Vec::new();
        while let Some(event) = self.events.peek() {
            if event.time != now {
                break;
            }
            if let Some(event) = self.events.pop() {
                machines.push(event.machine);
            }
        }
        Some((now, machines))
    }

    /// True once no machine has a task in progress.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
