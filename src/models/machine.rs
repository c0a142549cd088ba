//! Machine model.
//!
//! Per-run machine state: a FIFO queue of waiting jobs, the job currently
//! being processed, and the aggregate counters reported in the results.

use std::collections::VecDeque;

use super::{JobId, MachineId, Time};

/// Runtime state of one machine.
///
/// Owned by a single simulation run and rebuilt from the specification for
/// every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// Machine identifier (1-based).
    pub id: MachineId,
    /// Fixed retooling delay.
    pub change_over_time: Time,
    /// Jobs waiting for this machine, in arrival order.
    pub queue: VecDeque<JobId>,
    /// Job currently in change-over or processing.
    pub active: Option<JobId>,
    /// Job whose task this machine ran most recently.
    pub last_job: Option<JobId>,
    /// Time the machine is next available.
    pub free_at: Time,
    /// Number of tasks dispatched on this machine.
    pub tasks_completed: usize,
    /// Sum of the waiting delays of tasks dispatched here.
    pub total_wait_imposed: Time,
    /// Change-over plus processing time spent on this machine.
    pub busy_time: Time,
}

impl Machine {
    /// Creates an idle machine with an empty queue.
    pub fn new(id: MachineId, change_over_time: Time) -> Self {
        Self {
            id,
            change_over_time,
            queue: VecDeque::new(),
            active: None,
            last_job: None,
            free_at: 0,
            tasks_completed: 0,
            total_wait_imposed: 0,
            busy_time: 0,
        }
    }

    /// Appends a job at the tail of the queue.
    pub fn enqueue(&mut self, job: JobId) {
        debug_assert!(
            !self.queue.contains(&job),
            "job {job} already queued on machine {}",
            self.id
        );
        self.queue.push_back(job);
    }

    /// Whether the machine can start a task right now.
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Whether an idle machine has work waiting.
    pub fn can_dispatch(&self) -> bool {
        self.is_idle() && !self.queue.is_empty()
    }

    /// Marks the active task as finished and returns its job.
    pub fn finish(&mut self) -> Option<JobId> {
        self.active.take()
    }
}
