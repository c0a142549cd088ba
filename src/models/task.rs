//! Task model.
//!
//! A task is the unit of work in the shop: one processing step of a job,
//! bound to a single machine for a fixed duration.

use serde::{Deserialize, Serialize};

use super::{MachineId, Time};

/// One processing step of a job.
///
/// Immutable once constructed and owned by exactly one [`Job`](super::Job).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    /// Machine that must execute this task (1-based).
    pub machine: MachineId,
    /// Processing time, excluding any change-over.
    pub duration: Time,
}

impl Task {
    /// Creates a task on `machine` taking `duration` time units.
    pub fn new(machine: MachineId, duration: Time) -> Self {
        Self { machine, duration }
    }
}
