//! Simulation results (the static output of a run).
//!
//! Built incrementally by the engine as jobs complete and immutable once the
//! run returns.

use serde::{Deserialize, Serialize};

use super::{JobId, MachineId, Time};

/// Outcome of one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResults {
    /// Time the last job completed.
    pub finish_time: Time,
    /// Per-job outcomes in completion order.
    pub jobs: Vec<JobSummary>,
    /// Per-machine counters, indexed by `machine - 1`.
    pub machines: Vec<MachineSummary>,
    /// One record per dispatched task, in dispatch order. Empty when tracing
    /// is disabled.
    pub trace: Vec<TaskRecord>,
}

/// Outcome for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    /// Job identifier.
    pub id: JobId,
    /// Time its last task finished.
    pub completion_time: Time,
    /// Total time spent queued across all its tasks.
    pub total_wait_time: Time,
    /// Sum of its task durations.
    pub time_running: Time,
}

/// Counters for one machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSummary {
    /// Machine identifier.
    pub id: MachineId,
    /// Tasks processed.
    pub tasks_completed: usize,
    /// Total waiting time of jobs queued for this machine.
    pub total_wait_time: Time,
    /// Change-over plus processing time.
    pub busy_time: Time,
}

/// A single dispatched task.
///
/// The machine is occupied over `[start, end)`; the first `change_over`
/// units of that interval are retooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Owning job.
    pub job: JobId,
    /// Position of the task within its job (0-based).
    pub task_index: usize,
    /// Executing machine.
    pub machine: MachineId,
    /// Time the job joined the machine's queue.
    pub arrival: Time,
    /// Time the machine took the job.
    pub start: Time,
    /// Change-over charged before processing.
    pub change_over: Time,
    /// Time processing finished.
    pub end: Time,
}

impl TaskRecord {
    /// Queueing delay before the task started.
    #[inline]
    pub fn wait(&self) -> Time {
        self.start - self.arrival
    }

    /// Processing time, excluding change-over.
    #[inline]
    pub fn processing(&self) -> Time {
        self.end - self.start - self.change_over
    }
}

impl SimulationResults {
    /// Creates empty results for `num_jobs` jobs.
    pub fn new(num_jobs: usize) -> Self {
        Self {
            finish_time: 0,
            jobs: Vec::with_capacity(num_jobs),
            machines: Vec::new(),
            trace: Vec::new(),
        }
    }

    /// Appends a completed job and advances the finish time.
    pub fn record_completion(&mut self, summary: JobSummary) {
        self.finish_time = self.finish_time.max(summary.completion_time);
        self.jobs.push(summary);
    }

    /// Appends a dispatched task to the trace.
    pub fn record_task(&mut self, record: TaskRecord) {
        self.trace.push(record);
    }

    /// Outcome for a job.
    pub fn job(&self, id: JobId) -> Option<&JobSummary> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Counters for a machine.
    pub fn machine(&self, id: MachineId) -> Option<&MachineSummary> {
        id.checked_sub(1).and_then(|idx| self.machines.get(idx))
    }

    /// Job ids in completion order.
    pub fn completion_order(&self) -> Vec<JobId> {
        self.jobs.iter().map(|j| j.id).collect()
    }

    /// Sum of wait time over jobs.
    pub fn total_job_wait_time(&self) -> Time {
        self.jobs.iter().map(|j| j.total_wait_time).sum()
    }

    /// Sum of wait time over machines.
    pub fn total_machine_wait_time(&self) -> Time {
        self.machines.iter().map(|m| m.total_wait_time).sum()
    }

    /// Trace records for one job, in task order.
    pub fn records_for_job(&self, id: JobId) -> Vec<&TaskRecord> {
        let mut records: Vec<_> = self.trace.iter().filter(|r| r.job == id).collect();
        records.sort_by_key(|r| r.task_index);
        records
    }

    /// Trace records for one machine, in dispatch order.
    pub fn records_for_machine(&self, id: MachineId) -> Vec<&TaskRecord> {
        self.trace.iter().filter(|r| r.machine == id).collect()
    }
}
