//! Simulation specification (the static input of a run).

use serde::{Deserialize, Serialize};

use super::{Job, MachineId, Time};

/// Static description of a shop: machines, their change-over times, and
/// the jobs to run.
///
/// `change_over_times[m - 1]` is the change-over time of machine `m`, and
/// `jobs[j - 1]` is job `j`. Use [`validate_specification`] to check these
/// shapes before trusting a hand-built value.
///
/// [`validate_specification`]: crate::validation::validate_specification
///
/// # Example
/// ```
/// use shop_sim::models::SimulationSpecification;
///
/// let spec = SimulationSpecification::new(vec![0, 2])
///     .with_job([(1, 5), (2, 3)])
///     .with_job([(2, 4)]);
/// assert_eq!(spec.num_machines, 2);
/// assert_eq!(spec.num_jobs, 2);
/// assert_eq!(spec.jobs[1].id, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSpecification {
    /// Number of machines.
    pub num_machines: usize,
    /// Number of jobs.
    pub num_jobs: usize,
    /// Change-over time per machine, indexed by `machine - 1`.
    pub change_over_times: Vec<Time>,
    /// Jobs in id order.
    pub jobs: Vec<Job>,
}

impl SimulationSpecification {
    /// Creates a specification with one machine per change-over time and no jobs.
    pub fn new(change_over_times: Vec<Time>) -> Self {
        Self {
            num_machines: change_over_times.len(),
            num_jobs: 0,
            change_over_times,
            jobs: Vec::new(),
        }
    }

    /// Adds the next job (id = current job count + 1) with the given
    /// `(machine, duration)` tasks.
    pub fn with_job(mut self, tasks: impl IntoIterator<Item = (MachineId, Time)>) -> Self {
        let id = self.jobs.len() + 1;
        self.jobs.push(Job::new(id).with_tasks(tasks));
        self.num_jobs = self.jobs.len();
        self
    }

    /// Change-over time of a machine, if it exists.
    pub fn change_over_time(&self, machine: MachineId) -> Option<Time> {
        machine
            .checked_sub(1)
            .and_then(|idx| self.change_over_times.get(idx))
            .copied()
    }

    /// Total number of tasks across all jobs.
    pub fn total_tasks(&self) -> usize {
        self.jobs.iter().map(Job::task_count).sum()
    }

    /// Number of tasks bound to each machine, indexed by `machine - 1`.
    ///
    /// Tasks that reference machines outside `1..=num_machines` are not counted.
    pub fn tasks_per_machine(&self) -> Vec<usize> {
        let mut counts = vec![0; self.num_machines];
        for task in self.jobs.iter().flat_map(|j| &j.tasks) {
            if let Some(slot) = task
                .machine
                .checked_sub(1)
                .and_then(|idx| counts.get_mut(idx))
            {
                *slot += 1;
            }
        }
        counts
    }
}
