//! Job model.
//!
//! A job is an ordered sequence of tasks that must run on their designated
//! machines strictly in order. The static definition ([`Job`]) is part of the
//! specification; the per-run bookkeeping ([`JobState`]) lives only for the
//! duration of one simulation run.

use serde::{Deserialize, Serialize};

use super::{JobId, MachineId, Task, Time};

/// A job definition: identifier plus its ordered task sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Job identifier (1-based, equal to its position in the specification + 1).
    pub id: JobId,
    /// Tasks in processing order.
    pub tasks: Vec<Task>,
}

impl Job {
    /// Creates a job with no tasks.
    pub fn new(id: JobId) -> Self {
        Self {
            id,
            tasks: Vec::new(),
        }
    }

    /// Appends a task on `machine` taking `duration`.
    pub fn with_task(mut self, machine: MachineId, duration: Time) -> Self {
        self.tasks.push(Task::new(machine, duration));
        self
    }

    /// Appends several `(machine, duration)` tasks in order.
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = (MachineId, Time)>) -> Self {
        self.tasks
            .extend(tasks.into_iter().map(|(m, d)| Task::new(m, d)));
        self
    }

    /// Number of tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Sum of all task durations.
    pub fn total_duration(&self) -> Time {
        self.tasks.iter().map(|t| t.duration).sum()
    }
}

/// Mutable per-run progress of a job.
///
/// `next_task` only ever increases. Once it reaches the task count the job
/// is complete and `completion_time` is fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobState {
    /// Job this state tracks.
    pub id: JobId,
    /// Cursor into the job's task list.
    pub next_task: usize,
    /// Time the job arrived at the queue it is currently in (or will enter).
    pub arrival_time: Time,
    /// Sum of durations of tasks already dispatched.
    pub time_running: Time,
    /// Sum of per-task queueing delays.
    pub total_wait_time: Time,
    /// Set once, when the last task finishes.
    pub completion_time: Option<Time>,
}

impl JobState {
    /// Fresh state: ready for the first task at time 0.
    pub fn new(id: JobId) -> Self {
        Self {
            id,
            next_task: 0,
            arrival_time: 0,
            time_running: 0,
            total_wait_time: 0,
            completion_time: None,
        }
    }

    /// The task the job is waiting for (or running), if any remain.
    pub fn current_task<'a>(&self, job: &'a Job) -> Option<&'a Task> {
        job.tasks.get(self.next_task)
    }

    /// Records that the current task started after waiting `wait` and
    /// advances the cursor past it.
    pub fn start_task(&mut self, task: &Task, wait: Time) {
        self.total_wait_time += wait;
        self.time_running += task.duration;
        self.next_task += 1;
    }

    /// Whether every task has been dispatched.
    pub fn all_dispatched(&self, job: &Job) -> bool {
        self.next_task >= job.tasks.len()
    }

    /// Whether the job has finished its last task.
    pub fn is_complete(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Fixes the completion time. Later calls are ignored.
    pub fn complete(&mut self, time: Time) {
        if self.completion_time.is_none() {
            self.completion_time = Some(time);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_builder() {
        let job = Job::new(1).with_task(1, 5).with_tasks([(2, 3), (1, 1)]);
        assert_eq!(job.id, 1);
        assert_eq!(job.task_count(), 3);
        assert_eq!(job.total_duration(), 9);
        assert_eq!(job.tasks[1], Task::new(2, 3));
    }

    #[test]
    fn test_job_state_progress() {
        let job = Job::new(4).with_tasks([(1, 2), (2, 6)]);
        let mut state = JobState::new(job.id);
        assert_eq!(state.current_task(&job), Some(&Task::new(1, 2)));

        state.start_task(&job.tasks[0], 0);
        assert_eq!(state.current_task(&job), Some(&Task::new(2, 6)));
        assert!(!state.all_dispatched(&job));

        state.start_task(&job.tasks[1], 3);
        assert!(state.all_dispatched(&job));
        assert!(state.current_task(&job).is_none());
        assert_eq!(state.time_running, 8);
        assert_eq!(state.total_wait_time, 3);
    }

    #[test]
    fn test_completion_time_set_once() {
        let mut state = JobState::new(1);
        assert!(!state.is_complete());
        state.complete(12);
        state.complete(40);
        assert_eq!(state.completion_time, Some(12));
    }
}
