//! Discrete-event scheduling engine.
//!
//! # Algorithm
//!
//! 1. Every job joins the FIFO queue of its first machine at t=0, in
//!    ascending job id order.
//! 2. Each idle machine with a non-empty queue (ascending machine id)
//!    dispatches its queue head: start = max(free_at, arrival), then the
//!    change-over, then the task. Its completion is pushed on the event queue.
//! 3. The earliest batch of completion events is popped. Jobs that finished
//!    are handled in ascending job id: completed jobs are recorded, the rest
//!    join the queue of the machine for their next task.
//! 4. Repeat 2-3 until no events remain.
//!
//! # Complexity
//! O(T log M) where T = total tasks, M = machines.

use log::{debug, info, trace};

use super::config::{ChangeOverPolicy, SimulationConfig};
use super::event::EventQueue;
use crate::error::SimulationError;
use crate::models::{
    JobId, JobState, JobSummary, Machine, MachineSummary, SimulationResults,
    SimulationSpecification, TaskRecord, Time,
};
use crate::validation::validate_specification;

/// Machine shop simulator.
///
/// Holds only configuration; every call to [`run`](Self::run) builds fresh
/// machine and job state, so one simulator can be shared across threads.
///
/// # Example
///
/// ```
/// use shop_sim::models::SimulationSpecification;
/// use shop_sim::simulation::Simulator;
///
/// let spec = SimulationSpecification::new(vec![0])
///     .with_job([(1, 5)])
///     .with_job([(1, 3)]);
///
/// let results = Simulator::new().run(&spec).unwrap();
/// assert_eq!(results.finish_time, 8);
/// assert_eq!(results.job(2).unwrap().total_wait_time, 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Creates a simulator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator with the given configuration.
    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Sets the change-over policy.
    pub fn with_change_over_policy(mut self, policy: ChangeOverPolicy) -> Self {
        self.config.change_over_policy = policy;
        self
    }

    /// Enables or disables the dispatch trace.
    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.config.record_trace = record_trace;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs the simulation to completion.
    ///
    /// # Errors
    /// [`SimulationError::InvalidSpecification`] if the specification fails
    /// validation. No partial simulation is performed in that case.
    pub fn run(&self, spec: &SimulationSpecification) -> Result<SimulationResults, SimulationError> {
        validate_specification(spec)?;

        info!(
            "simulating {} jobs ({} tasks) on {} machines, policy {:?}",
            spec.num_jobs,
            spec.total_tasks(),
            spec.num_machines,
            self.config.change_over_policy
        );

        let results = ShopRun::new(spec, &self.config).execute();

        info!(
            "simulation finished at t={} (total wait {})",
            results.finish_time,
            results.total_job_wait_time()
        );
        Ok(results)
    }
}

/// Runs `spec` with the default configuration.
pub fn run(spec: &SimulationSpecification) -> Result<SimulationResults, SimulationError> {
    Simulator::new().run(spec)
}

/// State of a single run. Machines and jobs are indexed by `id - 1`.
struct ShopRun<'a> {
    spec: &'a SimulationSpecification,
    config: &'a SimulationConfig,
    machines: Vec<Machine>,
    jobs: Vec<JobState>,
    events: EventQueue,
    results: SimulationResults,
}

impl<'a> ShopRun<'a> {
    fn new(spec: &'a SimulationSpecification, config: &'a SimulationConfig) -> Self {
        let machines = spec
            .change_over_times
            .iter()
            .enumerate()
            .map(|(idx, &change_over)| Machine::new(idx + 1, change_over))
            .collect();
        let jobs = spec.jobs.iter().map(|job| JobState::new(job.id)).collect();

        Self {
            spec,
            config,
            machines,
            jobs,
            events: EventQueue::new(),
            results: SimulationResults::new(spec.num_jobs),
        }
    }

    fn execute(mut self) -> SimulationResults {
        let initial: Vec<JobId> = (1..=self.jobs.len()).collect();
        self.admit(0, initial);
        self.dispatch_idle(0);

        while let Some((now, finishing)) = self.events.pop_next_batch() {
            trace!("t={now}: machines {finishing:?} finished");

            let mut finished: Vec<JobId> = finishing
                .iter()
                .filter_map(|&machine| self.machines[machine - 1].finish())
                .collect();
            finished.sort_unstable();

            let mut moving = Vec::with_capacity(finished.len());
            for job in finished {
                if self.jobs[job - 1].all_dispatched(&self.spec.jobs[job - 1]) {
                    self.complete(job, now);
                } else {
                    moving.push(job);
                }
            }

            self.admit(now, moving);
            self.dispatch_idle(now);
        }

        self.check_invariants();
        self.into_results()
    }

    /// Appends each job, in the given order, to the queue of the machine for
    /// its current task.
    fn admit(&mut self, now: Time, jobs: Vec<JobId>) {
        let spec = self.spec;
        for id in jobs {
            let state = &mut self.jobs[id - 1];
            let Some(task) = state.current_task(&spec.jobs[id - 1]) else {
                continue;
            };
            state.arrival_time = now;
            self.machines[task.machine - 1].enqueue(id);
        }
    }

    fn dispatch_idle(&mut self, now: Time) {
        for idx in 0..self.machines.len() {
            if self.machines[idx].can_dispatch() {
                self.dispatch(idx, now);
            }
        }
    }

    /// Starts the head of machine `idx`'s queue.
    fn dispatch(&mut self, idx: usize, now: Time) {
        let spec = self.spec;
        let policy = self.config.change_over_policy;

        let machine = &mut self.machines[idx];
        let Some(job_id) = machine.queue.pop_front() else {
            return;
        };
        let state = &mut self.jobs[job_id - 1];
        let Some(&task) = state.current_task(&spec.jobs[job_id - 1]) else {
            unreachable!("job {job_id} queued on machine {} with no task left", machine.id);
        };
        debug_assert_eq!(task.machine, machine.id, "job {job_id} queued on wrong machine");

        let start = machine.free_at.max(state.arrival_time);
        debug_assert_eq!(start, now, "machine {} dispatched late", machine.id);
        let wait = start - state.arrival_time;
        let change_over = policy.charge(machine.change_over_time, machine.last_job, job_id);
        let end = start + change_over + task.duration;
        let task_index = state.next_task;

        state.start_task(&task, wait);

        machine.active = Some(job_id);
        machine.last_job = Some(job_id);
        machine.free_at = end;
        machine.tasks_completed += 1;
        machine.total_wait_imposed += wait;
        machine.busy_time += change_over + task.duration;
        let machine_id = machine.id;

        debug!(
            "t={start}: machine {machine_id} starts job {job_id} task {task_index} \
             (waited {wait}, change-over {change_over}, ends {end})"
        );

        self.events.schedule(end, machine_id);
        if self.config.record_trace {
            self.results.record_task(TaskRecord {
                job: job_id,
                task_index,
                machine: machine_id,
                arrival: start - wait,
                start,
                change_over,
                end,
            });
        }
    }

    fn complete(&mut self, job_id: JobId, now: Time) {
        let state = &mut self.jobs[job_id - 1];
        state.complete(now);
        debug!(
            "t={now}: job {job_id} complete (wait {})",
            state.total_wait_time
        );
        self.results.record_completion(JobSummary {
            id: job_id,
            completion_time: now,
            total_wait_time: state.total_wait_time,
            time_running: state.time_running,
        });
    }

    fn check_invariants(&self) {
        debug_assert!(self.events.is_empty(), "events left after run");
        for machine in &self.machines {
            debug_assert!(
                machine.is_idle() && machine.queue.is_empty(),
                "machine {} still has work",
                machine.id
            );
        }
        debug_assert!(
            self.jobs.iter().all(JobState::is_complete),
            "run ended with incomplete jobs"
        );
        debug_assert_eq!(self.results.jobs.len(), self.jobs.len());

        let machine_wait: Time = self.machines.iter().map(|m| m.total_wait_imposed).sum();
        debug_assert_eq!(
            self.results.total_job_wait_time(),
            machine_wait,
            "job and machine wait totals diverged"
        );
        debug_assert_eq!(
            self.results.finish_time,
            self.results
                .jobs
                .iter()
                .map(|j| j.completion_time)
                .max()
                .unwrap_or(0)
        );
        debug_assert!(
            self.results
                .jobs
                .windows(2)
                .all(|w| w[0].completion_time <= w[1].completion_time),
            "completions recorded out of time order"
        );
    }

    fn into_results(self) -> SimulationResults {
        let mut results = self.results;
        results.machines = self
            .machines
            .iter()
            .map(|m| MachineSummary {
                id: m.id,
                tasks_completed: m.tasks_completed,
                total_wait_time: m.total_wait_imposed,
                busy_time: m.busy_time,
            })
            .collect();
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;

    fn single_machine(change_over: Time, durations: &[Time]) -> SimulationSpecification {
        durations
            .iter()
            .fold(SimulationSpecification::new(vec![change_over]), |spec, &d| {
                spec.with_job([(1, d)])
            })
    }

    #[test]
    fn test_two_jobs_one_machine() {
        let spec = single_machine(0, &[5, 3]);
        let r = run(&spec).unwrap();

        let j1 = r.job(1).unwrap();
        assert_eq!(j1.completion_time, 5);
        assert_eq!(j1.total_wait_time, 0);
        let j2 = r.job(2).unwrap();
        assert_eq!(j2.completion_time, 8);
        assert_eq!(j2.total_wait_time, 5);

        let m = r.machine(1).unwrap();
        assert_eq!(m.tasks_completed, 2);
        assert_eq!(m.total_wait_time, 5);
        assert_eq!(r.finish_time, 8);
    }

    #[test]
    fn test_change_over_before_first_task() {
        let spec = single_machine(2, &[4]);
        let r = run(&spec).unwrap();
        let j1 = r.job(1).unwrap();
        assert_eq!(j1.completion_time, 6);
        assert_eq!(j1.total_wait_time, 0);
        assert_eq!(r.machine(1).unwrap().busy_time, 6);
    }

    #[test]
    fn test_change_over_not_counted_as_wait() {
        // J1: [0,2) change-over, [2,6) run. J2 waits 6, then [6,8) + [8,9).
        let spec = single_machine(2, &[4, 1]);
        let r = run(&spec).unwrap();
        assert_eq!(r.job(2).unwrap().total_wait_time, 6);
        assert_eq!(r.job(2).unwrap().completion_time, 9);
    }

    #[test]
    fn test_on_job_switch_policy() {
        // J1 runs two tasks back to back on M1: only J2 pays the change-over.
        let spec = SimulationSpecification::new(vec![3])
            .with_job([(1, 2), (1, 2)])
            .with_job([(1, 1)]);

        let every = run(&spec).unwrap();
        // J1 t0 [0,5), then J1 requeues behind J2 (waiting since t=0).
        assert_eq!(every.job(2).unwrap().completion_time, 9);
        assert_eq!(every.job(1).unwrap().completion_time, 14);

        let switch = Simulator::new()
            .with_change_over_policy(ChangeOverPolicy::OnJobSwitch)
            .run(&spec)
            .unwrap();
        // J1 t0 [0,2) no change-over; J2 [2,6) switch; J1 t1 [6,11) switch.
        assert_eq!(switch.job(2).unwrap().completion_time, 6);
        assert_eq!(switch.job(1).unwrap().completion_time, 11);
    }

    #[test]
    fn test_same_job_consecutive_on_job_switch() {
        let spec = SimulationSpecification::new(vec![5]).with_job([(1, 1), (1, 1), (1, 1)]);
        let r = Simulator::new()
            .with_change_over_policy(ChangeOverPolicy::OnJobSwitch)
            .run(&spec)
            .unwrap();
        assert_eq!(r.finish_time, 3);
    }

    #[test]
    fn test_requeue_behind_waiting_jobs() {
        // J1 returns to M1 at t=1 but J2 and J3 have been waiting since t=0.
        let spec = SimulationSpecification::new(vec![0])
            .with_job([(1, 1), (1, 1)])
            .with_job([(1, 1)])
            .with_job([(1, 1)]);
        let r = run(&spec).unwrap();
        let order: Vec<_> = r.records_for_machine(1).iter().map(|t| t.job).collect();
        assert_eq!(order, vec![1, 2, 3, 1]);
        assert_eq!(r.job(1).unwrap().completion_time, 4);
        assert_eq!(r.job(1).unwrap().total_wait_time, 2);
    }

    #[test]
    fn test_flow_across_machines() {
        // J1: M1(3) -> M2(2); J2: M2(4) -> M1(1)
        let spec = SimulationSpecification::new(vec![0, 0])
            .with_job([(1, 3), (2, 2)])
            .with_job([(2, 4), (1, 1)]);
        let r = run(&spec).unwrap();

        // J1 waits on M2 from 3 until J2 frees it at 4.
        let j1 = r.job(1).unwrap();
        assert_eq!(j1.total_wait_time, 1);
        assert_eq!(j1.completion_time, 6);
        // J2 arrives at M1 at 4 (free since 3).
        let j2 = r.job(2).unwrap();
        assert_eq!(j2.total_wait_time, 0);
        assert_eq!(j2.completion_time, 5);

        assert_eq!(r.completion_order(), vec![2, 1]);
        assert_eq!(r.total_machine_wait_time(), r.total_job_wait_time());
    }

    #[test]
    fn test_simultaneous_arrivals_by_job_id() {
        // J2 finishes on M1 and J1 on M2 at t=2; both move to M3 together.
        let spec = SimulationSpecification::new(vec![0, 0, 0])
            .with_job([(2, 2), (3, 5)])
            .with_job([(1, 2), (3, 5)]);
        let r = run(&spec).unwrap();
        let m3: Vec<_> = r.records_for_machine(3).iter().map(|t| t.job).collect();
        assert_eq!(m3, vec![1, 2]);
        assert_eq!(r.job(1).unwrap().completion_time, 7);
        assert_eq!(r.job(2).unwrap().completion_time, 12);
    }

    #[test]
    fn test_simultaneous_completions_by_job_id() {
        let spec = SimulationSpecification::new(vec![0, 0])
            .with_job([(2, 4)])
            .with_job([(1, 4)]);
        let r = run(&spec).unwrap();
        assert_eq!(r.completion_order(), vec![1, 2]);
    }

    #[test]
    fn test_trace_records() {
        let spec = SimulationSpecification::new(vec![1, 0]).with_job([(1, 2), (2, 3)]);
        let r = run(&spec).unwrap();
        let recs = r.records_for_job(1);
        assert_eq!(recs.len(), 2);
        assert_eq!(
            *recs[0],
            TaskRecord {
                job: 1,
                task_index: 0,
                machine: 1,
                arrival: 0,
                start: 0,
                change_over: 1,
                end: 3
            }
        );
        assert_eq!(recs[1].start, 3);
        assert_eq!(recs[1].end, 6);
    }

    #[test]
    fn test_trace_disabled() {
        let spec = single_machine(0, &[1, 2]);
        let r = Simulator::new().with_trace(false).run(&spec).unwrap();
        assert!(r.trace.is_empty());
        assert_eq!(r.finish_time, 3);
    }

    #[test]
    fn test_invalid_spec_rejected() {
        let spec = SimulationSpecification::new(vec![0]).with_job([(2, 1)]);
        let err = run(&spec).unwrap_err();
        assert_eq!(
            err.configuration_errors(),
            &[ConfigurationError::InvalidMachine {
                job: 1,
                task: 0,
                machine: 2,
                num_machines: 1
            }]
        );
    }

    #[test]
    fn test_extreme_durations_rejected() {
        let spec = single_machine(0, &[Time::MAX, Time::MAX]);
        let err = run(&spec).unwrap_err();
        assert_eq!(
            err.configuration_errors(),
            &[ConfigurationError::HorizonOverflow]
        );
    }

    #[test]
    fn test_largest_representable_job() {
        let spec = single_machine(0, &[Time::MAX]);
        let r = run(&spec).unwrap();
        assert_eq!(r.finish_time, Time::MAX);
        assert_eq!(r.job(1).unwrap().total_wait_time, 0);
    }

    #[test]
    #[should_panic(expected = "queued on machine 1 with no task left")]
    fn test_dispatch_of_exhausted_job_panics() {
        let spec = single_machine(0, &[2]);
        let config = SimulationConfig::default();
        let mut shop = ShopRun::new(&spec, &config);
        shop.jobs[0].next_task = 1;
        shop.machines[0].enqueue(1);
        shop.dispatch(0, 0);
    }

    #[test]
    fn test_runs_are_independent() {
        let spec = single_machine(1, &[2, 2, 2]);
        let sim = Simulator::new();
        let a = sim.run(&spec).unwrap();
        let b = sim.run(&spec).unwrap();
        assert_eq!(a, b);
    }
}
