//! Random specification generation and shrinking.
//!
//! Produces valid [`SimulationSpecification`]s for property-based testing
//! and reduces failing cases to smaller ones. Sizes are kept small by
//! default so that edge cases (one machine, one job, empty queues) come up
//! often.

use rand::Rng;

use crate::models::{Job, JobId, MachineId, SimulationSpecification, Task, Time};

/// Generates random valid specifications within configurable limits.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use shop_sim::generator::SpecificationGenerator;
/// use shop_sim::validation::validate_specification;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let spec = SpecificationGenerator::new().generate(&mut rng);
/// assert!(validate_specification(&spec).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationGenerator {
    /// Upper bound on the number of machines (inclusive).
    pub max_machines: usize,
    /// Upper bound on the number of jobs (inclusive).
    pub max_jobs: usize,
    /// Upper bound on tasks per job (inclusive).
    pub max_tasks: usize,
    /// Change-over times are drawn from `0..max_change_over_time`.
    pub max_change_over_time: Time,
    /// Task durations are drawn from `1..=max_task_time`.
    pub max_task_time: Time,
}

impl SpecificationGenerator {
    pub const DEFAULT_MAX_MACHINES: usize = 10;
    pub const DEFAULT_MAX_JOBS: usize = 10;
    pub const DEFAULT_MAX_TASKS: usize = 10;
    pub const DEFAULT_MAX_CHANGE_OVER_TIME: Time = 10;
    pub const DEFAULT_MAX_TASK_TIME: Time = 10;

    /// Creates a generator with the default limits.
    pub fn new() -> Self {
        Self {
            max_machines: Self::DEFAULT_MAX_MACHINES,
            max_jobs: Self::DEFAULT_MAX_JOBS,
            max_tasks: Self::DEFAULT_MAX_TASKS,
            max_change_over_time: Self::DEFAULT_MAX_CHANGE_OVER_TIME,
            max_task_time: Self::DEFAULT_MAX_TASK_TIME,
        }
    }

    /// Sets the machine limit.
    pub fn with_max_machines(mut self, max: usize) -> Self {
        self.max_machines = max;
        self
    }

    /// Sets the job limit.
    pub fn with_max_jobs(mut self, max: usize) -> Self {
        self.max_jobs = max;
        self
    }

    /// Sets the per-job task limit.
    pub fn with_max_tasks(mut self, max: usize) -> Self {
        self.max_tasks = max;
        self
    }

    /// Sets the change-over bound (exclusive).
    pub fn with_max_change_over_time(mut self, max: Time) -> Self {
        self.max_change_over_time = max;
        self
    }

    /// Sets the task duration bound (inclusive).
    pub fn with_max_task_time(mut self, max: Time) -> Self {
        self.max_task_time = max;
        self
    }

    /// Draws a random valid specification.
    ///
    /// Limits below 1 are treated as 1, so the result always has at least
    /// one machine, one job and one task per job.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> SimulationSpecification {
        let num_machines = rng.random_range(1..=self.max_machines.max(1));
        let num_jobs = rng.random_range(1..=self.max_jobs.max(1));

        let change_over_times: Vec<Time> = (0..num_machines)
            .map(|_| rng.random_range(0..self.max_change_over_time.max(1)))
            .collect();

        let jobs = (1..=num_jobs)
            .map(|id| {
                let num_tasks = rng.random_range(1..=self.max_tasks.max(1));
                let tasks = (0..num_tasks)
                    .map(|_| {
                        Task::new(
                            rng.random_range(1..=num_machines),
                            rng.random_range(1..=self.max_task_time.max(1)),
                        )
                    })
                    .collect();
                Job { id, tasks }
            })
            .collect();

        SimulationSpecification {
            num_machines,
            num_jobs,
            change_over_times,
            jobs,
        }
    }
}

impl Default for SpecificationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Smaller candidates derived from `spec`: one with a random machine removed
/// and one with a random job removed, where those removals are possible.
pub fn shrink<R: Rng>(spec: &SimulationSpecification, rng: &mut R) -> Vec<SimulationSpecification> {
    let mut candidates = Vec::with_capacity(2);
    if spec.num_machines > 1 {
        let machine = rng.random_range(1..=spec.num_machines);
        candidates.extend(without_machine(spec, machine));
    }
    if spec.num_jobs > 1 {
        let job = rng.random_range(1..=spec.num_jobs);
        candidates.extend(without_job(spec, job));
    }
    candidates
}

/// Removes `machine` and every task that uses it; later machines are
/// renumbered down by one.
///
/// Returns `None` if it is the only machine, does not exist, or holds every
/// task of some job.
pub fn without_machine(
    spec: &SimulationSpecification,
    machine: MachineId,
) -> Option<SimulationSpecification> {
    if spec.num_machines <= 1 || machine == 0 || machine > spec.num_machines {
        return None;
    }

    let mut jobs = Vec::with_capacity(spec.jobs.len());
    for job in &spec.jobs {
        let tasks: Vec<Task> = job
            .tasks
            .iter()
            .filter(|t| t.machine != machine)
            .map(|t| {
                let renumbered = if t.machine > machine {
                    t.machine - 1
                } else {
                    t.machine
                };
                Task::new(renumbered, t.duration)
            })
            .collect();
        if tasks.is_empty() {
            return None;
        }
        jobs.push(Job { id: job.id, tasks });
    }

    let mut change_over_times = spec.change_over_times.clone();
    change_over_times.remove(machine - 1);

    Some(SimulationSpecification {
        num_machines: spec.num_machines - 1,
        num_jobs: spec.num_jobs,
        change_over_times,
        jobs,
    })
}

/// Removes `job`; later jobs are renumbered down by one.
///
/// Returns `None` if it is the only job or does not exist.
pub fn without_job(spec: &SimulationSpecification, job: JobId) -> Option<SimulationSpecification> {
    if spec.num_jobs <= 1 || job == 0 || job > spec.jobs.len() {
        return None;
    }

    let jobs = spec
        .jobs
        .iter()
        .filter(|j| j.id != job)
        .enumerate()
        .map(|(idx, j)| Job {
            id: idx + 1,
            tasks: j.tasks.clone(),
        })
        .collect();

    Some(SimulationSpecification {
        num_machines: spec.num_machines,
        num_jobs: spec.num_jobs - 1,
        change_over_times: spec.change_over_times.clone(),
        jobs,
    })
}

/// Size measure used to rank shrink candidates: machines + jobs + tasks.
pub fn magnitude(spec: &SimulationSpecification) -> usize {
    spec.num_machines + spec.num_jobs + spec.total_tasks()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_specification;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn sample() -> SimulationSpecification {
        SimulationSpecification::new(vec![1, 2, 3])
            .with_job([(1, 4), (2, 5), (3, 6)])
            .with_job([(3, 1)])
            .with_job([(2, 2), (1, 7)])
    }

    #[test]
    fn test_generate_within_limits() {
        let mut rng = SmallRng::seed_from_u64(42);
        let generator = SpecificationGenerator::new()
            .with_max_machines(3)
            .with_max_jobs(4)
            .with_max_tasks(5)
            .with_max_task_time(2);

        for _ in 0..200 {
            let spec = generator.generate(&mut rng);
            assert!(validate_specification(&spec).is_ok());
            assert!((1..=3).contains(&spec.num_machines));
            assert!((1..=4).contains(&spec.num_jobs));
            for job in &spec.jobs {
                assert!((1..=5).contains(&job.task_count()));
                assert!(job.tasks.iter().all(|t| (1..=2).contains(&t.duration)));
            }
            assert!(spec.change_over_times.iter().all(|&c| (0..10).contains(&c)));
        }
    }

    #[test]
    fn test_generate_deterministic_per_seed() {
        let generator = SpecificationGenerator::new();
        let a = generator.generate(&mut SmallRng::seed_from_u64(9));
        let b = generator.generate(&mut SmallRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_limits() {
        let mut rng = SmallRng::seed_from_u64(1);
        let generator = SpecificationGenerator::new()
            .with_max_machines(0)
            .with_max_jobs(0)
            .with_max_tasks(0)
            .with_max_change_over_time(0)
            .with_max_task_time(0);
        let spec = generator.generate(&mut rng);
        assert_eq!(spec.num_machines, 1);
        assert_eq!(spec.num_jobs, 1);
        assert_eq!(spec.jobs[0].tasks, vec![Task::new(1, 1)]);
        assert_eq!(spec.change_over_times, vec![0]);
    }

    #[test]
    fn test_without_machine_renumbers() {
        let smaller = without_machine(&sample(), 2).unwrap();
        assert_eq!(smaller.num_machines, 2);
        assert_eq!(smaller.change_over_times, vec![1, 3]);
        assert_eq!(smaller.jobs[0].tasks, vec![Task::new(1, 4), Task::new(2, 6)]);
        assert_eq!(smaller.jobs[2].tasks, vec![Task::new(1, 7)]);
        assert!(validate_specification(&smaller).is_ok());
    }

    #[test]
    fn test_without_machine_refuses_emptying_job() {
        // Job 2 runs only on machine 3.
        assert!(without_machine(&sample(), 3).is_none());
        assert!(without_machine(&sample(), 0).is_none());
        assert!(without_machine(&sample(), 4).is_none());

        let single = SimulationSpecification::new(vec![0]).with_job([(1, 1)]);
        assert!(without_machine(&single, 1).is_none());
    }

    #[test]
    fn test_without_job_renumbers() {
        let smaller = without_job(&sample(), 1).unwrap();
        assert_eq!(smaller.num_jobs, 2);
        let ids: Vec<_> = smaller.jobs.iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(smaller.jobs[0].tasks, vec![Task::new(3, 1)]);
        assert!(validate_specification(&smaller).is_ok());
        assert!(without_job(&sample(), 4).is_none());
    }

    #[test]
    fn test_shrink_candidates_are_smaller_and_valid() {
        let mut rng = SmallRng::seed_from_u64(3);
        let spec = sample();
        for _ in 0..50 {
            for candidate in shrink(&spec, &mut rng) {
                assert!(validate_specification(&candidate).is_ok());
                assert!(magnitude(&candidate) < magnitude(&spec));
            }
        }
    }

    #[test]
    fn test_shrink_minimal_spec() {
        let mut rng = SmallRng::seed_from_u64(0);
        let spec = SimulationSpecification::new(vec![0]).with_job([(1, 1)]);
        assert!(shrink(&spec, &mut rng).is_empty());
        assert_eq!(magnitude(&spec), 3);
    }
}
