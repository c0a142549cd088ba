//! Input validation for simulation specifications.
//!
//! Checks structural integrity of a specification before a run. Detects:
//! - Zero machines or zero jobs
//! - Count fields that disagree with the data they describe
//! - Job ids out of sequence
//! - Empty jobs
//! - Tasks on unknown machines or with non-positive durations
//! - Negative change-over times
//! - Workloads whose time totals cannot be represented
//!
//! Every problem is reported, not just the first.

use crate::error::ConfigurationError;
use crate::models::{SimulationSpecification, Time};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ConfigurationError>>;

/// Validates a simulation specification.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_specification(spec: &SimulationSpecification) -> ValidationResult {
    let mut errors = Vec::new();

    if spec.num_machines == 0 {
        errors.push(ConfigurationError::NoMachines);
    }
    if spec.num_jobs == 0 {
        errors.push(ConfigurationError::NoJobs);
    }

    if spec.change_over_times.len() != spec.num_machines {
        errors.push(ConfigurationError::ChangeOverCountMismatch {
            expected: spec.num_machines,
            found: spec.change_over_times.len(),
        });
    }
    if spec.jobs.len() != spec.num_jobs {
        errors.push(ConfigurationError::JobCountMismatch {
            expected: spec.num_jobs,
            found: spec.jobs.len(),
        });
    }

    for (idx, &time) in spec.change_over_times.iter().enumerate() {
        if time < 0 {
            errors.push(ConfigurationError::NegativeChangeOverTime {
                machine: idx + 1,
                time,
            });
        }
    }

    for (position, job) in spec.jobs.iter().enumerate() {
        if job.id != position + 1 {
            errors.push(ConfigurationError::JobIdMismatch {
                position,
                expected: position + 1,
                found: job.id,
            });
        }

        if job.tasks.is_empty() {
            errors.push(ConfigurationError::EmptyJob { job: job.id });
        }

        for (task_idx, task) in job.tasks.iter().enumerate() {
            if task.machine == 0 || task.machine > spec.num_machines {
                errors.push(ConfigurationError::InvalidMachine {
                    job: job.id,
                    task: task_idx,
                    machine: task.machine,
                    num_machines: spec.num_machines,
                });
            }
            if task.duration < 1 {
                errors.push(ConfigurationError::NonPositiveDuration {
                    job: job.id,
                    task: task_idx,
                    duration: task.duration,
                });
            }
        }
    }

    if horizon_bound(spec).is_none() {
        errors.push(ConfigurationError::HorizonOverflow);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Bound on every time and time total a run can produce.
///
/// Some machine is busy at every instant before the last completion, so no
/// task ends later than the summed change-over plus processing time. Per-job
/// totals (waits, flow times) are each below that, hence the job-count factor.
fn horizon_bound(spec: &SimulationSpecification) -> Option<Time> {
    let mut work: Time = 0;
    for task in spec.jobs.iter().flat_map(|j| &j.tasks) {
        let change_over = spec.change_over_time(task.machine).unwrap_or(0).max(0);
        work = work
            .checked_add(task.duration.max(0))?
            .checked_add(change_over)?;
    }
    work.checked_mul(Time::try_from(spec.jobs.len().max(1)).ok()?)
}
