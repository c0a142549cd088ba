//! Error types.

use thiserror::Error;

use crate::models::{JobId, MachineId, Time};

/// A structural problem in a simulation specification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("number of machines must be at least 1")]
    NoMachines,

    #[error("number of jobs must be at least 1")]
    NoJobs,

    #[error("expected {expected} change-over times, found {found}")]
    ChangeOverCountMismatch { expected: usize, found: usize },

    #[error("expected {expected} jobs, found {found}")]
    JobCountMismatch { expected: usize, found: usize },

    #[error("job at position {position} has id {found}, expected {expected}")]
    JobIdMismatch {
        position: usize,
        expected: JobId,
        found: JobId,
    },

    #[error("job {job} has no tasks")]
    EmptyJob { job: JobId },

    #[error("job {job} task {task} references machine {machine}, outside 1..={num_machines}")]
    InvalidMachine {
        job: JobId,
        task: usize,
        machine: MachineId,
        num_machines: usize,
    },

    #[error("job {job} task {task} has duration {duration}, must be at least 1")]
    NonPositiveDuration { job: JobId, task: usize, duration: Time },

    #[error("machine {machine} has negative change-over time {time}")]
    NegativeChangeOverTime { machine: MachineId, time: Time },

    #[error("total change-over plus processing time, times the job count, overflows the time range")]
    HorizonOverflow,
}

/// Failure of a simulation run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("invalid simulation specification: {}", describe(.errors))]
    InvalidSpecification { errors: Vec<ConfigurationError> },
}

impl From<Vec<ConfigurationError>> for SimulationError {
    fn from(errors: Vec<ConfigurationError>) -> Self {
        Self::InvalidSpecification { errors }
    }
}

impl SimulationError {
    /// The configuration problems behind this error.
    pub fn configuration_errors(&self) -> &[ConfigurationError] {
        match self {
            Self::InvalidSpecification { errors } => errors,
        }
    }
}

fn describe(errors: &[ConfigurationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
