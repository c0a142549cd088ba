//! Machine shop domain models.
//!
//! Static input ([`SimulationSpecification`], [`Job`], [`Task`]), per-run
//! state ([`JobState`], [`Machine`]), and static output
//! ([`SimulationResults`]).
//!
//! # Identifiers and time
//!
//! Machines and jobs are numbered from 1. Times are integer ticks from the
//! start of the run (t=0); they are signed so that malformed input can be
//! represented and rejected by [`validation`](crate::validation).

mod job;
mod machine;
mod results;
mod specification;
mod task;

pub use job::{Job, JobState};
pub use machine::Machine;
pub use results::{JobSummary, MachineSummary, SimulationResults, TaskRecord};
pub use specification::SimulationSpecification;
pub use task::Task;

/// Machine identifier (1-based).
pub type MachineId = usize;
/// Job identifier (1-based).
pub type JobId = usize;
/// Simulated time in ticks.
pub type Time = i64;
