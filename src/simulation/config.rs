//! Run configuration.

use serde::{Deserialize, Serialize};

use crate::models::{JobId, Time};

/// When a machine's change-over delay is charged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeOverPolicy {
    /// Before every task the machine executes, including its first.
    #[default]
    EveryTask,
    /// Only when the machine's previous task belonged to a different job.
    /// A machine's first task runs without change-over.
    OnJobSwitch,
}

impl ChangeOverPolicy {
    /// Change-over to charge for running a task of `job` on a machine whose
    /// previous task belonged to `last_job`.
    pub fn charge(self, change_over_time: Time, last_job: Option<JobId>, job: JobId) -> Time {
        match self {
            Self::EveryTask => change_over_time,
            Self::OnJobSwitch => match last_job {
                Some(prev) if prev != job => change_over_time,
                _ => 0,
            },
        }
    }
}

/// Simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Change-over charging rule.
    pub change_over_policy: ChangeOverPolicy,
    /// Whether to record a [`TaskRecord`](crate::models::TaskRecord) per dispatch.
    pub record_trace: bool,
}

impl SimulationConfig {
    /// Sets the change-over policy.
    pub fn with_change_over_policy(mut self, policy: ChangeOverPolicy) -> Self {
        self.change_over_policy = policy;
        self
    }

    /// Enables or disables the dispatch trace.
    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            change_over_policy: ChangeOverPolicy::EveryTask,
            record_trace: true,
        }
    }
}
