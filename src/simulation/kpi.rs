//! Shop performance indicators.
//!
//! Summarises a finished run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Finish time | Latest job completion time |
//! | Total Wait | Sum of job wait times |
//! | Avg / Max Wait | Mean and largest per-job wait |
//! | Avg Flow Time | Mean completion time (all jobs released at t=0) |
//! | Utilization | Machine busy time / finish time |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{MachineId, SimulationResults, Time};

/// Aggregate indicators for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopKpi {
    /// Latest completion time.
    pub finish_time: Time,
    /// Sum of job wait times.
    pub total_wait_time: Time,
    /// Largest wait of any single job.
    pub max_wait_time: Time,
    /// Mean wait per job.
    pub avg_wait_time: f64,
    /// Mean completion time.
    pub avg_flow_time: f64,
    /// Mean machine utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Per-machine utilization.
    pub utilization_by_machine: BTreeMap<MachineId, f64>,
}

impl ShopKpi {
    /// Computes indicators from run results.
    pub fn calculate(results: &SimulationResults) -> Self {
        let job_count = results.jobs.len();
        let total_wait_time = results.total_job_wait_time();
        let max_wait_time = results
            .jobs
            .iter()
            .map(|j| j.total_wait_time)
            .max()
            .unwrap_or(0);
        let total_flow: Time = results.jobs.iter().map(|j| j.completion_time).sum();

        let (avg_wait_time, avg_flow_time) = if job_count == 0 {
            (0.0, 0.0)
        } else {
            (
                total_wait_time as f64 / job_count as f64,
                total_flow as f64 / job_count as f64,
            )
        };

        let horizon = results.finish_time;
        let utilization_by_machine: BTreeMap<MachineId, f64> = if horizon <= 0 {
            BTreeMap::new()
        } else {
            results
                .machines
                .iter()
                .map(|m| (m.id, m.busy_time as f64 / horizon as f64))
                .collect()
        };
        let avg_utilization = if utilization_by_machine.is_empty() {
            0.0
        } else {
            utilization_by_machine.values().sum::<f64>() / utilization_by_machine.len() as f64
        };

        Self {
            finish_time: results.finish_time,
            total_wait_time,
            max_wait_time,
            avg_wait_time,
            avg_flow_time,
            avg_utilization,
            utilization_by_machine,
        }
    }
}
