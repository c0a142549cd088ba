//! Discrete-event simulation of the machine shop.
//!
//! `Simulator` consumes a [`SimulationSpecification`](crate::models::SimulationSpecification)
//! and produces [`SimulationResults`](crate::models::SimulationResults). A run
//! is a pure function of the specification and configuration.
//!
//! # Queue discipline
//!
//! Machines serve their queues first-come-first-served with no preemption.
//! Simultaneous arrivals at a machine are ordered by ascending job id.
//!
//! # KPI
//!
//! `ShopKpi` summarises a run: finish time, waiting, flow time and
//! utilization.

mod config;
mod engine;
mod event;
mod kpi;

pub use config::{ChangeOverPolicy, SimulationConfig};
pub use engine::{run, Simulator};
pub use kpi::ShopKpi;
