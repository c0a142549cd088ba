//! Discrete-event machine shop simulator.
//!
//! A fixed set of machines processes jobs, each an ordered sequence of
//! (machine, duration) tasks. Machines serve their queues first-come-first-
//! served and pay a fixed change-over delay before processing. The engine
//! reports each job's completion and wait time and each machine's task count
//! and imposed wait.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Job`, `Machine`,
//!   `SimulationSpecification`, `SimulationResults`
//! - **`validation`**: Specification integrity checks (counts, ids, ranges)
//! - **`simulation`**: The scheduling engine, its configuration and KPIs
//! - **`generator`**: Random specification generation and shrinking
//! - **`error`**: Error taxonomy
//!
//! # Example
//!
//! ```
//! use shop_sim::models::SimulationSpecification;
//! use shop_sim::simulation::run;
//!
//! let spec = SimulationSpecification::new(vec![2])
//!     .with_job([(1, 4)]);
//! let results = run(&spec).unwrap();
//! assert_eq!(results.finish_time, 6);
//! ```
//!
//! # References
//!
//! - Sahni (2000), "Data Structures, Algorithms, and Applications in Java",
//!   Ch. 9 (machine shop simulation)
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod error;
pub mod generator;
pub mod models;
pub mod simulation;
pub mod validation;

pub use error::{ConfigurationError, SimulationError};
pub use simulation::{run, Simulator};
