//! Multi-objective maritime route optimization.
//!
//! This crate plans vessel routes that trade off fuel consumption, transit
//! time, weather/piracy risk, emissions, and passenger/crew comfort. Two
//! optimization engines are available:
//!
//! - [`hacopso`]: a Hybrid Adaptive Chaotic Opposition-Based Particle Swarm
//!   Optimizer, the primary engine.
//! - [`ga`]: an NSGA-II style genetic algorithm, used as a benchmark
//!   baseline for comparison.
//!
//! Both engines search over [`route::Route`]/[`route::SpeedProfile`] pairs,
//! score them with [`objectives::Evaluator`], penalize constraint
//! violations via [`constraints::ConstraintHandler`], and collect
//! non-dominated solutions in a [`pareto::ParetoArchive`].
//!
//! # Quick Start
//!
//! ```no_run
//! use maritime_router_core::{optimize, JobSpec};
//! use maritime_router_core::route::Waypoint;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # struct MyVessel;
//! # impl maritime_router_core::vessel::VesselModel for MyVessel {
//! #     fn service_speed(&self) -> f64 { 18.0 }
//! #     fn min_speed(&self) -> f64 { 8.0 }
//! #     fn max_speed(&self) -> f64 { 24.0 }
//! #     fn fuel_consumption(&self, _: f64, _: f64) -> f64 { 1.0 }
//! # }
//! # struct MyOcean;
//! # impl maritime_router_core::ocean::OceanQuery for MyOcean {
//! #     fn is_land(&self, _: f64, _: f64) -> maritime_router_core::ocean::OceanResult<bool> { Ok(false) }
//! #     fn depth(&self, _: f64, _: f64) -> maritime_router_core::ocean::OceanResult<f64> { Ok(4000.0) }
//! #     fn wave_height(&self, _: f64, _: f64, _: f64) -> maritime_router_core::ocean::OceanResult<f64> { Ok(0.5) }
//! #     fn current_vector(&self, _: f64, _: f64, _: f64) -> maritime_router_core::ocean::OceanResult<(f64, f64)> { Ok((0.0, 0.0)) }
//! #     fn storm_risk(&self, _: f64, _: f64, _: f64) -> maritime_router_core::ocean::OceanResult<f64> { Ok(0.0) }
//! #     fn piracy_risk(&self, _: f64, _: f64) -> maritime_router_core::ocean::OceanResult<f64> { Ok(0.0) }
//! # }
//! let vessel = MyVessel;
//! let ocean = MyOcean;
//! let mut job = JobSpec::new(
//!     Waypoint::new(51.9, 4.1)?,
//!     Waypoint::new(40.7, -74.0)?,
//!     &vessel,
//!     &ocean,
//!     0.0,
//! );
//! job.seed = Some(42);
//! let result = optimize(&job)?;
//! println!("found {} Pareto-optimal routes", result.solutions.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! [`Error`] covers configuration and structural failures raised before or
//! during setup (invalid job parameters, malformed waypoints/routes).
//! Failures querying the environment mid-run are not propagated as errors:
//! [`objectives::Evaluator`] substitutes neutral defaults and records the
//! substitution counts in [`OptimizeResult::env_substitutions`].

#![deny(warnings)]

pub mod constraints;
pub mod emissions;
pub mod error;
pub mod ga;
pub mod geo;
pub mod hacopso;
pub mod job;
pub mod objectives;
pub mod ocean;
pub mod pareto;
pub mod route;
#[cfg(test)]
pub mod test_helpers;
pub mod vessel;

pub use error::{Error, Result};
pub use ga::{GaConfig, GaEngine, GaOutcome, GenerationStats};
pub use hacopso::{ChaosType, HacopsoConfig, HacopsoEngine, HacopsoOutcome, IterationStats, LeaderStrategy};
pub use job::{optimize, optimize_with, Algorithm, JobSpec, ObjectiveWeights, OptimizeResult, RunControl, Solution};
pub use objectives::{EnvSubstitutions, Evaluator, InternalObjectives, Objectives};
pub use pareto::{ArchiveEntry, ParetoArchive};
pub use route::{Route, SearchBounds, SpeedProfile, Waypoint};
