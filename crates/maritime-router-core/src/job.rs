//! External interface: job configuration, the single `optimize` entry
//! point, and its result contract.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constraints::ConstraintHandler;
use crate::emissions::{self, EmissionBreakdown, FuelType};
use crate::error::{Error, Result};
use crate::ga::{GaConfig, GaEngine};
use crate::hacopso::{ChaosType, HacopsoConfig, HacopsoEngine, IterationStats};
use crate::objectives::EnvSubstitutions;
use crate::ocean::OceanQuery;
use crate::pareto::ParetoArchive;
use crate::route::{Route, Waypoint};
use crate::vessel::VesselModel;

/// Which optimization engine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Hacopso,
    Ga,
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Hacopso
    }
}

/// Weights over the five objectives `(fuel, time, risk, emissions,
/// discomfort)`, used both for scalar fitness and archive compromise
/// queries. Non-negative; normalized to sum to 1 by [`JobSpec::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights(pub [f64; 5]);

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self([0.2; 5])
    }
}

impl ObjectiveWeights {
    fn normalized(&self) -> Result<[f64; 5]> {
        for &w in &self.0 {
            if w < 0.0 {
                return Err(Error::InvalidConfig {
                    field: "weights".to_string(),
                    reason: "weights must be non-negative".to_string(),
                });
            }
        }
        let sum: f64 = self.0.iter().sum();
        if sum <= 0.0 {
            return Err(Error::InvalidConfig {
                field: "weights".to_string(),
                reason: "weights must sum to a positive value".to_string(),
            });
        }
        let mut normalized = self.0;
        for w in &mut normalized {
            *w /= sum;
        }
        Ok(normalized)
    }
}

/// A complete optimization job: endpoints, collaborators, and tuning
/// parameters. `environment` and `vessel` are injected capabilities
/// (dynamic dispatch is the crate's only polymorphism over externally
/// supplied behavior).
pub struct JobSpec<'a> {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub vessel: &'a dyn VesselModel,
    pub environment: &'a dyn OceanQuery,
    pub departure_time: f64,
    pub algorithm: Algorithm,
    pub weights: ObjectiveWeights,
    pub swarm_size: usize,
    pub max_iterations: usize,
    pub n_waypoints: usize,
    pub archive_size: usize,
    pub chaos_type: ChaosType,
    pub max_fuel_tonnes: Option<f64>,
    pub max_time_hours: Option<f64>,
    pub warm_start_routes: Vec<Route>,
    pub seed: Option<u64>,
    /// Fuel burned, used only for the auxiliary per-pollutant breakdown
    /// attached to each returned solution; the `emissions_t` objective
    /// itself is always `fuel_t * 3.114` regardless of this choice.
    pub fuel_type: FuelType,
}

impl<'a> JobSpec<'a> {
    pub fn new(
        origin: Waypoint,
        destination: Waypoint,
        vessel: &'a dyn VesselModel,
        environment: &'a dyn OceanQuery,
        departure_time: f64,
    ) -> Self {
        Self {
            origin,
            destination,
            vessel,
            environment,
            departure_time,
            algorithm: Algorithm::default(),
            weights: ObjectiveWeights::default(),
            swarm_size: 50,
            max_iterations: 200,
            n_waypoints: 10,
            archive_size: 100,
            chaos_type: ChaosType::default(),
            max_fuel_tonnes: None,
            max_time_hours: None,
            warm_start_routes: Vec::new(),
            seed: None,
            fuel_type: FuelType::Vlsfo,
        }
    }

    /// Fail-fast configuration checks, run before any iteration.
    pub fn validate(&self) -> Result<[f64; 5]> {
        if !(10..=200).contains(&self.swarm_size) {
            return Err(Error::InvalidConfig {
                field: "swarm_size".to_string(),
                reason: "must be in [10, 200]".to_string(),
            });
        }
        if !(50..=1000).contains(&self.max_iterations) {
            return Err(Error::InvalidConfig {
                field: "max_iterations".to_string(),
                reason: "must be in [50, 1000]".to_string(),
            });
        }
        if self.n_waypoints == 0 {
            return Err(Error::InvalidConfig {
                field: "n_waypoints".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.archive_size == 0 {
            return Err(Error::InvalidConfig {
                field: "archive_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.vessel.min_speed() <= 0.0 || self.vessel.min_speed() > self.vessel.max_speed() {
            return Err(Error::InvalidConfig {
                field: "vessel".to_string(),
                reason: "min_speed must be positive and not exceed max_speed".to_string(),
            });
        }
        self.weights.normalized()
    }
}

/// A single solution in the returned Pareto front, in user-facing
/// orientation (comfort high = better).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub route: Vec<(f64, f64)>,
    pub speeds: Vec<f64>,
    pub objectives: crate::objectives::Objectives,
    pub emissions_breakdown: EmissionBreakdown,
}

/// Result of an [`optimize`] call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeResult {
    pub iterations_run: usize,
    pub archive_size: usize,
    pub convergence_history: Vec<f64>,
    pub solutions: Vec<Solution>,
    pub env_substitutions: EnvSubstitutions,
}

fn archive_into_result(
    iterations_run: usize,
    archive: ParetoArchive,
    convergence_history: Vec<f64>,
    env_substitutions: EnvSubstitutions,
    fuel_type: FuelType,
) -> OptimizeResult {
    let solutions = archive
        .all()
        .iter()
        .map(|entry| {
            let objectives = entry.objectives.to_external();
            Solution {
                route: entry.route.waypoints().iter().map(|w| w.as_tuple()).collect(),
                speeds: entry.speeds.clone(),
                emissions_breakdown: emissions::breakdown(objectives.fuel_t, fuel_type),
                objectives,
            }
        })
        .collect();

    OptimizeResult {
        iterations_run,
        archive_size: archive.len(),
        convergence_history,
        solutions,
        env_substitutions,
    }
}

/// Optional hooks for progress reporting and cooperative cancellation.
/// `on_iteration` receives `(iteration, best_fitness, archive_size)` and
/// must not mutate engine state; `is_cancelled` is polled at the top of
/// every iteration.
#[derive(Default)]
pub struct RunControl<'a> {
    pub on_iteration: Option<&'a mut dyn FnMut(usize, f64, usize)>,
    pub is_cancelled: Option<&'a mut dyn FnMut() -> bool>,
}

/// Run a job to completion with default run controls (no progress
/// callback, no cancellation).
pub fn optimize(job: &JobSpec<'_>) -> Result<OptimizeResult> {
    optimize_with(job, RunControl::default())
}

/// Run a job to completion, or until `control.is_cancelled()` returns true.
pub fn optimize_with(job: &JobSpec<'_>, control: RunControl<'_>) -> Result<OptimizeResult> {
    let weights = job.validate()?;

    let seed = job.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let rng = ChaCha8Rng::seed_from_u64(seed);

    let mut constraints = ConstraintHandler::new(job.vessel.min_speed(), job.vessel.max_speed());
    constraints.max_fuel_tonnes = job.max_fuel_tonnes;
    constraints.max_time_hours = job.max_time_hours;

    info!(algorithm = ?job.algorithm, seed, "starting optimization run");

    let RunControl { mut on_iteration, mut is_cancelled } = control;
    let mut is_cancelled_fn = move || is_cancelled.as_mut().map(|f| f()).unwrap_or(false);
    let mut on_iteration_fn = move |iteration: usize, best_fitness: f64, archive_size: usize| {
        debug!(iteration, best_fitness, archive_size, "iteration complete");
        if let Some(f) = on_iteration.as_mut() {
            f(iteration, best_fitness, archive_size);
        }
    };

    match job.algorithm {
        Algorithm::Hacopso => {
            let config = HacopsoConfig {
                swarm_size: job.swarm_size,
                max_iterations: job.max_iterations,
                archive_size: job.archive_size,
                n_waypoints: job.n_waypoints,
                chaos_type: job.chaos_type,
                ..HacopsoConfig::default()
            };
            let mut engine = HacopsoEngine::new(
                config,
                weights,
                job.origin,
                job.destination,
                job.vessel,
                job.environment,
                &constraints,
                job.departure_time,
                rng,
            );
            let outcome = engine.run(
                &job.warm_start_routes,
                |stats: IterationStats| on_iteration_fn(stats.iteration, stats.best_fitness, stats.archive_size),
                &mut is_cancelled_fn,
            );
            if outcome.env_substitutions.total() > 0 {
                warn!(
                    substitutions = outcome.env_substitutions.total(),
                    "environment queries failed during run; neutral defaults were substituted"
                );
            }
            Ok(archive_into_result(
                outcome.iterations_run,
                outcome.archive,
                outcome.convergence_history,
                outcome.env_substitutions,
                job.fuel_type,
            ))
        }
        Algorithm::Ga => {
            let config = GaConfig {
                population_size: job.swarm_size,
                max_generations: job.max_iterations,
                n_waypoints: job.n_waypoints,
                archive_size: job.archive_size,
                ..GaConfig::default()
            };
            let mut engine = GaEngine::new(
                config,
                weights,
                job.origin,
                job.destination,
                job.vessel,
                job.environment,
                &constraints,
                job.departure_time,
                rng,
            );
            let outcome = engine.run(
                |stats| on_iteration_fn(stats.generation, stats.best_fitness, stats.archive_size),
                &mut is_cancelled_fn,
            );
            if outcome.env_substitutions.total() > 0 {
                warn!(
                    substitutions = outcome.env_substitutions.total(),
                    "environment queries failed during run; neutral defaults were substituted"
                );
            }
            Ok(archive_into_result(
                outcome.generations_run,
                outcome.archive,
                outcome.convergence_history,
                outcome.env_substitutions,
                job.fuel_type,
            ))
        }
    }
}
