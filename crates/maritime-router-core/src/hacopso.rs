//! Hybrid Adaptive Chaotic Opposition-Based Particle Swarm Optimizer.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintHandler;
use crate::objectives::{EnvSubstitutions, Evaluator, InternalObjectives};
use crate::ocean::OceanQuery;
use crate::route::{Route, SearchBounds, SpeedProfile, Waypoint};
use crate::vessel::VesselModel;

/// Chaotic map used to perturb the PSO inertia schedule each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChaosType {
    Logistic,
    Tent,
    Sinusoidal,
}

impl Default for ChaosType {
    fn default() -> Self {
        ChaosType::Logistic
    }
}

/// How the swarm selects a social leader each iteration. The source treats
/// the archive's compromise solution as the leader; exposing the
/// alternative (a uniformly random archive member) as a config switch is
/// this crate's resolution of that open design question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderStrategy {
    Compromise,
    RandomArchiveMember,
}

impl Default for LeaderStrategy {
    fn default() -> Self {
        LeaderStrategy::Compromise
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HacopsoConfig {
    pub swarm_size: usize,
    pub max_iterations: usize,
    pub archive_size: usize,
    pub w_max: f64,
    pub w_min: f64,
    pub c1: f64,
    pub c2: f64,
    pub v_max_lat: f64,
    pub v_max_lon: f64,
    pub opposition_rate: f64,
    pub chaos_type: ChaosType,
    pub n_waypoints: usize,
    pub stagnation_limit: usize,
    pub leader_strategy: LeaderStrategy,
}

impl Default for HacopsoConfig {
    fn default() -> Self {
        Self {
            swarm_size: 50,
            max_iterations: 200,
            archive_size: 100,
            w_max: 0.9,
            w_min: 0.4,
            c1: 2.0,
            c2: 2.0,
            v_max_lat: 2.0,
            v_max_lon: 2.0,
            opposition_rate: 0.3,
            chaos_type: ChaosType::default(),
            n_waypoints: 10,
            stagnation_limit: 20,
            leader_strategy: LeaderStrategy::default(),
        }
    }
}

/// A single velocity component, one per route waypoint (endpoints pinned at
/// zero and never updated).
type Velocity = Vec<(f64, f64)>;

struct Particle {
    position: Route,
    velocity: Velocity,
    speeds: SpeedProfile,
    personal_best: Route,
    personal_best_obj: InternalObjectives,
    fitness: f64,
}

/// Per-iteration progress snapshot passed to an optional caller-supplied
/// callback. Must not be used to mutate engine state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IterationStats {
    pub iteration: usize,
    pub best_fitness: f64,
    pub archive_size: usize,
}

/// Outcome of a completed (or cancelled) HACOPSO run.
pub struct HacopsoOutcome {
    pub iterations_run: usize,
    pub convergence_history: Vec<f64>,
    pub archive: crate::pareto::ParetoArchive,
    pub env_substitutions: EnvSubstitutions,
}

pub struct HacopsoEngine<'a> {
    config: HacopsoConfig,
    weights: [f64; 5],
    origin: Waypoint,
    destination: Waypoint,
    bounds: SearchBounds,
    vessel: &'a dyn VesselModel,
    ocean: &'a dyn OceanQuery,
    constraints: &'a ConstraintHandler,
    departure_time: f64,
    rng: ChaCha8Rng,
    particles: Vec<Particle>,
    archive: crate::pareto::ParetoArchive,
    global_best: Option<Route>,
    global_best_obj: Option<InternalObjectives>,
    chaos_value: f64,
    iteration: usize,
    stagnation_count: usize,
    convergence_history: Vec<f64>,
    env_substitutions: EnvSubstitutions,
}

impl<'a> HacopsoEngine<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: HacopsoConfig,
        weights: [f64; 5],
        origin: Waypoint,
        destination: Waypoint,
        vessel: &'a dyn VesselModel,
        ocean: &'a dyn OceanQuery,
        constraints: &'a ConstraintHandler,
        departure_time: f64,
        mut rng: ChaCha8Rng,
    ) -> Self {
        let bounds = SearchBounds::around(origin, destination);
        let chaos_value = rng.gen_range(0.0..1.0);
        Self {
            archive: crate::pareto::ParetoArchive::new(config.archive_size),
            config,
            weights,
            origin,
            destination,
            bounds,
            vessel,
            ocean,
            constraints,
            departure_time,
            rng,
            particles: Vec::new(),
            global_best: None,
            global_best_obj: None,
            chaos_value,
            iteration: 0,
            stagnation_count: 0,
            convergence_history: Vec::new(),
            env_substitutions: EnvSubstitutions::default(),
        }
    }

    fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(self.vessel, self.ocean, self.departure_time)
    }

    fn fitness_of(&self, obj: &InternalObjectives, route: &Route, speeds: &SpeedProfile) -> f64 {
        let violations = self.constraints.check_route(
            route,
            speeds,
            self.ocean,
            self.departure_time,
            Some(obj.fuel_t),
            Some(obj.time_h),
        );
        let penalty = self.constraints.calculate_penalty(&violations);
        obj.weighted_sum(&self.weights) + penalty
    }

    fn random_interior_route(&mut self) -> Route {
        let n = self.config.n_waypoints;
        let mut waypoints = Vec::with_capacity(n + 2);
        waypoints.push(self.origin);
        for i in 1..=n {
            let t = i as f64 / (n as f64 + 1.0);
            let base_lat = self.origin.lat * (1.0 - t) + self.destination.lat * t;
            let base_lon = self.origin.lon * (1.0 - t) + self.destination.lon * t;
            let lat = (base_lat + self.rng.gen_range(-5.0..5.0)).clamp(self.bounds.lat_min, self.bounds.lat_max);
            let lon = (base_lon + self.rng.gen_range(-5.0..5.0)).clamp(self.bounds.lon_min, self.bounds.lon_max);
            waypoints.push(Waypoint { lat, lon });
        }
        waypoints.push(self.destination);
        Route::new(waypoints).expect("constructed route always has origin/destination plus interior")
    }

    fn opposition_of(&self, route: &Route) -> Route {
        let mut opp = route.clone();
        for wp in opp.interior_mut() {
            *wp = self.bounds.oppose(*wp);
        }
        opp
    }

    fn random_speeds(&mut self, n_legs: usize) -> SpeedProfile {
        let service = self.vessel.service_speed();
        let mut speeds = Vec::with_capacity(n_legs);
        for _ in 0..n_legs {
            speeds.push(service + self.rng.gen_range(-2.0..2.0));
        }
        let mut profile = SpeedProfile::new(speeds);
        profile.clamp_to(self.vessel.min_speed(), self.vessel.max_speed());
        profile
    }

    fn make_particle(&mut self, route: Route) -> Particle {
        let speeds = self.random_speeds(route.len() - 1);
        let (obj, subs) = self.evaluator().evaluate(&route, &speeds);
        self.env_substitutions.merge(subs);
        let fitness = self.fitness_of(&obj, &route, &speeds);
        Particle {
            velocity: vec![(0.0, 0.0); route.len()],
            position: route.clone(),
            speeds,
            personal_best: route,
            personal_best_obj: obj,
            fitness,
        }
    }

    fn randomize_velocity(&mut self, particle: &mut Particle) {
        let n = particle.velocity.len();
        for i in 1..n - 1 {
            particle.velocity[i] = (
                self.rng.gen_range(-self.config.v_max_lat..self.config.v_max_lat),
                self.rng.gen_range(-self.config.v_max_lon..self.config.v_max_lon),
            );
        }
    }

    /// Seed the swarm. Up to `swarm_size / 4` warm-start routes are
    /// consumed as initial particles; the remainder are random routes
    /// paired with their opposition images.
    pub fn initialize_swarm(&mut self, warm_start: &[Route]) {
        self.particles.clear();

        let warm_take = warm_start.len().min(self.config.swarm_size / 4);
        for route in &warm_start[..warm_take] {
            let mut particle = self.make_particle(route.clone());
            self.randomize_velocity(&mut particle);
            self.particles.push(particle);
        }

        while self.particles.len() < self.config.swarm_size {
            let route = self.random_interior_route();
            let mut particle = self.make_particle(route.clone());
            self.randomize_velocity(&mut particle);
            let particle_velocity = particle.velocity.clone();
            let particle_speeds = particle.speeds.clone();
            self.particles.push(particle);

            if self.particles.len() < self.config.swarm_size {
                let opp_route = self.opposition_of(&route);
                let mut opp_particle = self.make_particle(opp_route);
                opp_particle.velocity = particle_velocity;
                opp_particle.speeds = particle_speeds;
                self.particles.push(opp_particle);
            }
        }

        self.update_global_best();
    }

    fn update_global_best(&mut self) {
        let best_idx = (0..self.particles.len())
            .min_by(|&a, &b| self.particles[a].fitness.partial_cmp(&self.particles[b].fitness).unwrap())
            .expect("swarm is non-empty");

        let improved = match &self.global_best_obj {
            None => true,
            Some(current_best_obj) => {
                self.particles[best_idx].fitness < current_best_obj.weighted_sum(&self.weights)
            }
        };

        if improved {
            self.global_best = Some(self.particles[best_idx].personal_best.clone());
            self.global_best_obj = Some(self.particles[best_idx].personal_best_obj);
            self.stagnation_count = 0;
        } else {
            self.stagnation_count += 1;
        }
    }

    fn chaotic_inertia_weight(&mut self) -> f64 {
        self.chaos_value = match self.config.chaos_type {
            ChaosType::Logistic => 4.0 * self.chaos_value * (1.0 - self.chaos_value),
            ChaosType::Tent => {
                if self.chaos_value < 0.5 {
                    2.0 * self.chaos_value
                } else {
                    2.0 * (1.0 - self.chaos_value)
                }
            }
            ChaosType::Sinusoidal => (std::f64::consts::PI * self.chaos_value).sin(),
        };
        self.chaos_value = self.chaos_value.clamp(0.01, 0.99);

        let progress = self.iteration as f64 / self.config.max_iterations as f64;
        let base = self.config.w_max - (self.config.w_max - self.config.w_min) * progress;
        base * (1.0 + 0.5 * (self.chaos_value - 0.5))
    }

    fn leader_route(&mut self, personal_best: &Route) -> Route {
        if !self.archive.is_empty() {
            match self.config.leader_strategy {
                LeaderStrategy::Compromise => self
                    .archive
                    .compromise(&self.weights)
                    .map(|e| e.route.clone())
                    .unwrap_or_else(|| personal_best.clone()),
                LeaderStrategy::RandomArchiveMember => {
                    let idx = self.rng.gen_range(0..self.archive.len());
                    self.archive.all()[idx].route.clone()
                }
            }
        } else if let Some(global_best) = &self.global_best {
            global_best.clone()
        } else {
            personal_best.clone()
        }
    }

    /// Run one full swarm update and return its progress stats.
    pub fn iterate(&mut self) -> IterationStats {
        let inertia = self.chaotic_inertia_weight();
        let n_particles = self.particles.len();

        for idx in 0..n_particles {
            let leader = {
                let pbest = self.particles[idx].personal_best.clone();
                self.leader_route(&pbest)
            };

            let len = self.particles[idx].position.len();
            for i in 1..len - 1 {
                let r1_lat = self.rng.gen_range(0.0..1.0);
                let r1_lon = self.rng.gen_range(0.0..1.0);
                let r2_lat = self.rng.gen_range(0.0..1.0);
                let r2_lon = self.rng.gen_range(0.0..1.0);

                let pos = self.particles[idx].position.waypoints()[i];
                let pbest = self.particles[idx].personal_best.waypoints()[i];
                let lead = leader.waypoints()[i];
                let (v_lat, v_lon) = self.particles[idx].velocity[i];

                let cog_lat = self.config.c1 * r1_lat * (pbest.lat - pos.lat);
                let cog_lon = self.config.c1 * r1_lon * (pbest.lon - pos.lon);
                let soc_lat = self.config.c2 * r2_lat * (lead.lat - pos.lat);
                let soc_lon = self.config.c2 * r2_lon * (lead.lon - pos.lon);

                let new_v_lat = (inertia * v_lat + cog_lat + soc_lat)
                    .clamp(-self.config.v_max_lat, self.config.v_max_lat);
                let new_v_lon = (inertia * v_lon + cog_lon + soc_lon)
                    .clamp(-self.config.v_max_lon, self.config.v_max_lon);

                self.particles[idx].velocity[i] = (new_v_lat, new_v_lon);
                let updated = Waypoint {
                    lat: pos.lat + new_v_lat,
                    lon: pos.lon + new_v_lon,
                };
                self.particles[idx].position.waypoints_mut()[i] = updated;
            }

            self.particles[idx].position.clamp_interior_to(&self.bounds);

            let (obj, subs) = self
                .evaluator()
                .evaluate(&self.particles[idx].position, &self.particles[idx].speeds);
            self.env_substitutions.merge(subs);

            let fitness = self.fitness_of(&obj, &self.particles[idx].position, &self.particles[idx].speeds);
            self.particles[idx].fitness = fitness;

            if fitness < self.particles[idx].personal_best_obj.weighted_sum(&self.weights) {
                self.particles[idx].personal_best = self.particles[idx].position.clone();
                self.particles[idx].personal_best_obj = obj;
            }

            let violations = self.constraints.check_route(
                &self.particles[idx].position,
                &self.particles[idx].speeds,
                self.ocean,
                self.departure_time,
                Some(obj.fuel_t),
                Some(obj.time_h),
            );
            if self.constraints.is_feasible(&violations) {
                let speeds = self.particles[idx].speeds.as_slice().to_vec();
                self.archive.insert(self.particles[idx].position.clone(), obj, speeds);
            }
        }

        self.update_global_best();

        if self.stagnation_count >= self.config.stagnation_limit / 2
            && self.rng.gen_range(0.0..1.0) < self.config.opposition_rate
        {
            for idx in 0..n_particles {
                let opp_route = self.opposition_of(&self.particles[idx].position);
                let (opp_obj, subs) = self.evaluator().evaluate(&opp_route, &self.particles[idx].speeds);
                self.env_substitutions.merge(subs);
                let opp_fitness = self.fitness_of(&opp_obj, &opp_route, &self.particles[idx].speeds);
                if opp_fitness < self.particles[idx].fitness {
                    self.particles[idx].position = opp_route;
                    self.particles[idx].fitness = opp_fitness;
                }
            }
        }

        let best_fitness = self
            .particles
            .iter()
            .map(|p| p.fitness)
            .fold(f64::INFINITY, f64::min);
        self.convergence_history.push(best_fitness);
        self.iteration += 1;

        IterationStats {
            iteration: self.iteration,
            best_fitness,
            archive_size: self.archive.len(),
        }
    }

    /// Run to completion (or early exit on cancellation/stagnation).
    /// `on_iteration` is called once per completed iteration and must not
    /// mutate engine state; `is_cancelled` is polled at the top of each
    /// iteration for cooperative cancellation.
    pub fn run(
        &mut self,
        warm_start: &[Route],
        mut on_iteration: impl FnMut(IterationStats),
        mut is_cancelled: impl FnMut() -> bool,
    ) -> HacopsoOutcome {
        self.initialize_swarm(warm_start);

        for _ in 0..self.config.max_iterations {
            if is_cancelled() {
                break;
            }
            let stats = self.iterate();
            on_iteration(stats);
            if self.stagnation_count >= self.config.stagnation_limit {
                break;
            }
        }

        HacopsoOutcome {
            iterations_run: self.iteration,
            convergence_history: std::mem::take(&mut self.convergence_history),
            archive: std::mem::replace(&mut self.archive, crate::pareto::ParetoArchive::new(self.config.archive_size)),
            env_substitutions: self.env_substitutions,
        }
    }
}
