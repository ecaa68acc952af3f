//! NSGA-II style genetic algorithm, used as a benchmark baseline for HACOPSO.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintHandler;
use crate::objectives::{EnvSubstitutions, Evaluator, InternalObjectives};
use crate::ocean::OceanQuery;
use crate::pareto::{crowding_distance, non_dominated_sort, ParetoArchive};
use crate::route::{Route, SearchBounds, SpeedProfile, Waypoint};
use crate::vessel::VesselModel;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GaConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub mutation_strength: f64,
    pub n_waypoints: usize,
    pub tournament_size: usize,
    pub archive_size: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 200,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            mutation_strength: 2.0,
            n_waypoints: 10,
            tournament_size: 3,
            archive_size: 100,
        }
    }
}

#[derive(Clone)]
struct Individual {
    chromosome: Route,
    speeds: SpeedProfile,
    objectives: InternalObjectives,
    rank: usize,
    crowding: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub archive_size: usize,
    pub front_size: usize,
    pub best_fitness: f64,
}

pub struct GaOutcome {
    pub generations_run: usize,
    pub convergence_history: Vec<f64>,
    pub archive: ParetoArchive,
    pub env_substitutions: EnvSubstitutions,
}

pub struct GaEngine<'a> {
    config: GaConfig,
    weights: [f64; 5],
    origin: Waypoint,
    destination: Waypoint,
    bounds: SearchBounds,
    vessel: &'a dyn VesselModel,
    ocean: &'a dyn OceanQuery,
    constraints: &'a ConstraintHandler,
    departure_time: f64,
    rng: ChaCha8Rng,
    population: Vec<Individual>,
    archive: ParetoArchive,
    generation: usize,
    convergence_history: Vec<f64>,
    env_substitutions: EnvSubstitutions,
}

impl<'a> GaEngine<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: GaConfig,
        weights: [f64; 5],
        origin: Waypoint,
        destination: Waypoint,
        vessel: &'a dyn VesselModel,
        ocean: &'a dyn OceanQuery,
        constraints: &'a ConstraintHandler,
        departure_time: f64,
        rng: ChaCha8Rng,
    ) -> Self {
        let bounds = SearchBounds::around(origin, destination);
        Self {
            archive: ParetoArchive::new(config.archive_size),
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
            population: Vec::new(),
            generation: 0,
            convergence_history: Vec::new(),
            env_substitutions: EnvSubstitutions::default(),
        }
    }

    fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(self.vessel, self.ocean, self.departure_time)
    }

    fn random_chromosome(&mut self) -> (Route, SpeedProfile) {
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
        let route = Route::new(waypoints).expect("non-empty chromosome");

        let service = self.vessel.service_speed();
        let mut speeds = Vec::with_capacity(n + 1);
        for _ in 0..=n {
            speeds.push(service + self.rng.gen_range(-2.0..2.0));
        }
        let mut profile = SpeedProfile::new(speeds);
        profile.clamp_to(self.vessel.min_speed(), self.vessel.max_speed());

        (route, profile)
    }

    fn make_individual(&mut self, chromosome: Route, speeds: SpeedProfile) -> Individual {
        let (objectives, subs) = self.evaluator().evaluate(&chromosome, &speeds);
        self.env_substitutions.merge(subs);
        Individual { chromosome, speeds, objectives, rank: 0, crowding: 0.0 }
    }

    pub fn initialize_population(&mut self) {
        self.population.clear();
        for _ in 0..self.config.population_size {
            let (chrom, speeds) = self.random_chromosome();
            let ind = self.make_individual(chrom, speeds);
            self.population.push(ind);
        }
        self.assign_fitness();
    }

    /// Rank and crowd-sort `self.population` in place via non-dominated
    /// sorting over its current objective vectors.
    fn assign_fitness(&mut self) {
        let objectives: Vec<InternalObjectives> = self.population.iter().map(|i| i.objectives).collect();
        let fronts = non_dominated_sort(&objectives);
        for (rank, front) in fronts.iter().enumerate() {
            let front_obj: Vec<InternalObjectives> = front.iter().map(|&i| objectives[i]).collect();
            let distances = crowding_distance(&front_obj);
            for (i, &idx) in front.iter().enumerate() {
                self.population[idx].rank = rank;
                self.population[idx].crowding = distances[i];
            }
        }
    }

    fn tournament_select(&mut self) -> Individual {
        let n = self.population.len();
        let mut indices: Vec<usize> = (0..n).collect();
        let (chosen, _) = indices.partial_shuffle(&mut self.rng, self.config.tournament_size);

        let mut best_idx = chosen[0];
        for &idx in &chosen[1..] {
            let candidate = &self.population[idx];
            let best = &self.population[best_idx];
            if candidate.rank < best.rank || (candidate.rank == best.rank && candidate.crowding > best.crowding) {
                best_idx = idx;
            }
        }
        self.population[best_idx].clone()
    }

    fn crossover(&mut self, p1: &Individual, p2: &Individual) -> (Individual, Individual) {
        if self.rng.gen_range(0.0..1.0) > self.config.crossover_rate {
            return (
                self.make_individual(p1.chromosome.clone(), p1.speeds.clone()),
                self.make_individual(p2.chromosome.clone(), p2.speeds.clone()),
            );
        }

        let alpha = self.rng.gen_range(0.0..1.0);
        let blend = |a: f64, b: f64, alpha: f64| alpha * a + (1.0 - alpha) * b;

        let mut c1_wp = Vec::with_capacity(p1.chromosome.len());
        let mut c2_wp = Vec::with_capacity(p1.chromosome.len());
        for (wa, wb) in p1.chromosome.waypoints().iter().zip(p2.chromosome.waypoints().iter()) {
            c1_wp.push(Waypoint { lat: blend(wa.lat, wb.lat, alpha), lon: blend(wa.lon, wb.lon, alpha) });
            c2_wp.push(Waypoint { lat: blend(wa.lat, wb.lat, 1.0 - alpha), lon: blend(wa.lon, wb.lon, 1.0 - alpha) });
        }
        let last = c1_wp.len() - 1;
        c1_wp[0] = self.origin;
        c1_wp[last] = self.destination;
        c2_wp[0] = self.origin;
        c2_wp[last] = self.destination;

        let c1_speeds: Vec<f64> = p1
            .speeds
            .as_slice()
            .iter()
            .zip(p2.speeds.as_slice().iter())
            .map(|(&a, &b)| blend(a, b, alpha))
            .collect();
        let c2_speeds: Vec<f64> = p1
            .speeds
            .as_slice()
            .iter()
            .zip(p2.speeds.as_slice().iter())
            .map(|(&a, &b)| blend(a, b, 1.0 - alpha))
            .collect();

        let c1 = self.make_individual(
            Route::new(c1_wp).expect("crossover preserves waypoint count"),
            SpeedProfile::new(c1_speeds),
        );
        let c2 = self.make_individual(
            Route::new(c2_wp).expect("crossover preserves waypoint count"),
            SpeedProfile::new(c2_speeds),
        );
        (c1, c2)
    }

    fn mutate(&mut self, ind: Individual) -> Individual {
        if self.rng.gen_range(0.0..1.0) > self.config.mutation_rate {
            return ind;
        }
        let normal = Normal::new(0.0, self.config.mutation_strength).expect("positive mutation strength");
        let mut mutated = ind.chromosome.clone();
        let last = mutated.len() - 1;
        for i in 1..last {
            if self.rng.gen_range(0.0..1.0) < 0.3 {
                let wp = mutated.waypoints()[i];
                let lat = (wp.lat + normal.sample(&mut self.rng)).clamp(self.bounds.lat_min, self.bounds.lat_max);
                let lon = (wp.lon + normal.sample(&mut self.rng)).clamp(self.bounds.lon_min, self.bounds.lon_max);
                mutated.waypoints_mut()[i] = Waypoint { lat, lon };
            }
        }
        self.make_individual(mutated, ind.speeds)
    }

    /// Run one generation and return its progress stats.
    pub fn evolve(&mut self) -> GenerationStats {
        let mut offspring = Vec::with_capacity(self.config.population_size);
        while offspring.len() < self.config.population_size {
            let p1 = self.tournament_select();
            let p2 = self.tournament_select();
            let (c1, c2) = self.crossover(&p1, &p2);
            offspring.push(self.mutate(c1));
            offspring.push(self.mutate(c2));
        }
        offspring.truncate(self.config.population_size);

        let mut combined: Vec<Individual> = self.population.drain(..).chain(offspring).collect();
        let objectives: Vec<InternalObjectives> = combined.iter().map(|i| i.objectives).collect();
        let fronts = non_dominated_sort(&objectives);

        let mut next_gen = Vec::with_capacity(self.config.population_size);
        for front in &fronts {
            if next_gen.len() + front.len() <= self.config.population_size {
                for &idx in front {
                    next_gen.push(combined[idx].clone());
                }
            } else {
                let front_obj: Vec<InternalObjectives> = front.iter().map(|&i| objectives[i]).collect();
                let distances = crowding_distance(&front_obj);
                let mut ranked: Vec<(usize, f64)> = front.iter().copied().zip(distances).collect();
                ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
                let remaining = self.config.population_size - next_gen.len();
                for (idx, _) in ranked.into_iter().take(remaining) {
                    next_gen.push(combined[idx].clone());
                }
                break;
            }
        }
        combined.clear();

        self.population = next_gen;
        self.assign_fitness();

        let mut front_size = 0;
        for ind in self.population.clone() {
            if ind.rank == 0 {
                front_size += 1;
                let violations = self.constraints.check_route(
                    &ind.chromosome,
                    &ind.speeds,
                    self.ocean,
                    self.departure_time,
                    Some(ind.objectives.fuel_t),
                    Some(ind.objectives.time_h),
                );
                if self.constraints.is_feasible(&violations) {
                    self.archive.insert(ind.chromosome, ind.objectives, ind.speeds.as_slice().to_vec());
                }
            }
        }

        self.generation += 1;

        let best_fitness = self
            .population
            .iter()
            .map(|i| i.objectives.weighted_sum(&self.weights))
            .fold(f64::INFINITY, f64::min);
        self.convergence_history.push(best_fitness);

        GenerationStats {
            generation: self.generation,
            archive_size: self.archive.len(),
            front_size,
            best_fitness,
        }
    }

    pub fn run(
        &mut self,
        mut on_generation: impl FnMut(GenerationStats),
        mut is_cancelled: impl FnMut() -> bool,
    ) -> GaOutcome {
        self.initialize_population();

        for _ in 0..self.config.max_generations {
            if is_cancelled() {
                break;
            }
            let stats = self.evolve();
            on_generation(stats);
        }

        GaOutcome {
            generations_run: self.generation,
            convergence_history: std::mem::take(&mut self.convergence_history),
            archive: std::mem::replace(&mut self.archive, ParetoArchive::new(self.config.archive_size)),
            env_substitutions: self.env_substitutions,
        }
    }
}
