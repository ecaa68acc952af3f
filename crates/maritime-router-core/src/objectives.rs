//! Multi-objective fitness evaluation.
//!
//! Converts a route and speed profile into the five-objective vector used
//! throughout the rest of the crate, by integrating environmental
//! conditions leg by leg.

use serde::{Deserialize, Serialize};

use crate::geo;
use crate::ocean::OceanQuery;
use crate::route::{Route, SpeedProfile};
use crate::vessel::VesselModel;

/// CO2 emitted per tonne of fuel burned.
pub const CO2_FACTOR: f64 = 3.114;

/// User-facing objective values. `comfort` is oriented so higher is better,
/// matching the external result contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Objectives {
    pub fuel_t: f64,
    pub time_h: f64,
    pub risk: f64,
    pub emissions_t: f64,
    pub comfort: f64,
}

impl Objectives {
    pub fn to_internal(self) -> InternalObjectives {
        InternalObjectives {
            fuel_t: self.fuel_t,
            time_h: self.time_h,
            risk: self.risk,
            emissions_t: self.emissions_t,
            discomfort: 1.0 - self.comfort,
        }
    }

    /// An objective vector representing an infeasible/degenerate route.
    pub fn worst_case() -> Self {
        Self {
            fuel_t: f64::INFINITY,
            time_h: f64::INFINITY,
            risk: 1.0,
            emissions_t: f64::INFINITY,
            comfort: 0.0,
        }
    }
}

/// The internal, all-minimize objective vector used for Pareto dominance,
/// crowding distance, and weighted-sum fitness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InternalObjectives {
    pub fuel_t: f64,
    pub time_h: f64,
    pub risk: f64,
    pub emissions_t: f64,
    pub discomfort: f64,
}

impl InternalObjectives {
    pub fn to_external(self) -> Objectives {
        Objectives {
            fuel_t: self.fuel_t,
            time_h: self.time_h,
            risk: self.risk,
            emissions_t: self.emissions_t,
            comfort: 1.0 - self.discomfort,
        }
    }

    pub fn as_array(&self) -> [f64; 5] {
        [self.fuel_t, self.time_h, self.risk, self.emissions_t, self.discomfort]
    }

    pub fn from_array(arr: [f64; 5]) -> Self {
        Self {
            fuel_t: arr[0],
            time_h: arr[1],
            risk: arr[2],
            emissions_t: arr[3],
            discomfort: arr[4],
        }
    }

    /// Weighted sum against a 5-vector of weights, used for fitness.
    pub fn weighted_sum(&self, weights: &[f64; 5]) -> f64 {
        self.as_array()
            .iter()
            .zip(weights.iter())
            .map(|(o, w)| o * w)
            .sum()
    }

    pub fn worst_case() -> Self {
        Objectives::worst_case().to_internal()
    }
}

/// Counts of leg evaluations where an [`OceanQuery`] call failed and a
/// neutral default was substituted instead of aborting the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvSubstitutions {
    pub resistance: u64,
    pub current: u64,
    pub storm: u64,
    pub piracy: u64,
    pub wave: u64,
}

impl EnvSubstitutions {
    pub fn total(&self) -> u64 {
        self.resistance + self.current + self.storm + self.piracy + self.wave
    }

    pub fn merge(&mut self, other: EnvSubstitutions) {
        self.resistance += other.resistance;
        self.current += other.current;
        self.storm += other.storm;
        self.piracy += other.piracy;
        self.wave += other.wave;
    }
}

/// Evaluates routes against an [`OceanQuery`] environment and a
/// [`VesselModel`], frozen for the duration of a single optimization run.
pub struct Evaluator<'a> {
    vessel: &'a dyn VesselModel,
    ocean: &'a dyn OceanQuery,
    departure_time: f64,
}

impl<'a> Evaluator<'a> {
    pub fn new(vessel: &'a dyn VesselModel, ocean: &'a dyn OceanQuery, departure_time: f64) -> Self {
        Self { vessel, ocean, departure_time }
    }

    /// Evaluate a route and speed profile, returning the internal
    /// (all-minimize) objective vector plus any environment-query
    /// substitutions that occurred along the way.
    pub fn evaluate(&self, route: &Route, speeds: &SpeedProfile) -> (InternalObjectives, EnvSubstitutions) {
        if route.len() < 2 {
            return (InternalObjectives::worst_case(), EnvSubstitutions::default());
        }

        let mut total_fuel = 0.0;
        let mut total_time = 0.0;
        let mut total_risk = 0.0;
        let mut total_wave_exposure = 0.0;
        let mut subs = EnvSubstitutions::default();
        let mut t = self.departure_time;

        for ((a, b), &v_i) in route.legs().zip(speeds.as_slice()) {
            let distance_nm = geo::haversine_nm(a.lat, a.lon, b.lat, b.lon);
            let mid_lat = (a.lat + b.lat) / 2.0;
            let mid_lon = (a.lon + b.lon) / 2.0;

            let resistance = self.ocean.resistance(mid_lat, mid_lon, t).unwrap_or_else(|_| {
                subs.resistance += 1;
                1.0
            });
            let (current_u, current_v) = self.ocean.current_vector(mid_lat, mid_lon, t).unwrap_or_else(|_| {
                subs.current += 1;
                (0.0, 0.0)
            });
            let storm = self.ocean.storm_risk(mid_lat, mid_lon, t).unwrap_or_else(|_| {
                subs.storm += 1;
                0.0
            });
            let piracy = self.ocean.piracy_risk(mid_lat, mid_lon).unwrap_or_else(|_| {
                subs.piracy += 1;
                0.0
            });
            let wave = self.ocean.wave_height(mid_lat, mid_lon, t).unwrap_or_else(|_| {
                subs.wave += 1;
                0.0
            });

            let heading = geo::initial_heading_deg(a.lat, a.lon, b.lat, b.lon);
            let current_effect = geo::current_effect_kt(current_u, current_v, heading);
            let v_eff = (v_i + current_effect).max(self.vessel.min_speed());

            let leg_time = if v_eff > 0.0 { distance_nm / v_eff } else { f64::INFINITY };
            total_time += leg_time;

            let leg_fuel = self.vessel.fuel_consumption(v_i, leg_time) * resistance;
            total_fuel += leg_fuel;

            let leg_risk = storm.max(piracy) * (leg_time / 24.0);
            total_risk += leg_risk;

            total_wave_exposure += wave * leg_time;
            t += leg_time * 3600.0;
        }

        let risk = total_risk.min(1.0);
        let emissions = total_fuel * CO2_FACTOR;
        let avg_wave = total_wave_exposure / total_time.max(1.0);
        let comfort = (1.0 - avg_wave / 10.0).max(0.0);

        let obj = Objectives {
            fuel_t: total_fuel,
            time_h: total_time,
            risk,
            emissions_t: emissions,
            comfort,
        };

        // Numerical degeneracy: NaN/infinite objectives get the maximum
        // penalty representation rather than crossing the engine boundary
        // as an error. Callers (constraint handler, archive) treat this the
        // same as an infeasible route.
        let internal = obj.to_internal();
        if internal.as_array().iter().any(|v| !v.is_finite()) {
            (InternalObjectives::worst_case(), subs)
        } else {
            (internal, subs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Waypoint;
    use crate::test_helpers::{FlatOcean, TestVessel};

    #[test]
    fn objectives_round_trip_identity() {
        let obj = Objectives {
            fuel_t: 123.4,
            time_h: 56.7,
            risk: 0.25,
            emissions_t: 384.3,
            comfort: 0.9,
        };
        let round_tripped = obj.to_internal().to_external();
        assert!((obj.fuel_t - round_tripped.fuel_t).abs() < 1e-12);
        assert!((obj.time_h - round_tripped.time_h).abs() < 1e-12);
        assert!((obj.risk - round_tripped.risk).abs() < 1e-12);
        assert!((obj.emissions_t - round_tripped.emissions_t).abs() < 1e-12);
        assert!((obj.comfort - round_tripped.comfort).abs() < 1e-12);
    }

    #[test]
    fn short_route_is_worst_case() {
        let vessel = TestVessel::default();
        let ocean = FlatOcean::default();
        let evaluator = Evaluator::new(&vessel, &ocean, 0.0);
        let route = Route::new(vec![Waypoint::new(0.0, 0.0).unwrap(), Waypoint::new(0.0, 1.0).unwrap()]).unwrap();
        let speeds = SpeedProfile::for_route(&route, vec![10.0]).unwrap();
        let (obj, subs) = evaluator.evaluate(&route, &speeds);
        assert!(obj.fuel_t.is_finite());
        assert_eq!(subs.total(), 0);
    }

    #[test]
    fn emissions_equal_fuel_times_co2_factor() {
        let vessel = TestVessel::default();
        let ocean = FlatOcean::default();
        let evaluator = Evaluator::new(&vessel, &ocean, 0.0);
        let route = Route::new(vec![
            Waypoint::new(0.0, 0.0).unwrap(),
            Waypoint::new(0.0, 5.0).unwrap(),
            Waypoint::new(0.0, 10.0).unwrap(),
        ])
        .unwrap();
        let speeds = SpeedProfile::for_route(&route, vec![12.0, 12.0]).unwrap();
        let (obj, _) = evaluator.evaluate(&route, &speeds);
        assert!((obj.emissions_t - obj.fuel_t * CO2_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn worst_case_objectives_are_all_maximal() {
        let w = Objectives::worst_case();
        assert!(w.fuel_t.is_infinite());
        assert!(w.time_h.is_infinite());
        assert_eq!(w.risk, 1.0);
        assert!(w.emissions_t.is_infinite());
        assert_eq!(w.comfort, 0.0);
    }
}
