//! Constraint detection, penalty scoring, and route repair.

use crate::geo;
use crate::ocean::OceanQuery;
use crate::route::{Route, SpeedProfile, Waypoint};

/// The kinds of constraint violation a route can incur. Only [`Land`] is a
/// hard constraint; the rest contribute penalty but never veto archive
/// insertion on their own.
///
/// [`Land`]: ViolationKind::Land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Land,
    Depth,
    FuelBudget,
    Storm,
    Piracy,
    Speed,
    /// Not part of the original six-kind table; added so `max_time_hours`
    /// is actually enforceable, by symmetry with `FuelBudget`.
    TimeBudget,
}

impl ViolationKind {
    /// Fixed per-kind penalty weight, descending severity.
    pub fn weight(self) -> f64 {
        match self {
            ViolationKind::Land => 1e6,
            ViolationKind::Depth => 1e5,
            ViolationKind::FuelBudget => 1e4,
            ViolationKind::Storm => 1e4,
            ViolationKind::TimeBudget => 1e4,
            ViolationKind::Piracy => 1e3,
            ViolationKind::Speed => 1e2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolation {
    pub kind: ViolationKind,
    pub waypoint_index: Option<usize>,
    pub severity: f64,
    pub description: String,
}

/// Fixed risk thresholds above which a waypoint is considered violating.
const STORM_RISK_THRESHOLD: f64 = 0.8;
const PIRACY_RISK_THRESHOLD: f64 = 0.7;

/// Route feasibility and penalty rules, parameterized per job.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintHandler {
    pub min_depth_m: f64,
    pub min_speed_kt: f64,
    pub max_speed_kt: f64,
    pub max_fuel_tonnes: Option<f64>,
    pub max_time_hours: Option<f64>,
}

impl ConstraintHandler {
    pub fn new(min_speed_kt: f64, max_speed_kt: f64) -> Self {
        Self {
            min_depth_m: 15.0,
            min_speed_kt,
            max_speed_kt,
            max_fuel_tonnes: None,
            max_time_hours: None,
        }
    }

    /// Evaluate every constraint for a route against an ocean environment.
    /// `fuel_tonnes`/`time_hours` are the aggregate totals from objective
    /// evaluation, used only for the budget checks.
    pub fn check_route(
        &self,
        route: &Route,
        speeds: &SpeedProfile,
        ocean: &dyn OceanQuery,
        t: f64,
        fuel_tonnes: Option<f64>,
        time_hours: Option<f64>,
    ) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();

        for (i, wp) in route.waypoints().iter().enumerate() {
            if ocean.is_land(wp.lat, wp.lon).unwrap_or(false) {
                violations.push(ConstraintViolation {
                    kind: ViolationKind::Land,
                    waypoint_index: Some(i),
                    severity: 1.0,
                    description: format!(
                        "waypoint {i} crosses land at ({:.4}, {:.4})",
                        wp.lat, wp.lon
                    ),
                });
            }

            if let Ok(depth) = ocean.depth(wp.lat, wp.lon) {
                if depth < self.min_depth_m {
                    let severity = ((self.min_depth_m - depth) / self.min_depth_m).clamp(0.0, 1.0);
                    violations.push(ConstraintViolation {
                        kind: ViolationKind::Depth,
                        waypoint_index: Some(i),
                        severity,
                        description: format!("insufficient depth ({depth:.1}m) at waypoint {i}"),
                    });
                }
            }

            if let Ok(storm) = ocean.storm_risk(wp.lat, wp.lon, t) {
                if storm > STORM_RISK_THRESHOLD {
                    violations.push(ConstraintViolation {
                        kind: ViolationKind::Storm,
                        waypoint_index: Some(i),
                        severity: storm.clamp(0.0, 1.0),
                        description: format!("high storm risk ({storm:.2}) at waypoint {i}"),
                    });
                }
            }

            if let Ok(piracy) = ocean.piracy_risk(wp.lat, wp.lon) {
                if piracy > PIRACY_RISK_THRESHOLD {
                    violations.push(ConstraintViolation {
                        kind: ViolationKind::Piracy,
                        waypoint_index: Some(i),
                        severity: piracy.clamp(0.0, 1.0),
                        description: format!("high piracy risk ({piracy:.2}) at waypoint {i}"),
                    });
                }
            }
        }

        for (i, &speed) in speeds.as_slice().iter().enumerate() {
            if speed < self.min_speed_kt {
                let severity = ((self.min_speed_kt - speed) / self.min_speed_kt).clamp(0.0, 1.0);
                violations.push(ConstraintViolation {
                    kind: ViolationKind::Speed,
                    waypoint_index: Some(i),
                    severity,
                    description: format!("speed {speed:.1}kt below minimum at leg {i}"),
                });
            } else if speed > self.max_speed_kt {
                let severity = ((speed - self.max_speed_kt) / self.max_speed_kt).clamp(0.0, 1.0);
                violations.push(ConstraintViolation {
                    kind: ViolationKind::Speed,
                    waypoint_index: Some(i),
                    severity,
                    description: format!("speed {speed:.1}kt exceeds maximum at leg {i}"),
                });
            }
        }

        if let (Some(max_fuel), Some(fuel)) = (self.max_fuel_tonnes, fuel_tonnes) {
            if fuel > max_fuel {
                let severity = ((fuel - max_fuel) / max_fuel).clamp(0.0, 1.0);
                violations.push(ConstraintViolation {
                    kind: ViolationKind::FuelBudget,
                    waypoint_index: None,
                    severity,
                    description: format!("fuel consumption ({fuel:.1}t) exceeds limit ({max_fuel:.1}t)"),
                });
            }
        }

        if let (Some(max_time), Some(time)) = (self.max_time_hours, time_hours) {
            if time > max_time {
                let severity = ((time - max_time) / max_time).clamp(0.0, 1.0);
                violations.push(ConstraintViolation {
                    kind: ViolationKind::TimeBudget,
                    waypoint_index: None,
                    severity,
                    description: format!("transit time ({time:.1}h) exceeds limit ({max_time:.1}h)"),
                });
            }
        }

        violations
    }

    pub fn calculate_penalty(&self, violations: &[ConstraintViolation]) -> f64 {
        violations.iter().map(|v| v.kind.weight() * v.severity).sum()
    }

    /// True iff no waypoint lies on land. The only hard constraint.
    pub fn is_feasible(&self, violations: &[ConstraintViolation]) -> bool {
        !violations.iter().any(|v| v.kind == ViolationKind::Land)
    }

    /// Attempt to move land-violating interior waypoints into open water.
    ///
    /// For each land violation, tries displacements of `{0.1, 0.2, 0.5,
    /// 1.0}` degrees in eight compass directions and accepts the first
    /// non-land result. Repeats up to 10 passes. Origin/destination are
    /// never displaced; if repair fails the route is returned unchanged
    /// (and will remain penalized).
    pub fn repair(&self, route: &Route, ocean: &dyn OceanQuery, t: f64) -> Route {
        const DISPLACEMENTS_DEG: [f64; 4] = [0.1, 0.2, 0.5, 1.0];
        const DIRECTIONS: [(f64, f64); 8] = [
            (1.0, 0.0),
            (-1.0, 0.0),
            (0.0, 1.0),
            (0.0, -1.0),
            (1.0, 1.0),
            (-1.0, -1.0),
            (1.0, -1.0),
            (-1.0, 1.0),
        ];
        const MAX_PASSES: u32 = 10;

        let speeds = SpeedProfile::new(vec![self.min_speed_kt; route.len().saturating_sub(1)]);
        let mut repaired = route.clone();
        let last = repaired.len() - 1;

        for _ in 0..MAX_PASSES {
            let violations = self.check_route(&repaired, &speeds, ocean, t, None, None);
            let land_indices: Vec<usize> = violations
                .iter()
                .filter(|v| v.kind == ViolationKind::Land)
                .filter_map(|v| v.waypoint_index)
                .filter(|&idx| idx != 0 && idx != last)
                .collect();

            if land_indices.is_empty() {
                break;
            }

            for idx in land_indices {
                let wp = repaired.waypoints()[idx];
                let mut fixed = None;
                'search: for &delta in &DISPLACEMENTS_DEG {
                    for &(dlat, dlon) in &DIRECTIONS {
                        let candidate = Waypoint {
                            lat: wp.lat + delta * dlat,
                            lon: wp.lon + delta * dlon,
                        };
                        if !ocean.is_land(candidate.lat, candidate.lon).unwrap_or(true) {
                            fixed = Some(candidate);
                            break 'search;
                        }
                    }
                }
                if let Some(candidate) = fixed {
                    repaired.waypoints_mut()[idx] = candidate;
                }
            }
        }

        repaired
    }

    /// Inject auxiliary waypoints so no leg exceeds `resolution_nm`,
    /// by linear (not great-circle) interpolation in lat/lon space.
    pub fn interpolate(&self, route: &Route, resolution_nm: f64) -> Route {
        if route.len() < 2 {
            return route.clone();
        }

        let mut out = vec![route.origin()];
        for (a, b) in route.legs() {
            let distance = geo::haversine_nm(a.lat, a.lon, b.lat, b.lon);
            let n_segments = ((distance / resolution_nm).ceil() as usize).max(1);
            for j in 1..n_segments {
                let t = j as f64 / n_segments as f64;
                let (lat, lon) = geo::lerp(a.lat, a.lon, b.lat, b.lon, t);
                out.push(Waypoint { lat, lon });
            }
            out.push(b);
        }

        Route::new(out).expect("interpolation preserves at least the original endpoints")
    }
}
