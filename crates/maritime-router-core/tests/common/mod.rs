//! Synthetic fixtures shared across integration test files.
//!
//! Duplicated (not reused) from `src/test_helpers.rs`, since that module is
//! `#[cfg(test)]`-gated and therefore invisible to these separately
//! compiled integration test binaries. Named `mod.rs` so Cargo does not
//! treat this file as its own test target.
#![allow(dead_code)]

use maritime_router_core::ocean::{OceanQuery, OceanResult, Timestamp};
use maritime_router_core::vessel::{AdmiraltyVessel, VesselModel};

/// Uniform deep water, no storms, no piracy, flat sea state.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatOcean;

impl OceanQuery for FlatOcean {
    fn is_land(&self, _lat: f64, _lon: f64) -> OceanResult<bool> {
        Ok(false)
    }

    fn depth(&self, _lat: f64, _lon: f64) -> OceanResult<f64> {
        Ok(4000.0)
    }

    fn wave_height(&self, _lat: f64, _lon: f64, _t: Timestamp) -> OceanResult<f64> {
        Ok(0.5)
    }

    fn current_vector(&self, _lat: f64, _lon: f64, _t: Timestamp) -> OceanResult<(f64, f64)> {
        Ok((0.0, 0.0))
    }

    fn storm_risk(&self, _lat: f64, _lon: f64, _t: Timestamp) -> OceanResult<f64> {
        Ok(0.0)
    }

    fn piracy_risk(&self, _lat: f64, _lon: f64) -> OceanResult<f64> {
        Ok(0.0)
    }
}

/// A flat ocean with a circular land mass centered at `(center_lat, center_lon)`.
pub struct LandDiscOcean {
    pub center_lat: f64,
    pub center_lon: f64,
    pub radius_deg: f64,
}

impl OceanQuery for LandDiscOcean {
    fn is_land(&self, lat: f64, lon: f64) -> OceanResult<bool> {
        let d = ((lat - self.center_lat).powi(2) + (lon - self.center_lon).powi(2)).sqrt();
        Ok(d < self.radius_deg)
    }

    fn depth(&self, lat: f64, lon: f64) -> OceanResult<f64> {
        if self.is_land(lat, lon)? {
            Ok(0.0)
        } else {
            Ok(3000.0)
        }
    }

    fn wave_height(&self, _lat: f64, _lon: f64, _t: Timestamp) -> OceanResult<f64> {
        Ok(0.5)
    }

    fn current_vector(&self, _lat: f64, _lon: f64, _t: Timestamp) -> OceanResult<(f64, f64)> {
        Ok((0.0, 0.0))
    }

    fn storm_risk(&self, _lat: f64, _lon: f64, _t: Timestamp) -> OceanResult<f64> {
        Ok(0.0)
    }

    fn piracy_risk(&self, _lat: f64, _lon: f64) -> OceanResult<f64> {
        Ok(0.0)
    }
}

/// A flat, land-free ocean with a circular storm cell: risk is 1.0 at the
/// center and falls off linearly to 0.0 at `radius_deg`.
pub struct StormZoneOcean {
    pub center_lat: f64,
    pub center_lon: f64,
    pub radius_deg: f64,
}

impl OceanQuery for StormZoneOcean {
    fn is_land(&self, _lat: f64, _lon: f64) -> OceanResult<bool> {
        Ok(false)
    }

    fn depth(&self, _lat: f64, _lon: f64) -> OceanResult<f64> {
        Ok(4000.0)
    }

    fn wave_height(&self, lat: f64, lon: f64, t: Timestamp) -> OceanResult<f64> {
        Ok(0.5 + 4.0 * self.storm_risk(lat, lon, t)?)
    }

    fn current_vector(&self, _lat: f64, _lon: f64, _t: Timestamp) -> OceanResult<(f64, f64)> {
        Ok((0.0, 0.0))
    }

    fn storm_risk(&self, lat: f64, lon: f64, _t: Timestamp) -> OceanResult<f64> {
        let d = ((lat - self.center_lat).powi(2) + (lon - self.center_lon).powi(2)).sqrt();
        Ok((1.0 - d / self.radius_deg).clamp(0.0, 1.0))
    }

    fn piracy_risk(&self, _lat: f64, _lon: f64) -> OceanResult<f64> {
        Ok(0.0)
    }
}

/// A representative container vessel for end-to-end tests.
pub fn reference_vessel() -> AdmiraltyVessel {
    AdmiraltyVessel {
        service_speed_kt: 18.0,
        min_speed_kt: 8.0,
        max_speed_kt: 24.0,
        design_speed_kt: 22.0,
        design_power_kw: 15_000.0,
        sfc_g_per_kwh: 180.0,
    }
}

pub fn assert_monotone_speed(vessel: &impl VesselModel) {
    assert!(vessel.min_speed() > 0.0);
    assert!(vessel.min_speed() < vessel.max_speed());
}
