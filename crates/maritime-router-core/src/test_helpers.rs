//! Synthetic ocean/vessel fixtures shared by this crate's unit tests.
#![allow(dead_code)]

use crate::ocean::{OceanQuery, OceanResult, Timestamp};
use crate::vessel::VesselModel;

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

/// A flat ocean with a circular land mass, for repair/constraint tests.
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

/// A vessel whose fuel consumption is simply proportional to speed cubed
/// times duration, for tests that don't need the full admiralty curve.
#[derive(Debug, Clone, Copy)]
pub struct TestVessel {
    pub service_speed_kt: f64,
    pub min_speed_kt: f64,
    pub max_speed_kt: f64,
}

impl Default for TestVessel {
    fn default() -> Self {
        Self {
            service_speed_kt: 10.0,
            min_speed_kt: 5.0,
            max_speed_kt: 25.0,
        }
    }
}

impl VesselModel for TestVessel {
    fn service_speed(&self) -> f64 {
        self.service_speed_kt
    }

    fn min_speed(&self) -> f64 {
        self.min_speed_kt
    }

    fn max_speed(&self) -> f64 {
        self.max_speed_kt
    }

    fn fuel_consumption(&self, speed_kt: f64, duration_h: f64) -> f64 {
        if speed_kt <= 0.0 || duration_h <= 0.0 {
            return 0.0;
        }
        0.01 * speed_kt.powi(3) * duration_h / 24.0
    }
}
