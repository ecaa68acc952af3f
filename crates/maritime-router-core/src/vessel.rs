//! Vessel model contract and a reference admiralty-relation implementation.

/// Power/fuel characteristics of the vessel performing a voyage.
///
/// Implementations should follow the admiralty relation `P ∝ V³` for
/// `fuel_consumption`; CO₂ emissions are then derived elsewhere as
/// `fuel × 3.114` (see [`crate::objectives`]).
pub trait VesselModel {
    /// Cruising speed in knots used as the baseline for swarm/population
    /// initialization.
    fn service_speed(&self) -> f64;

    /// Minimum operable speed in knots.
    fn min_speed(&self) -> f64;

    /// Maximum operable speed in knots.
    fn max_speed(&self) -> f64;

    /// Fuel burned, in tonnes, to sustain `speed_kt` for `duration_h` hours.
    /// Monotone increasing in both arguments.
    fn fuel_consumption(&self, speed_kt: f64, duration_h: f64) -> f64;
}

/// A vessel whose fuel consumption follows the admiralty power relation
/// `P ∝ Δ^(2/3) V³`, calibrated against a design speed/power point and a
/// specific fuel consumption rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdmiraltyVessel {
    pub service_speed_kt: f64,
    pub min_speed_kt: f64,
    pub max_speed_kt: f64,
    /// Design speed in knots, the calibration point for the power curve.
    pub design_speed_kt: f64,
    /// Engine power in kW at `design_speed_kt`.
    pub design_power_kw: f64,
    /// Specific fuel consumption in g/kWh.
    pub sfc_g_per_kwh: f64,
}

impl AdmiraltyVessel {
    fn power_kw_at(&self, speed_kt: f64) -> f64 {
        if self.design_speed_kt <= 0.0 {
            return 0.0;
        }
        let power_coef = self.design_power_kw / self.design_speed_kt.powi(3);
        power_coef * speed_kt.max(0.0).powi(3)
    }

    fn fuel_rate_tonnes_per_day(&self, speed_kt: f64) -> f64 {
        let power_kw = self.power_kw_at(speed_kt);
        power_kw * self.sfc_g_per_kwh * 24.0 / 1_000_000.0
    }
}

impl VesselModel for AdmiraltyVessel {
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
        self.fuel_rate_tonnes_per_day(speed_kt) * duration_h / 24.0
    }
}
