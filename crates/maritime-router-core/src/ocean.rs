//! Ocean environment query contract.
//!
//! The optimizer depends only on this trait, never on a concrete data
//! source; real gridded-data or analytic providers are injected by the
//! caller at job-construction time. All queries are expected to be
//! referentially transparent within a single optimization run — the
//! environment is frozen at job start.

use std::fmt;

/// Error raised by an [`OceanQuery`] implementation. Unlike the crate's
/// `Error` type, this never aborts an optimization run: the evaluator
/// substitutes neutral defaults and keeps going (see [`crate::objectives`]).
#[derive(Debug, Clone, PartialEq)]
pub struct OceanError(pub String);

impl fmt::Display for OceanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ocean query failed: {}", self.0)
    }
}

impl std::error::Error for OceanError {}

pub type OceanResult<T> = std::result::Result<T, OceanError>;

/// Unix epoch seconds. Used for the time-varying queries below.
pub type Timestamp = f64;

/// Spatial/temporal lookups an optimization run needs from the surrounding
/// ocean environment.
pub trait OceanQuery {
    /// True if the coordinate is on land.
    fn is_land(&self, lat: f64, lon: f64) -> OceanResult<bool>;

    /// Water depth in meters, positive down. Zero on land.
    fn depth(&self, lat: f64, lon: f64) -> OceanResult<f64>;

    /// Significant wave height in meters, non-negative.
    fn wave_height(&self, lat: f64, lon: f64, t: Timestamp) -> OceanResult<f64>;

    /// Ocean current as `(u_east_m_s, v_north_m_s)`.
    fn current_vector(&self, lat: f64, lon: f64, t: Timestamp) -> OceanResult<(f64, f64)>;

    /// Storm risk in `[0, 1]`.
    fn storm_risk(&self, lat: f64, lon: f64, t: Timestamp) -> OceanResult<f64>;

    /// Piracy risk in `[0, 1]`. Time-independent.
    fn piracy_risk(&self, lat: f64, lon: f64) -> OceanResult<f64>;

    /// Combined hull/weather resistance factor, `1.0` = calm water.
    ///
    /// Not part of the core six-function contract; real providers with a
    /// genuine resistance model should override this. The default derives
    /// resistance from wave height alone, matching the reference
    /// environment's own approximation.
    fn resistance(&self, lat: f64, lon: f64, t: Timestamp) -> OceanResult<f64> {
        let wave = self.wave_height(lat, lon, t)?;
        Ok(1.0 + 0.1 * wave)
    }
}
