//! Geodesy primitives: great-circle distance, heading, and current projection.
//!
//! All formulas operate in degrees for coordinates and nautical miles for
//! distance, matching the conventions used throughout the rest of the crate.

/// Mean Earth radius in nautical miles, used for all Haversine calculations.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Conversion factor from meters/second to knots.
pub const MPS_TO_KNOTS: f64 = 1.944;

/// Great-circle distance between two points in nautical miles.
pub fn haversine_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_NM * c
}

/// Initial heading from `(lat1, lon1)` to `(lat2, lon2)`, in `[0, 360)` degrees.
pub fn initial_heading_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let x = dlon.sin() * lat2_rad.cos();
    let y = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * dlon.cos();

    let heading = x.atan2(y).to_degrees();
    (heading + 360.0) % 360.0
}

/// Linear (non-great-circle) interpolation between two points at fraction `t ∈ [0, 1]`.
pub fn lerp(lat1: f64, lon1: f64, lat2: f64, lon2: f64, t: f64) -> (f64, f64) {
    (lat1 + t * (lat2 - lat1), lon1 + t * (lon2 - lon1))
}

/// Speed-over-ground adjustment from an ocean current vector along a heading.
///
/// `current_u`/`current_v` are east/north components in m/s; the result is in
/// knots, positive when the current favors travel along `heading_deg`.
pub fn current_effect_kt(current_u: f64, current_v: f64, heading_deg: f64) -> f64 {
    let u_kt = current_u * MPS_TO_KNOTS;
    let v_kt = current_v * MPS_TO_KNOTS;

    let heading_rad = heading_deg.to_radians();
    let dir_east = heading_rad.sin();
    let dir_north = heading_rad.cos();

    u_kt * dir_east + v_kt * dir_north
}
