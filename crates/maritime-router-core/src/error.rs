use thiserror::Error;

/// Convenient result alias for the maritime router core.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A job configuration value was outside its allowed domain.
    #[error("invalid configuration for field '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// A waypoint's coordinates fell outside valid latitude/longitude ranges.
    #[error("invalid waypoint ({lat}, {lon}): {reason}")]
    InvalidWaypoint {
        lat: f64,
        lon: f64,
        reason: String,
    },

    /// A route was constructed with fewer than two waypoints.
    #[error("route must contain at least 2 waypoints, got {count}")]
    RouteTooShort { count: usize },

    /// A speed profile's length did not match `route.len() - 1`.
    #[error("speed profile length {speeds} does not match route legs {legs}")]
    SpeedProfileMismatch { speeds: usize, legs: usize },
}
