//! Route representation: waypoints, speed profiles, and search bounds.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A geographic point in degrees.
///
/// `lat` is constrained to `[-90, 90]`, `lon` to `(-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidWaypoint {
                lat,
                lon,
                reason: "latitude must lie in [-90, 90]".to_string(),
            });
        }
        if !(-180.0..=180.0).contains(&lon) || lon == -180.0 {
            return Err(Error::InvalidWaypoint {
                lat,
                lon,
                reason: "longitude must lie in (-180, 180]".to_string(),
            });
        }
        Ok(Self { lat, lon })
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }

    fn clamp_to(self, bounds: &SearchBounds) -> Self {
        Self {
            lat: self.lat.clamp(bounds.lat_min, bounds.lat_max),
            lon: self.lon.clamp(bounds.lon_min, bounds.lon_max),
        }
    }
}

/// An ordered sequence of `N + 2` waypoints: origin, `N` interior waypoints
/// subject to optimization, and destination. Endpoints are pinned and never
/// displaced by mutation operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    waypoints: Vec<Waypoint>,
}

impl Route {
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self> {
        if waypoints.len() < 2 {
            return Err(Error::RouteTooShort {
                count: waypoints.len(),
            });
        }
        Ok(Self { waypoints })
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn origin(&self) -> Waypoint {
        self.waypoints[0]
    }

    pub fn destination(&self) -> Waypoint {
        *self.waypoints.last().expect("route has at least 2 waypoints")
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn waypoints_mut(&mut self) -> &mut [Waypoint] {
        &mut self.waypoints
    }

    /// Indices `1..len-1`, the waypoints subject to optimization.
    pub fn interior(&self) -> &[Waypoint] {
        &self.waypoints[1..self.waypoints.len() - 1]
    }

    pub fn interior_mut(&mut self) -> &mut [Waypoint] {
        let last = self.waypoints.len() - 1;
        &mut self.waypoints[1..last]
    }

    /// Clamp every interior waypoint into `bounds`, then re-pin the endpoints.
    /// Endpoints are restored bit-exactly, satisfying the endpoint-pinning
    /// invariant regardless of what clamping did to them.
    pub fn clamp_interior_to(&mut self, bounds: &SearchBounds) {
        let origin = self.origin();
        let destination = self.destination();
        for wp in self.interior_mut() {
            *wp = wp.clamp_to(bounds);
        }
        let last = self.waypoints.len() - 1;
        self.waypoints[0] = origin;
        self.waypoints[last] = destination;
    }

    pub fn legs(&self) -> impl Iterator<Item = (Waypoint, Waypoint)> + '_ {
        self.waypoints.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Total length if traversed leg by leg along great circles.
    pub fn great_circle_length_nm(&self) -> f64 {
        self.legs()
            .map(|(a, b)| crate::geo::haversine_nm(a.lat, a.lon, b.lat, b.lon))
            .sum()
    }
}

/// Speeds in knots, one per leg of a [`Route`] (`route.len() - 1` entries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedProfile {
    speeds: Vec<f64>,
}

impl SpeedProfile {
    pub fn new(speeds: Vec<f64>) -> Self {
        Self { speeds }
    }

    pub fn for_route(route: &Route, speeds: Vec<f64>) -> Result<Self> {
        let expected = route.len() - 1;
        if speeds.len() != expected {
            return Err(Error::SpeedProfileMismatch {
                speeds: speeds.len(),
                legs: expected,
            });
        }
        Ok(Self { speeds })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.speeds
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.speeds
    }

    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }

    pub fn clamp_to(&mut self, min_speed: f64, max_speed: f64) {
        for s in &mut self.speeds {
            *s = s.clamp(min_speed, max_speed);
        }
    }
}

/// Rectangular lat/lon box that interior waypoints are clamped into after
/// every optimizer update. Padding of 10 degrees on every side is fixed by
/// the algorithm description; longitude wraparound is out of scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl SearchBounds {
    pub const PADDING_DEG: f64 = 10.0;

    pub fn around(origin: Waypoint, destination: Waypoint) -> Self {
        Self {
            lat_min: origin.lat.min(destination.lat) - Self::PADDING_DEG,
            lat_max: origin.lat.max(destination.lat) + Self::PADDING_DEG,
            lon_min: origin.lon.min(destination.lon) - Self::PADDING_DEG,
            lon_max: origin.lon.max(destination.lon) + Self::PADDING_DEG,
        }
    }

    pub fn contains(&self, wp: Waypoint) -> bool {
        (self.lat_min..=self.lat_max).contains(&wp.lat)
            && (self.lon_min..=self.lon_max).contains(&wp.lon)
    }

    /// The "opposition image" of a point: its reflection through the bounds'
    /// center, clamped back into the box.
    pub fn oppose(&self, wp: Waypoint) -> Waypoint {
        Waypoint {
            lat: (self.lat_min + self.lat_max - wp.lat).clamp(self.lat_min, self.lat_max),
            lon: (self.lon_min + self.lon_max - wp.lon).clamp(self.lon_min, self.lon_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wp(lat: f64, lon: f64) -> Waypoint {
        Waypoint::new(lat, lon).unwrap()
    }

    #[test]
    fn waypoint_rejects_out_of_range_latitude() {
        assert!(Waypoint::new(91.0, 0.0).is_err());
        assert!(Waypoint::new(-91.0, 0.0).is_err());
    }

    #[test]
    fn waypoint_rejects_out_of_range_longitude() {
        assert!(Waypoint::new(0.0, -180.0).is_err());
        assert!(Waypoint::new(0.0, 181.0).is_err());
        assert!(Waypoint::new(0.0, 180.0).is_ok());
    }

    #[test]
    fn route_requires_at_least_two_waypoints() {
        assert!(Route::new(vec![wp(0.0, 0.0)]).is_err());
        assert!(Route::new(vec![wp(0.0, 0.0), wp(0.0, 1.0)]).is_ok());
    }

    #[test]
    fn clamp_interior_repins_endpoints() {
        let origin = wp(0.0, 0.0);
        let destination = wp(0.0, 20.0);
        let mut route = Route::new(vec![origin, wp(50.0, 50.0), destination]).unwrap();
        let bounds = SearchBounds::around(origin, destination);
        route.clamp_interior_to(&bounds);
        assert_eq!(route.origin(), origin);
        assert_eq!(route.destination(), destination);
        assert!(bounds.contains(route.interior()[0]));
    }

    #[test]
    fn opposition_image_reflects_through_center() {
        let bounds = SearchBounds {
            lat_min: -10.0,
            lat_max: 10.0,
            lon_min: -10.0,
            lon_max: 10.0,
        };
        let opp = bounds.oppose(wp(5.0, -5.0));
        assert!((opp.lat - (-5.0)).abs() < 1e-9);
        assert!((opp.lon - 5.0).abs() < 1e-9);
    }

    #[test]
    fn speed_profile_length_must_match_legs() {
        let route = Route::new(vec![wp(0.0, 0.0), wp(0.0, 1.0), wp(0.0, 2.0)]).unwrap();
        assert!(SpeedProfile::for_route(&route, vec![10.0]).is_err());
        assert!(SpeedProfile::for_route(&route, vec![10.0, 10.0]).is_ok());
    }
}
