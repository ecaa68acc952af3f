mod common;

use common::{reference_vessel, FlatOcean, StormZoneOcean};
use maritime_router_core::objectives::CO2_FACTOR;
use maritime_router_core::vessel::VesselModel;
use maritime_router_core::{Evaluator, Route, SpeedProfile, Waypoint};

#[test]
fn emissions_track_fuel_linearly_through_a_storm() {
    let vessel = reference_vessel();
    let ocean = StormZoneOcean { center_lat: 0.0, center_lon: 5.0, radius_deg: 2.0 };
    let evaluator = Evaluator::new(&vessel, &ocean, 0.0);

    let route = Route::new(vec![
        Waypoint::new(0.0, 0.0).unwrap(),
        Waypoint::new(0.0, 5.0).unwrap(),
        Waypoint::new(0.0, 10.0).unwrap(),
    ])
    .unwrap();
    let speeds = SpeedProfile::for_route(&route, vec![15.0, 15.0]).unwrap();

    let (obj, subs) = evaluator.evaluate(&route, &speeds);
    assert_eq!(subs.total(), 0);
    assert!((obj.emissions_t - obj.fuel_t * CO2_FACTOR).abs() < 1e-9);
    assert!(obj.risk > 0.0, "leg passing through the storm zone should carry risk");
}

#[test]
fn flat_ocean_route_carries_no_risk() {
    let vessel = reference_vessel();
    let ocean = FlatOcean::default();
    let evaluator = Evaluator::new(&vessel, &ocean, 0.0);

    let route = Route::new(vec![Waypoint::new(10.0, 10.0).unwrap(), Waypoint::new(10.0, 12.0).unwrap()]).unwrap();
    let speeds = SpeedProfile::for_route(&route, vec![vessel.service_speed()]).unwrap();

    let (obj, _) = evaluator.evaluate(&route, &speeds);
    assert_eq!(obj.risk, 0.0);
    assert!(obj.fuel_t > 0.0);
    assert!(obj.time_h > 0.0);
}
