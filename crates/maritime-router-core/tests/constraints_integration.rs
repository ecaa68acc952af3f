mod common;

use common::LandDiscOcean;
use maritime_router_core::constraints::ConstraintHandler;
use maritime_router_core::{Route, SpeedProfile, Waypoint};

#[test]
fn repair_then_interpolate_produces_a_feasible_dense_route() {
    let ocean = LandDiscOcean { center_lat: 0.0, center_lon: 10.0, radius_deg: 2.0 };
    let handler = ConstraintHandler::new(8.0, 24.0);

    let route = Route::new(vec![
        Waypoint::new(0.0, 0.0).unwrap(),
        Waypoint::new(0.0, 10.0).unwrap(),
        Waypoint::new(0.0, 20.0).unwrap(),
    ])
    .unwrap();

    let repaired = handler.repair(&route, &ocean, 0.0);
    let speeds = SpeedProfile::new(vec![12.0; repaired.len() - 1]);
    let violations = handler.check_route(&repaired, &speeds, &ocean, 0.0, None, None);
    assert!(handler.is_feasible(&violations));

    let dense = handler.interpolate(&repaired, 50.0);
    assert_eq!(dense.origin(), route.origin());
    assert_eq!(dense.destination(), route.destination());
    for (a, b) in dense.legs() {
        assert!(maritime_router_core::geo::haversine_nm(a.lat, a.lon, b.lat, b.lon) <= 50.0 + 1e-6);
    }

    let dense_speeds = SpeedProfile::new(vec![12.0; dense.len() - 1]);
    let dense_violations = handler.check_route(&dense, &dense_speeds, &ocean, 0.0, None, None);
    assert!(handler.is_feasible(&dense_violations));
}

#[test]
fn fuel_and_time_budgets_are_both_enforced() {
    let ocean = LandDiscOcean { center_lat: 90.0, center_lon: 0.0, radius_deg: 0.1 };
    let mut handler = ConstraintHandler::new(8.0, 24.0);
    handler.max_fuel_tonnes = Some(10.0);
    handler.max_time_hours = Some(5.0);

    let route = Route::new(vec![Waypoint::new(0.0, 0.0).unwrap(), Waypoint::new(0.0, 10.0).unwrap()]).unwrap();
    let speeds = SpeedProfile::new(vec![12.0]);

    let violations = handler.check_route(&route, &speeds, &ocean, 0.0, Some(20.0), Some(10.0));
    let kinds: Vec<_> = violations.iter().map(|v| v.kind).collect();
    assert!(kinds.contains(&maritime_router_core::constraints::ViolationKind::FuelBudget));
    assert!(kinds.contains(&maritime_router_core::constraints::ViolationKind::TimeBudget));
}
