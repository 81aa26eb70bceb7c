//! Unit tests for df-fleet.

#[cfg(test)]
fn home() -> df_core::GeoPoint {
    df_core::GeoPoint::new(-19.9208, -43.9378)
}

#[cfg(test)]
fn parcel(n: u128, weight: f64, dest: df_core::GeoPoint) -> df_queue::Request {
    use df_core::{RequestId, Tick};
    df_queue::Request {
        id:            RequestId::from_u128(n),
        address:       format!("Rua {n}, s/n"),
        neighbourhood: None,
        destination:   dest,
        weight,
        priority:      df_queue::Priority::Medium,
        status:        df_queue::RequestStatus::Waiting,
        created_at:    Tick(0),
    }
}

#[cfg(test)]
mod vehicle {
    use df_core::{GeoPoint, VehicleId};
    use df_queue::RequestStatus;

    use super::{home, parcel};
    use crate::{BatteryTier, InvariantViolation, Phase, Vehicle};

    fn drone() -> Vehicle {
        Vehicle::new(VehicleId(0), "4562256", 12.0, home())
    }

    #[test]
    fn new_vehicle_is_idle_and_full() {
        let v = drone();
        assert_eq!(v.phase, Phase::Idle);
        assert_eq!(v.battery, 100.0);
        assert_eq!(v.remaining_capacity(), 12.0);
        assert_eq!(v.position, home());
        assert!(v.check_invariants(3).is_ok());
    }

    #[test]
    fn battery_tiers() {
        let mut v = drone();
        v.battery = 50.5;
        assert_eq!(v.battery_tier(), BatteryTier::High);
        v.battery = 50.0;
        assert_eq!(v.battery_tier(), BatteryTier::Medium);
        v.battery = 25.0;
        assert_eq!(v.battery_tier(), BatteryTier::Low);
        v.battery = 99.9;
        assert_eq!(v.battery_percent(), 99);
    }

    #[test]
    fn dispatchable_requires_idle_and_charge_above_threshold() {
        let mut v = drone();
        assert!(v.is_dispatchable(20.0));
        v.battery = 20.0;
        assert!(!v.is_dispatchable(20.0));
        v.battery = 80.0;
        v.phase = Phase::Returning;
        assert!(!v.is_dispatchable(20.0));
    }

    #[test]
    fn assign_batch_sets_load_destination_and_staging() {
        let mut v = drone();
        let d1 = GeoPoint::new(-19.93, -43.94);
        let d2 = GeoPoint::new(-19.91, -43.95);
        v.assign_batch(vec![parcel(1, 4.0, d1), parcel(2, 5.5, d2)]);
        assert_eq!(v.phase, Phase::Staging);
        assert_eq!(v.current_load, 9.5);
        assert_eq!(v.destination, Some(d1));
        assert!(v.manifest.iter().all(|r| r.status == RequestStatus::Staging));
        assert!(v.check_invariants(3).is_ok());
    }

    #[test]
    fn phase_timer_counts_down_lazily_and_clears() {
        let mut v = drone();
        assert!(v.phase_timer.is_none());
        assert!(!v.tick_phase_timer(3));
        assert_eq!(v.phase_timer, Some(2));
        assert!(!v.tick_phase_timer(3));
        assert!(v.tick_phase_timer(3));
        assert!(v.phase_timer.is_none());
    }

    #[test]
    fn enter_phase_restarts_timer() {
        let mut v = drone();
        v.tick_phase_timer(5);
        v.enter_phase(Phase::Loading);
        assert!(v.phase_timer.is_none());
    }

    #[test]
    fn unload_front_keeps_load_in_sync() {
        let mut v = drone();
        let d = GeoPoint::new(-19.93, -43.94);
        v.assign_batch(vec![parcel(1, 4.0, d), parcel(2, 4.0, d), parcel(3, 4.0, d)]);
        let first = v.unload_front().unwrap();
        assert_eq!(first.id, df_core::RequestId::from_u128(1));
        assert!((v.current_load - 8.0).abs() < 1e-9);
        assert!((v.manifest_weight() - v.current_load).abs() < 1e-9);
    }

    #[test]
    fn continue_or_return() {
        let mut v = drone();
        let d1 = GeoPoint::new(-19.93, -43.94);
        let d2 = GeoPoint::new(-19.91, -43.95);
        v.assign_batch(vec![parcel(1, 1.0, d1), parcel(2, 1.0, d2)]);

        v.unload_front();
        assert!(!v.continue_or_return());
        assert_eq!(v.phase, Phase::InTransit);
        assert_eq!(v.destination, Some(d2));

        v.unload_front();
        assert!(v.continue_or_return());
        assert_eq!(v.phase, Phase::Returning);
        assert_eq!(v.destination, Some(home()));
        assert_eq!(v.current_load, 0.0);
        assert!(v.check_invariants(3).is_ok());
    }

    #[test]
    fn dock_recharges() {
        let mut v = drone();
        v.phase = Phase::Returning;
        v.battery = 41.5;
        v.dock();
        assert_eq!(v.phase, Phase::Idle);
        assert_eq!(v.battery, 100.0);
        assert!(v.destination.is_none());
    }

    #[test]
    fn load_mismatch_detected() {
        let mut v = drone();
        v.assign_batch(vec![parcel(1, 4.0, home())]);
        v.current_load = 7.0;
        assert!(matches!(
            v.check_invariants(3),
            Err(InvariantViolation::LoadMismatch { .. })
        ));
    }

    #[test]
    fn empty_manifest_in_transit_detected() {
        let mut v = drone();
        v.phase = Phase::InTransit;
        let err = v.check_invariants(3).unwrap_err();
        assert_eq!(err.vehicle(), VehicleId(0));
        assert!(matches!(err, InvariantViolation::ManifestPhaseMismatch { .. }));
    }

    #[test]
    fn force_idle_releases_manifest() {
        let mut v = drone();
        v.assign_batch(vec![parcel(1, 4.0, home()), parcel(2, 3.0, home())]);
        v.position = GeoPoint::new(-19.95, -43.90);
        let released = v.force_idle();
        assert_eq!(released.len(), 2);
        assert_eq!(v.phase, Phase::Idle);
        assert_eq!(v.position, home());
        assert_eq!(v.current_load, 0.0);
        assert!(v.check_invariants(3).is_ok());
    }
}

#[cfg(test)]
mod movement {
    use df_core::{FleetConfig, GeoPoint, VehicleId};

    use super::{home, parcel};
    use crate::{MoveOutcome, MovementParams, Phase, Vehicle, advance, eta_secs};

    fn params() -> MovementParams {
        MovementParams::from(&FleetConfig::default())
    }

    fn flying(dest: GeoPoint) -> Vehicle {
        let mut v = Vehicle::new(VehicleId(0), "A", 12.0, home());
        v.assign_batch(vec![parcel(1, 1.0, dest)]);
        v.enter_phase(Phase::InTransit);
        v
    }

    #[test]
    fn idle_vehicle_does_not_move() {
        let mut v = Vehicle::new(VehicleId(0), "A", 12.0, home());
        assert_eq!(advance(&mut v, &params()), MoveOutcome::NoTarget);
        assert_eq!(v.battery, 100.0);
        assert_eq!(eta_secs(&v, 100.0), None);
    }

    #[test]
    fn step_moves_ten_percent_and_drains() {
        let dest = GeoPoint::new(-19.9308, -43.9278);
        let mut v = flying(dest);
        let outcome = advance(&mut v, &params());
        assert!(matches!(outcome, MoveOutcome::EnRoute { .. }));
        assert!((v.position.lat - (-19.9218)).abs() < 1e-9);
        assert!((v.position.lng - (-43.9368)).abs() < 1e-9);
        assert_eq!(v.battery, 99.5);
    }

    #[test]
    fn battery_floors_at_zero() {
        let mut v = flying(GeoPoint::new(-19.99, -43.99));
        v.battery = 0.2;
        advance(&mut v, &params());
        assert_eq!(v.battery, 0.0);
    }

    #[test]
    fn eventually_arrives() {
        let dest = GeoPoint::new(-19.9308, -43.9278);
        let mut v = flying(dest);
        let mut ticks = 0;
        while advance(&mut v, &params()) != MoveOutcome::Arrived {
            ticks += 1;
            assert!(ticks < 1_000, "never arrived");
        }
        assert!(v.position.distance_m(dest) < 50.0);
    }

    #[test]
    fn eta_rounds_up() {
        let dest = GeoPoint::new(-19.9308, -43.9378);
        let v = flying(dest);
        let d = v.position.distance_m(dest);
        assert_eq!(eta_secs(&v, 100.0), Some((d / 100.0).ceil() as u64));
    }
}

#[cfg(test)]
mod fleet {
    use df_core::{FleetConfig, VehicleId};

    use super::home;
    use crate::{Fleet, FleetBuilder, Phase};

    #[test]
    fn from_config_builds_default_fleet() {
        let fleet = Fleet::from_config(&FleetConfig::default());
        assert_eq!(fleet.len(), 5);
        assert_eq!(fleet.get(VehicleId(0)).unwrap().call_sign, "4562256");
        assert_eq!(fleet.get(VehicleId(4)).unwrap().call_sign, "7642304");
        assert!(fleet.get(VehicleId(5)).is_none());
    }

    #[test]
    fn dispatchable_in_fleet_order() {
        let mut fleet = FleetBuilder::new(12.0, home()).vehicles(["a", "b", "c"]).build();
        fleet.get_mut(VehicleId(1)).unwrap().phase = Phase::Loading;
        fleet.get_mut(VehicleId(2)).unwrap().battery = 15.0;
        assert_eq!(fleet.dispatchable(20.0), vec![VehicleId(0)]);
    }

    #[test]
    fn busiest_prefers_earliest_on_tie() {
        let mut fleet = FleetBuilder::new(12.0, home()).vehicles(["a", "b", "c"]).build();
        assert_eq!(fleet.busiest(), None);
        fleet.get_mut(VehicleId(1)).unwrap().deliveries = 2;
        fleet.get_mut(VehicleId(2)).unwrap().deliveries = 2;
        assert_eq!(fleet.busiest(), Some(VehicleId(1)));
        fleet.get_mut(VehicleId(2)).unwrap().deliveries = 3;
        assert_eq!(fleet.busiest(), Some(VehicleId(2)));
    }
}
