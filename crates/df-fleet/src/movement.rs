//! Per-tick movement of a flying vehicle.
//!
//! # Movement model (exponential approach)
//!
//! Each moving tick the vehicle closes a fixed fraction of the remaining
//! lat/lng gap to its target and burns a fixed amount of battery:
//!
//! ```text
//! position += approach_factor * (target - position)
//! battery   = max(0, battery - drain_per_tick)
//! arrived   = haversine(position, target) < arrival_radius_m
//! ```
//!
//! The formula alone never reaches the target exactly; the arrival radius is
//! what ends a leg.

use df_core::{FleetConfig, GeoPoint};

use crate::Vehicle;

/// The movement constants, extracted from [`FleetConfig`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovementParams {
    pub approach_factor:  f64,
    pub drain_per_tick:   f64,
    pub arrival_radius_m: f64,
}

impl From<&FleetConfig> for MovementParams {
    fn from(config: &FleetConfig) -> Self {
        Self {
            approach_factor:  config.approach_factor,
            drain_per_tick:   config.battery_drain_per_tick,
            arrival_radius_m: config.arrival_radius_m,
        }
    }
}

/// Result of one movement step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    /// Still outside the arrival radius.
    EnRoute { remaining_m: f64 },
    /// Inside the arrival radius of the target.
    Arrived,
    /// Not in a moving phase, or no target set.
    NoTarget,
}

/// Move `vehicle` one step toward its current target.
///
/// Phase changes are the caller's job; this only updates position and
/// battery.
pub fn advance(vehicle: &mut Vehicle, params: &MovementParams) -> MoveOutcome {
    let Some(target) = vehicle.target() else {
        return MoveOutcome::NoTarget;
    };

    vehicle.position = vehicle.position.step_toward(target, params.approach_factor);
    vehicle.battery = (vehicle.battery - params.drain_per_tick).max(0.0);

    if vehicle.position.within(target, params.arrival_radius_m) {
        MoveOutcome::Arrived
    } else {
        MoveOutcome::EnRoute { remaining_m: vehicle.position.distance_m(target) }
    }
}

/// Estimated seconds until a moving vehicle reaches its target at
/// `speed_mps`, rounded up.  `None` when it is not moving.
pub fn eta_secs(vehicle: &Vehicle, speed_mps: f64) -> Option<u64> {
    let target: GeoPoint = vehicle.target()?;
    let distance = vehicle.position.distance_m(target);
    Some((distance / speed_mps).ceil() as u64)
}
