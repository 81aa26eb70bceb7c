//! Per-vehicle consistency failures.
//!
//! These never arise from valid inputs; they indicate a scheduler bug or a
//! state edited from outside.  The scheduler logs them and resets the
//! vehicle rather than stalling the fleet.

use df_core::VehicleId;
use thiserror::Error;

use crate::Phase;

#[derive(Debug, Error, PartialEq)]
pub enum InvariantViolation {
    #[error("{vehicle}: manifest weighs {manifest_weight} kg but current load is {current_load} kg")]
    LoadMismatch {
        vehicle:         VehicleId,
        manifest_weight: f64,
        current_load:    f64,
    },

    #[error("{vehicle}: load {load} kg exceeds capacity {capacity} kg")]
    OverCapacity {
        vehicle:  VehicleId,
        load:     f64,
        capacity: f64,
    },

    #[error("{vehicle}: manifest holds {size} requests, limit is {max}")]
    BatchTooLarge {
        vehicle: VehicleId,
        size:    usize,
        max:     usize,
    },

    #[error("{vehicle}: battery {battery} outside [0, 100]")]
    BatteryOutOfRange {
        vehicle: VehicleId,
        battery: f64,
    },

    #[error("{vehicle}: phase {phase} with {manifest} requests on board")]
    ManifestPhaseMismatch {
        vehicle:  VehicleId,
        phase:    Phase,
        manifest: usize,
    },
}

impl InvariantViolation {
    pub fn vehicle(&self) -> VehicleId {
        match self {
            InvariantViolation::LoadMismatch { vehicle, .. }
            | InvariantViolation::OverCapacity { vehicle, .. }
            | InvariantViolation::BatchTooLarge { vehicle, .. }
            | InvariantViolation::BatteryOutOfRange { vehicle, .. }
            | InvariantViolation::ManifestPhaseMismatch { vehicle, .. } => *vehicle,
        }
    }
}
