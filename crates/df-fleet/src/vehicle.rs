//! A single drone's mutable state.

use std::collections::VecDeque;
use std::fmt;

use df_core::{GeoPoint, VehicleId};
use df_queue::{Request, RequestStatus};

use crate::InvariantViolation;

/// Weight sums are compared with this tolerance.
pub const LOAD_EPSILON: f64 = 1e-6;

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Lifecycle phase of a vehicle.
///
/// ```text
/// Idle → Staging → Loading → InTransit → Delivering ─┬→ InTransit (next stop)
///  ↑                                                  └→ Returning → Idle
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Idle,
    Staging,
    Loading,
    InTransit,
    Delivering,
    Returning,
}

impl Phase {
    /// Phases in which the vehicle flies toward a target each tick.
    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(self, Phase::InTransit | Phase::Returning)
    }

    /// Phases in which the manifest must be non-empty.
    #[inline]
    pub fn carries_cargo(self) -> bool {
        !matches!(self, Phase::Idle | Phase::Returning)
    }

    /// Status the vehicle's manifest requests should show in this phase.
    pub fn request_status(self) -> Option<RequestStatus> {
        match self {
            Phase::Staging                        => Some(RequestStatus::Staging),
            Phase::Loading                        => Some(RequestStatus::Loading),
            Phase::InTransit | Phase::Delivering  => Some(RequestStatus::InTransit),
            Phase::Idle | Phase::Returning        => None,
        }
    }

    /// Human-readable location for the fleet table.
    pub fn route_label(self) -> &'static str {
        match self {
            Phase::Idle       => "At base",
            Phase::Staging    => "At base (staging)",
            Phase::Loading    => "At base (loading)",
            Phase::InTransit  => "Near destination",
            Phase::Delivering => "Delivering",
            Phase::Returning  => "Near base",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Idle       => "IDLE",
            Phase::Staging    => "STAGING",
            Phase::Loading    => "LOADING",
            Phase::InTransit  => "IN_TRANSIT",
            Phase::Delivering => "DELIVERING",
            Phase::Returning  => "RETURNING",
        };
        f.write_str(s)
    }
}

// ── BatteryTier ───────────────────────────────────────────────────────────────

/// Coarse battery level for display.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BatteryTier {
    /// Above 50 %.
    High,
    /// Above 25 %.
    Medium,
    Low,
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// One drone.
///
/// Invariants (checked every tick by [`Vehicle::check_invariants`]):
/// - `current_load` equals the manifest weight sum and never exceeds
///   `max_capacity`;
/// - the manifest is empty exactly when the phase is `Idle` or `Returning`;
/// - `battery` stays in `[0, 100]` and only resets to 100 on arrival home.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id:           VehicleId,
    pub call_sign:    String,
    pub max_capacity: f64,
    pub current_load: f64,
    /// Percent, `[0, 100]`.
    pub battery:      f64,
    pub phase:        Phase,
    pub position:     GeoPoint,
    pub home:         GeoPoint,
    /// Current flight target; `None` while idle.
    pub destination:  Option<GeoPoint>,
    /// Requests on board, in delivery order.
    pub manifest:     VecDeque<Request>,
    /// Remaining ticks of a timed phase.  Set on the first tick spent in
    /// the phase and cleared on exit, so re-entering restarts the count.
    pub phase_timer:  Option<u32>,
    /// Requests this vehicle has delivered since start-up.
    pub deliveries:   u64,
}

impl Vehicle {
    /// An idle, fully charged, empty vehicle parked at `home`.
    pub fn new(id: VehicleId, call_sign: impl Into<String>, max_capacity: f64, home: GeoPoint) -> Self {
        Self {
            id,
            call_sign:    call_sign.into(),
            max_capacity,
            current_load: 0.0,
            battery:      100.0,
            phase:        Phase::Idle,
            position:     home,
            home,
            destination:  None,
            manifest:     VecDeque::new(),
            phase_timer:  None,
            deliveries:   0,
        }
    }

    #[inline]
    pub fn remaining_capacity(&self) -> f64 {
        (self.max_capacity - self.current_load).max(0.0)
    }

    pub fn battery_tier(&self) -> BatteryTier {
        if self.battery > 50.0 {
            BatteryTier::High
        } else if self.battery > 25.0 {
            BatteryTier::Medium
        } else {
            BatteryTier::Low
        }
    }

    /// Battery percentage rounded down, for display.
    #[inline]
    pub fn battery_percent(&self) -> u8 {
        self.battery.clamp(0.0, 100.0).floor() as u8
    }

    /// Idle with strictly more than `min_battery` percent charge.
    #[inline]
    pub fn is_dispatchable(&self, min_battery: f64) -> bool {
        self.phase == Phase::Idle && self.battery > min_battery
    }

    pub fn manifest_weight(&self) -> f64 {
        self.manifest.iter().map(|r| r.weight).sum()
    }

    /// Where the vehicle is flying to this tick, if it is moving.
    pub fn target(&self) -> Option<GeoPoint> {
        if self.phase.is_moving() { self.destination } else { None }
    }

    /// Load a batch chosen by the dispatcher and start staging.
    ///
    /// The batch must be non-empty; its requests are marked `Staging`.
    pub fn assign_batch(&mut self, batch: Vec<Request>) {
        debug_assert!(!batch.is_empty());
        self.manifest = batch.into_iter().collect();
        for r in &mut self.manifest {
            r.status = RequestStatus::Staging;
        }
        self.current_load = self.manifest_weight();
        self.destination = self.manifest.front().map(|r| r.destination);
        self.enter_phase(Phase::Staging);
    }

    /// Switch phase and discard any running phase timer.
    #[inline]
    pub fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.phase_timer = None;
    }

    /// Count one tick of a timed phase lasting `duration` ticks.
    ///
    /// Returns `true` on the tick the countdown reaches zero.  The timer is
    /// cleared at that point.
    pub fn tick_phase_timer(&mut self, duration: u32) -> bool {
        let remaining = self.phase_timer.get_or_insert(duration);
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            self.phase_timer = None;
            true
        } else {
            false
        }
    }

    /// Set every manifest request to `status`.
    pub fn mark_manifest(&mut self, status: RequestStatus) {
        for r in &mut self.manifest {
            r.status = status;
        }
    }

    /// Pop the first request on board and reduce the load by its weight.
    pub fn unload_front(&mut self) -> Option<Request> {
        let delivered = self.manifest.pop_front()?;
        self.current_load = if self.manifest.is_empty() {
            0.0
        } else {
            (self.current_load - delivered.weight).max(0.0)
        };
        Some(delivered)
    }

    /// Start the next leg after a drop-off: on to the next stop, or home.
    ///
    /// Returns `true` when the vehicle heads home (round trip finished).
    pub fn continue_or_return(&mut self) -> bool {
        match self.manifest.front() {
            Some(next) => {
                self.destination = Some(next.destination);
                self.mark_manifest(RequestStatus::InTransit);
                self.enter_phase(Phase::InTransit);
                false
            }
            None => {
                self.current_load = 0.0;
                self.destination = Some(self.home);
                self.enter_phase(Phase::Returning);
                true
            }
        }
    }

    /// Arrival at home: recharge and become available again.
    pub fn dock(&mut self) {
        self.battery = 100.0;
        self.current_load = 0.0;
        self.destination = None;
        self.enter_phase(Phase::Idle);
    }

    /// Abandon the current mission after an invariant violation.
    ///
    /// The vehicle is parked at home as `Idle` with an empty hold.  The
    /// requests it carried are returned so the caller can release them.
    pub fn force_idle(&mut self) -> Vec<Request> {
        let released: Vec<Request> = self.manifest.drain(..).collect();
        self.current_load = 0.0;
        self.destination = None;
        self.position = self.home;
        self.battery = self.battery.clamp(0.0, 100.0);
        self.enter_phase(Phase::Idle);
        released
    }

    /// Verify the per-vehicle invariants.
    pub fn check_invariants(&self, max_batch_size: usize) -> Result<(), InvariantViolation> {
        let manifest_weight = self.manifest_weight();
        if (manifest_weight - self.current_load).abs() > LOAD_EPSILON {
            return Err(InvariantViolation::LoadMismatch {
                vehicle: self.id,
                manifest_weight,
                current_load: self.current_load,
            });
        }
        if self.current_load > self.max_capacity + LOAD_EPSILON {
            return Err(InvariantViolation::OverCapacity {
                vehicle:  self.id,
                load:     self.current_load,
                capacity: self.max_capacity,
            });
        }
        if self.manifest.len() > max_batch_size {
            return Err(InvariantViolation::BatchTooLarge {
                vehicle: self.id,
                size:    self.manifest.len(),
                max:     max_batch_size,
            });
        }
        if !(0.0..=100.0).contains(&self.battery) {
            return Err(InvariantViolation::BatteryOutOfRange {
                vehicle: self.id,
                battery: self.battery,
            });
        }
        if self.phase.carries_cargo() == self.manifest.is_empty() {
            return Err(InvariantViolation::ManifestPhaseMismatch {
                vehicle:  self.id,
                phase:    self.phase,
                manifest: self.manifest.len(),
            });
        }
        Ok(())
    }
}
