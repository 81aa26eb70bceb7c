//! The per-vehicle lifecycle state machine.
//!
//! ```text
//! Phase       per tick                          exit
//! ─────────── ───────────────────────────────── ─────────────────────────────
//! Idle        nothing                           dispatcher assigns a batch
//! Staging     count down staging_ticks          → Loading
//! Loading     count down loading_ticks          → InTransit
//! InTransit   fly toward the front request      arrival → Delivering
//! Delivering  count down delivering_ticks       drop front request, then
//!                                               → InTransit (next stop) or
//!                                               → Returning (hold empty)
//! Returning   fly toward home                   arrival → Idle, battery 100
//!                                               (position left where it landed)
//! ```
//!
//! The scheduler only touches the [`Vehicle`].  Keeping the queue and the
//! history in step with what happened is the caller's job, driven by the
//! returned [`PhaseStep`].

use df_core::FleetConfig;
use df_fleet::{MoveOutcome, MovementParams, Phase, Vehicle, advance};
use df_queue::{Request, RequestStatus};

/// What one tick did to one vehicle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhaseStep {
    /// `(from, to)` when the phase changed this tick.
    pub transition: Option<(Phase, Phase)>,
    /// The request dropped off this tick.
    pub delivered:  Option<Request>,
    /// The vehicle emptied its hold and turned for home.
    pub round_trip: bool,
}

#[derive(Clone, Debug)]
pub struct LifecycleScheduler {
    staging_ticks:    u32,
    loading_ticks:    u32,
    delivering_ticks: u32,
    movement:         MovementParams,
}

impl LifecycleScheduler {
    pub fn new(config: &FleetConfig) -> Self {
        Self {
            staging_ticks:    config.staging_ticks,
            loading_ticks:    config.loading_ticks,
            delivering_ticks: config.delivering_ticks,
            movement:         MovementParams::from(config),
        }
    }

    /// Advance `vehicle` by one tick.
    pub fn advance(&self, vehicle: &mut Vehicle) -> PhaseStep {
        let from = vehicle.phase;
        let mut step = PhaseStep::default();

        match from {
            Phase::Idle => {}

            Phase::Staging => {
                vehicle.mark_manifest(RequestStatus::Staging);
                if vehicle.tick_phase_timer(self.staging_ticks) {
                    vehicle.mark_manifest(RequestStatus::Loading);
                    vehicle.enter_phase(Phase::Loading);
                }
            }

            Phase::Loading => {
                if vehicle.tick_phase_timer(self.loading_ticks) {
                    vehicle.mark_manifest(RequestStatus::InTransit);
                    vehicle.destination = vehicle.manifest.front().map(|r| r.destination);
                    vehicle.enter_phase(Phase::InTransit);
                }
            }

            Phase::InTransit => {
                vehicle.mark_manifest(RequestStatus::InTransit);
                if vehicle.destination.is_none() {
                    vehicle.destination = vehicle.manifest.front().map(|r| r.destination);
                }
                if advance(vehicle, &self.movement) == MoveOutcome::Arrived {
                    vehicle.enter_phase(Phase::Delivering);
                }
            }

            Phase::Delivering => {
                if vehicle.tick_phase_timer(self.delivering_ticks) {
                    if let Some(mut request) = vehicle.unload_front() {
                        request.status = RequestStatus::Delivered;
                        vehicle.deliveries += 1;
                        step.delivered = Some(request);
                    }
                    step.round_trip = vehicle.continue_or_return();
                }
            }

            Phase::Returning => {
                if vehicle.destination.is_none() {
                    vehicle.destination = Some(vehicle.home);
                }
                if advance(vehicle, &self.movement) == MoveOutcome::Arrived {
                    vehicle.dock();
                }
            }
        }

        if vehicle.phase != from {
            tracing::debug!(
                vehicle = %vehicle.call_sign,
                from = %from,
                to = %vehicle.phase,
                battery = vehicle.battery,
                "phase transition"
            );
            step.transition = Some((from, vehicle.phase));
        }
        step
    }
}
