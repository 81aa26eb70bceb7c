//! The `Sim` struct and its tick loop.

use df_core::{FleetConfig, RequestId, SimClock, Tick};
use df_dispatch::{AllocationPolicy, Dispatcher};
use df_fleet::{Fleet, Phase};
use df_queue::{RequestDraft, RequestQueue, RequestStatus};

use crate::{
    ActiveRoute, DeliveryRecord, FleetSnapshot, HistoryLedger, LifecycleScheduler,
    MetricsSnapshot, SimObserver, SimResult, VehicleStatus,
};

// ── TickSummary ───────────────────────────────────────────────────────────────

/// Counts of what one tick did, handed to [`SimObserver::on_tick_end`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSummary {
    pub tick:        Tick,
    /// Batches handed out by the dispatcher.
    pub assignments: usize,
    pub transitions: usize,
    pub deliveries:  usize,
    pub round_trips: usize,
    /// Vehicles forcibly reset after an invariant violation.
    pub resets:      usize,
    /// Queue state after the tick.
    pub pending:     usize,
    pub waiting:     usize,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The whole mutable simulation state plus the rules that advance it.
///
/// Each [`step`](Self::step) runs one full scheduling pass:
///
/// 1. **Allocate**: the [`Dispatcher`] sorts the queue and hands batches to
///    idle vehicles.
/// 2. **Check**: every vehicle's invariants are verified; a violating
///    vehicle is reset to `Idle` at home and its requests are released.
/// 3. **Advance**: the [`LifecycleScheduler`] moves each vehicle one tick
///    through its state machine, in fleet order.
/// 4. **Apply**: queue statuses follow the vehicle phases, delivered
///    requests leave the queue and enter the [`HistoryLedger`].
///
/// Outside code reads and writes through the methods here only.  Wrap the
/// `Sim` in a [`FleetService`][crate::FleetService] to share it with a
/// [`SimulationClock`][crate::SimulationClock].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: AllocationPolicy> {
    pub(crate) config:     FleetConfig,
    pub(crate) clock:      SimClock,
    pub(crate) fleet:      Fleet,
    pub(crate) queue:      RequestQueue,
    pub(crate) ledger:     HistoryLedger,
    pub(crate) dispatcher: Dispatcher<P>,
    pub(crate) scheduler:  LifecycleScheduler,
    /// Set while waiting requests sit behind a head no idle vehicle can carry.
    pub(crate) stalled:    bool,
}

impl<P: AllocationPolicy> Sim<P> {
    // ── Intake ────────────────────────────────────────────────────────────

    /// Validate `draft` and append it to the queue as `Waiting`.
    ///
    /// The request is stamped with the tick about to run.  Rejected drafts
    /// leave the queue untouched.
    pub fn submit(&mut self, draft: RequestDraft) -> SimResult<RequestId> {
        let id = RequestId::new_v4();
        let now = self.clock.current_tick;
        let request = match draft.into_request(id, now, self.config.vehicle_capacity) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "request rejected at intake");
                return Err(e.into());
            }
        };
        tracing::info!(
            request = %id,
            address = %request.address,
            weight = request.weight,
            priority = %request.priority,
            "request queued"
        );
        self.queue.push(request);
        Ok(id)
    }

    // ── Read side ─────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> FleetSnapshot {
        FleetSnapshot::collect(
            self.clock.current_tick,
            &self.fleet,
            &self.queue,
            &self.ledger,
            self.config.eta_speed_mps,
        )
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        MetricsSnapshot::collect(&self.fleet, &self.queue, &self.ledger)
    }

    pub fn fleet_status(&self) -> Vec<VehicleStatus> {
        self.snapshot().fleet_status()
    }

    /// Vehicles currently `InTransit` or `Returning`, in fleet order.
    pub fn active_routes(&self) -> Vec<ActiveRoute> {
        self.fleet
            .iter()
            .filter_map(|v| ActiveRoute::of(v, self.config.eta_speed_mps))
            .collect()
    }

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn policy_name(&self) -> &'static str {
        self.dispatcher.policy().name()
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Run one tick and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> TickSummary {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(now, observer);
        observer.on_tick_end(now, &summary);

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.fleet, &self.queue);
        }

        self.clock.advance();
        summary
    }

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Step until the queue is empty and every vehicle is idle, or until
    /// `max_ticks` ticks have run.  Returns the number of ticks run.
    pub fn run_until_idle<O: SimObserver>(&mut self, max_ticks: u64, observer: &mut O) -> u64 {
        let mut ran = 0;
        while ran < max_ticks && !self.is_quiescent() {
            self.step(observer);
            ran += 1;
        }
        ran
    }

    /// No pending requests and no vehicle away from `Idle`.
    pub fn is_quiescent(&self) -> bool {
        self.queue.is_empty() && self.fleet.iter().all(|v| v.phase == Phase::Idle)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> TickSummary {
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };

        // ── Phase 1: allocation ───────────────────────────────────────────
        let assignments = self.dispatcher.dispatch(&mut self.fleet, &mut self.queue);
        summary.assignments = assignments.len();
        self.note_stall(assignments.is_empty(), now);

        // ── Phases 2-4: check, advance, apply (fleet order) ───────────────
        //
        // Explicit field borrows so the borrow checker sees disjoint access.
        let max_batch = self.config.max_batch_size;
        let scheduler = &self.scheduler;
        let queue = &mut self.queue;
        let ledger = &mut self.ledger;
        let clock = &self.clock;

        for vehicle in self.fleet.iter_mut() {
            if let Err(violation) = vehicle.check_invariants(max_batch) {
                tracing::error!(
                    vehicle = %vehicle.call_sign,
                    %violation,
                    "invariant violated; resetting vehicle to idle"
                );
                for request in vehicle.force_idle() {
                    queue.set_status(request.id, RequestStatus::Waiting);
                }
                summary.resets += 1;
                continue;
            }

            let step = scheduler.advance(vehicle);
            if step.transition.is_some() {
                summary.transitions += 1;
            }

            if let Some(status) = vehicle.phase.request_status() {
                for request in &vehicle.manifest {
                    queue.set_status(request.id, status);
                }
            }

            if let Some(request) = step.delivered {
                queue.remove(request.id);
                let record = DeliveryRecord {
                    vehicle:             vehicle.id,
                    call_sign:           vehicle.call_sign.clone(),
                    completed_at:        now,
                    completed_unix_secs: clock.unix_secs_at(now),
                    elapsed_secs:        clock.secs_between(request.created_at, now),
                    request,
                };
                tracing::info!(
                    vehicle = %record.call_sign,
                    request = %record.request.id,
                    address = %record.request.address,
                    elapsed_secs = record.elapsed_secs,
                    "delivery completed"
                );
                observer.on_delivery(ledger.record(record));
                summary.deliveries += 1;
            }

            if step.round_trip {
                ledger.record_round_trip();
                summary.round_trips += 1;
            }
        }

        summary.pending = self.queue.len();
        summary.waiting = self.queue.waiting_count();
        summary
    }

    /// Warn once when idle, charged vehicles sit next to a waiting head
    /// that none of them can carry.  A head already claimed by another
    /// vehicle is ordinary head-of-queue waiting and only logged at debug.
    fn note_stall(&mut self, nothing_allocated: bool, now: Tick) {
        let idle = self.fleet.dispatchable(self.config.min_dispatch_battery);
        let head = self.queue.head();
        let waiting_behind_head =
            nothing_allocated && self.queue.waiting_count() > 0 && !idle.is_empty();

        let stalled = waiting_behind_head
            && head.is_some_and(|h| {
                h.status == RequestStatus::Waiting
                    && idle
                        .iter()
                        .filter_map(|&id| self.fleet.get(id))
                        .all(|v| h.weight > v.max_capacity)
            });

        if let Some(head) = head {
            if stalled && !self.stalled {
                tracing::warn!(
                    tick = %now,
                    head = %head.id,
                    head_weight = head.weight,
                    policy = self.dispatcher.policy().name(),
                    "allocation stalled behind an oversized queue head"
                );
            } else if waiting_behind_head && !stalled {
                tracing::debug!(
                    tick = %now,
                    head = %head.id,
                    head_status = %head.status,
                    idle = idle.len(),
                    "idle vehicles waiting on the queue head"
                );
            }
        }
        self.stalled = stalled;
    }
}
