//! Top-level simulation configuration.
//!
//! Every tunable constant of the fleet model lives in [`FleetConfig`].  The
//! defaults reproduce the reference operation: five 12 kg drones based at
//! Praça Raul Soares (Belo Horizonte), a one-second tick, and the
//! staging / loading / delivering durations of 2 / 3 / 2 ticks.
//!
//! Applications typically load a JSON file with the `serde` feature on and
//! rely on `#[serde(default)]` so a config only needs the fields it changes.

use crate::{DfError, DfResult, GeoPoint, SimClock, Tick};

/// Which allocation rule the dispatcher uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AllocationStrategy {
    /// The head of the priority queue must fit, otherwise the vehicle waits.
    #[default]
    HeadOfQueue,
    /// Seed the batch with the first waiting request that fits.
    SkipAhead,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    /// Unix timestamp for tick 0.
    pub start_unix_secs: i64,

    /// Seconds per tick.  Default: 1.
    pub tick_duration_secs: u32,

    /// Total ticks for batch runs (`Sim::run`).  Live runs ignore it.
    pub total_ticks: u64,

    /// Emit a snapshot to observers every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,

    /// Seed for the synthetic demand generator.
    pub seed: u64,

    // ── Fleet ─────────────────────────────────────────────────────────────
    /// Vehicle call signs, one per vehicle, in fleet order.
    pub call_signs: Vec<String>,

    /// Maximum payload of every vehicle (kg).  Also the intake limit.
    pub vehicle_capacity: f64,

    /// Where every vehicle starts and returns to.
    pub home: GeoPoint,

    // ── Dispatch ──────────────────────────────────────────────────────────
    /// Vehicles at or below this battery percentage are not dispatched.
    pub min_dispatch_battery: f64,

    /// Hard cap on requests per batch, independent of weight.
    pub max_batch_size: usize,

    pub allocation: AllocationStrategy,

    // ── Lifecycle ─────────────────────────────────────────────────────────
    pub staging_ticks: u32,
    pub loading_ticks: u32,
    pub delivering_ticks: u32,

    /// Fraction of the remaining gap closed per moving tick.
    pub approach_factor: f64,

    /// Battery percentage consumed per moving tick.
    pub battery_drain_per_tick: f64,

    /// Moving vehicles closer than this (metres) have arrived.
    pub arrival_radius_m: f64,

    /// Assumed cruise speed used only for ETA estimates (m/s).
    pub eta_speed_mps: f64,

    // ── History ───────────────────────────────────────────────────────────
    /// Completed deliveries kept in the ledger (most recent first).
    pub history_capacity: usize,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:         0,
            tick_duration_secs:      1,
            total_ticks:             600,
            snapshot_interval_ticks: 0,
            seed:                    42,
            call_signs: ["4562256", "0293201", "4590902", "3466703", "7642304"]
                .into_iter()
                .map(String::from)
                .collect(),
            vehicle_capacity:        12.0,
            home:                    GeoPoint::new(-19.9208, -43.9378),
            min_dispatch_battery:    20.0,
            max_batch_size:          3,
            allocation:              AllocationStrategy::HeadOfQueue,
            staging_ticks:           2,
            loading_ticks:           3,
            delivering_ticks:        2,
            approach_factor:         0.1,
            battery_drain_per_tick:  0.5,
            arrival_radius_m:        50.0,
            eta_speed_mps:           100.0,
            history_capacity:        50,
        }
    }
}

impl FleetConfig {
    /// The tick at which a batch run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.tick_duration_secs)
    }

    /// Reject configurations the lifecycle cannot run with.
    pub fn validate(&self) -> DfResult<()> {
        if self.call_signs.is_empty() {
            return Err(DfError::Config("fleet must have at least one vehicle".into()));
        }
        if !(self.vehicle_capacity > 0.0) {
            return Err(DfError::Config(format!(
                "vehicle_capacity must be positive, got {}",
                self.vehicle_capacity
            )));
        }
        if self.max_batch_size == 0 {
            return Err(DfError::Config("max_batch_size must be at least 1".into()));
        }
        if !(self.approach_factor > 0.0 && self.approach_factor <= 1.0) {
            return Err(DfError::Config(format!(
                "approach_factor must be in (0, 1], got {}",
                self.approach_factor
            )));
        }
        if !(self.arrival_radius_m > 0.0) {
            return Err(DfError::Config(format!(
                "arrival_radius_m must be positive, got {}",
                self.arrival_radius_m
            )));
        }
        if !(self.eta_speed_mps > 0.0) {
            return Err(DfError::Config(format!(
                "eta_speed_mps must be positive, got {}",
                self.eta_speed_mps
            )));
        }
        if self.tick_duration_secs == 0 {
            return Err(DfError::Config("tick_duration_secs must be at least 1".into()));
        }
        if self.history_capacity == 0 {
            return Err(DfError::Config("history_capacity must be at least 1".into()));
        }
        Ok(())
    }
}
