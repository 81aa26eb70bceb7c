//! Read-only projections of the simulation state.
//!
//! Everything here is computed on demand from the fleet, the queue, and the
//! ledger; nothing is cached between ticks.  Two calls without a tick in
//! between therefore return equal values.

use std::fmt;

use df_core::{GeoPoint, RequestId, Tick, VehicleId};
use df_fleet::{BatteryTier, Fleet, Phase, Vehicle, eta_secs};
use df_queue::{Request, RequestQueue};

use crate::{DeliveryRecord, HistoryLedger};

// ── Eta ───────────────────────────────────────────────────────────────────────

/// Time-to-target estimate as shown to operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Eta {
    /// At most one minute away.
    Seconds(u64),
    /// Whole minutes, rounded up.
    Minutes(u64),
    /// Not moving, or no target.
    Unavailable,
}

impl Eta {
    pub fn from_secs(secs: Option<u64>) -> Self {
        match secs {
            None => Eta::Unavailable,
            Some(s) if s <= 60 => Eta::Seconds(s),
            Some(s) => Eta::Minutes(s.div_ceil(60)),
        }
    }

    pub fn for_vehicle(vehicle: &Vehicle, speed_mps: f64) -> Self {
        Self::from_secs(eta_secs(vehicle, speed_mps))
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::Seconds(s)  => write!(f, "{s} s"),
            Eta::Minutes(m)  => write!(f, "{m} min"),
            Eta::Unavailable => f.write_str("—"),
        }
    }
}

/// "N s" up to a minute, "x.x min" above, "—" with no deliveries.
pub fn mean_time_label(mean_secs: Option<f64>) -> String {
    match mean_secs {
        None => "—".to_string(),
        Some(s) if s <= 60.0 => format!("{} s", s.round() as u64),
        Some(s) => format!("{:.1} min", s / 60.0),
    }
}

fn round_2dp(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSnapshot {
    pub total_deliveries:    u64,
    pub total_round_trips:   u64,
    /// Deliveries per round trip, in percent.
    pub efficiency_percent:  u32,
    pub mean_delivery_secs:  Option<f64>,
    pub mean_delivery_label: String,
    /// Call sign of the vehicle with the most deliveries.
    pub busiest_vehicle:     Option<String>,
    /// Requests not yet delivered, claimed or not.
    pub pending_requests:    usize,
    pub waiting_requests:    usize,
}

impl MetricsSnapshot {
    pub fn collect(fleet: &Fleet, queue: &RequestQueue, ledger: &HistoryLedger) -> Self {
        let mean = ledger.mean_delivery_secs();
        Self {
            total_deliveries:    ledger.deliveries(),
            total_round_trips:   ledger.round_trips(),
            efficiency_percent:  ledger.efficiency_percent(),
            mean_delivery_secs:  mean,
            mean_delivery_label: mean_time_label(mean),
            busiest_vehicle:     fleet
                .busiest()
                .and_then(|id| fleet.get(id))
                .map(|v| v.call_sign.clone()),
            pending_requests:    queue.len(),
            waiting_requests:    queue.waiting_count(),
        }
    }
}

// ── Per-vehicle views ─────────────────────────────────────────────────────────

/// Everything the fleet table shows about one vehicle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleView {
    pub id:                 VehicleId,
    pub call_sign:          String,
    pub phase:              Phase,
    pub route_label:        String,
    pub battery_percent:    u8,
    pub battery_tier:       BatteryTier,
    /// kg, two decimals.
    pub remaining_capacity: f64,
    pub position:           GeoPoint,
    pub destination:        Option<GeoPoint>,
    pub manifest:           Vec<RequestId>,
    pub eta:                Eta,
    pub deliveries:         u64,
}

impl VehicleView {
    pub fn of(vehicle: &Vehicle, eta_speed_mps: f64) -> Self {
        Self {
            id:                 vehicle.id,
            call_sign:          vehicle.call_sign.clone(),
            phase:              vehicle.phase,
            route_label:        vehicle.phase.route_label().to_string(),
            battery_percent:    vehicle.battery_percent(),
            battery_tier:       vehicle.battery_tier(),
            remaining_capacity: round_2dp(vehicle.remaining_capacity()),
            position:           vehicle.position,
            destination:        vehicle.destination,
            manifest:           vehicle.manifest.iter().map(|r| r.id).collect(),
            eta:                Eta::for_vehicle(vehicle, eta_speed_mps),
            deliveries:         vehicle.deliveries,
        }
    }
}

/// The compact fleet-status row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleStatus {
    pub id:                 VehicleId,
    pub call_sign:          String,
    pub phase:              Phase,
    pub battery_percent:    u8,
    pub remaining_capacity: f64,
}

impl From<&VehicleView> for VehicleStatus {
    fn from(view: &VehicleView) -> Self {
        Self {
            id:                 view.id,
            call_sign:          view.call_sign.clone(),
            phase:              view.phase,
            battery_percent:    view.battery_percent,
            remaining_capacity: view.remaining_capacity,
        }
    }
}

/// A vehicle currently flying, toward a drop-off or home.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveRoute {
    pub vehicle:     VehicleId,
    pub call_sign:   String,
    pub phase:       Phase,
    pub destination: GeoPoint,
    pub eta:         Eta,
    /// Requests still on board, in delivery order.
    pub requests:    Vec<RequestId>,
}

impl ActiveRoute {
    /// `None` unless the vehicle is in a moving phase with a target.
    pub fn of(vehicle: &Vehicle, eta_speed_mps: f64) -> Option<Self> {
        let destination = vehicle.target()?;
        Some(Self {
            vehicle:   vehicle.id,
            call_sign: vehicle.call_sign.clone(),
            phase:     vehicle.phase,
            destination,
            eta:       Eta::for_vehicle(vehicle, eta_speed_mps),
            requests:  vehicle.manifest.iter().map(|r| r.id).collect(),
        })
    }
}

// ── FleetSnapshot ─────────────────────────────────────────────────────────────

/// The full display projection, taken between ticks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetSnapshot {
    /// The next tick to run; everything before it has been applied.
    pub tick:     Tick,
    pub metrics:  MetricsSnapshot,
    pub vehicles: Vec<VehicleView>,
    /// Undelivered requests in queue order.
    pub pending:  Vec<Request>,
    /// Most recent first.
    pub history:  Vec<DeliveryRecord>,
}

impl FleetSnapshot {
    pub fn collect(
        tick:          Tick,
        fleet:         &Fleet,
        queue:         &RequestQueue,
        ledger:        &HistoryLedger,
        eta_speed_mps: f64,
    ) -> Self {
        Self {
            tick,
            metrics:  MetricsSnapshot::collect(fleet, queue, ledger),
            vehicles: fleet.iter().map(|v| VehicleView::of(v, eta_speed_mps)).collect(),
            pending:  queue.iter().cloned().collect(),
            history:  ledger.iter().cloned().collect(),
        }
    }

    pub fn fleet_status(&self) -> Vec<VehicleStatus> {
        self.vehicles.iter().map(VehicleStatus::from).collect()
    }
}
