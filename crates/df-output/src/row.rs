//! Flat row types, one per output file.
//!
//! Field order is column order.

use df_core::{Tick, VehicleId};
use df_fleet::Vehicle;
use df_sim::{DeliveryRecord, TickSummary};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryRow {
    pub request_id:          String,
    pub address:             String,
    /// Empty when unknown.
    pub neighbourhood:       String,
    pub priority:            String,
    pub weight_kg:           f64,
    pub vehicle_id:          u32,
    pub call_sign:           String,
    pub created_tick:        u64,
    pub completed_tick:      u64,
    pub completed_unix_secs: i64,
    pub elapsed_secs:        u64,
}

impl DeliveryRow {
    pub const HEADERS: [&'static str; 11] = [
        "request_id",
        "address",
        "neighbourhood",
        "priority",
        "weight_kg",
        "vehicle_id",
        "call_sign",
        "created_tick",
        "completed_tick",
        "completed_unix_secs",
        "elapsed_secs",
    ];
}

impl From<&DeliveryRecord> for DeliveryRow {
    fn from(record: &DeliveryRecord) -> Self {
        let r = &record.request;
        Self {
            request_id:          r.id.to_string(),
            address:             r.address.clone(),
            neighbourhood:       r.neighbourhood.clone().unwrap_or_default(),
            priority:            r.priority.to_string(),
            weight_kg:           r.weight,
            vehicle_id:          record.vehicle.0,
            call_sign:           record.call_sign.clone(),
            created_tick:        r.created_at.0,
            completed_tick:      record.completed_at.0,
            completed_unix_secs: record.completed_unix_secs,
            elapsed_secs:        record.elapsed_secs,
        }
    }
}

/// One vehicle at one snapshot tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSnapshotRow {
    pub tick:         u64,
    pub vehicle_id:   u32,
    pub call_sign:    String,
    pub phase:        String,
    pub battery:      f64,
    pub load_kg:      f64,
    pub manifest_len: usize,
    pub lat:          f64,
    pub lng:          f64,
    /// Empty while idle.
    pub target_lat:   Option<f64>,
    pub target_lng:   Option<f64>,
}

impl VehicleSnapshotRow {
    pub const HEADERS: [&'static str; 11] = [
        "tick",
        "vehicle_id",
        "call_sign",
        "phase",
        "battery",
        "load_kg",
        "manifest_len",
        "lat",
        "lng",
        "target_lat",
        "target_lng",
    ];

    pub fn of(tick: Tick, vehicle: &Vehicle) -> Self {
        let VehicleId(id) = vehicle.id;
        Self {
            tick:         tick.0,
            vehicle_id:   id,
            call_sign:    vehicle.call_sign.clone(),
            phase:        vehicle.phase.to_string(),
            battery:      vehicle.battery,
            load_kg:      vehicle.current_load,
            manifest_len: vehicle.manifest.len(),
            lat:          vehicle.position.lat,
            lng:          vehicle.position.lng,
            target_lat:   vehicle.destination.map(|p| p.lat),
            target_lng:   vehicle.destination.map(|p| p.lng),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub unix_time_secs: i64,
    pub assignments:    usize,
    pub transitions:    usize,
    pub deliveries:     usize,
    pub round_trips:    usize,
    pub resets:         usize,
    pub pending:        usize,
    pub waiting:        usize,
}

impl TickSummaryRow {
    pub const HEADERS: [&'static str; 9] = [
        "tick",
        "unix_time_secs",
        "assignments",
        "transitions",
        "deliveries",
        "round_trips",
        "resets",
        "pending",
        "waiting",
    ];

    pub fn of(summary: &TickSummary, unix_time_secs: i64) -> Self {
        Self {
            tick:        summary.tick.0,
            unix_time_secs,
            assignments: summary.assignments,
            transitions: summary.transitions,
            deliveries:  summary.deliveries,
            round_trips: summary.round_trips,
            resets:      summary.resets,
            pending:     summary.pending,
            waiting:     summary.waiting,
        }
    }
}
