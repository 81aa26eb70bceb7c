//! Completed-delivery history and the running counters behind the metrics.

use std::collections::VecDeque;

use df_core::{Tick, VehicleId};
use df_queue::Request;

/// One completed delivery.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryRecord {
    /// The request as it left the vehicle, with status `Delivered`.
    pub request:             Request,
    pub vehicle:             VehicleId,
    pub call_sign:           String,
    pub completed_at:        Tick,
    pub completed_unix_secs: i64,
    /// Simulated seconds from intake to drop-off.
    pub elapsed_secs:        u64,
}

/// Bounded, most-recent-first delivery history.
///
/// The counters cover every delivery since start-up, not just the retained
/// records.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryLedger {
    capacity:           usize,
    records:            VecDeque<DeliveryRecord>,
    deliveries:         u64,
    round_trips:        u64,
    elapsed_secs_total: u64,
}

impl HistoryLedger {
    /// A ledger keeping the `capacity` most recent records.  Always keeps at
    /// least one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records:            VecDeque::with_capacity(capacity),
            deliveries:         0,
            round_trips:        0,
            elapsed_secs_total: 0,
        }
    }

    /// Store `record` at the front, evicting the oldest beyond capacity.
    pub fn record(&mut self, record: DeliveryRecord) -> &DeliveryRecord {
        self.deliveries += 1;
        self.elapsed_secs_total += record.elapsed_secs;
        self.records.push_front(record);
        self.records.truncate(self.capacity);
        &self.records[0]
    }

    pub fn record_round_trip(&mut self) {
        self.round_trips += 1;
    }

    pub fn deliveries(&self) -> u64 {
        self.deliveries
    }

    pub fn round_trips(&self) -> u64 {
        self.round_trips
    }

    pub fn elapsed_secs_total(&self) -> u64 {
        self.elapsed_secs_total
    }

    /// Mean intake-to-drop-off time; `None` before the first delivery.
    pub fn mean_delivery_secs(&self) -> Option<f64> {
        (self.deliveries > 0).then(|| self.elapsed_secs_total as f64 / self.deliveries as f64)
    }

    /// Deliveries per round trip as a rounded percentage; 100 with no
    /// round trips yet.
    pub fn efficiency_percent(&self) -> u32 {
        if self.round_trips == 0 {
            return 100;
        }
        (100.0 * self.deliveries as f64 / self.round_trips as f64).round() as u32
    }

    /// Retained records, most recent first.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, DeliveryRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&DeliveryRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
