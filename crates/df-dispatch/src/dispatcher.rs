//! The allocation pass run at the start of every tick.

use df_core::{FleetConfig, RequestId, VehicleId};
use df_fleet::Fleet;
use df_queue::{Request, RequestQueue, RequestStatus};

use crate::{AllocationPolicy, BatchLimits};

/// One batch handed to one vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub vehicle:  VehicleId,
    /// In delivery order.
    pub requests: Vec<RequestId>,
    pub weight:   f64,
}

/// Runs an [`AllocationPolicy`] over the fleet and applies its batches.
pub struct Dispatcher<P: AllocationPolicy> {
    policy:         P,
    max_batch_size: usize,
    min_battery:    f64,
}

impl<P: AllocationPolicy> Dispatcher<P> {
    pub fn new(policy: P, max_batch_size: usize, min_battery: f64) -> Self {
        Self {
            policy,
            max_batch_size,
            min_battery,
        }
    }

    pub fn from_config(policy: P, config: &FleetConfig) -> Self {
        Self::new(policy, config.max_batch_size, config.min_dispatch_battery)
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Sort the queue, then offer work to each dispatchable vehicle in fleet
    /// order.
    ///
    /// Batched requests are marked `Staging` in the queue before the next
    /// vehicle is considered, so no request is ever claimed twice.
    pub fn dispatch(&self, fleet: &mut Fleet, queue: &mut RequestQueue) -> Vec<Assignment> {
        queue.sort_by_priority();

        let mut assignments = Vec::new();
        for vehicle_id in fleet.dispatchable(self.min_battery) {
            if queue.is_empty() {
                break;
            }
            let Some(vehicle) = fleet.get_mut(vehicle_id) else {
                continue;
            };

            let limits = BatchLimits {
                capacity: vehicle.max_capacity,
                max_size: self.max_batch_size,
            };
            let Some(batch) = self.policy.select_batch(queue.as_slice(), &limits) else {
                continue;
            };
            if batch.is_empty() {
                continue;
            }

            let cargo: Vec<Request> = batch
                .positions
                .iter()
                .filter_map(|&pos| queue.as_slice().get(pos).cloned())
                .collect();
            let ids: Vec<RequestId> = cargo.iter().map(|r| r.id).collect();
            for &id in &ids {
                queue.set_status(id, RequestStatus::Staging);
            }

            tracing::info!(
                vehicle = %vehicle.call_sign,
                policy = self.policy.name(),
                parcels = ids.len(),
                weight = batch.weight,
                "batch allocated, staging"
            );

            vehicle.assign_batch(cargo);
            assignments.push(Assignment {
                vehicle:  vehicle_id,
                requests: ids,
                weight:   vehicle.current_load,
            });
        }

        assignments
    }
}
