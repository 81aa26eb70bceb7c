//! Head-of-queue batching.

use df_queue::{Request, RequestStatus};

use crate::policy::greedy_fill;
use crate::{AllocationPolicy, Batch, BatchLimits};

/// "Take the current top-priority job or wait."
///
/// The vehicle only loads anything if the request at the head of the queue
/// is still `Waiting` and fits on its own; the rest of the queue is then
/// scanned greedily to fill the hold.  A head that is already claimed, or
/// too heavy for this vehicle, leaves the vehicle idle this tick even when
/// lighter waiting requests sit further back.
#[derive(Copy, Clone, Debug, Default)]
pub struct HeadOfQueuePolicy;

impl AllocationPolicy for HeadOfQueuePolicy {
    fn select_batch(&self, queue: &[Request], limits: &BatchLimits) -> Option<Batch> {
        let head = queue.first()?;
        if head.status != RequestStatus::Waiting {
            return None;
        }
        if head.weight > limits.capacity {
            tracing::debug!(
                request = %head.id,
                weight = head.weight,
                capacity = limits.capacity,
                "head of queue does not fit; vehicle waits"
            );
            return None;
        }
        Some(greedy_fill(queue, 0, limits))
    }

    fn name(&self) -> &'static str {
        "head_of_queue"
    }
}
