//! Skip-ahead batching.

use df_queue::{Request, RequestStatus};

use crate::policy::greedy_fill;
use crate::{AllocationPolicy, Batch, BatchLimits};

/// Seed the batch with the first `Waiting` request that fits, wherever it
/// sits in the queue, then fill greedily from there.
///
/// Priority order is still respected for the seed search, but a claimed or
/// oversized head no longer stalls the fleet.
#[derive(Copy, Clone, Debug, Default)]
pub struct SkipAheadPolicy;

impl AllocationPolicy for SkipAheadPolicy {
    fn select_batch(&self, queue: &[Request], limits: &BatchLimits) -> Option<Batch> {
        let seed = queue
            .iter()
            .position(|r| r.status == RequestStatus::Waiting && r.weight <= limits.capacity)?;
        Some(greedy_fill(queue, seed, limits))
    }

    fn name(&self) -> &'static str {
        "skip_ahead"
    }
}
