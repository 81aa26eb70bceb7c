//! The `AllocationPolicy` trait: the extension point for batching rules.

use df_core::AllocationStrategy;
use df_queue::{Request, RequestStatus};

use crate::{HeadOfQueuePolicy, SkipAheadPolicy};

/// Per-vehicle limits a batch must respect.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BatchLimits {
    /// Vehicle payload capacity (kg).
    pub capacity: f64,
    /// Maximum requests per batch, regardless of weight.
    pub max_size: usize,
}

/// A proposed batch: queue positions in scan order plus their total weight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Batch {
    pub positions: Vec<usize>,
    pub weight:    f64,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Pluggable batching rule.
///
/// Called once per dispatchable vehicle per tick with the already
/// priority-sorted queue.  Returning `None` leaves the vehicle idle this
/// tick.  Implementations must only propose `Waiting` requests and must keep
/// the batch within `limits`.
pub trait AllocationPolicy: Send + Sync + 'static {
    fn select_batch(&self, queue: &[Request], limits: &BatchLimits) -> Option<Batch>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

impl<P: AllocationPolicy + ?Sized> AllocationPolicy for Box<P> {
    fn select_batch(&self, queue: &[Request], limits: &BatchLimits) -> Option<Batch> {
        (**self).select_batch(queue, limits)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// The policy a config selects.
pub fn policy_for(strategy: AllocationStrategy) -> Box<dyn AllocationPolicy> {
    match strategy {
        AllocationStrategy::HeadOfQueue => Box::new(HeadOfQueuePolicy),
        AllocationStrategy::SkipAhead   => Box::new(SkipAheadPolicy),
    }
}

/// Greedy fill shared by the built-in policies.
///
/// Starts a batch with `queue[seed]` and scans the positions after it in
/// order, adding every `Waiting` request that still fits.  The scan stops
/// once the batch reaches capacity or `max_size`.
pub(crate) fn greedy_fill(queue: &[Request], seed: usize, limits: &BatchLimits) -> Batch {
    let mut batch = Batch {
        positions: vec![seed],
        weight:    queue[seed].weight,
    };

    for (pos, candidate) in queue.iter().enumerate().skip(seed + 1) {
        if batch.weight >= limits.capacity || batch.len() >= limits.max_size {
            break;
        }
        if candidate.status != RequestStatus::Waiting {
            continue;
        }
        if batch.weight + candidate.weight > limits.capacity {
            continue;
        }
        batch.positions.push(pos);
        batch.weight += candidate.weight;
    }

    batch
}
