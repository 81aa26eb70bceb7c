//! `FleetService`: the one shared handle to a running simulation.

use std::sync::Arc;

use df_core::{RequestId, Tick};
use df_dispatch::AllocationPolicy;
use df_queue::RequestDraft;
use parking_lot::Mutex;

use crate::{
    ActiveRoute, FleetSnapshot, MetricsSnapshot, Sim, SimObserver, SimResult, TickSummary,
    VehicleStatus,
};

/// Cloneable handle to a [`Sim`] behind a mutex.
///
/// Every operation takes the lock for its whole duration, so a reader never
/// observes a half-applied tick and intake never interleaves with
/// allocation.
pub struct FleetService<P: AllocationPolicy> {
    inner: Arc<Mutex<Sim<P>>>,
}

impl<P: AllocationPolicy> Clone for FleetService<P> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<P: AllocationPolicy> FleetService<P> {
    pub fn new(sim: Sim<P>) -> Self {
        Self { inner: Arc::new(Mutex::new(sim)) }
    }

    pub fn submit(&self, draft: RequestDraft) -> SimResult<RequestId> {
        self.inner.lock().submit(draft)
    }

    pub fn snapshot(&self) -> FleetSnapshot {
        self.inner.lock().snapshot()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.inner.lock().metrics()
    }

    pub fn fleet_status(&self) -> Vec<VehicleStatus> {
        self.inner.lock().fleet_status()
    }

    pub fn active_routes(&self) -> Vec<ActiveRoute> {
        self.inner.lock().active_routes()
    }

    pub fn current_tick(&self) -> Tick {
        self.inner.lock().current_tick()
    }

    /// Run one tick under the lock.
    pub fn step<O: SimObserver>(&self, observer: &mut O) -> TickSummary {
        self.inner.lock().step(observer)
    }

    /// Run `f` with shared access to the simulation.
    pub fn read<R>(&self, f: impl FnOnce(&Sim<P>) -> R) -> R {
        f(&self.inner.lock())
    }
}
