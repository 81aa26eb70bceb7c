//! Fluent builder for constructing a [`Sim`].

use df_core::{FleetConfig, RequestId};
use df_dispatch::{AllocationPolicy, Dispatcher, policy_for};
use df_fleet::Fleet;
use df_queue::{RequestDraft, RequestQueue};

use crate::{HistoryLedger, LifecycleScheduler, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                   |
/// |---------------------|-------------------------------------------|
/// | `.fleet(f)`         | `Fleet::from_config(&config)`             |
/// | `.requests(drafts)` | Empty queue                               |
///
/// # Example
///
/// ```rust
/// use df_core::{FleetConfig, GeoPoint};
/// use df_queue::{Priority, RequestDraft};
/// use df_sim::{NoopObserver, SimBuilder};
///
/// let draft = RequestDraft::new("Rua da Bahia", GeoPoint::new(-19.92, -43.94), 5.0, Priority::High);
/// let mut sim = SimBuilder::from_config(FleetConfig::default())
///     .requests(vec![draft])
///     .build()
///     .unwrap();
/// sim.run_until_idle(1_000, &mut NoopObserver);
/// assert_eq!(sim.ledger().deliveries(), 1);
/// ```
pub struct SimBuilder<P: AllocationPolicy> {
    config:   FleetConfig,
    policy:   P,
    fleet:    Option<Fleet>,
    requests: Vec<RequestDraft>,
}

impl SimBuilder<Box<dyn AllocationPolicy>> {
    /// Use the allocation policy named by `config.allocation`.
    pub fn from_config(config: FleetConfig) -> Self {
        let policy = policy_for(config.allocation);
        Self::new(config, policy)
    }
}

impl<P: AllocationPolicy> SimBuilder<P> {
    pub fn new(config: FleetConfig, policy: P) -> Self {
        Self {
            config,
            policy,
            fleet:    None,
            requests: Vec::new(),
        }
    }

    /// Supply a pre-built fleet instead of one vehicle per call sign.
    pub fn fleet(mut self, fleet: Fleet) -> Self {
        self.fleet = Some(fleet);
        self
    }

    /// Requests queued at tick 0, in arrival order.
    pub fn requests(mut self, drafts: Vec<RequestDraft>) -> Self {
        self.requests.extend(drafts);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    ///
    /// Fails on an invalid config, an empty fleet, or the first initial
    /// request that intake rejects.
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;

        let fleet = self.fleet.unwrap_or_else(|| Fleet::from_config(&self.config));
        if fleet.is_empty() {
            return Err(SimError::Config("fleet has no vehicles".into()));
        }

        let clock = self.config.make_clock();
        let mut queue = RequestQueue::new();
        for draft in self.requests {
            let request = draft.into_request(
                RequestId::new_v4(),
                clock.current_tick,
                self.config.vehicle_capacity,
            )?;
            queue.push(request);
        }

        tracing::info!(
            vehicles = fleet.len(),
            queued = queue.len(),
            policy = self.policy.name(),
            "simulation built"
        );

        Ok(Sim {
            dispatcher: Dispatcher::from_config(self.policy, &self.config),
            scheduler:  LifecycleScheduler::new(&self.config),
            ledger:     HistoryLedger::new(self.config.history_capacity),
            clock,
            fleet,
            queue,
            config:     self.config,
            stalled:    false,
        })
    }
}
