//! `df-sim`: the drone-fleet tick loop and everything that reads it.
//!
//! # One tick
//!
//! ```text
//! step(tick):
//!   ① Allocate    sort the queue; hand batches to idle, charged vehicles.
//!   ② Check       verify per-vehicle invariants; reset violators to Idle.
//!   ③ Advance     LifecycleScheduler moves each vehicle one tick.
//!   ④ Apply       sync queue statuses, retire delivered requests into the
//!                 HistoryLedger, count round trips.
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                         |
//! |---------------|--------------------------------------------------|
//! | [`sim`]       | `Sim`, `TickSummary`                             |
//! | [`builder`]   | `SimBuilder`                                     |
//! | [`scheduler`] | `LifecycleScheduler`, `PhaseStep`                |
//! | [`ledger`]    | `HistoryLedger`, `DeliveryRecord`                |
//! | [`snapshot`]  | `FleetSnapshot`, `MetricsSnapshot`, views, `Eta` |
//! | [`observer`]  | `SimObserver`, `NoopObserver`                    |
//! | [`service`]   | `FleetService`: `Arc<Mutex<Sim>>` handle         |
//! | [`clock`]     | `SimulationClock`: periodic driver thread        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let sim = SimBuilder::from_config(config).build()?;
//! let service = FleetService::new(sim);
//! let clock = SimulationClock::spawn(service.clone(), Duration::from_secs(1), NoopObserver)?;
//! service.submit(draft)?;
//! println!("{:?}", service.snapshot().metrics);
//! clock.stop();
//! ```

pub mod builder;
pub mod clock;
pub mod error;
pub mod ledger;
pub mod observer;
pub mod scheduler;
pub mod service;
pub mod sim;
pub mod snapshot;


pub use builder::SimBuilder;
pub use clock::SimulationClock;
pub use error::{SimError, SimResult};
pub use ledger::{DeliveryRecord, HistoryLedger};
pub use observer::{NoopObserver, SimObserver};
pub use scheduler::{LifecycleScheduler, PhaseStep};
pub use service::FleetService;
pub use sim::{Sim, TickSummary};
pub use snapshot::{
    ActiveRoute, Eta, FleetSnapshot, MetricsSnapshot, VehicleStatus, VehicleView, mean_time_label,
};
