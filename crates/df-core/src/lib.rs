//! `df-core`: foundational types for the drone-fleet simulator.
//!
//! Every other `df-*` crate depends on this one.  It has no `df-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `uuid`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                      |
//! |-----------------|-----------------------------------------------|
//! | [`ids`]         | `VehicleId`, `RequestId`                      |
//! | [`geo`]         | `GeoPoint`, haversine distance, approach step |
//! | [`time`]        | `Tick`, `SimClock`                            |
//! | [`config`]      | `FleetConfig`, `AllocationStrategy`           |
//! | [`rng`]         | `SimRng` (synthetic demand generation)        |
//! | [`error`]       | `DfError`, `DfResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AllocationStrategy, FleetConfig};
pub use error::{DfError, DfResult};
pub use geo::GeoPoint;
pub use ids::{RequestId, VehicleId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
