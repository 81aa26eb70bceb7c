//! `df-fleet`: vehicle state and the fixed-size fleet.
//!
//! # Crate layout
//!
//! | Module          | Contents                                             |
//! |-----------------|------------------------------------------------------|
//! | [`vehicle`]     | `Vehicle`, `Phase`, `BatteryTier`                    |
//! | [`fleet`]       | `Fleet` (ordered `Vec<Vehicle>`), `FleetBuilder`     |
//! | [`movement`]    | `MovementParams`, `advance`, `eta_secs`              |
//! | [`invariant`]   | `InvariantViolation`: per-vehicle consistency checks |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                 |
//! |---------|--------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types. |

pub mod fleet;
pub mod invariant;
pub mod movement;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use fleet::{Fleet, FleetBuilder};
pub use invariant::InvariantViolation;
pub use movement::{MoveOutcome, MovementParams, advance, eta_secs};
pub use vehicle::{BatteryTier, Phase, Vehicle};
