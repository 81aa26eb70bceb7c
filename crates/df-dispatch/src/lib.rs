//! `df-dispatch`: matching queued requests to idle vehicles.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`policy`]     | `AllocationPolicy` trait, `Batch`, `BatchLimits`            |
//! | [`head`]       | `HeadOfQueuePolicy`: the head must fit or the vehicle waits |
//! | [`skip_ahead`] | `SkipAheadPolicy`: seed with the first request that fits    |
//! | [`dispatcher`] | `Dispatcher`: sorts the queue and applies batches           |
//!
//! # Produce / apply split
//!
//! A policy only *reads* the queue and proposes a [`Batch`].  The
//! [`Dispatcher`] owns all mutation: it marks the batched requests
//! `Staging` in the queue and hands copies to the vehicle.  Swapping the
//! policy therefore never touches the vehicle state machine.

pub mod dispatcher;
pub mod head;
pub mod policy;
pub mod skip_ahead;

#[cfg(test)]
mod tests;

pub use dispatcher::{Assignment, Dispatcher};
pub use head::HeadOfQueuePolicy;
pub use policy::{AllocationPolicy, Batch, BatchLimits, policy_for};
pub use skip_ahead::SkipAheadPolicy;
