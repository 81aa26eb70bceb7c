//! `df-queue`: delivery requests, intake validation, and the pending queue.
//!
//! # Crate layout
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`request`]  | `Request`, `Priority`, `RequestStatus`            |
//! | [`intake`]   | `RequestDraft`: validation at the intake boundary |
//! | [`queue`]    | `RequestQueue`: stable priority-ordered backlog   |
//! | [`loader`]   | `load_requests_csv`, `load_requests_reader`       |
//! | [`error`]    | `IntakeError`, `QueueError`                       |
//!
//! # Ordering model
//!
//! New requests are appended.  Once per tick the dispatcher calls
//! [`RequestQueue::sort_by_priority`], a *stable* sort on descending
//! priority, so requests of equal priority keep their arrival order.

pub mod error;
pub mod intake;
pub mod loader;
pub mod queue;
pub mod request;

#[cfg(test)]
mod tests;

pub use error::{IntakeError, IntakeResult, QueueError, QueueResult};
pub use intake::RequestDraft;
pub use loader::{load_requests_csv, load_requests_reader};
pub use queue::RequestQueue;
pub use request::{Priority, Request, RequestStatus};
