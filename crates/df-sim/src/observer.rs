//! Simulation observer trait for progress reporting and data collection.

use df_core::Tick;
use df_fleet::Fleet;
use df_queue::RequestQueue;

use crate::{DeliveryRecord, TickSummary};

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] and the run loops.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} waiting, {} delivered", summary.waiting, summary.deliveries);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before allocation.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per completed delivery, in the tick it completes.
    fn on_delivery(&mut self, _record: &DeliveryRecord) {}

    /// Called at the end of each tick with what happened during it.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called every `config.snapshot_interval_ticks` ticks with read-only
    /// access to the fleet and the queue.
    fn on_snapshot(&mut self, _tick: Tick, _fleet: &Fleet, _queue: &RequestQueue) {}

    /// Called once when a run finishes or a live clock stops.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
