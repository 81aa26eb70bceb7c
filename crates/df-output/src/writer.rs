//! The `OutputWriter` trait.

use crate::{DeliveryRow, OutputResult, TickSummaryRow, VehicleSnapshotRow};

/// A sink for run output.
///
/// [`SimOutputObserver`][crate::SimOutputObserver] stores the first error
/// instead of propagating it, since observer hooks cannot fail.
pub trait OutputWriter {
    fn write_delivery(&mut self, row: &DeliveryRow) -> OutputResult<()>;

    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush everything.  Calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
