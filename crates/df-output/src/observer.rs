//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use df_core::{FleetConfig, SimClock, Tick};
use df_fleet::Fleet;
use df_queue::RequestQueue;
use df_sim::{DeliveryRecord, SimObserver, TickSummary};

use crate::row::{DeliveryRow, TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams deliveries, snapshots, and tick summaries
/// into any [`OutputWriter`].
///
/// Observer hooks cannot return errors, so the first write error is kept
/// and later ones are dropped.  Check [`take_error`][Self::take_error] once
/// the run returns.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    clock:      SimClock,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W, config: &FleetConfig) -> Self {
        Self {
            writer,
            clock:      config.make_clock(),
            last_error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "output write failed");
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_delivery(&mut self, record: &DeliveryRecord) {
        let result = self.writer.write_delivery(&DeliveryRow::from(record));
        self.store_err(result);
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        let row = TickSummaryRow::of(summary, self.clock.unix_secs_at(tick));
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, fleet: &Fleet, _queue: &RequestQueue) {
        let rows: Vec<VehicleSnapshotRow> =
            fleet.iter().map(|v| VehicleSnapshotRow::of(tick, v)).collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
