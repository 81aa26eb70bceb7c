//! CSV output backend.

use std::fs::{self, File};
use std::path::Path;

use csv::{Writer, WriterBuilder};
use serde::Serialize;

use crate::writer::OutputWriter;
use crate::{DeliveryRow, OutputResult, TickSummaryRow, VehicleSnapshotRow};

/// Writes run output to three CSV files in one directory.
pub struct CsvWriter {
    deliveries: Writer<File>,
    snapshots:  Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

/// Headers are written up front so an empty run still yields valid files.
fn open(dir: &Path, name: &str, headers: &[&str]) -> OutputResult<Writer<File>> {
    let mut w = WriterBuilder::new()
        .has_headers(false)
        .from_path(dir.join(name))?;
    w.write_record(headers)?;
    Ok(w)
}

fn write_all<T: Serialize>(w: &mut Writer<File>, rows: &[T]) -> OutputResult<()> {
    for row in rows {
        w.serialize(row)?;
    }
    Ok(())
}

impl CsvWriter {
    /// Create `dir` if needed and open the three files, truncating old ones.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        tracing::debug!(dir = %dir.display(), "opening CSV output");
        Ok(Self {
            deliveries: open(dir, "deliveries.csv", &DeliveryRow::HEADERS)?,
            snapshots:  open(dir, "vehicle_snapshots.csv", &VehicleSnapshotRow::HEADERS)?,
            summaries:  open(dir, "tick_summaries.csv", &TickSummaryRow::HEADERS)?,
            finished:   false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_delivery(&mut self, row: &DeliveryRow) -> OutputResult<()> {
        self.deliveries.serialize(row)?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        write_all(&mut self.snapshots, rows)
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.serialize(row)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.deliveries.flush()?;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
