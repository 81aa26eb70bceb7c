//! `df-output`: CSV output for drone-fleet runs.
//!
//! [`CsvWriter`] creates three files in the output directory:
//!
//! | File                    | One row per               |
//! |-------------------------|---------------------------|
//! | `deliveries.csv`        | completed delivery        |
//! | `vehicle_snapshots.csv` | vehicle per snapshot tick |
//! | `tick_summaries.csv`    | tick                      |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `df_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use df_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, sim.config());
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{DeliveryRow, TickSummaryRow, VehicleSnapshotRow};
pub use writer::OutputWriter;
