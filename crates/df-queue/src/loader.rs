//! CSV bulk intake.
//!
//! # CSV format
//!
//! One row per request.  `number` and `neighbourhood` may be empty.
//!
//! ```csv
//! street,number,neighbourhood,lat,lng,weight,priority
//! Rua da Bahia,1148,Centro,-19.9191,-43.9386,2.5,high
//! Av. Afonso Pena,,Funcionários,-19.9320,-43.9310,4.0,low
//! ```
//!
//! Every row is validated with [`RequestDraft::validate`]; the first invalid
//! row aborts the load so a half-imported batch never reaches the queue.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use df_core::GeoPoint;

use crate::{Priority, QueueError, QueueResult, RequestDraft};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RequestRecord {
    street:        String,
    number:        Option<String>,
    neighbourhood: Option<String>,
    lat:           f64,
    lng:           f64,
    weight:        f64,
    priority:      String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate request drafts from a CSV file.
pub fn load_requests_csv(path: &Path, max_weight: f64) -> QueueResult<Vec<RequestDraft>> {
    let file = std::fs::File::open(path).map_err(QueueError::Io)?;
    load_requests_reader(file, max_weight)
}

/// Like [`load_requests_csv`] but accepts any `Read` source.
pub fn load_requests_reader<R: Read>(reader: R, max_weight: f64) -> QueueResult<Vec<RequestDraft>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut drafts = Vec::new();

    for (i, result) in csv_reader.deserialize::<RequestRecord>().enumerate() {
        // Header is line 1, so data row i is line i + 2.
        let row = i + 2;
        let record = result.map_err(|e| QueueError::Parse(e.to_string()))?;
        let priority: Priority = record
            .priority
            .parse()
            .map_err(|e: String| QueueError::Parse(format!("row {row}: {e}")))?;

        let draft = RequestDraft {
            street:        Some(record.street),
            number:        record.number.filter(|n| !n.is_empty()),
            neighbourhood: record.neighbourhood.filter(|n| !n.is_empty()),
            destination:   Some(GeoPoint::new(record.lat, record.lng)),
            weight:        record.weight,
            priority,
        };
        draft
            .validate(max_weight)
            .map_err(|source| QueueError::Rejected { row, source })?;
        drafts.push(draft);
    }

    tracing::debug!(count = drafts.len(), "loaded request drafts from CSV");
    Ok(drafts)
}
