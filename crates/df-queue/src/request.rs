//! The delivery request entity.

use std::fmt;
use std::str::FromStr;

use df_core::{GeoPoint, RequestId, Tick};

// ── Priority ──────────────────────────────────────────────────────────────────

/// Customer-assigned urgency.  Higher priorities are served first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort key: larger means served earlier.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Priority::High   => 3,
            Priority::Medium => 2,
            Priority::Low    => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High   => "high",
            Priority::Medium => "medium",
            Priority::Low    => "low",
        };
        f.write_str(s)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high"   => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low"    => Ok(Priority::Low),
            other    => Err(format!(
                "invalid priority {other:?}: expected \"high\", \"medium\", or \"low\""
            )),
        }
    }
}

// ── RequestStatus ─────────────────────────────────────────────────────────────

/// Where a request is in its lifecycle.
///
/// ```text
/// Waiting → Staging → Loading → InTransit → Delivered
/// ```
///
/// `Waiting` is the only status the dispatcher may claim from.  A vehicle
/// forcibly reset after an invariant violation releases its requests back
/// to `Waiting`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestStatus {
    Waiting,
    Staging,
    Loading,
    InTransit,
    Delivered,
}

impl RequestStatus {
    /// `true` once a vehicle has claimed the request.
    #[inline]
    pub fn is_claimed(self) -> bool {
        !matches!(self, RequestStatus::Waiting)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestStatus::Waiting   => "waiting",
            RequestStatus::Staging   => "staging",
            RequestStatus::Loading   => "loading",
            RequestStatus::InTransit => "in transit",
            RequestStatus::Delivered => "delivered",
        };
        f.write_str(s)
    }
}

// ── Request ───────────────────────────────────────────────────────────────────

/// A weighted, prioritised delivery to one destination.
///
/// Created by the intake boundary (see [`RequestDraft`][crate::RequestDraft]),
/// mutated only by the dispatcher and the lifecycle scheduler, and moved to
/// the history ledger on delivery.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    pub id:            RequestId,
    /// Display address, e.g. "Rua da Bahia, 1148".
    pub address:       String,
    pub neighbourhood: Option<String>,
    pub destination:   GeoPoint,
    /// Payload mass in kg; positive and at most the vehicle capacity.
    pub weight:        f64,
    pub priority:      Priority,
    pub status:        RequestStatus,
    pub created_at:    Tick,
}
