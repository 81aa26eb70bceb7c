//! Validation at the intake boundary.
//!
//! Collaborators (an HTTP handler, the CSV loader, a demand generator) build
//! a [`RequestDraft`] from whatever they received and call
//! [`RequestDraft::into_request`].  Only validated requests reach the queue.

use df_core::{GeoPoint, RequestId, Tick};

use crate::{IntakeError, IntakeResult, Priority, Request, RequestStatus};

/// Unvalidated request fields as received from outside the core.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDraft {
    pub street:        Option<String>,
    /// House number; formatted as "s/n" when absent.
    pub number:        Option<String>,
    pub neighbourhood: Option<String>,
    pub destination:   Option<GeoPoint>,
    pub weight:        f64,
    pub priority:      Priority,
}

impl RequestDraft {
    /// A draft with every required field present.
    pub fn new(street: impl Into<String>, destination: GeoPoint, weight: f64, priority: Priority) -> Self {
        Self {
            street:        Some(street.into()),
            number:        None,
            neighbourhood: None,
            destination:   Some(destination),
            weight,
            priority,
        }
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn neighbourhood(mut self, neighbourhood: impl Into<String>) -> Self {
        self.neighbourhood = Some(neighbourhood.into());
        self
    }

    /// Check the draft against `max_weight` without consuming it.
    ///
    /// The capacity check runs first so an oversized parcel is reported as
    /// such even when other fields are also missing.
    pub fn validate(&self, max_weight: f64) -> IntakeResult<()> {
        if self.weight > max_weight {
            return Err(IntakeError::CapacityExceeded { weight: self.weight, max: max_weight });
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(IntakeError::InvalidWeight(self.weight));
        }
        match &self.street {
            Some(s) if !s.trim().is_empty() => {}
            _ => return Err(IntakeError::MissingField("address")),
        }
        if self.destination.is_none() {
            return Err(IntakeError::MissingField("destination"));
        }
        Ok(())
    }

    /// Validate and turn the draft into a `Waiting` request.
    pub fn into_request(self, id: RequestId, created_at: Tick, max_weight: f64) -> IntakeResult<Request> {
        self.validate(max_weight)?;

        let (Some(street), Some(destination)) = (self.street, self.destination) else {
            return Err(IntakeError::MissingField("destination"));
        };
        let number = self
            .number
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "s/n".to_string());

        Ok(Request {
            id,
            address:       format!("{}, {}", street.trim(), number.trim()),
            neighbourhood: self.neighbourhood,
            destination,
            weight:        self.weight,
            priority:      self.priority,
            status:        RequestStatus::Waiting,
            created_at,
        })
    }
}
