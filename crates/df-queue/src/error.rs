use thiserror::Error;

/// Why a request was refused at intake.  Rejected requests never enter the
/// queue.
#[derive(Debug, Error, PartialEq)]
pub enum IntakeError {
    #[error("weight {weight} kg exceeds the maximum vehicle capacity of {max} kg")]
    CapacityExceeded { weight: f64, max: f64 },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("weight must be a positive number, got {0}")]
    InvalidWeight(f64),
}

pub type IntakeResult<T> = Result<T, IntakeError>;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("request CSV parse error: {0}")]
    Parse(String),

    #[error("request rejected at row {row}: {source}")]
    Rejected {
        row:    usize,
        #[source]
        source: IntakeError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type QueueResult<T> = Result<T, QueueError>;
