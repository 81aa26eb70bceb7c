//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `DfError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// The top-level error type for `df-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum DfError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `df-*` crates.
pub type DfResult<T> = Result<T, DfError>;
