//! The error type of this crate.

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdTreeError {
    /// Construction or query arguments that violate the documented contract, such as
    /// mismatched point and payload counts or a negative search radius.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An axis index outside of `0..3`.
    #[error("Axis {axis} out of range, expected 0, 1 or 2")]
    OutOfRange { axis: usize },
}

pub type Result<T> = std::result::Result<T, KdTreeError>;
