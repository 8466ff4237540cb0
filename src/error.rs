// src/error.rs
use std::fmt;

/// Error types for the fast-lmm library
#[derive(Debug, Clone, PartialEq)]
pub enum LmmError {
    /// An input sequence is shorter than the grid requires
    InsufficientInputLength {
        parameter: String,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter values
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// A quantity left its numeric domain during curve construction or path simulation
    NumericDomainError {
        quantity: String,
        path: Option<usize>,
        tenor: usize,
        step: usize,
        value: f64,
        reason: String,
    },

    /// Index outside the valid range of a grid, vector or triangular matrix
    IndexOutOfRange {
        parameter: String,
        index: usize,
        len: usize,
    },

    /// Run stopped by a cancellation request between path completions
    Cancelled {
        completed_paths: usize,
        requested_paths: usize,
    },
}

impl LmmError {
    /// True for errors raised by input validation before any simulation work.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            LmmError::InsufficientInputLength { .. } | LmmError::InvalidParameter { .. }
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, LmmError::Cancelled { .. })
    }

    /// Attach the path index to a numeric-domain error raised inside a path.
    pub(crate) fn on_path(self, path_id: usize) -> Self {
        match self {
            LmmError::NumericDomainError {
                quantity,
                path: None,
                tenor,
                step,
                value,
                reason,
            } => LmmError::NumericDomainError {
                quantity,
                path: Some(path_id),
                tenor,
                step,
                value,
                reason,
            },
            other => other,
        }
    }
}

impl fmt::Display for LmmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LmmError::InsufficientInputLength {
                parameter,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Insufficient length for '{}': expected at least {}, got {}",
                    parameter, expected, actual
                )
            }
            LmmError::InvalidParameter {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            LmmError::NumericDomainError {
                quantity,
                path,
                tenor,
                step,
                value,
                reason,
            } => match path {
                Some(p) => write!(
                    f,
                    "Numeric domain error in {} = {} (path {}, tenor {}, step {}): {}",
                    quantity, value, p, tenor, step, reason
                ),
                None => write!(
                    f,
                    "Numeric domain error in {} = {} (tenor {}, step {}): {}",
                    quantity, value, tenor, step, reason
                ),
            },
            LmmError::IndexOutOfRange {
                parameter,
                index,
                len,
            } => {
                write!(
                    f,
                    "Index {} out of range for '{}' (valid range [0, {}))",
                    index, parameter, len
                )
            }
            LmmError::Cancelled {
                completed_paths,
                requested_paths,
            } => {
                write!(
                    f,
                    "Simulation cancelled after {} of {} paths",
                    completed_paths, requested_paths
                )
            }
        }
    }
}

impl std::error::Error for LmmError {}

/// Result type alias for fast-lmm operations
pub type LmmResult<T> = Result<T, LmmError>;

/// Validation utilities
pub mod validation {
    use super::{LmmError, LmmResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> LmmResult<()> {
        if value.is_nan() || value <= 0.0 {
            Err(LmmError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> LmmResult<()> {
        if value.is_nan() || value < 0.0 {
            Err(LmmError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> LmmResult<()> {
        if !value.is_finite() {
            Err(LmmError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> LmmResult<()> {
        if paths == 0 {
            Err(LmmError::InvalidParameter {
                parameter: "paths".to_string(),
                value: 0.0,
                constraint: "must be greater than 0".to_string(),
            })
        } else if paths > 1_000_000_000 {
            Err(LmmError::InvalidParameter {
                parameter: "paths".to_string(),
                value: paths as f64,
                constraint: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that an input sequence covers at least `expected` entries
    pub fn validate_min_len(name: &str, actual: usize, expected: usize) -> LmmResult<()> {
        if actual < expected {
            Err(LmmError::InsufficientInputLength {
                parameter: name.to_string(),
                expected,
                actual,
            })
        } else {
            Ok(())
        }
    }
}
