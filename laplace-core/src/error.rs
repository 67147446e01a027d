//! Structured matrix errors
//!
//! Every invalid input is reported as a value instead of terminating the
//! process. All checks run before either operand is touched, so a failed
//! operation leaves its inputs exactly as they were.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_DIMENSIONS: &str = "INVALID_DIMENSIONS";
    pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";
    pub const INSUFFICIENT_DATA: &str = "INSUFFICIENT_DATA";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
    pub const NOT_SQUARE: &str = "NOT_SQUARE";
    pub const SINGULAR: &str = "SINGULAR";
    pub const INVALID_CANONICAL_KIND: &str = "INVALID_CANONICAL_KIND";
    pub const OUT_OF_RANGE: &str = "OUT_OF_RANGE";
    pub const WORKER_POOL: &str = "WORKER_POOL";
}

/// Error type for matrix construction and arithmetic
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("numbers of rows and columns must be positive, got {rows}×{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("file \"{}\" not found: {reason}", .path.display())]
    FileNotFound { path: PathBuf, reason: String },

    #[error("insufficient data: expected {expected} numbers, found {found}")]
    InsufficientData { expected: usize, found: usize },

    #[error("invalid number {token:?} at position {position}")]
    Parse { token: String, position: usize },

    #[error("failed to read matrix data: {0}")]
    Io(String),

    #[error("{op}: incompatible dimensions {left_rows}×{left_cols} and {right_rows}×{right_cols}")]
    DimensionMismatch {
        op: &'static str,
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("{op}: requires square matrix, got {rows}×{cols}")]
    NotSquare { op: &'static str, rows: usize, cols: usize },

    #[error("matrix is degenerate (det = 0), inverse does not exist")]
    Singular,

    #[error("matrix is not comparable to tag {0} (only 0 = zero and 1 = unit are canonical)")]
    InvalidCanonicalKind(i64),

    #[error("index ({row}, {col}) out of range for {rows}×{cols} matrix")]
    OutOfRange { row: usize, col: usize, rows: usize, cols: usize },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Serializable summary of an error, for machine consumers
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
}

impl MatrixError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            MatrixError::InvalidDimensions { .. } => codes::INVALID_DIMENSIONS,
            MatrixError::FileNotFound { .. } => codes::FILE_NOT_FOUND,
            MatrixError::InsufficientData { .. } => codes::INSUFFICIENT_DATA,
            MatrixError::Parse { .. } => codes::PARSE_ERROR,
            MatrixError::Io(_) => codes::IO_ERROR,
            MatrixError::DimensionMismatch { .. } => codes::DIMENSION_MISMATCH,
            MatrixError::NotSquare { .. } => codes::NOT_SQUARE,
            MatrixError::Singular => codes::SINGULAR,
            MatrixError::InvalidCanonicalKind(_) => codes::INVALID_CANONICAL_KIND,
            MatrixError::OutOfRange { .. } => codes::OUT_OF_RANGE,
            MatrixError::WorkerPool(_) => codes::WORKER_POOL,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
        }
    }

    // ========== Common Error Constructors ==========

    pub fn mismatch(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Self {
        MatrixError::DimensionMismatch {
            op,
            left_rows: left.0,
            left_cols: left.1,
            right_rows: right.0,
            right_cols: right.1,
        }
    }

    pub fn not_square(op: &'static str, rows: usize, cols: usize) -> Self {
        MatrixError::NotSquare { op, rows, cols }
    }
}
