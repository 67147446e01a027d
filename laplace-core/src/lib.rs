//! Laplace Core - Fundamental types
//!
//! This crate provides the core types used throughout Laplace:
//! - `Matrix`: dense row-major `f64` matrix with value semantics
//! - `Canonical`: the zero and unit matrices used for comparison
//! - `MatrixError`: structured, recoverable errors with machine-readable codes
//!
//! Matrices can be built from dimensions, from an existing 2D buffer, or by
//! reading whitespace-separated numbers from a file.

mod types;
mod construct;
mod ops;
mod error;

pub use types::{Matrix, Canonical};
pub use construct::read_numbers;
pub use error::{MatrixError, ErrorReport, Result, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Matrix, Canonical, MatrixError, Result};
    pub use crate::error::codes;
}
