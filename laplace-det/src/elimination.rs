//! Determinant by LU decomposition with partial pivoting
//!
//! O(n³) alternative to cofactor expansion. Results differ from the
//! cofactor path in the last bits for non-integer inputs, so it is only
//! used when selected explicitly.

use laplace_core::{Matrix, Result};
use nalgebra::DMatrix;
use tracing::debug;

use crate::cofactor::check_square;

pub fn elimination_determinant(matrix: &Matrix) -> Result<f64> {
    let n = check_square(matrix, "determinant")?;
    let det = DMatrix::from_row_slice(n, n, matrix.as_slice()).lu().determinant();
    debug!(order = n, det, "elimination determinant");
    Ok(det)
}
