//! Determinant by recursive cofactor (Laplace) expansion
//!
//! Expansion always runs along the first remaining row. The active minor is
//! described by `(start_row, end_row, end_col, excluded)`: rows
//! `start_row..=end_row` and every column in `0..=end_col` not yet claimed by
//! an ancestor row. Cost is O(n!), so this is only practical for small
//! matrices; see [`crate::elimination`] for the O(n³) alternative.

use laplace_core::{Matrix, MatrixError, Result};
use tracing::debug;

/// Set of columns already used by ancestor rows of the expansion.
///
/// Within one call tree the mask is mutated and restored around each
/// recursive step, which is only valid for strictly depth-first,
/// single-threaded recursion. Concurrent branches must each own a clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMask {
    words: Vec<u64>,
}

impl ColumnMask {
    /// Empty mask able to hold columns `0..cols`
    pub fn new(cols: usize) -> Self {
        ColumnMask {
            words: vec![0; cols.div_ceil(64).max(1)],
        }
    }

    pub fn contains(&self, col: usize) -> bool {
        self.words[col / 64] & (1 << (col % 64)) != 0
    }

    pub fn insert(&mut self, col: usize) {
        self.words[col / 64] |= 1 << (col % 64);
    }

    pub fn remove(&mut self, col: usize) {
        self.words[col / 64] &= !(1 << (col % 64));
    }

    /// Copy of the mask with `col` added
    pub fn with(&self, col: usize) -> Self {
        let mut next = self.clone();
        next.insert(col);
        next
    }
}

/// Sign of the `position`-th surviving column: +1, -1, +1, ...
pub(crate) fn alternating_sign(position: usize) -> f64 {
    if position % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// One signed term of the expansion. Shared by the sequential and parallel
/// paths so both evaluate the product in the same order.
pub(crate) fn signed_term(sign: f64, element: f64, sub_determinant: f64) -> f64 {
    sign * element * sub_determinant
}

/// Determinant of the active minor
pub(crate) fn expand(
    matrix: &Matrix,
    start_row: usize,
    end_row: usize,
    end_col: usize,
    excluded: &mut ColumnMask,
) -> f64 {
    let width = matrix.cols();
    let row = &matrix.as_slice()[start_row * width..(start_row + 1) * width];

    if start_row == end_row {
        return (0..=end_col)
            .find(|&j| !excluded.contains(j))
            .map_or(0.0, |j| row[j]);
    }

    let mut result = 0.0;
    let mut position = 0;
    for j in 0..=end_col {
        if excluded.contains(j) {
            continue;
        }
        excluded.insert(j);
        let sub = expand(matrix, start_row + 1, end_row, end_col, excluded);
        excluded.remove(j);

        result += signed_term(alternating_sign(position), row[j], sub);
        position += 1;
    }
    result
}

pub(crate) fn check_square(matrix: &Matrix, op: &'static str) -> Result<usize> {
    if !matrix.is_square() {
        return Err(MatrixError::not_square(op, matrix.rows(), matrix.cols()));
    }
    Ok(matrix.rows())
}

/// Determinant of a square matrix by full Laplace expansion
pub fn cofactor_determinant(matrix: &Matrix) -> Result<f64> {
    let n = check_square(matrix, "determinant")?;
    let mut excluded = ColumnMask::new(n);
    let det = expand(matrix, 0, n - 1, n - 1, &mut excluded);
    debug!(order = n, det, "cofactor determinant");
    Ok(det)
}
