//! Core matrix type

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, Result};

/// Dense matrix of `f64` stored row-major in one contiguous buffer.
///
/// Dimensions are always at least 1×1 and `data.len() == rows * cols`.
/// Cloning produces an independent buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Unvalidated wire shape, checked on the way in
#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = MatrixError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        Matrix::from_vec(raw.rows, raw.cols, raw.data)
    }
}

/// Canonical square matrices a matrix can be compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Canonical {
    /// All elements zero
    Zero,
    /// Ones on the diagonal, zeros elsewhere
    Unit,
}

impl TryFrom<i64> for Canonical {
    type Error = MatrixError;

    fn try_from(tag: i64) -> Result<Self> {
        match tag {
            0 => Ok(Canonical::Zero),
            1 => Ok(Canonical::Unit),
            other => Err(MatrixError::InvalidCanonicalKind(other)),
        }
    }
}

impl Canonical {
    /// Generate the canonical matrix of the given order
    pub fn generate(self, order: usize) -> Result<Matrix> {
        match self {
            Canonical::Zero => Matrix::zeros(order),
            Canonical::Unit => Matrix::identity(order),
        }
    }
}

impl Default for Matrix {
    /// Placeholder 1×1 zero matrix
    fn default() -> Self {
        Matrix {
            rows: 1,
            cols: 1,
            data: vec![0.0],
        }
    }
}

impl Matrix {
    /// Validate dimensions and return the element count
    pub(crate) fn check_dims(rows: usize, cols: usize) -> Result<usize> {
        match rows.checked_mul(cols) {
            Some(len) if rows >= 1 && cols >= 1 => Ok(len),
            _ => Err(MatrixError::InvalidDimensions { rows, cols }),
        }
    }

    #[track_caller]
    fn flat_index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}×{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Build without validation; callers guarantee the invariant.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Matrix { rows, cols, data }
    }

    /// Get number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Check if matrix is square
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major view of the buffer
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    /// Iterate rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.cols)
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    /// Get element at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let idx = self.offset(row, col)?;
        Ok(self.data[idx])
    }

    /// Mutable access to element at (row, col)
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut f64> {
        let idx = self.offset(row, col)?;
        Ok(&mut self.data[idx])
    }

    /// Set element at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    /// Deep-copy `other` into `self`, reallocating when the shapes differ
    pub fn assign(&mut self, other: &Matrix) {
        if self.shape() == other.shape() {
            self.data.copy_from_slice(&other.data);
        } else {
            self.rows = other.rows;
            self.cols = other.cols;
            self.data = other.data.clone();
        }
    }

    /// Compare against a freshly generated zero or unit matrix of order `rows`
    pub fn equals_canonical(&self, kind: Canonical) -> Result<bool> {
        Ok(*self == kind.generate(self.rows)?)
    }

    /// Compare against the integer tag form (0 = zero, 1 = unit)
    pub fn equals_tag(&self, tag: i64) -> Result<bool> {
        self.equals_canonical(Canonical::try_from(tag)?)
    }

    /// Render as whitespace-separated rows, one per line
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl std::ops::Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[self.flat_index(row, col)]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        let index = self.flat_index(row, col);
        &mut self.data[index]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for (j, val) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
