//! Matrix operations: arithmetic, scaling, transposition, minors, products

use std::ops::{Div, Mul};

use crate::error::{MatrixError, Result};
use crate::types::Matrix;

impl Matrix {
    fn check_same_dims(&self, other: &Matrix, op: &'static str) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(MatrixError::mismatch(op, self.shape(), other.shape()));
        }
        Ok(())
    }

    fn zip_with(&self, other: &Matrix, f: impl Fn(f64, f64) -> f64) -> Matrix {
        let data = self
            .as_slice()
            .iter()
            .zip(other.as_slice())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Matrix::from_parts(self.rows(), self.cols(), data)
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Matrix {
        let data = self.as_slice().iter().map(|&v| f(v)).collect();
        Matrix::from_parts(self.rows(), self.cols(), data)
    }

    /// Elementwise sum
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_dims(other, "add")?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    /// Elementwise difference
    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_dims(other, "sub")?;
        Ok(self.zip_with(other, |a, b| a - b))
    }

    /// In-place elementwise sum; `self` is untouched on error
    pub fn add_assign(&mut self, other: &Matrix) -> Result<()> {
        self.check_same_dims(other, "add")?;
        for (a, b) in self.data_mut().iter_mut().zip(other.as_slice()) {
            *a += b;
        }
        Ok(())
    }

    /// In-place elementwise difference; `self` is untouched on error
    pub fn sub_assign(&mut self, other: &Matrix) -> Result<()> {
        self.check_same_dims(other, "sub")?;
        for (a, b) in self.data_mut().iter_mut().zip(other.as_slice()) {
            *a -= b;
        }
        Ok(())
    }

    /// Multiply every element by `scalar`
    pub fn scale(&self, scalar: f64) -> Matrix {
        self.map(|v| v * scalar)
    }

    /// Scalar-first form of [`Matrix::scale`]
    pub fn scale_by(scalar: f64, matrix: &Matrix) -> Matrix {
        matrix.scale(scalar)
    }

    /// Divide every element by `scalar`.
    ///
    /// Division by zero is not checked: IEEE semantics apply, so the
    /// result holds infinities or NaN.
    pub fn divide(&self, scalar: f64) -> Matrix {
        self.map(|v| v / scalar)
    }

    /// Swap rows and columns: `result[j][i] = self[i][j]`
    pub fn transpose(&self) -> Matrix {
        let (rows, cols) = self.shape();
        let src = self.as_slice();
        let mut data = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            for i in 0..rows {
                data.push(src[i * cols + j]);
            }
        }
        Matrix::from_parts(cols, rows, data)
    }

    /// Copy of `self` without `row` and `col`, relative order preserved
    pub fn minor(&self, row: usize, col: usize) -> Result<Matrix> {
        let (rows, cols) = self.shape();
        if row >= rows || col >= cols {
            return Err(MatrixError::OutOfRange { row, col, rows, cols });
        }
        Matrix::check_dims(rows - 1, cols - 1)?;

        let data = self
            .iter_rows()
            .enumerate()
            .filter(|&(i, _)| i != row)
            .flat_map(|(_, r)| {
                r.iter()
                    .enumerate()
                    .filter(move |&(j, _)| j != col)
                    .map(|(_, &v)| v)
            })
            .collect();
        Ok(Matrix::from_parts(rows - 1, cols - 1, data))
    }

    /// Standard matrix product `first × second`
    pub fn multiply(first: &Matrix, second: &Matrix) -> Result<Matrix> {
        if first.cols() != second.rows() {
            return Err(MatrixError::mismatch("multiply", first.shape(), second.shape()));
        }

        let (n, inner, m) = (first.rows(), first.cols(), second.cols());
        let a = first.as_slice();
        let b = second.as_slice();
        let mut data = Vec::with_capacity(n * m);
        for i in 0..n {
            for j in 0..m {
                let mut sum = 0.0;
                for k in 0..inner {
                    sum += a[i * inner + k] * b[k * m + j];
                }
                data.push(sum);
            }
        }
        Ok(Matrix::from_parts(n, m, data))
    }

    /// Method form of [`Matrix::multiply`]
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        Matrix::multiply(self, other)
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, scalar: f64) -> Matrix {
        self.scale(scalar)
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(self, scalar: f64) -> Matrix {
        self.scale(scalar)
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, matrix: &Matrix) -> Matrix {
        matrix.scale(self)
    }
}

impl Mul<Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, matrix: Matrix) -> Matrix {
        matrix.scale(self)
    }
}

impl Div<f64> for &Matrix {
    type Output = Matrix;

    fn div(self, scalar: f64) -> Matrix {
        self.divide(scalar)
    }
}

impl Div<f64> for Matrix {
    type Output = Matrix;

    fn div(self, scalar: f64) -> Matrix {
        self.divide(scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_add_sub() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[10.0, 20.0], &[30.0, 40.0]]);

        assert_eq!(a.add(&b).unwrap(), m(&[&[11.0, 22.0], &[33.0, 44.0]]));
        assert_eq!(b.sub(&a).unwrap(), m(&[&[9.0, 18.0], &[27.0, 36.0]]));
        // Operands are not mutated
        assert_eq!(a, m(&[&[1.0, 2.0], &[3.0, 4.0]]));
    }

    #[test]
    fn test_add_mismatch() {
        let a = Matrix::new(2, 2).unwrap();
        let b = Matrix::new(2, 3).unwrap();
        assert!(matches!(a.add(&b), Err(MatrixError::DimensionMismatch { op: "add", .. })));
        assert!(matches!(a.sub(&b), Err(MatrixError::DimensionMismatch { op: "sub", .. })));
    }

    #[test]
    fn test_compound_assign_leaves_receiver_on_error() {
        let mut a = m(&[&[1.0, 2.0]]);
        let bad = Matrix::new(2, 1).unwrap();
        assert!(a.add_assign(&bad).is_err());
        assert!(a.sub_assign(&bad).is_err());
        assert_eq!(a, m(&[&[1.0, 2.0]]));

        a.add_assign(&m(&[&[1.0, 1.0]])).unwrap();
        assert_eq!(a, m(&[&[2.0, 3.0]]));
        a.sub_assign(&m(&[&[2.0, 2.0]])).unwrap();
        assert_eq!(a, m(&[&[0.0, 1.0]]));
    }

    #[test]
    fn test_scale_is_linear() {
        let a = m(&[&[1.0, -2.0, 3.5], &[0.0, 4.0, -6.0]]);
        for k in [0.0, -1.0, 2.5, -0.5, 1e6] {
            let scaled = a.scale(k);
            for i in 0..a.rows() {
                for j in 0..a.cols() {
                    assert_eq!(scaled[(i, j)], a[(i, j)] * k);
                }
            }
            // Both operand orders agree
            assert_eq!(k * &a, scaled);
            assert_eq!(&a * k, scaled);
            assert_eq!(Matrix::scale_by(k, &a), scaled);
        }
    }

    #[test]
    fn test_divide_by_zero_is_permissive() {
        let a = m(&[&[1.0, -1.0, 0.0]]);
        let d = &a / 0.0;
        assert_eq!(d[(0, 0)], f64::INFINITY);
        assert_eq!(d[(0, 1)], f64::NEG_INFINITY);
        assert!(d[(0, 2)].is_nan());
    }

    #[test]
    fn test_transpose() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t, m(&[&[1.0, 4.0], &[2.0, 5.0], &[3.0, 6.0]]));
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn test_minor() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]);
        assert_eq!(a.minor(1, 1).unwrap(), m(&[&[1.0, 3.0], &[7.0, 9.0]]));
        assert_eq!(a.minor(0, 2).unwrap(), m(&[&[4.0, 5.0], &[7.0, 8.0]]));
        assert!(matches!(a.minor(3, 0), Err(MatrixError::OutOfRange { .. })));

        let single = m(&[&[5.0]]);
        assert!(matches!(single.minor(0, 0), Err(MatrixError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_multiply() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let b = m(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]);
        let c = Matrix::multiply(&a, &b).unwrap();
        assert_eq!(c, m(&[&[58.0, 64.0], &[139.0, 154.0]]));
        assert_eq!(a.matmul(&Matrix::identity(3).unwrap()).unwrap(), a);
    }

    #[test]
    fn test_multiply_mismatch() {
        // 2×3 times 2×2 is undefined
        let a = Matrix::new(2, 3).unwrap();
        let b = Matrix::new(2, 2).unwrap();
        assert_eq!(
            Matrix::multiply(&a, &b),
            Err(MatrixError::mismatch("multiply", (2, 3), (2, 2)))
        );
    }
}
