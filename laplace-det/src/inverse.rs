//! Inverse through the adjugate
//!
//! `inverse(A) = adj(A) / det(A)`. Every adjugate entry needs its own
//! (n-1)×(n-1) determinant, so with cofactor expansion the whole inverse
//! costs O(n²·n!).

use laplace_core::{Matrix, MatrixError, Result};
use tracing::{debug, warn};

use crate::cofactor::check_square;
use crate::strategy::{Cofactor, DeterminantStrategy};

/// Sign of a cofactor at index sum `k`
fn cofactor_sign(k: usize) -> f64 {
    if k % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Adjugate of a square matrix, minors taken by `strategy`.
///
/// Entry `(i, j)` is the signed determinant of the transpose with row `i`
/// and column `j` removed, which is already the transposed cofactor matrix.
/// The adjugate of a 1×1 matrix is `[[1]]`.
pub fn adjugate_with(matrix: &Matrix, strategy: &dyn DeterminantStrategy) -> Result<Matrix> {
    let n = check_square(matrix, "adjugate")?;
    if n == 1 {
        return Matrix::identity(1);
    }

    let transpose = matrix.transpose();
    let mut adjugate = Matrix::new(n, n)?;
    for i in 0..n {
        for j in 0..n {
            let lower = transpose.minor(i, j)?;
            adjugate[(i, j)] = cofactor_sign(i + j) * strategy.determinant(&lower)?;
        }
    }
    Ok(adjugate)
}

/// Adjugate using sequential cofactor expansion
pub fn adjugate(matrix: &Matrix) -> Result<Matrix> {
    adjugate_with(matrix, &Cofactor)
}

/// Inverse with every determinant computed by `strategy`.
///
/// Fails with `NotSquare` before any work, and with `Singular` when the
/// determinant is exactly zero. Near-singular matrices are not rejected;
/// their inverse may hold huge values or infinities.
pub fn inverse_with(matrix: &Matrix, strategy: &dyn DeterminantStrategy) -> Result<Matrix> {
    let n = check_square(matrix, "inverse")?;
    let det = strategy.determinant(matrix)?;
    if det == 0.0 {
        warn!(order = n, strategy = strategy.name(), "inverse requested for singular matrix");
        return Err(MatrixError::Singular);
    }

    let adjugate = adjugate_with(matrix, strategy)?;
    debug!(order = n, det, strategy = strategy.name(), "inverse via adjugate");
    Ok(adjugate.divide(det))
}

/// Inverse using sequential cofactor expansion
pub fn inverse(matrix: &Matrix) -> Result<Matrix> {
    inverse_with(matrix, &Cofactor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Elimination, ParallelCofactor};

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_inverse_two_by_two() {
        let a = m(&[&[4.0, 7.0], &[2.0, 6.0]]);
        let inv = inverse(&a).unwrap();
        assert_eq!(inv, m(&[&[0.6, -0.7], &[-0.2, 0.4]]));
    }

    #[test]
    fn test_product_with_inverse_is_identity() {
        let cases = [
            m(&[&[2.0, 1.0], &[1.0, 1.0]]),
            m(&[&[1.0, 2.0, 3.0], &[0.0, 1.0, 4.0], &[5.0, 6.0, 0.0]]),
            m(&[&[2.0, 0.0, 0.0], &[0.0, 4.0, 0.0], &[0.0, 0.0, 8.0]]),
        ];
        for a in &cases {
            let inv = inverse(a).unwrap();
            let product = Matrix::multiply(a, &inv).unwrap();
            assert_eq!(product, Matrix::identity(a.rows()).unwrap(), "A = {:?}", a);
        }
    }

    #[test]
    fn test_adjugate_three_by_three() {
        let a = m(&[&[1.0, 2.0, 3.0], &[0.0, 1.0, 4.0], &[5.0, 6.0, 0.0]]);
        let adj = adjugate(&a).unwrap();
        assert_eq!(adj, m(&[&[-24.0, 18.0, 5.0], &[20.0, -15.0, -4.0], &[-5.0, 4.0, 1.0]]));
    }

    #[test]
    fn test_inverse_one_by_one() {
        assert_eq!(inverse(&m(&[&[4.0]])).unwrap(), m(&[&[0.25]]));
    }

    #[test]
    fn test_singular() {
        assert_eq!(inverse(&m(&[&[1.0, 2.0], &[2.0, 4.0]])), Err(MatrixError::Singular));
        assert_eq!(inverse(&Matrix::zeros(3).unwrap()), Err(MatrixError::Singular));
    }

    #[test]
    fn test_not_square() {
        let a = Matrix::new(2, 3).unwrap();
        assert_eq!(inverse(&a), Err(MatrixError::not_square("inverse", 2, 3)));
    }

    #[test]
    fn test_strategies_give_same_inverse() {
        let a = m(&[&[1.0, 2.0, 3.0], &[0.0, 1.0, 4.0], &[5.0, 6.0, 0.0]]);
        let expected = inverse(&a).unwrap();
        let parallel = inverse_with(&a, &ParallelCofactor::new(2).unwrap()).unwrap();
        assert_eq!(parallel, expected);

        let elimination = inverse_with(&a, &Elimination).unwrap();
        for (x, y) in elimination.as_slice().iter().zip(expected.as_slice()) {
            assert!((x - y).abs() < 1e-9);
        }
    }
}
