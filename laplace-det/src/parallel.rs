//! Parallel cofactor expansion
//!
//! The first-row expansion is split into one task per column. Each task
//! owns its own [`ColumnMask`] (copied at the fan-out point) and reads the
//! matrix through a shared reference, so no locking is needed. Terms are
//! collected in column order and summed sequentially, which makes the
//! result bit-identical to [`cofactor_determinant`](crate::cofactor_determinant)
//! regardless of how workers are scheduled.

use std::sync::Arc;

use laplace_core::{Matrix, MatrixError, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::cofactor::{alternating_sign, check_square, expand, signed_term, ColumnMask};

/// Build a bounded worker pool. `workers == 0` uses one thread per CPU.
pub fn build_pool(workers: usize) -> Result<Arc<ThreadPool>> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("laplace-det-{}", i))
        .build()
        .map_err(|e| MatrixError::WorkerPool(e.to_string()))?;
    Ok(Arc::new(pool))
}

/// Signed cofactor term for column `col` of the first row
fn first_row_term(matrix: &Matrix, order: usize, col: usize) -> f64 {
    let mut excluded = ColumnMask::new(order).with(col);
    let sub = expand(matrix, 1, order - 1, order - 1, &mut excluded);
    let term = signed_term(alternating_sign(col), matrix[(0, col)], sub);
    trace!(col, term, "first-row cofactor term");
    term
}

/// Determinant with first-row terms computed on `pool`
pub fn parallel_cofactor_determinant_in(pool: &ThreadPool, matrix: &Matrix) -> Result<f64> {
    let n = check_square(matrix, "determinant")?;
    if n == 1 {
        return Ok(matrix[(0, 0)]);
    }

    let terms: Vec<f64> = pool.install(|| {
        (0..n)
            .into_par_iter()
            .map(|col| first_row_term(matrix, n, col))
            .collect()
    });

    // Fixed column order keeps the floating-point sum reproducible
    let det = terms.iter().fold(0.0, |acc, &term| acc + term);
    debug!(order = n, workers = pool.current_num_threads(), det, "parallel cofactor determinant");
    Ok(det)
}

/// Determinant on a fresh pool of `workers` threads
pub fn parallel_cofactor_determinant(matrix: &Matrix, workers: usize) -> Result<f64> {
    check_square(matrix, "determinant")?;
    let pool = build_pool(workers)?;
    parallel_cofactor_determinant_in(&pool, matrix)
}
