//! Determinant strategies

use std::sync::Arc;

use laplace_core::{Matrix, Result};
use rayon::ThreadPool;

use crate::cofactor::cofactor_determinant;
use crate::elimination::elimination_determinant;
use crate::parallel::{build_pool, parallel_cofactor_determinant_in};

/// A way of computing the determinant of a square matrix
pub trait DeterminantStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn determinant(&self, matrix: &Matrix) -> Result<f64>;
}

/// Sequential Laplace expansion along the first row
#[derive(Debug, Clone, Copy, Default)]
pub struct Cofactor;

impl DeterminantStrategy for Cofactor {
    fn name(&self) -> &'static str {
        "cofactor"
    }

    fn determinant(&self, matrix: &Matrix) -> Result<f64> {
        cofactor_determinant(matrix)
    }
}

/// Laplace expansion with first-row terms fanned out over a worker pool
#[derive(Clone)]
pub struct ParallelCofactor {
    pool: Arc<ThreadPool>,
}

impl ParallelCofactor {
    /// `workers == 0` sizes the pool to the number of CPUs
    pub fn new(workers: usize) -> Result<Self> {
        Ok(ParallelCofactor {
            pool: build_pool(workers)?,
        })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl std::fmt::Debug for ParallelCofactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelCofactor")
            .field("workers", &self.workers())
            .finish()
    }
}

impl DeterminantStrategy for ParallelCofactor {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn determinant(&self, matrix: &Matrix) -> Result<f64> {
        parallel_cofactor_determinant_in(&self.pool, matrix)
    }
}

/// Gaussian elimination with partial pivoting
#[derive(Debug, Clone, Copy, Default)]
pub struct Elimination;

impl DeterminantStrategy for Elimination {
    fn name(&self) -> &'static str {
        "elimination"
    }

    fn determinant(&self, matrix: &Matrix) -> Result<f64> {
        elimination_determinant(matrix)
    }
}
