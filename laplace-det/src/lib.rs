//! Laplace Det - Determinants and inverses
//!
//! Provides the determinant/inverse engine for Laplace matrices:
//! - Cofactor (Laplace) expansion along the first remaining row, O(n!)
//! - Parallel cofactor expansion over a bounded rayon pool
//! - Gaussian elimination as an explicitly selected O(n³) alternative
//! - Adjugate and inverse, `inverse(A) = adj(A) / det(A)`
//! - `Engine` + `EngineConfig` to pick a strategy from JSON or the environment

mod cofactor;
mod parallel;
mod elimination;
mod strategy;
mod inverse;
mod config;
mod engine;

pub use cofactor::{cofactor_determinant, ColumnMask};
pub use parallel::{build_pool, parallel_cofactor_determinant, parallel_cofactor_determinant_in};
pub use elimination::elimination_determinant;
pub use strategy::{DeterminantStrategy, Cofactor, ParallelCofactor, Elimination};
pub use inverse::{adjugate, adjugate_with, inverse, inverse_with};
pub use config::{EngineConfig, StrategyKind, STRATEGY_ENV, WORKERS_ENV};
pub use engine::Engine;

use laplace_core::{Matrix, Result};

/// Determinant and inverse as methods on [`Matrix`]
pub trait MatrixDeterminant {
    /// Cofactor-expansion determinant
    fn determinant(&self) -> Result<f64>;
    /// Cofactor-expansion determinant on `workers` threads
    fn determinant_parallel(&self, workers: usize) -> Result<f64>;
    /// Adjugate inverse
    fn inverse(&self) -> Result<Matrix>;
}

impl MatrixDeterminant for Matrix {
    fn determinant(&self) -> Result<f64> {
        cofactor_determinant(self)
    }

    fn determinant_parallel(&self, workers: usize) -> Result<f64> {
        parallel_cofactor_determinant(self, workers)
    }

    fn inverse(&self) -> Result<Matrix> {
        inverse(self)
    }
}
