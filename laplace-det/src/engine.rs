//! Determinant/inverse engine configured with a strategy

use laplace_core::{Matrix, Result};
use tracing::{debug, info};

use crate::config::{EngineConfig, StrategyKind};
use crate::inverse::{adjugate_with, inverse_with};
use crate::strategy::{Cofactor, DeterminantStrategy, Elimination, ParallelCofactor};

/// Computes determinants and inverses with one configured strategy.
///
/// The inverse is always assembled from the adjugate; the strategy decides
/// how the determinant and every minor determinant are computed.
pub struct Engine {
    config: EngineConfig,
    strategy: Box<dyn DeterminantStrategy>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let strategy: Box<dyn DeterminantStrategy> = match config.strategy {
            StrategyKind::Cofactor => Box::new(Cofactor),
            StrategyKind::Parallel => Box::new(ParallelCofactor::new(config.workers)?),
            StrategyKind::Elimination => Box::new(Elimination),
        };
        info!(strategy = strategy.name(), workers = config.workers, "engine ready");
        Ok(Engine { config, strategy })
    }

    /// Engine configured from `LAPLACE_STRATEGY` / `LAPLACE_WORKERS`
    pub fn from_env() -> Result<Self> {
        Self::new(EngineConfig::from_env())
    }

    /// Replace the strategy with a custom implementation
    pub fn with_strategy(mut self, strategy: Box<dyn DeterminantStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn determinant(&self, matrix: &Matrix) -> Result<f64> {
        debug!(rows = matrix.rows(), cols = matrix.cols(), strategy = self.strategy.name(), "determinant");
        self.strategy.determinant(matrix)
    }

    pub fn adjugate(&self, matrix: &Matrix) -> Result<Matrix> {
        adjugate_with(matrix, self.strategy.as_ref())
    }

    pub fn inverse(&self, matrix: &Matrix) -> Result<Matrix> {
        debug!(rows = matrix.rows(), cols = matrix.cols(), strategy = self.strategy.name(), "inverse");
        inverse_with(matrix, self.strategy.as_ref())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine {
            config: EngineConfig::default(),
            strategy: Box::new(Cofactor),
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
