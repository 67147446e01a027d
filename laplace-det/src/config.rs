//! Engine configuration
//!
//! Defaults can be overridden by a JSON document or by environment
//! variables:
//! - `LAPLACE_STRATEGY`: `cofactor` (default), `parallel` or `elimination`
//! - `LAPLACE_WORKERS`: worker threads for `parallel`, 0 = one per CPU

use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const STRATEGY_ENV: &str = "LAPLACE_STRATEGY";
pub const WORKERS_ENV: &str = "LAPLACE_WORKERS";

/// Which determinant algorithm the engine uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Sequential cofactor expansion, O(n!)
    #[default]
    Cofactor,
    /// Cofactor expansion with first-row terms on a worker pool
    Parallel,
    /// Gaussian elimination with partial pivoting, O(n³)
    Elimination,
}

impl StrategyKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cofactor" | "laplace" => Some(StrategyKind::Cofactor),
            "parallel" | "threads" => Some(StrategyKind::Parallel),
            "elimination" | "gauss" | "lu" => Some(StrategyKind::Elimination),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub strategy: StrategyKind,
    pub workers: usize,
}

impl EngineConfig {
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Defaults overridden by `LAPLACE_STRATEGY` / `LAPLACE_WORKERS`
    pub fn from_env() -> Self {
        Self::default().apply_overrides(
            env::var(STRATEGY_ENV).ok().as_deref(),
            env::var(WORKERS_ENV).ok().as_deref(),
        )
    }

    /// Apply textual overrides, ignoring (with a warning) values that
    /// do not parse
    pub fn apply_overrides(mut self, strategy: Option<&str>, workers: Option<&str>) -> Self {
        if let Some(s) = strategy {
            match StrategyKind::from_str(s) {
                Some(kind) => self.strategy = kind,
                None => warn!(value = s, "unknown {}, keeping {:?}", STRATEGY_ENV, self.strategy),
            }
        }
        if let Some(w) = workers {
            match w.trim().parse::<usize>() {
                Ok(n) => self.workers = n,
                Err(_) => warn!(value = w, "invalid {}, keeping {}", WORKERS_ENV, self.workers),
            }
        }
        self
    }
}
