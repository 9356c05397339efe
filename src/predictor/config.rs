//! Predictor configuration

use serde::{Deserialize, Serialize};

/// Symbol name compiled models export by default.
pub const DEFAULT_SYMBOL: &str = "evaluate";

/// Configuration for a [`CompiledPredictor`](super::CompiledPredictor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Name of the exported prediction function
    pub symbol: String,

    /// Default worker count for the allocating predict API.
    /// `None` means use rayon's current thread count.
    pub n_workers: Option<usize>,

    /// Dispatch threshold factor: row-parallel evaluation requires
    /// `n_samples > parallel_factor * n_workers`
    pub parallel_factor: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            n_workers: None,
            parallel_factor: 2,
        }
    }
}

impl PredictorConfig {
    /// Create a new predictor configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the exported symbol name
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Builder method to set the default number of workers
    pub fn with_n_workers(mut self, n: usize) -> Self {
        self.n_workers = Some(n);
        self
    }

    /// Builder method to set the dispatch threshold factor
    pub fn with_parallel_factor(mut self, factor: usize) -> Self {
        self.parallel_factor = factor;
        self
    }
}
