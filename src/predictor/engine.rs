//! Prediction engine implementation
//!
//! Owns a loaded compiled module and evaluates it over feature batches:
//! - Per-row parallel evaluation via rayon for large batches
//! - Delegation to the compiled function's internal parallelism for small ones
//! - Index-owned output writes, so no synchronization on the result buffer

use std::os::raw::c_int;
use std::path::Path;

use ndarray::{Array1, ArrayView2};
use rayon::prelude::*;

use super::dispatch::{partition_rows, DispatchStrategy};
use super::PredictorConfig;
use crate::error::Result;
use crate::loader::{CompiledModule, EvalFn};

/// Evaluate a resolved prediction function over every row of `features`,
/// writing one result per row into `output`.
///
/// This is the building block behind [`CompiledPredictor::predict_into`]; it
/// is public so callers holding an [`EvalFn`] from elsewhere can reuse the
/// dispatch policy.
///
/// Strategy is chosen once per call via
/// [`DispatchStrategy::select`]`(n_samples, n_workers, parallel_factor)`:
/// - `RowParallel`: rows are split into `n_workers` contiguous blocks
///   ([`partition_rows`]), one rayon task per block, and every call receives
///   a worker hint of `1`: outer workers are already saturated, so the
///   callee must not spawn threads of its own.
/// - `Delegated`: a sequential in-order loop passes `n_workers` to every
///   call, letting the compiled function parallelize internally.
///
/// # Contract
///
/// `output.len()` must equal `features.nrows()`, `features` must be in
/// standard (row-major, contiguous) layout, and `n_workers >= 1`. These are
/// debug-asserted only; release builds trust the caller. The compiled
/// function itself has no error path: whatever it returns lands in `output`.
pub fn evaluate_into(
    eval: EvalFn,
    features: ArrayView2<'_, f32>,
    output: &mut [f64],
    n_workers: usize,
    parallel_factor: usize,
) {
    let n_samples = features.nrows();
    debug_assert_eq!(output.len(), n_samples);
    debug_assert!(n_workers >= 1);
    debug_assert!(features.is_standard_layout());

    let strategy = DispatchStrategy::select(n_samples, n_workers, parallel_factor);
    tracing::trace!(n_samples, n_workers, ?strategy, "dispatching batch");

    match strategy {
        DispatchStrategy::RowParallel => {
            // One owner per output index: the buffer is pre-split into the
            // same contiguous blocks as the row partition.
            let mut blocks = Vec::with_capacity(n_workers);
            let mut rest = output;
            for range in partition_rows(n_samples, n_workers) {
                let (head, tail) = rest.split_at_mut(range.len());
                blocks.push((range.start, head));
                rest = tail;
            }

            blocks.into_par_iter().for_each(|(start, block)| {
                for (offset, slot) in block.iter_mut().enumerate() {
                    let row = features.row(start + offset);
                    *slot = unsafe { eval(row.as_ptr(), 1) };
                }
            });
        }
        DispatchStrategy::Delegated => {
            let hint = n_workers as c_int;
            for (row, slot) in features.rows().into_iter().zip(output.iter_mut()) {
                *slot = unsafe { eval(row.as_ptr(), hint) };
            }
        }
    }
}

/// Batch predictor over a compiled model.
///
/// Holds the loaded module (and with it the resolved prediction pointer) for
/// its whole lifetime; dropping the predictor closes the module exactly once.
#[derive(Debug)]
pub struct CompiledPredictor {
    module: CompiledModule,
    config: PredictorConfig,
}

impl CompiledPredictor {
    /// Load the compiled model at `path` and resolve the symbol named by
    /// `config.symbol`.
    ///
    /// Propagates [`ModuleNotFound`](crate::InferenceError::ModuleNotFound) /
    /// [`SymbolNotFound`](crate::InferenceError::SymbolNotFound) from the
    /// loader; on failure nothing is retained.
    pub fn load(path: impl AsRef<Path>, config: PredictorConfig) -> Result<Self> {
        let module = CompiledModule::load(path, &config.symbol)?;
        Ok(Self { module, config })
    }

    /// Load with the default configuration (symbol `"evaluate"`).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(path, PredictorConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// The underlying compiled module.
    pub fn module(&self) -> &CompiledModule {
        &self.module
    }

    /// Evaluate every row of `features` into the caller-provided `output`
    /// buffer using `n_workers` workers.
    ///
    /// See [`evaluate_into`] for the dispatch policy and the caller contract.
    pub fn predict_into(
        &self,
        features: ArrayView2<'_, f32>,
        output: &mut [f64],
        n_workers: usize,
    ) {
        evaluate_into(
            self.module.eval_fn(),
            features,
            output,
            n_workers,
            self.config.parallel_factor,
        );
    }

    /// Evaluate every row of `features` with an explicit worker count,
    /// returning a freshly allocated result array.
    pub fn predict_with(&self, features: ArrayView2<'_, f32>, n_workers: usize) -> Array1<f64> {
        let mut output = vec![0.0; features.nrows()];
        self.predict_into(features, &mut output, n_workers);
        Array1::from_vec(output)
    }

    /// Evaluate every row of `features` with the configured default worker
    /// count (rayon's current thread count when unset).
    pub fn predict(&self, features: ArrayView2<'_, f32>) -> Array1<f64> {
        let n_workers = self
            .config
            .n_workers
            .unwrap_or_else(rayon::current_num_threads);
        self.predict_with(features, n_workers)
    }
}
