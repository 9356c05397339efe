//! Native Inference - batch prediction over compiled model functions
//!
//! This crate evaluates a model that was compiled ahead of time into a native
//! shared object exporting a single prediction function with a fixed C ABI:
//! `double evaluate(const float *row, int num_threads)`. It provides:
//! - Loading and symbol resolution for compiled model modules
//! - Batch prediction over feature matrices
//! - Adaptive dispatch between per-row parallelism and the compiled
//!   function's own internal parallelism
//!
//! # Modules
//!
//! - [`loader`] - Compiled module loading and symbol resolution
//! - [`predictor`] - Batch prediction engine with adaptive parallel dispatch
//! - [`error`] - Crate-wide error types
//!
//! # Example
//!
//! ```no_run
//! use native_inference::prelude::*;
//! use ndarray::Array2;
//!
//! let config = PredictorConfig::new().with_n_workers(8);
//! let predictor = CompiledPredictor::load("models/libmodel.so", config)?;
//!
//! let features = Array2::<f32>::zeros((1024, 32));
//! let scores = predictor.predict(features.view());
//! assert_eq!(scores.len(), 1024);
//! # Ok::<(), native_inference::InferenceError>(())
//! ```

// Core error handling
pub mod error;

// Compiled module lifecycle
pub mod loader;

// Batch prediction
pub mod predictor;

pub use error::{InferenceError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{InferenceError, Result};

    // Module loading
    pub use crate::loader::{CompiledModule, EvalFn};

    // Prediction
    pub use crate::predictor::{CompiledPredictor, DispatchStrategy, PredictorConfig};
}
