//! Error types for compiled-model loading

use thiserror::Error;

/// Result type alias for native inference operations
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Main error type for compiled-model construction.
///
/// Both kinds are raised synchronously at construction time and are
/// non-retryable; prediction itself has no error path.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Cannot load compiled model from '{path}': {reason}")]
    ModuleNotFound { path: String, reason: String },

    #[error("Symbol '{symbol}' not found in compiled model: {reason}")]
    SymbolNotFound { symbol: String, reason: String },
}
