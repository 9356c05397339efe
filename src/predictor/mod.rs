//! Batch prediction engine for compiled models
//!
//! Evaluates a resolved prediction function over a feature matrix, choosing
//! one of two mutually exclusive strategies per call:
//! - **Row-parallel**: large batches are split into contiguous per-worker
//!   blocks evaluated concurrently, with the callee's internal parallelism
//!   pinned to one thread
//! - **Delegated**: small batches run as a sequential loop that hands the
//!   full worker count to the compiled function, which may parallelize
//!   internally (e.g. across ensemble members)
//!
//! Running both levels of parallelism at once oversubscribes the machine for
//! no benefit, so exactly one is ever active.

mod config;
mod dispatch;
mod engine;

pub use config::{PredictorConfig, DEFAULT_SYMBOL};
pub use dispatch::{partition_rows, DispatchStrategy};
pub use engine::{evaluate_into, CompiledPredictor};
