//! Compiled module loading and symbol resolution.
//!
//! A compiled model is a native shared object exporting one prediction
//! function with the fixed signature `double (const float *row, int
//! num_threads)`. [`CompiledModule`] opens such a module with immediate
//! symbol binding, resolves the exported function by name, and keeps the
//! library alive for as long as the resolved pointer may be called.

mod module;

pub use module::{CompiledModule, EvalFn};
