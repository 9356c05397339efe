//! Compiled module handle and symbol resolution
//!
//! Wraps `libloading` so the rest of the crate never touches raw dlopen
//! handles: the library is opened with immediate binding, the prediction
//! symbol is resolved exactly once, and the handle is released exactly once
//! when the owning [`CompiledModule`] is dropped.

use std::fmt;
use std::os::raw::c_int;
use std::path::{Path, PathBuf};

use libloading::Library;

use crate::error::{InferenceError, Result};

/// Signature of the prediction function exported by a compiled model.
///
/// Takes a pointer to one contiguous row of `f32` features and a worker-count
/// hint (the maximum number of threads the callee may use internally), and
/// returns the model's scalar prediction for that row.
///
/// # Safety
///
/// The ABI cannot be verified against the module's actual export. Callers
/// must only invoke pointers resolved from modules built for this exact
/// signature, and must pass a pointer to at least as many floats as the
/// compiled model reads.
pub type EvalFn = unsafe extern "C" fn(*const f32, c_int) -> f64;

/// A loaded compiled model: the shared-object handle plus its resolved
/// prediction function.
///
/// The function pointer stays valid for exactly as long as this struct is
/// alive; dropping it closes the underlying library once.
pub struct CompiledModule {
    // `eval` points into `library`; the handle must stay alive for every
    // call through the pointer.
    library: Library,
    eval: EvalFn,
    path: PathBuf,
}

impl CompiledModule {
    /// Open the shared object at `path` and resolve `symbol` as the model's
    /// prediction function.
    ///
    /// Fails with [`InferenceError::ModuleNotFound`] when the module cannot
    /// be opened (bad path, wrong format, missing dependencies) and with
    /// [`InferenceError::SymbolNotFound`] when it loads but lacks the
    /// requested export. In the latter case the freshly opened handle is
    /// released before the error propagates, so failed constructions never
    /// leak.
    pub fn load(path: impl AsRef<Path>, symbol: &str) -> Result<Self> {
        let path = path.as_ref();

        let library = open_now(path).map_err(|e| InferenceError::ModuleNotFound {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let eval = unsafe {
            match library.get::<EvalFn>(symbol.as_bytes()) {
                Ok(sym) => *sym,
                // `library` is dropped on this return path, closing the handle
                Err(e) => {
                    return Err(InferenceError::SymbolNotFound {
                        symbol: symbol.to_string(),
                        reason: e.to_string(),
                    })
                }
            }
        };

        tracing::debug!(path = %path.display(), symbol, "loaded compiled model");

        Ok(Self {
            library,
            eval,
            path: path.to_path_buf(),
        })
    }

    /// The resolved prediction function.
    ///
    /// The returned pointer is `Copy` and safe to share across threads, but
    /// must not be called after this module is dropped.
    pub fn eval_fn(&self) -> EvalFn {
        self.eval
    }

    /// Path the module was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for CompiledModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledModule")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Open a shared object with immediate (non-lazy) symbol binding.
///
/// RTLD_NOW surfaces missing-dependency failures at load time, where they
/// are still reportable as [`InferenceError::ModuleNotFound`].
#[cfg(unix)]
fn open_now(path: &Path) -> std::result::Result<Library, libloading::Error> {
    use libloading::os::unix::{Library as UnixLibrary, RTLD_LOCAL, RTLD_NOW};

    unsafe { UnixLibrary::open(Some(path), RTLD_NOW | RTLD_LOCAL).map(Library::from) }
}

#[cfg(not(unix))]
fn open_now(path: &Path) -> std::result::Result<Library, libloading::Error> {
    unsafe { Library::new(path) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_module_is_module_not_found() {
        let err = CompiledModule::load("/nonexistent/libmodel.so", "evaluate").unwrap_err();
        assert!(matches!(err, InferenceError::ModuleNotFound { .. }));
        assert!(err.to_string().contains("/nonexistent/libmodel.so"));
    }

    #[test]
    fn test_garbage_file_is_module_not_found() {
        // A regular non-ELF file must be rejected at open time, not at call time
        let tmp = tempfile::NamedTempFile::with_suffix(".so").unwrap();
        std::fs::write(tmp.path(), b"not a shared object").unwrap();

        let err = CompiledModule::load(tmp.path(), "evaluate").unwrap_err();
        assert!(matches!(err, InferenceError::ModuleNotFound { .. }));
    }
}
