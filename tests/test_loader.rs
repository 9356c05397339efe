//! Integration tests: compiled module loading and symbol resolution

#[macro_use]
mod common;

use native_inference::loader::{CompiledModule, EvalFn};
use native_inference::InferenceError;

#[test]
fn test_load_and_call_resolved_symbol() {
    let dir = tempfile::tempdir().unwrap();
    let path = require_model!(dir.path(), "probe", common::PROBE_MODEL);

    let module = CompiledModule::load(&path, "evaluate").unwrap();
    assert_eq!(module.path(), path);

    let eval: EvalFn = module.eval_fn();
    let row = [3.0_f32, 0.0];
    let y = unsafe { eval(row.as_ptr(), 5) };
    assert_eq!(y, 3.0 * 2.0 + 5.0);
}

#[test]
fn test_missing_module_fails_with_module_not_found() {
    let err = CompiledModule::load("/no/such/dir/libmodel.so", "evaluate").unwrap_err();
    match err {
        InferenceError::ModuleNotFound { path, .. } => {
            assert!(path.contains("libmodel.so"));
        }
        other => panic!("expected ModuleNotFound, got {other:?}"),
    }
}

#[test]
fn test_missing_symbol_fails_with_symbol_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = require_model!(dir.path(), "probe", common::PROBE_MODEL);

    let err = CompiledModule::load(&path, "no_such_entry").unwrap_err();
    match err {
        InferenceError::SymbolNotFound { symbol, .. } => {
            assert_eq!(symbol, "no_such_entry");
        }
        other => panic!("expected SymbolNotFound, got {other:?}"),
    }
}

#[test]
fn test_error_kinds_are_distinguishable() {
    let dir = tempfile::tempdir().unwrap();
    let path = require_model!(dir.path(), "probe", common::PROBE_MODEL);

    let missing_module = CompiledModule::load(dir.path().join("libabsent.so"), "evaluate");
    let missing_symbol = CompiledModule::load(&path, "absent");

    assert!(matches!(
        missing_module,
        Err(InferenceError::ModuleNotFound { .. })
    ));
    assert!(matches!(
        missing_symbol,
        Err(InferenceError::SymbolNotFound { .. })
    ));
}

#[test]
fn test_failed_resolution_does_not_leak_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = require_model!(dir.path(), "probe", common::PROBE_MODEL);

    // Each failed load must release its freshly opened handle; repeating it
    // many times would otherwise exhaust the process's module table.
    for _ in 0..256 {
        let err = CompiledModule::load(&path, "no_such_entry").unwrap_err();
        assert!(matches!(err, InferenceError::SymbolNotFound { .. }));
    }

    // The module is still loadable afterwards.
    let module = CompiledModule::load(&path, "evaluate").unwrap();
    let row = [1.0_f32];
    assert_eq!(unsafe { (module.eval_fn())(row.as_ptr(), 1) }, 3.0);
}

#[test]
fn test_repeated_open_close_cycles() {
    let dir = tempfile::tempdir().unwrap();
    let path = require_model!(dir.path(), "probe", common::PROBE_MODEL);

    for _ in 0..256 {
        let module = CompiledModule::load(&path, "evaluate").unwrap();
        drop(module);
    }
}

#[test]
fn test_non_default_symbol_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = require_model!(dir.path(), "renamed", common::RENAMED_MODEL);

    let module = CompiledModule::load(&path, "score").unwrap();
    let row = [2.0_f32];
    assert_eq!(unsafe { (module.eval_fn())(row.as_ptr(), 1) }, 2.5);
}
