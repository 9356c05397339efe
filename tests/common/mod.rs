//! Shared test fixtures: compile tiny C models into real shared objects.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Probe model whose result encodes both the row and the worker hint it was
/// called with: `2 * features[0] + num_threads`.
pub const PROBE_MODEL: &str = r#"
double evaluate(const float *features, int num_threads) {
    return (double)features[0] * 2.0 + (double)num_threads;
}
"#;

/// Model exporting a non-default entry point name.
pub const RENAMED_MODEL: &str = r#"
double score(const float *features, int num_threads) {
    (void)num_threads;
    return (double)features[0] + 0.5;
}
"#;

/// Compile `source` into `dir/lib<name>.so` with the system C compiler.
///
/// Returns `None` when no compiler is available so callers can skip instead
/// of failing on minimal machines.
pub fn compile_model(dir: &Path, name: &str, source: &str) -> Option<PathBuf> {
    let src = dir.join(format!("{name}.c"));
    fs::write(&src, source).ok()?;

    let out = dir.join(format!("lib{name}.so"));
    let status = Command::new("cc")
        .arg("-shared")
        .arg("-fPIC")
        .arg("-O2")
        .arg("-o")
        .arg(&out)
        .arg(&src)
        .status()
        .ok()?;

    status.success().then_some(out)
}

/// Compile a fixture or skip the calling test with a note.
macro_rules! require_model {
    ($dir:expr, $name:expr, $source:expr) => {
        match common::compile_model($dir, $name, $source) {
            Some(path) => path,
            None => {
                eprintln!("skipping: no C compiler available to build test fixture");
                return;
            }
        }
    };
}
