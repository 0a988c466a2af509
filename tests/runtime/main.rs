//! Integration tests for Layer 3: Runtime
//!
//! Tests for dataset loading and the shell session driven end to end.

mod loading;
mod shell;

use std::path::PathBuf;

/// Path to the sample dataset.
pub fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/runtime/data/cutoffs.json")
}
