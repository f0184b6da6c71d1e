//! Golden datasets shared by the sanitizer and normalizer tests.
//!
//! Every file under `golden/<component>/` is a JSON document with a
//! `cases` array.

use std::fs;
use std::path::{Path, PathBuf};

/// Directory of this crate, resolved when it is compiled.
const ROOT: &str = env!("CARGO_MANIFEST_DIR");

fn resolve(relative: impl AsRef<Path>) -> PathBuf {
    Path::new(ROOT).join(relative)
}

/// Parse a golden file, e.g. `golden/sanitizer/forbidden_keys.json`.
///
/// Panics with the offending path when the file is missing or malformed.
pub fn load_fixture_value(relative: &str) -> serde_json::Value {
    let path = resolve(relative);
    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("cannot parse {}: {e}", path.display()))
}

/// JSON files in `subdir`, sorted. Empty when the directory is missing.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(resolve(subdir))
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}
