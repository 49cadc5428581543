use std::path::PathBuf;
use tempfile::TempDir;

/// Write `contents` to a file in a fresh temporary directory, returning the
/// dir handle and the file path.
/// The caller must hold onto `TempDir` to keep the temp directory alive.
pub fn write_report(name: &str, contents: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

/// Path of a checked-in fixture under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
