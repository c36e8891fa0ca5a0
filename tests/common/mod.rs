/*!
 * Common test utilities for the cmx-edl test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

/// A short 24 fps document with a cut followed by a dissolve
pub const SAMPLE_EDL: &str = "TITLE: My Show
FCM: NON DROP FRAME

001  AX       V     C        00:00:00:00 00:00:01:00 00:00:00:00 00:00:01:00
* FROM CLIP NAME: clip 1

002  BL       V     D    024 00:00:00:00 00:00:02:00 00:00:01:00 00:00:03:00
EFFECTS NAME IS CROSS DISSOLVE
* FROM CLIP NAME: clip 2
";

/// Routes library log output through the test harness, `RUST_LOG` selects the level
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates the sample EDL file for testing
pub fn create_test_edl(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_EDL)
}

/// Builds an event line with the given record range at timecode strings
pub fn event_line(num: &str, tr_code: &str, aux: &str, rec_start: &str, rec_end: &str) -> String {
    format!(
        "{}  AX       V     {:<4} {:<3} 00:00:00:00 00:00:00:00 {} {}",
        num, tr_code, aux, rec_start, rec_end
    )
}

/// Collapses runs of whitespace so lines can be compared independently of column widths
pub fn normalize(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Non-blank lines of a document, whitespace-normalized
pub fn data_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(normalize)
        .collect()
}

/// Helper to get the absolute path to a test resource
pub fn test_resource_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("resources");
    path.push(relative_path);
    path
}
