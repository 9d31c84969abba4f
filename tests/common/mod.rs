/*!
 * Common test utilities for the dualsub test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

use dualsub::{SubtitleEntry, Track};

/// Routes library log output through the test harness; safe to call repeatedly
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
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

/// English sample with three captions
pub const ENGLISH_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
";

/// Spanish sample: two captions aligned with the English one, one shifted
pub const SPANISH_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
Esto es un subtítulo de prueba.

2
00:00:05,000 --> 00:00:09,000
Contiene varias entradas.

3
00:00:10,500 --> 00:00:14,000
Con fines de prueba.
";

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, ENGLISH_SRT)
}

/// Builds an in-memory track from `(start_ms, end_ms, text)` triples
pub fn track(entries: &[(u64, u64, &str)]) -> Track {
    Track::from_entries(
        entries
            .iter()
            .map(|(start, end, text)| SubtitleEntry::from_millis(*start, *end, text)),
    )
}
