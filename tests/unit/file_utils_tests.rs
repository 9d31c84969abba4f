/*!
 * Tests for file and charset utilities
 */

use anyhow::Result;
use dualsub::file_utils::{Charset, FileManager};
use dualsub::SubtitleError;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test charset name resolution
#[test]
fn test_charset_fromName_withKnownAndUnknownNames() {
    assert_eq!(Charset::from_name("utf-8").unwrap(), Charset::Utf8);
    assert_eq!(Charset::from_name("UTF8").unwrap(), Charset::Utf8);
    assert_eq!(Charset::from_name("ISO-8859-1").unwrap(), Charset::Latin1);
    assert_eq!(Charset::from_name("latin1").unwrap(), Charset::Latin1);
    assert_eq!(
        Charset::from_name("Shift_JIS"),
        Err(SubtitleError::UnsupportedCharset("Shift_JIS".to_string()))
    );
}

/// Test Latin-1 decoding and encoding
#[test]
fn test_charset_latin1_shouldMapBytesToCodePoints() {
    let decoded = Charset::Latin1.decode(&[b'a', 0xF1, b'o']).unwrap();
    assert_eq!(decoded, "año");

    assert_eq!(Charset::Latin1.encode("año"), vec![b'a', 0xF1, b'o']);
    assert_eq!(Charset::Latin1.encode("a€"), vec![b'a', b'?']);
}

/// Test that invalid UTF-8 is reported
#[test]
fn test_charset_utf8_withInvalidBytes_shouldFail() {
    let result = Charset::Utf8.decode(&[0xFF, 0xFE, 0x00]);
    assert!(matches!(result, Err(SubtitleError::Decode { .. })));
}

/// Test writing creates missing directories and reading decodes
#[test]
fn test_write_and_read_withLatin1_shouldRestoreText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("out.srt");

    FileManager::write_to_file(&path, "Canción", Charset::Latin1)?;

    assert_eq!(std::fs::read(&path)?.len(), "Canción".chars().count());
    assert_eq!(FileManager::read_to_string(&path, Charset::Latin1)?, "Canción");

    Ok(())
}

/// Test ensure_dir on an existing directory
#[test]
fn test_ensure_dir_withExistingDir_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    FileManager::ensure_dir(temp_dir.path())?;
    assert!(FileManager::dir_exists(temp_dir.path()));
    Ok(())
}
