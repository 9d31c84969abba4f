use anyhow::{Result, Context};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::errors::SubtitleError;

// @module: File and charset utilities

/// Text encodings accepted for subtitle files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    /// ISO-8859-1, one byte per code point below U+0100
    Latin1,
}

impl Charset {
    /// Resolve a charset name, case-insensitively
    pub fn from_name(name: &str) -> Result<Self, SubtitleError> {
        match name.trim().to_uppercase().replace('_', "-").as_str() {
            "UTF-8" | "UTF8" => Ok(Charset::Utf8),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" | "LATIN-1" | "L1" => Ok(Charset::Latin1),
            _ => Err(SubtitleError::UnsupportedCharset(name.to_string())),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<String, SubtitleError> {
        match self {
            Charset::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| SubtitleError::Decode {
                charset: self.to_string(),
                message: e.to_string(),
            }),
            Charset::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Encode text; characters Latin-1 cannot hold become `?`
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Charset::Utf8 => text.as_bytes().to_vec(),
            Charset::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Charset::Utf8 => write!(f, "UTF-8"),
            Charset::Latin1 => write!(f, "ISO-8859-1"),
        }
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    /// Read a file and decode it with the given charset
    pub fn read_to_string<P: AsRef<Path>>(path: P, charset: Charset) -> Result<String> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        let text = charset.decode(&bytes)
            .with_context(|| format!("Failed to decode file: {:?}", path))?;
        Ok(text)
    }

    /// Encode a string with the given charset and write it, creating parent directories
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str, charset: Charset) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(path, charset.encode(content))
            .with_context(|| format!("Failed to write to file: {:?}", path))?;

        Ok(())
    }
}
