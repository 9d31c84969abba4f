/*!
 * Error types for the dualsub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while reading or writing subtitle tracks
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubtitleError {
    /// A timestamp could not be parsed into a chronological key
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// The requested text encoding is not supported
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// The file content is not valid for the requested encoding
    #[error("Failed to decode {charset} content: {message}")]
    Decode {
        /// Charset used for decoding
        charset: String,
        /// Decoder message
        message: String,
    },
}

/// Errors that can occur while merging two tracks
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MergeError {
    /// Neither input carries a file name to derive the output name from
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Desynchronization mode outside 0..=3 / left, right, max, min
    #[error("Invalid desynchronization mode: {0}")]
    InvalidDesyncMode(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from the merge step
    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
