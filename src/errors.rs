/*!
 * Error types for the wosc-guides application.
 *
 * This module contains custom error types for the page builder and the
 * locale filler, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a single content document.
///
/// All of these are recoverable: the affected entity is skipped.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The expected content file does not exist
    #[error("Content file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// The content file exists but could not be read or parsed
    #[error("Malformed JSON in {}: {message}", path.display())]
    MalformedJson {
        /// Path of the offending file
        path: PathBuf,
        /// Parser or I/O message
        message: String,
    },

    /// The document parsed but has no text for the display language
    #[error("No '{language}' text in {}", path.display())]
    MissingLanguage {
        /// Path of the offending file
        path: PathBuf,
        /// Language that was looked up
        language: String,
    },
}

/// Errors that abort a page build
#[derive(Error, Debug)]
pub enum BuildError {
    /// The content root directory does not exist
    #[error("Content directory not found: {}", .0.display())]
    MissingRoot(PathBuf),
}

/// Errors that abort a locale fill before anything is written
#[derive(Error, Debug)]
pub enum LocaleError {
    /// The dictionary file could not be parsed
    #[error("Failed to parse locale dictionary: {0}")]
    ParseError(String),

    /// The top-level value is not a JSON object
    #[error("Locale dictionary must be a JSON object keyed by locale")]
    NotAnObject,

    /// A locale entry is not a JSON object
    #[error("Locale '{0}' is not a JSON object")]
    LocaleNotAnObject(String),

    /// The reference or fallback locale is absent
    #[error("Locale '{0}' is missing from the dictionary")]
    MissingLocale(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from content loading
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// Error from a page build
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Error from the locale filler
    #[error("Locale error: {0}")]
    Locale(#[from] LocaleError),

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
