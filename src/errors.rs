/*!
 * Error types for the tvsqlgen application.
 *
 * Every ingest, extraction and emission step returns `Result<T, AppError>`,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Input file missing or inaccessible
    #[error("cannot read file: {path:?} ({reason})")]
    UnreadableFile {
        /// Path of the file that failed to open
        path: PathBuf,
        /// Underlying I/O failure
        reason: String,
    },

    /// Malformed XML or a missing element path
    #[error("error parse file: {path:?}: {message}")]
    Parse {
        /// Path of the offending XML file
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Emission attempted with no records
    #[error("{0}")]
    EmptyInput(String),

    /// Two series share a localized name, so join subqueries would be ambiguous
    #[error("duplicate localized series name: '{name}'")]
    DuplicateLocalizedName {
        /// The repeated localized name
        name: String,
    },

    /// Error from an output file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    // @creates: Parse error bound to a file path
    pub fn parse<P: Into<PathBuf>>(path: P, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    // @creates: Empty-input error naming the emitting function
    pub fn empty_input(function: &str) -> Self {
        Self::EmptyInput(format!("empty parameter in function {}()", function))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

/// Result alias used across the library
pub type AppResult<T> = Result<T, AppError>;
