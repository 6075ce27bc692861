//! Global error handling for codedigest
//!
//! This module provides a centralized error type for every fallible
//! operation outside the pure inclusion/stripping core.

use std::io;
use thiserror::Error;

/// Global error type for codedigest operations
#[derive(Error, Debug)]
pub enum CodeDigestError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Root path does not exist
    #[error("Directory '{0}' does not exist")]
    PathNotFound(String),

    /// Root path exists but is not a directory
    #[error("'{0}' is not a directory")]
    NotADirectory(String),

    /// Output document could not be written
    #[error("Error writing output file: {0}")]
    Write(String),

    /// The user aborted the run
    #[error("Analysis interrupted by user")]
    Interrupted,

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Specialized Result type for codedigest operations
pub type Result<T> = std::result::Result<T, CodeDigestError>;

/// Creates a CodeDigestError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CodeDigestError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for attaching a write context to errors
pub trait ResultExt<T> {
    /// Turn any error into a `Write` error prefixed with context
    fn write_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn write_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| CodeDigestError::Write(format!("{}: {}", f(), e)))
    }
}
