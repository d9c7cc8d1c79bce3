//! Defines the application's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `AppError` to be cloneable.
//!
//! Only data and environment failures live here. Bad user input (a non-numeric menu
//! choice, a negative population, an unknown state name) is handled at the prompt
//! that asked for it and never becomes an `AppError`.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Error related to standard I/O operations (reading the states file, writing output).
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// Error originating from user interaction prompts (`dialoguer`).
    #[error("Dialoguer Error: {0}")]
    Dialoguer(Arc<dialoguer::Error>),

    /// A line of the states file could not be turned into a record.
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// No record with the given name exists in the store.
    #[error("State not found: {0}")]
    StateNotFound(String),

    /// The flower image for a state does not exist on disk.
    #[error("Image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    /// The external image viewer could not be launched.
    #[error("Viewer Error: {0}")]
    Viewer(String),

    /// Standard input was closed while a prompt was waiting for a line.
    #[error("Input closed")]
    InputClosed,
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

// --- From implementations ---

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Dialoguer(Arc::new(err))
    }
}
