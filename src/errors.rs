//! Error types for the mindful journal.
//!
//! This module defines the error categories that journal operations can
//! report: input validation, record decoding, and failures of the underlying
//! key-value storage.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the mindful journal.
#[derive(Error, Debug)]
pub enum JournalError {
    /// Errors related to file I/O operations in a storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization of configuration.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An entry was rejected before anything was written.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// A stored value could not be read back as a journal entry.
    #[error("Failed to decode journal entry: {message}")]
    Decode { message: String },

    /// The key-value storage reported a failure.
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// A month anchor was outside 1..=12 or could not be parsed.
    #[error("Invalid month: {value}")]
    InvalidMonth { value: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    #[error("{message}")]
    EditorError { message: String },

    /// Generic application error with a custom message.
    #[error("{message}")]
    ApplicationError { message: String },
}

impl JournalError {
    pub fn validation(message: impl Into<String>) -> Self {
        JournalError::Validation {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        JournalError::Decode {
            message: message.into(),
        }
    }

    /// Whether this error originated in the storage layer rather than in the
    /// journal's own checks.
    pub fn is_storage(&self) -> bool {
        matches!(self, JournalError::Storage { .. } | JournalError::Io(_))
    }
}
