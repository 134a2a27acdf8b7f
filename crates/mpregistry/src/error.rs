//! Error types for mpregistry.
//!
//! This module defines all error types used throughout the mpregistry crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::record::MemberId;
use crate::schema::ValidationErrors;

/// The main error type for mpregistry operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Record Errors ===
    /// One or more form fields failed validation.
    #[error("validation failed:\n{0}")]
    Validation(ValidationErrors),

    /// The selected photo file could not be read.
    #[error("failed to read photo {path}: {source}")]
    PhotoRead {
        /// Path of the selected file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The photo could not be turned into a displayable form.
    #[error("failed to process photo: {0}")]
    PhotoResolution(String),

    /// A submit is already resolving its photo.
    #[error("a submit is already in progress")]
    SubmitInProgress,

    /// The form is in read-only mode.
    #[error("form is read-only")]
    ReadOnlyForm,

    /// No member with the given identity exists.
    #[error("no member with id {0}")]
    MemberNotFound(MemberId),

    /// The stored identity counter is not a number.
    #[error("stored identity counter under '{key}' is unreadable: {value:?}")]
    InvalidCounter {
        /// Storage key of the counter.
        key: String,
        /// The stored value.
        value: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for mpregistry operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a new photo resolution error.
    #[must_use]
    pub fn photo_resolution(message: impl Into<String>) -> Self {
        Self::PhotoResolution(message.into())
    }

    /// Check if this error is caused by user input rather than the system.
    ///
    /// These are the errors the user recovers from by correcting the input
    /// or picking another file.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::PhotoRead { .. }
                | Self::PhotoResolution(_)
                | Self::ReadOnlyForm
                | Self::MemberNotFound(_)
        )
    }

    /// Field-level validation messages, if this is a validation error.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
