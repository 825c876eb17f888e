//! Core error types for the Tickerbook application.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (CSV, filesystem) are converted to these types by the storage layer.

use std::collections::BTreeMap;

use chrono::ParseError as ChronoParseError;
use thiserror::Error;
use tickerbook_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Validation messages keyed by input field name (camelCase, as sent by clients).
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Root error type for the portfolio application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Storage-agnostic error type for repository operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A record with the same id already exists.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A file could not be read or written.
    #[error("Storage I/O failed: {0}")]
    Io(String),

    /// A stored row could not be encoded or decoded.
    #[error("Malformed record: {0}")]
    Malformed(String),

    /// Internal/unexpected storage error.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// One or more input fields were rejected. Carries a message per field.
    #[error("{message}")]
    Fields {
        message: String,
        field_errors: FieldErrors,
    },

    #[error("Failed to parse date: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl Error {
    /// Shorthand for a missing record.
    pub fn not_found(what: impl Into<String>) -> Self {
        Error::Database(DatabaseError::NotFound(what.into()))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::NotFound(_)))
    }
}

/// Collects per-field validation messages and turns them into an error.
#[derive(Debug, Default)]
pub struct FieldErrorsBuilder {
    errors: FieldErrors,
}

impl FieldErrorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when nothing was added, otherwise a `ValidationError::Fields`.
    pub fn finish(self, message: &str) -> Result<()> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(Error::Validation(ValidationError::Fields {
            message: message.to_string(),
            field_errors: self.errors,
        }))
    }
}

// === From implementations for common error types ===

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}
