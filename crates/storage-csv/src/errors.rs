//! Storage-specific error types for CSV file operations.
//!
//! This module provides error types that wrap filesystem and `csv` errors and
//! converts them to the storage-agnostic error types defined in
//! `tickerbook_core`.

use thiserror::Error;
use tickerbook_core::errors::{DatabaseError, Error};

/// Storage-specific errors that wrap I/O and CSV types.
///
/// These errors are internal to the storage layer and are converted to
/// `tickerbook_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV operation failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Writer actor unavailable: {0}")]
    WriterUnavailable(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => Error::Database(DatabaseError::Io(e.to_string())),
            StorageError::Csv(e) => match e.kind() {
                csv::ErrorKind::Io(_) => Error::Database(DatabaseError::Io(e.to_string())),
                _ => Error::Database(DatabaseError::Malformed(e.to_string())),
            },
            StorageError::WriterUnavailable(e) => Error::Database(DatabaseError::Internal(e)),
        }
    }
}

/// Extension trait for converting storage Results to core Results.
///
/// Provides `.into_core()` on any `Result<T, E>` whose error converts into
/// [`StorageError`].
pub trait IntoCore<T> {
    fn into_core(self) -> tickerbook_core::Result<T>;
}

impl<T, E> IntoCore<T> for std::result::Result<T, E>
where
    E: Into<StorageError>,
{
    fn into_core(self) -> tickerbook_core::Result<T> {
        self.map_err(|e| Error::from(e.into()))
    }
}
