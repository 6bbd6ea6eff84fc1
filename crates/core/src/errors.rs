//! Core error types for the profile service.
//!
//! This module defines store- and broker-agnostic error types. Storage-specific
//! errors (Diesel, SQLite) and bus-specific errors (Kafka) are converted to these
//! types by the adapter crates.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the profile service.
///
/// Every variant maps to one caller-visible category, so handlers never need a
/// catch-all that hides which category applies.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Event bus operation failed: {0}")]
    Bus(#[from] BusError),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create the pool or acquire a connection from it.
    #[error("Database pool error: {0}")]
    PoolFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Applying the embedded schema failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for caller-supplied input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Field '{field}' must not be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

/// Message bus errors.
///
/// `NotStarted` is a lifecycle bug (the producer was used before `start()`),
/// everything else is a broker-side or payload failure.
#[derive(Error, Debug)]
pub enum BusError {
    #[error("Event producer is enabled but was never started")]
    NotStarted,

    #[error("Failed to connect to the message bus: {0}")]
    Connection(String),

    #[error("Failed to deliver event to '{topic}': {message}")]
    Delivery { topic: String, message: String },

    #[error("Failed to receive message: {0}")]
    Receive(String),

    #[error("Failed to encode or decode message: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Bus(BusError::Serialization(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failure_is_a_bus_serialization_error() {
        let err: Error = serde_json::from_str::<serde_json::Value>("not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Bus(BusError::Serialization(_))));
    }

    #[test]
    fn test_categories_wrap_their_detail() {
        let err = Error::from(ValidationError::MissingField("email".to_string()));
        assert_eq!(
            err.to_string(),
            "Input validation failed: Required field 'email' is missing"
        );
        assert!(matches!(
            Error::from(BusError::NotStarted),
            Error::Bus(BusError::NotStarted)
        ));
    }
}
