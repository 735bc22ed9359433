//! Custom error types for the common library
//!
//! This module defines the error taxonomy of the data access layer. Every
//! variant keeps the driver's own message so callers can surface it verbatim.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during query or procedure execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// A parameter value could not be encoded for the driver
    #[error("Database bind error: {0}")]
    Bind(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// The underlying message without the layer prefix.
    pub fn raw_message(&self) -> String {
        match self {
            DatabaseError::Connection(e) | DatabaseError::Query(e) => match e {
                SqlxError::Database(db) => db.message().to_string(),
                other => other.to_string(),
            },
            DatabaseError::Bind(msg) | DatabaseError::Configuration(msg) => msg.clone(),
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
