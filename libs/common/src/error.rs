//! Error types shared by the services
//!
//! Storage backends report failures through [`DatabaseError`] so request
//! handlers can map them to a response without knowing which backend is in
//! use.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Error type for store operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The store could not be reached
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A statement failed while executing
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Schema bootstrap failed
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Invalid store configuration
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
