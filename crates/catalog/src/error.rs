//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A query or connection failed. Includes constraint violations, so a
    /// write that skipped validation surfaces here.
    #[display("database error")]
    Database,
    /// The embedded migrations could not be applied.
    #[display("database migration error")]
    Migration,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
