//! Configuration Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An explicitly requested configuration file does not exist. Default
    /// locations are optional and never raise this.
    #[display("configuration file not found: {}", _0.display())]
    FileNotFound(#[error(not(source))] PathBuf),
    /// A layer could not be read or the merged result did not deserialize
    /// (syntax error, wrong type, unparseable address).
    #[display("failed to load configuration")]
    Load,
    /// A value deserialized fine but fails a semantic check.
    #[display("invalid configuration: {_0}")]
    Invalid(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
