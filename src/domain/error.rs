//! Error types for the dirrank database.
//!
//! This module defines the centralized error type [`DirRankError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for dirrank operations.
///
/// Every variant is fatal for the operation in progress. A mutation that
/// returns one of these errors has not been committed to the backing store.
///
/// # Examples
///
/// ```
/// use dirrank::DirRankError;
///
/// fn validate() -> Result<(), DirRankError> {
///     Err(DirRankError::Config("max_age must be positive".to_string()))
/// }
///
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum DirRankError {
    /// The backing store exists but does not hold a sequence of entry records.
    ///
    /// No partial recovery is attempted. The string describes what failed to
    /// parse (or, rarely, to serialize).
    #[error("Format error: {0}")]
    Format(String),

    /// The backing store could not be read or written.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A path is not valid UTF-8 and cannot be stored as an entry key.
    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// Configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A keep/discard pattern handed to the populator did not compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A specialized `Result` type for dirrank operations.
pub type Result<T> = std::result::Result<T, DirRankError>;
