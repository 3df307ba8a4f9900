//! Error types for the Newsdesk plugin.
//!
//! This module defines the centralized error type [`NewsdeskError`], the fetch
//! failure taxonomy [`FetchError`], and a [`Result`] alias used throughout the
//! crate. All errors derive their `Error` implementation through `thiserror`.

use thiserror::Error;

/// The main error type for Newsdesk operations.
///
/// Most variants wrap a lower-level failure. Fetch failures are a separate
/// type, [`FetchError`], because they end up as view state rather than as an
/// `Err` from the handler.
///
/// # Examples
///
/// ```
/// use newsdesk::NewsdeskError;
///
/// fn validate_config() -> Result<(), NewsdeskError> {
///     Err(NewsdeskError::Config("feed_url is not a valid URL".to_string()))
/// }
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum NewsdeskError {
    /// Reading or writing a persisted slot failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized to or parsed from JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A built-in palette failed to parse.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    ///
    /// Raised when the configured feed URL cannot be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures of a single dataset fetch.
///
/// The `Display` output of each variant is the message shown to the user, so
/// server-supplied text is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    ///
    /// `message` carries the server's own error text when the body was a JSON
    /// object with an `error` string, otherwise a generic `HTTP <status>` line.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Human-readable failure message.
        message: String,
    },

    /// A 2xx response whose body was not JSON.
    #[error("Response was not valid JSON: {0}")]
    InvalidBody(String),

    /// A JSON response that does not contain an `items` list.
    #[error("Response did not contain an items list")]
    MalformedPayload,

    /// The request could not be issued at all.
    #[error("Request failed: {0}")]
    Transport(String),
}

/// A specialized `Result` type for Newsdesk operations.
pub type Result<T> = std::result::Result<T, NewsdeskError>;
