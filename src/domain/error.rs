//! Error types for the Marquee plugin.
//!
//! This module defines the centralized error type [`MarqueeError`] and a type alias
//! [`Result`] used throughout the plugin. All errors are implemented with the
//! `thiserror` crate.

use thiserror::Error;

/// The main error type for Marquee operations.
///
/// None of these conditions is fatal to the plugin. Fetch failures become an
/// error marker on the catalog, storage failures are logged and leave the previous
/// in-memory state in place.
///
/// # Examples
///
/// ```
/// use marquee::MarqueeError;
///
/// let err = MarqueeError::Api { status: 401, message: "Invalid API key".to_string() };
/// assert_eq!(err.to_string(), "API error (401): Invalid API key");
/// ```
#[derive(Debug, Error)]
pub enum MarqueeError {
    /// Storage operation failed.
    ///
    /// Occurs when the key-value store cannot be read or written. The string
    /// describes what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    ///
    /// Raised when an API body or a persisted record cannot be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The metadata service answered with a failure or could not be reached.
    ///
    /// `status` is the HTTP status reported by the host, `0` when no response
    /// was received at all.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code, or 0 for transport failures.
        status: u16,
        /// Message from the response body or the host.
        message: String,
    },

    /// Credentials were rejected by the configured authenticator.
    #[error("Authentication error: {0}")]
    Auth(String),
}

/// A specialized `Result` type for Marquee operations.
pub type Result<T> = std::result::Result<T, MarqueeError>;
