/*!
 * Error types for the slaide application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while consuming a workflow event stream
///
/// A malformed individual record is never an error: the extractor logs it
/// and keeps walking the stream. Only transport-level failures abort.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The stream could not be opened or read
    #[error("stream transport failed: {0}")]
    Transport(String),

    /// The workflow endpoint answered with a non-success status
    #[error("workflow API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },
}

/// Errors that can occur while assembling the deck document
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// The workflow outputs carried no slides array
    #[error("workflow outputs contain no slides array")]
    MissingSlides,

    /// The slide list or its captions did not match the expected shape
    #[error("malformed deck payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Errors that can occur when talking to the content store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error when making an API request fails
    #[error("store request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the API itself
    #[error("store API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error when parsing an API response fails
    #[error("failed to parse store response: {0}")]
    ParseError(String),
}

/// Errors that can occur when delivering a notification
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Error when making a webhook request fails
    #[error("notification request failed: {0}")]
    RequestFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the stream extractor
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Error from deck assembly
    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    /// Error from the content store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from a notification channel
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
