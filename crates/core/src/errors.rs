//! Core error types for the Cashly client.
//!
//! These errors are transport-agnostic. The API client crate converts HTTP
//! failures (reqwest, status codes, envelope errors) into [`ApiError`].

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the client library.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("API request failed: {0}")]
    Api(#[from] ApiError),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors raised while talking to the remote Cashly API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request could not be sent or the connection dropped.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server rejected the bearer token.
    #[error("Unauthorized (HTTP {0})")]
    Unauthorized(u16),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response envelope carried `status: "error"`.
    #[error("Remote error: {0}")]
    Remote(String),

    /// The body could not be decoded into the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
