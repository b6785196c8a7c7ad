/*!
 * Error types for the truelist-mcp server.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the Truelist API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised at the batch boundary before any remote call is made
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The batch contained no addresses
    #[error("Batch is empty: at least one email address is required")]
    EmptyBatch,

    /// The batch exceeded the per-request ceiling
    #[error("Batch of {count} emails exceeds the maximum of {max}")]
    BatchTooLarge {
        /// Number of addresses submitted
        count: usize,
        /// Maximum allowed per batch
        max: usize,
    },

    /// An address failed the syntactic format check
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the Truelist client
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from batch input validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error in configuration
    #[error("Config error: {0}")]
    Config(String),

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
        Self::Unknown(error.to_string())
    }
}
