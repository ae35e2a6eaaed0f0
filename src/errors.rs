/*!
 * Error types for the multitrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * The split matters for the dispatcher: `ProviderError` values coming out of a
 * single translation unit are absorbed into `[Error: ...]` markers and never
 * abort a batch, while `BatchError` values are caller mistakes detected before
 * any work is dispatched and are returned synchronously.
 */

use thiserror::Error;

/// Errors that can occur when calling a translation service API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails (transport level)
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

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error when the account quota is exhausted
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Error with authentication (invalid or missing API key)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Error when a language pair is not supported by the service
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl ProviderError {
    /// Whether the error is transient and a retry or a fallback endpoint
    /// could plausibly succeed. Authentication and language errors are
    /// configuration mistakes and are never considered transient.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(_) | Self::RateLimitExceeded(_) | Self::QuotaExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500 || *status_code == 429,
            Self::ParseError(_) | Self::AuthenticationError(_) | Self::UnsupportedLanguage(_) => {
                false
            }
        }
    }
}

/// Errors detected before a batch is dispatched
#[derive(Error, Debug)]
pub enum BatchError {
    /// A requested service id does not exist in the registry
    #[error("Service '{0}' is not available")]
    UnknownService(String),

    /// A requested service exists but has no usable credentials
    #[error("Service '{0}' is not configured")]
    ServiceNotConfigured(String),

    /// The request named no services at all
    #[error("No translation services requested")]
    NoServicesRequested,

    /// Chunk size outside the supported range
    #[error("Chunk size must be between {min} and {max}, got {value}")]
    InvalidChunkSize { value: usize, min: usize, max: usize },

    /// Worker count outside the supported range
    #[error("Worker count must be between {min} and {max}, got {value}")]
    InvalidWorkerCount { value: usize, min: usize, max: usize },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a translation service
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from batch validation
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    /// Error from configuration loading or validation
    #[error("Configuration error: {0}")]
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
        Self::File(error.to_string())
    }
}
