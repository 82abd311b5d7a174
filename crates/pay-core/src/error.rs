//! # Payment Error Types
//!
//! Typed error handling for the checkout service.
//! All gateway and checkout operations return `Result<T, PaymentError>`.
//!
//! A declined card is not an error: it is reported as
//! [`SaleOutcome::Declined`](crate::SaleOutcome::Declined).

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data supplied by the client
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Returns true if the caller is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, PaymentError::InvalidRequest(_))
    }

    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Only client input errors are distinguished; every gateway or
    /// infrastructure failure is a plain 500 towards the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::Configuration(_)
            | PaymentError::ProviderError { .. }
            | PaymentError::NetworkError(_)
            | PaymentError::Serialization(_)
            | PaymentError::Internal(_) => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
