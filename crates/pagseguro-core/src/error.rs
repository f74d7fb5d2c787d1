//! # Payment Error Types
//!
//! Typed error handling for the PagSeguro checkout client.
//! All gateway operations return `Result<T, PaymentError>`.

use crate::validation::Violations;
use quick_xml::errors::serialize::SeError;
use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing credentials, bad base URL)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Gateway rejected the merchant credentials (HTTP 401)
    #[error("Unauthorized: the gateway rejected the email/token pair")]
    Unauthorized,

    /// Gateway rejected the payload (HTTP 400); `detail` is the raw body
    #[error("Invalid data: {detail}")]
    InvalidData { detail: String },

    /// Any other non-200 status, kept whole for diagnostics
    #[error("Unknown gateway error: status={status}, body={body}")]
    UnknownError { status: u16, body: String },

    /// A 200 response that lacks `<checkout><code>`/`<date>`
    #[error("Malformed checkout response: {0}")]
    MalformedResponse(String),

    /// Network/HTTP error talking to the gateway
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Submission refused locally because the payment is invalid
    #[error("Validation failed: {0}")]
    Validation(Violations),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Returns true if the caller may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::NetworkError(_))
    }

    /// HTTP status the gateway answered with, when the error came from one
    pub fn gateway_status(&self) -> Option<u16> {
        match self {
            PaymentError::Unauthorized => Some(401),
            PaymentError::InvalidData { .. } => Some(400),
            PaymentError::UnknownError { status, .. } => Some(*status),
            PaymentError::MalformedResponse(_) => Some(200),
            _ => None,
        }
    }
}

impl From<SeError> for PaymentError {
    fn from(err: SeError) -> Self {
        PaymentError::Serialization(err.to_string())
    }
}

/// Result type alias for checkout operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(PaymentError::NetworkError("timeout".into()).is_retryable());
        assert!(!PaymentError::Unauthorized.is_retryable());
        assert!(!PaymentError::InvalidData {
            detail: "bad field X".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_gateway_status() {
        assert_eq!(PaymentError::Unauthorized.gateway_status(), Some(401));
        assert_eq!(
            PaymentError::InvalidData {
                detail: "x".into()
            }
            .gateway_status(),
            Some(400)
        );
        assert_eq!(
            PaymentError::UnknownError {
                status: 503,
                body: String::new()
            }
            .gateway_status(),
            Some(503)
        );
        assert_eq!(
            PaymentError::Configuration("missing".into()).gateway_status(),
            None
        );
    }

    #[test]
    fn test_invalid_data_display_carries_detail() {
        let err = PaymentError::InvalidData {
            detail: "bad field X".into(),
        };
        assert_eq!(err.to_string(), "Invalid data: bad field X");
    }
}
