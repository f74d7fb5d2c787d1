//! # Checkout Transport
//!
//! The HTTP seam between the checkout flow and the network.
//!
//! The checkout code never talks to an HTTP library directly; it hands a
//! [`TransportRequest`] to a [`CheckoutTransport`] and classifies whatever
//! status and body come back. Production uses the reqwest adapter in
//! `pagseguro-client`; tests plug in an in-memory transport.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │           CheckoutTransport (trait)           │
//! │  └── post(TransportRequest) -> Response       │
//! └───────────────────────────────────────────────┘
//!                        ▲
//!          ┌─────────────┴─────────────┐
//!  ┌───────┴───────┐           ┌───────┴───────┐
//!  │ReqwestTransport│          │ test doubles  │
//!  └───────────────┘           └───────────────┘
//! ```

use crate::error::PaymentResult;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Content type of the checkout payload
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// Merchant credentials, sent as `email`/`token` query parameters
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub token: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
        }
    }

    /// Query pairs in the order the gateway documents them
    pub fn query_pairs(&self) -> [(&'static str, &str); 2] {
        [("email", self.email.as_str()), ("token", self.token.as_str())]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// An outbound POST
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub body: String,
    pub content_type: &'static str,
    pub credentials: Credentials,
}

/// Status and body as received; no interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends checkout requests to the gateway.
///
/// Implementations return `Ok` for every HTTP response regardless of
/// status; `Err` is reserved for failures to get a response at all.
#[async_trait]
pub trait CheckoutTransport: Send + Sync {
    async fn post(&self, request: TransportRequest) -> PaymentResult<TransportResponse>;

    /// Name used in logs
    fn name(&self) -> &'static str;
}

/// Type alias for a shared transport (dynamic dispatch)
pub type BoxedTransport = Arc<dyn CheckoutTransport>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_token() {
        let creds = Credentials::new("seller@example.com", "SECRET-TOKEN");
        let printed = format!("{:?}", creds);

        assert!(printed.contains("seller@example.com"));
        assert!(!printed.contains("SECRET-TOKEN"));
    }

    #[test]
    fn test_query_pairs() {
        let creds = Credentials::new("a@b.com", "t0k3n");
        assert_eq!(creds.query_pairs(), [("email", "a@b.com"), ("token", "t0k3n")]);
    }
}
