//! # Reqwest Transport
//!
//! Production [`CheckoutTransport`]: posts the checkout XML over HTTPS
//! (rustls) with the merchant credentials as query parameters.

use async_trait::async_trait;
use pagseguro_core::{
    CheckoutTransport, PaymentError, PaymentResult, TransportRequest, TransportResponse,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// HTTP transport backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with its own client
    pub fn new(timeout: Duration) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Reuse an existing client (connection pool, proxies, ...)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CheckoutTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn post(&self, request: TransportRequest) -> PaymentResult<TransportResponse> {
        let response = self
            .client
            .post(&request.url)
            .query(&request.credentials.query_pairs())
            .header(CONTENT_TYPE, request.content_type)
            .body(request.body)
            .send()
            .await
            .map_err(|e| {
                error!("Gateway request failed: {}", e);
                PaymentError::NetworkError(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        debug!("Gateway answered: status={}, {} bytes", status, body.len());

        Ok(TransportResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}
