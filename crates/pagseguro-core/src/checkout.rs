//! # Checkout Flow
//!
//! Submitting a [`Payment`] and reading back its code and date.
//!
//! The first call to [`Payment::code`], [`Payment::date`] or
//! [`Payment::ensure_checkout`] renders the XML, posts it through the
//! gateway's transport and caches the parsed response on the payment.
//! Later calls reuse that response until [`Payment::reset`] drops it.
//! Nothing here retries: every transport failure or non-200 status is
//! returned to the caller as is.

use crate::error::{PaymentError, PaymentResult};
use crate::gateway::Gateway;
use crate::payment::Payment;
use crate::response::{self, CheckoutResponse};
use crate::transport::{TransportRequest, XML_CONTENT_TYPE};
use crate::validation::Validate;
use crate::xml;
use chrono::{DateTime, FixedOffset};
use tracing::{debug, info, instrument, warn};

impl Payment {
    /// Request document for this payment
    pub fn checkout_xml(&self) -> PaymentResult<String> {
        xml::render(self)
    }

    /// Cached response of the last successful checkout, if any
    pub fn response(&self) -> Option<&CheckoutResponse> {
        self.response.as_ref()
    }

    /// Submit unless a response is already cached, then return it
    #[instrument(skip(self, gateway), fields(reference = self.reference().unwrap_or("-")))]
    pub async fn ensure_checkout(&mut self, gateway: &Gateway) -> PaymentResult<&CheckoutResponse> {
        let response = match self.response.take() {
            Some(cached) => {
                debug!("Reusing cached checkout response: code={}", cached.code);
                cached
            }
            None => self.send_checkout(gateway).await?,
        };
        Ok(self.response.insert(response))
    }

    /// Transaction code, submitting first if needed
    pub async fn code(&mut self, gateway: &Gateway) -> PaymentResult<String> {
        Ok(self.ensure_checkout(gateway).await?.code.clone())
    }

    /// Registration timestamp, submitting first if needed
    pub async fn date(&mut self, gateway: &Gateway) -> PaymentResult<DateTime<FixedOffset>> {
        Ok(self.ensure_checkout(gateway).await?.date)
    }

    /// Redirect URL for the buyer, submitting first if needed
    pub async fn checkout_payment_url(&mut self, gateway: &Gateway) -> PaymentResult<String> {
        let code = self.code(gateway).await?;
        Ok(gateway.urls().checkout_payment_url(&code))
    }

    /// Forget the cached response; the next accessor submits again
    pub fn reset(&mut self) {
        self.response = None;
    }

    async fn send_checkout(&self, gateway: &Gateway) -> PaymentResult<CheckoutResponse> {
        if gateway.validates_before_checkout() {
            let violations = self.validate();
            if !violations.is_empty() {
                warn!("Refusing to submit invalid payment: {}", violations);
                return Err(PaymentError::Validation(violations));
            }
        }

        let body = self.checkout_xml()?;
        let url = gateway.urls().checkout_url();

        debug!(
            "Submitting checkout via {}: {} items, {} bytes",
            gateway.transport().name(),
            self.items.len(),
            body.len()
        );

        let raw = gateway
            .transport()
            .post(TransportRequest {
                url,
                body,
                content_type: XML_CONTENT_TYPE,
                credentials: self.credentials(),
            })
            .await?;

        let checkout = response::classify(raw)?;

        info!(
            "Checkout registered: code={}, date={}",
            checkout.code, checkout.date
        );

        Ok(checkout)
    }
}
