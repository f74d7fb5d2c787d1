//! # Gateway
//!
//! Endpoint URLs plus the transport used to reach them. A [`Gateway`] is
//! what a [`Payment`](crate::Payment) needs to check itself out.

use crate::error::PaymentError;
use crate::transport::{BoxedTransport, CheckoutTransport};
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

const PRODUCTION_API_BASE: &str = "https://ws.pagseguro.uol.com.br/v2";
const PRODUCTION_SITE_BASE: &str = "https://pagseguro.uol.com.br/v2";
const SANDBOX_API_BASE: &str = "https://ws.sandbox.pagseguro.uol.com.br/v2";
const SANDBOX_SITE_BASE: &str = "https://sandbox.pagseguro.uol.com.br/v2";

/// Which gateway deployment to talk to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "sandbox" => Ok(Environment::Sandbox),
            other => Err(PaymentError::Configuration(format!(
                "unknown environment '{}', expected production or sandbox",
                other
            ))),
        }
    }
}

/// Base URLs for the web-service API and the customer-facing site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayUrls {
    /// e.g. "https://ws.pagseguro.uol.com.br/v2"
    pub api_base_url: String,
    /// e.g. "https://pagseguro.uol.com.br/v2"
    pub site_base_url: String,
}

impl GatewayUrls {
    pub fn new(api_base_url: impl Into<String>, site_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: trim_slash(api_base_url.into()),
            site_base_url: trim_slash(site_base_url.into()),
        }
    }

    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::new(PRODUCTION_API_BASE, PRODUCTION_SITE_BASE),
            Environment::Sandbox => Self::new(SANDBOX_API_BASE, SANDBOX_SITE_BASE),
        }
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    pub fn site_url(&self, path: &str) -> String {
        format!("{}{}", self.site_base_url, path)
    }

    /// Where checkout payloads are POSTed
    pub fn checkout_url(&self) -> String {
        self.api_url("/checkout")
    }

    /// Where the customer is redirected to pay
    pub fn checkout_payment_url(&self, code: &str) -> String {
        let code: String = form_urlencoded::byte_serialize(code.as_bytes()).collect();
        self.site_url(&format!("/checkout/payment.html?code={}", code))
    }
}

impl Default for GatewayUrls {
    fn default() -> Self {
        Self::for_environment(Environment::Production)
    }
}

fn trim_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// URLs, transport and submission policy
#[derive(Clone)]
pub struct Gateway {
    urls: GatewayUrls,
    transport: BoxedTransport,
    validate_before_checkout: bool,
}

impl Gateway {
    /// Submits regardless of validation state unless
    /// [`with_validation`](Self::with_validation) is turned on
    pub fn new(urls: GatewayUrls, transport: BoxedTransport) -> Self {
        Self {
            urls,
            transport,
            validate_before_checkout: false,
        }
    }

    /// Refuse to submit invalid payments
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_before_checkout = enabled;
        self
    }

    pub fn urls(&self) -> &GatewayUrls {
        &self.urls
    }

    pub fn transport(&self) -> &dyn CheckoutTransport {
        self.transport.as_ref()
    }

    pub fn validates_before_checkout(&self) -> bool {
        self.validate_before_checkout
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("urls", &self.urls)
            .field("transport", &self.transport.name())
            .field("validate_before_checkout", &self.validate_before_checkout)
            .finish()
    }
}
