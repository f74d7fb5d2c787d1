//! # Gateway Configuration
//!
//! Configuration management for the PagSeguro integration.
//! Credentials are loaded from environment variables (or a `.env` file).

use crate::transport::ReqwestTransport;
use pagseguro_core::{Credentials, Environment, Gateway, GatewayUrls, PaymentError};
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gateway account and endpoint configuration
#[derive(Clone)]
pub struct GatewayConfig {
    /// Merchant account e-mail
    pub email: String,

    /// Merchant API token
    pub token: String,

    /// Production or sandbox
    pub environment: Environment,

    /// Endpoint base URLs (overridable for testing/mocking)
    pub urls: GatewayUrls,

    /// Per-request timeout for the HTTP client
    pub timeout: Duration,

    /// Refuse to submit payments that fail validation
    pub validate_before_checkout: bool,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAGSEGURO_EMAIL`
    /// - `PAGSEGURO_TOKEN`
    ///
    /// Optional:
    /// - `PAGSEGURO_ENVIRONMENT` (`production` or `sandbox`)
    /// - `PAGSEGURO_API_BASE_URL`, `PAGSEGURO_SITE_BASE_URL`
    /// - `PAGSEGURO_TIMEOUT_SECS`
    /// - `PAGSEGURO_VALIDATE_BEFORE_CHECKOUT`
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (environment, map, ...)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PaymentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| PaymentError::Configuration(format!("{} not set", key)))
        };

        let email = required("PAGSEGURO_EMAIL")?;
        let token = required("PAGSEGURO_TOKEN")?;

        let environment = match lookup("PAGSEGURO_ENVIRONMENT") {
            Some(value) => value.parse()?,
            None => Environment::Production,
        };

        let defaults = GatewayUrls::for_environment(environment);
        let urls = GatewayUrls::new(
            lookup("PAGSEGURO_API_BASE_URL").unwrap_or(defaults.api_base_url),
            lookup("PAGSEGURO_SITE_BASE_URL").unwrap_or(defaults.site_base_url),
        );

        for base in [&urls.api_base_url, &urls.site_base_url] {
            if !base.starts_with("https://") && !base.starts_with("http://") {
                return Err(PaymentError::Configuration(format!(
                    "base URL must start with http:// or https://: {}",
                    base
                )));
            }
        }

        let timeout_secs = match lookup("PAGSEGURO_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| {
                PaymentError::Configuration(format!(
                    "PAGSEGURO_TIMEOUT_SECS must be a whole number of seconds: {}",
                    value
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let validate_before_checkout = lookup("PAGSEGURO_VALIDATE_BEFORE_CHECKOUT")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Self {
            email,
            token,
            environment,
            urls,
            timeout: Duration::from_secs(timeout_secs),
            validate_before_checkout,
        })
    }

    /// Create config with explicit credentials (production endpoints)
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
            environment: Environment::Production,
            urls: GatewayUrls::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            validate_before_checkout: false,
        }
    }

    /// Check if pointed at the sandbox
    pub fn is_sandbox(&self) -> bool {
        self.environment == Environment::Sandbox
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.token.clone())
    }

    /// Builder: switch environment. Base URLs still at the old
    /// environment's defaults follow the switch; custom overrides stay.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        let previous = GatewayUrls::for_environment(self.environment);
        let next = GatewayUrls::for_environment(environment);

        if self.urls.api_base_url == previous.api_base_url {
            self.urls.api_base_url = next.api_base_url;
        }
        if self.urls.site_base_url == previous.site_base_url {
            self.urls.site_base_url = next.site_base_url;
        }
        self.environment = environment;
        self
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.urls = GatewayUrls::new(url, self.urls.site_base_url);
        self
    }

    /// Builder: set custom site base URL (for testing)
    pub fn with_site_base_url(mut self, url: impl Into<String>) -> Self {
        self.urls = GatewayUrls::new(self.urls.api_base_url, url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_before_checkout = enabled;
        self
    }

    /// Gateway backed by a reqwest client
    pub fn into_gateway(self) -> Result<Gateway, PaymentError> {
        let transport = ReqwestTransport::new(self.timeout)?;
        Ok(Gateway::new(self.urls, Arc::new(transport)).with_validation(self.validate_before_checkout))
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .field("environment", &self.environment)
            .field("urls", &self.urls)
            .field("timeout", &self.timeout)
            .field("validate_before_checkout", &self.validate_before_checkout)
            .finish()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
