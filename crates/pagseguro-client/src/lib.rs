//! # pagseguro-client
//!
//! HTTP transport and configuration for talking to PagSeguro.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagseguro_client::GatewayConfig;
//! use pagseguro_core::{Item, Payment};
//!
//! // Load credentials and endpoints from the environment
//! let config = GatewayConfig::from_env()?;
//! let credentials = config.credentials();
//! let gateway = config.into_gateway()?;
//!
//! let mut payment = Payment::default()
//!     .with_default_credentials(&credentials)
//!     .with_item(Item::new("0001", "Notebook", "24300.00", 1));
//!
//! // Redirect the buyer here
//! let url = payment.checkout_payment_url(&gateway).await?;
//! ```

pub mod config;
pub mod transport;

// Re-exports
pub use config::GatewayConfig;
pub use transport::ReqwestTransport;
