//! # pagseguro-core
//!
//! Checkout requests for the PagSeguro payment gateway.
//!
//! This crate provides:
//! - `Payment` with its `Item`, `Sender`, `Shipping` and `PreApproval` parts
//! - `Validate` rules that collect every field violation at once
//! - The `<checkout>` XML payload builder and response parser
//! - `CheckoutTransport`, the seam an HTTP client plugs into
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pagseguro_core::{Gateway, GatewayUrls, Item, Payment, Validate};
//!
//! let mut payment = Payment::new("seller@example.com", token)
//!     .with_reference("REF1234")
//!     .with_item(Item::new("0001", "Notebook", "24300.00", 1));
//!
//! if !payment.is_valid() { /* show payment.validate() */ }
//!
//! let gateway = Gateway::new(GatewayUrls::default(), transport);
//! let url = payment.checkout_payment_url(&gateway).await?;
//! // Redirect the buyer to `url`
//! ```

pub mod checkout;
pub mod digits;
pub mod error;
pub mod gateway;
pub mod item;
pub mod payment;
pub mod pre_approval;
pub mod response;
pub mod sender;
pub mod shipping;
pub mod transport;
pub mod validation;
pub mod xml;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use gateway::{Environment, Gateway, GatewayUrls};
pub use item::Item;
pub use payment::Payment;
pub use pre_approval::{Charge, Period, PreApproval};
pub use response::CheckoutResponse;
pub use sender::{Phone, Sender};
pub use shipping::{Address, Shipping, ShippingKind};
pub use transport::{
    BoxedTransport, CheckoutTransport, Credentials, TransportRequest, TransportResponse,
};
pub use validation::{Validate, Violation, Violations};
