//! # Shipping
//!
//! Delivery method, cost and address for a checkout.

use crate::digits::is_valid_amount;
use crate::validation::{is_digits, Validate, Violations};
use serde::{Deserialize, Serialize};

/// Delivery method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingKind {
    /// Correios PAC (regular)
    Pac,
    /// Correios SEDEX (express)
    Sedex,
    /// Not specified; the buyer picks on the checkout page
    #[default]
    Unknown,
}

impl ShippingKind {
    /// Numeric code used by the gateway schema
    pub fn code(&self) -> u8 {
        match self {
            ShippingKind::Pac => 1,
            ShippingKind::Sedex => 2,
            ShippingKind::Unknown => 3,
        }
    }
}

/// Delivery address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    /// CEP, eight digits
    pub postal_code: Option<String>,
    pub city: Option<String>,
    /// Two-letter state code
    pub state: Option<String>,
    /// Defaults to `BRA` when rendered
    pub country: Option<String>,
}

/// Shipping details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipping {
    #[serde(default)]
    pub kind: ShippingKind,

    /// Shipping cost, decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Shipping {
    pub fn new(kind: ShippingKind) -> Self {
        Self {
            kind,
            cost: None,
            address: None,
        }
    }

    pub fn with_cost(mut self, cost: impl Into<String>) -> Self {
        self.cost = Some(cost.into());
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }
}

impl Validate for Shipping {
    fn validate(&self) -> Violations {
        let mut v = Violations::new();
        if let Some(ref cost) = self.cost {
            v.check(!is_valid_amount(cost), "cost", "must be a valid decimal");
        }
        let postal_code = self.address.as_ref().and_then(|a| a.postal_code.as_ref());
        if let Some(code) = postal_code {
            v.check(
                !is_digits(code) || code.len() != 8,
                "postal_code",
                "must have eight digits",
            );
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!(ShippingKind::Pac.code(), 1);
        assert_eq!(ShippingKind::Sedex.code(), 2);
        assert_eq!(ShippingKind::default().code(), 3);
    }

    #[test]
    fn test_shipping_rules() {
        let shipping = Shipping::new(ShippingKind::Sedex)
            .with_cost("abc")
            .with_address(Address {
                postal_code: Some("01452-002".into()),
                ..Default::default()
            });
        let v = shipping.validate();

        assert!(v.has("cost"));
        assert!(v.has("postal_code"));
    }

    #[test]
    fn test_valid_shipping() {
        let shipping = Shipping::new(ShippingKind::Pac)
            .with_cost("12.50")
            .with_address(Address {
                street: Some("Av. Brig. Faria Lima".into()),
                number: Some("1384".into()),
                postal_code: Some("01452002".into()),
                city: Some("Sao Paulo".into()),
                state: Some("SP".into()),
                ..Default::default()
            });
        assert!(shipping.is_valid());
    }
}
