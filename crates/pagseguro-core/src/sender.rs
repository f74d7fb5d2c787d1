//! # Sender
//!
//! The buyer. Every field is optional; whatever is given pre-fills the
//! hosted checkout page.

use crate::validation::{is_digits, is_email, Validate, Violations};
use serde::{Deserialize, Serialize};

/// Buyer phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    /// Two-digit area code (DDD)
    pub area_code: String,
    pub number: String,
}

impl Phone {
    pub fn new(area_code: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            area_code: area_code.into(),
            number: number.into(),
        }
    }
}

/// The paying customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
}

impl Sender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, area_code: impl Into<String>, number: impl Into<String>) -> Self {
        self.phone = Some(Phone::new(area_code, number));
        self
    }

    /// Nothing set; rendered as no `<sender>` block at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

impl Validate for Sender {
    fn validate(&self) -> Violations {
        let mut v = Violations::new();
        if let Some(ref email) = self.email {
            v.check(!is_email(email), "email", "is invalid");
        }
        if let Some(ref phone) = self.phone {
            v.check(
                !is_digits(&phone.area_code) || phone.area_code.len() != 2,
                "phone",
                "area code must have two digits",
            );
            v.check(!is_digits(&phone.number), "phone", "number must be numeric");
        }
        v
    }
}
