//! # Payment
//!
//! The checkout request: merchant credentials, items, buyer and delivery
//! details, and the optional knobs the gateway accepts. Checkout behaviour
//! (submitting, caching the response) lives in [`crate::checkout`].

use crate::digits::{format_amount, is_valid_amount};
use crate::item::Item;
use crate::pre_approval::PreApproval;
use crate::response::CheckoutResponse;
use crate::sender::Sender;
use crate::shipping::Shipping;
use crate::transport::Credentials;
use crate::validation::{is_blank, is_http_url, present, Validate, Violations, BLANK};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shortest `max_age` the gateway accepts, in seconds
pub const MIN_MAX_AGE: i64 = 30;

/// A checkout request for one order
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Payment {
    /// Merchant order identifier, sent as `<reference>`
    #[serde(default, alias = "reference", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Merchant account e-mail
    #[serde(default)]
    pub email: String,

    /// Merchant API token
    #[serde(default, skip_serializing)]
    pub token: String,

    /// Line items (at least one)
    #[serde(default)]
    pub items: Vec<Item>,

    /// Buyer details
    #[serde(default)]
    pub sender: Sender,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Shipping>,

    /// Surcharge added to the total, decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_amount: Option<String>,

    /// Where the buyer lands after paying
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,

    /// Where the gateway posts status notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,

    /// How many times the checkout code may be used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<i64>,

    /// How long the checkout code stays valid, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_approval: Option<PreApproval>,

    #[serde(skip)]
    pub(crate) response: Option<CheckoutResponse>,
}

impl Payment {
    /// Create a payment for the given merchant account
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
            ..Default::default()
        }
    }

    /// Alias for `id`
    pub fn reference(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_reference(&mut self, reference: impl Into<String>) {
        self.id = Some(reference.into());
    }

    /// Extra amount with exactly two decimals; raw text if it is not a number.
    /// Blank counts as unset.
    pub fn extra_amount(&self) -> Option<String> {
        present(&self.extra_amount).map(|raw| format_amount(raw).unwrap_or_else(|| raw.to_string()))
    }

    /// Redirect URL, `None` when unset or blank
    pub fn redirect_url(&self) -> Option<&str> {
        present(&self.redirect_url)
    }

    /// Notification URL, `None` when unset or blank
    pub fn notification_url(&self) -> Option<&str> {
        present(&self.notification_url)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.token.clone())
    }

    /// Fill blank credentials from a default account
    pub fn with_default_credentials(mut self, credentials: &Credentials) -> Self {
        if is_blank(&self.email) {
            self.email = credentials.email.clone();
        }
        if is_blank(&self.token) {
            self.token = credentials.token.clone();
        }
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.set_reference(reference);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_sender(mut self, sender: Sender) -> Self {
        self.sender = sender;
        self
    }

    pub fn with_shipping(mut self, shipping: Shipping) -> Self {
        self.shipping = Some(shipping);
        self
    }

    pub fn with_extra_amount(mut self, amount: impl Into<String>) -> Self {
        self.extra_amount = Some(amount.into());
        self
    }

    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    pub fn with_notification_url(mut self, url: impl Into<String>) -> Self {
        self.notification_url = Some(url.into());
        self
    }

    pub fn with_max_uses(mut self, max_uses: i64) -> Self {
        self.max_uses = Some(max_uses);
        self
    }

    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn with_pre_approval(mut self, pre_approval: PreApproval) -> Self {
        self.pre_approval = Some(pre_approval);
        self
    }

    /// Run every rule, checking the pre-approval against `now`
    pub fn validate_at(&self, now: DateTime<Utc>) -> Violations {
        let mut v = Violations::new();

        v.check(is_blank(&self.email), "email", BLANK);
        v.check(is_blank(&self.token), "token", BLANK);

        if let Some(amount) = present(&self.extra_amount) {
            v.check(
                !is_valid_amount(amount),
                "extra_amount",
                "must be a valid decimal",
            );
        }
        if let Some(url) = self.redirect_url() {
            v.check(
                !is_http_url(url),
                "redirect_url",
                "must give a correct url for redirection",
            );
        }
        if let Some(url) = self.notification_url() {
            v.check(
                !is_http_url(url),
                "notification_url",
                "must give a correct url for notification",
            );
        }
        if let Some(max_uses) = self.max_uses {
            v.check(
                max_uses <= 0,
                "max_uses",
                "must be an integer greater than 0",
            );
        }
        if let Some(max_age) = self.max_age {
            v.check(
                max_age < MIN_MAX_AGE,
                "max_age",
                "must be an integer greater or equal to 30",
            );
        }
        if let Some(ref pre_approval) = self.pre_approval {
            v.check(
                !pre_approval.validate_at(now).is_empty(),
                "pre_approval",
                "must be valid",
            );
        }
        v.check(
            self.items.is_empty() || !self.items.iter().all(Item::is_valid),
            "items",
            "must be all valid",
        );
        v.check(!self.sender.is_valid(), "sender", "must be valid");
        if let Some(ref shipping) = self.shipping {
            v.check(!shipping.is_valid(), "shipping", "must be valid");
        }

        v
    }
}

impl fmt::Debug for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payment")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .field("items", &self.items)
            .field("sender", &self.sender)
            .field("shipping", &self.shipping)
            .field("extra_amount", &self.extra_amount)
            .field("redirect_url", &self.redirect_url)
            .field("notification_url", &self.notification_url)
            .field("max_uses", &self.max_uses)
            .field("max_age", &self.max_age)
            .field("pre_approval", &self.pre_approval)
            .field("response", &self.response)
            .finish()
    }
}

impl Validate for Payment {
    fn validate(&self) -> Violations {
        self.validate_at(Utc::now())
    }
}
