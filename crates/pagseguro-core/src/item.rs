//! # Line Items
//!
//! Products listed on a checkout. The gateway requires at least one.

use crate::digits::is_valid_amount;
use crate::validation::{is_blank, Validate, Violations, BLANK};
use serde::{Deserialize, Serialize};

/// A line item in a checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Merchant product identifier
    pub id: String,

    /// Description shown to the buyer
    pub description: String,

    /// Unit price, decimal string (`"24300.00"`)
    pub amount: String,

    /// Quantity
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Unit weight in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,

    /// Per-item shipping cost, decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount: amount.into(),
            quantity,
            weight: None,
            shipping_cost: None,
        }
    }

    pub fn with_weight(mut self, grams: u32) -> Self {
        self.weight = Some(grams);
        self
    }

    pub fn with_shipping_cost(mut self, cost: impl Into<String>) -> Self {
        self.shipping_cost = Some(cost.into());
        self
    }
}

impl Validate for Item {
    fn validate(&self) -> Violations {
        let mut v = Violations::new();
        v.check(is_blank(&self.id), "id", BLANK);
        v.check(is_blank(&self.description), "description", BLANK);
        v.check(
            !is_valid_amount(&self.amount),
            "amount",
            "must be a valid decimal",
        );
        v.check(self.quantity == 0, "quantity", "must be greater than 0");
        if let Some(ref cost) = self.shipping_cost {
            v.check(
                !is_valid_amount(cost),
                "shipping_cost",
                "must be a valid decimal",
            );
        }
        v
    }
}
