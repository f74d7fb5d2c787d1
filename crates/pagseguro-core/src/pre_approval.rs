//! # Pre-Approval
//!
//! Recurring-payment authorization requested alongside a checkout. Only
//! validated and rendered here; managing the resulting authorization is a
//! separate gateway API.

use crate::digits::is_valid_amount;
use crate::validation::{is_blank, Validate, Violations, BLANK};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Who triggers each charge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Charge {
    /// Gateway charges on schedule
    #[default]
    Auto,
    /// Merchant requests each charge
    Manual,
}

impl Charge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Charge::Auto => "auto",
            Charge::Manual => "manual",
        }
    }
}

/// Charge interval
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Weekly,
    #[default]
    Monthly,
    Bimonthly,
    Trimonthly,
    Semiannually,
    Yearly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Bimonthly => "bimonthly",
            Period::Trimonthly => "trimonthly",
            Period::Semiannually => "semiannually",
            Period::Yearly => "yearly",
        }
    }
}

/// Recurring-payment authorization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreApproval {
    #[serde(default)]
    pub charge: Charge,

    /// Name shown to the buyer
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Fixed amount per charge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_per_payment: Option<String>,

    /// Cap per charge when the amount varies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount_per_payment: Option<String>,

    #[serde(default)]
    pub period: Period,

    /// Last day the authorization may be used. Accepts an RFC 3339 string
    /// or a bare TOML offset datetime.
    #[serde(deserialize_with = "deserialize_final_date")]
    pub final_date: DateTime<FixedOffset>,

    /// Cap over the whole authorization
    pub max_total_amount: String,
}

/// TOML hands native datetimes to serde as a one-key map
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDateTime {
    Text(String),
    Toml {
        #[serde(rename = "$__toml_private_datetime")]
        value: String,
    },
}

fn deserialize_final_date<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match RawDateTime::deserialize(deserializer)? {
        RawDateTime::Text(text) => text,
        RawDateTime::Toml { value } => value,
    };
    DateTime::parse_from_rfc3339(raw.trim()).map_err(serde::de::Error::custom)
}

impl PreApproval {
    pub fn new(
        name: impl Into<String>,
        period: Period,
        final_date: DateTime<FixedOffset>,
        max_total_amount: impl Into<String>,
    ) -> Self {
        Self {
            charge: Charge::Auto,
            name: name.into(),
            details: None,
            amount_per_payment: None,
            max_amount_per_payment: None,
            period,
            final_date,
            max_total_amount: max_total_amount.into(),
        }
    }

    pub fn with_charge(mut self, charge: Charge) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_amount_per_payment(mut self, amount: impl Into<String>) -> Self {
        self.amount_per_payment = Some(amount.into());
        self
    }

    pub fn with_max_amount_per_payment(mut self, amount: impl Into<String>) -> Self {
        self.max_amount_per_payment = Some(amount.into());
        self
    }

    /// Validate against an explicit clock
    pub fn validate_at(&self, now: DateTime<Utc>) -> Violations {
        let mut v = Violations::new();
        v.check(is_blank(&self.name), "name", BLANK);
        v.check(
            !is_valid_amount(&self.max_total_amount),
            "max_total_amount",
            "must be a valid decimal",
        );
        if let Some(ref amount) = self.amount_per_payment {
            v.check(
                !is_valid_amount(amount),
                "amount_per_payment",
                "must be a valid decimal",
            );
        }
        if let Some(ref amount) = self.max_amount_per_payment {
            v.check(
                !is_valid_amount(amount),
                "max_amount_per_payment",
                "must be a valid decimal",
            );
        }
        v.check(
            self.final_date.with_timezone(&Utc) <= now,
            "final_date",
            "must be in the future",
        );
        v
    }
}

impl Validate for PreApproval {
    fn validate(&self) -> Violations {
        self.validate_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn final_date() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2031, 1, 21, 0, 0, 0)
            .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_pre_approval() {
        let pre = PreApproval::new("Monthly plan", Period::Monthly, final_date(), "600.00")
            .with_amount_per_payment("50.00")
            .with_details("Plan charged every month");
        assert!(pre.validate_at(now()).is_empty());
    }

    #[test]
    fn test_expired_final_date() {
        let pre = PreApproval::new("Plan", Period::Yearly, final_date(), "600.00");
        let later = Utc.with_ymd_and_hms(2032, 1, 1, 0, 0, 0).unwrap();
        assert!(pre.validate_at(later).has("final_date"));
    }

    #[test]
    fn test_pre_approval_rules() {
        let pre = PreApproval::new("", Period::Weekly, final_date(), "lots")
            .with_max_amount_per_payment("1.234");
        let v = pre.validate_at(now());

        assert!(v.has("name"));
        assert!(v.has("max_total_amount"));
        assert!(v.has("max_amount_per_payment"));
        assert!(!v.has("final_date"));
    }

    #[test]
    fn test_final_date_from_toml() {
        let quoted: PreApproval = toml::from_str(
            r#"
            name = "Plan"
            final_date = "2031-01-21T00:00:00-03:00"
            max_total_amount = "600.00"
            "#,
        )
        .unwrap();
        let bare: PreApproval = toml::from_str(
            r#"
            name = "Plan"
            final_date = 2031-01-21T00:00:00-03:00
            max_total_amount = "600.00"
            "#,
        )
        .unwrap();

        assert_eq!(quoted.final_date, final_date());
        assert_eq!(bare.final_date, final_date());
        assert_eq!(bare.period, Period::Monthly);
    }

    #[test]
    fn test_final_date_rejects_garbage() {
        let result: Result<PreApproval, _> = toml::from_str(
            r#"
            name = "Plan"
            final_date = "next year"
            max_total_amount = "600.00"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(Charge::Manual.as_str(), "manual");
        assert_eq!(Period::Semiannually.as_str(), "semiannually");
    }
}
