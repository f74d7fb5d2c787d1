//! # Checkout Response
//!
//! Maps a raw transport response to either a parsed [`CheckoutResponse`]
//! or a classified [`PaymentError`].
//!
//! | status | outcome                                  |
//! |--------|------------------------------------------|
//! | 200    | parse `<checkout><code>` / `<date>`      |
//! | 401    | [`PaymentError::Unauthorized`]           |
//! | 400    | [`PaymentError::InvalidData`] with body  |
//! | other  | [`PaymentError::UnknownError`]           |

use crate::error::{PaymentError, PaymentResult};
use crate::transport::TransportResponse;
use crate::validation::is_blank;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use tracing::{error, warn};

/// A successful checkout registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutResponse {
    /// HTTP status (always 200)
    pub status: u16,
    /// Raw XML body as received
    pub body: String,
    /// Transaction code used in the redirect URL
    pub code: String,
    /// When the gateway registered the checkout
    pub date: DateTime<FixedOffset>,
}

#[derive(Debug, Deserialize)]
struct CheckoutDocument {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

/// Classify a transport response by status and parse the success body
pub fn classify(response: TransportResponse) -> PaymentResult<CheckoutResponse> {
    match response.status {
        200 => {
            let (code, date) = parse_checkout(&response.body)?;
            Ok(CheckoutResponse {
                status: response.status,
                body: response.body,
                code,
                date,
            })
        }
        401 => {
            warn!("Gateway rejected credentials");
            Err(PaymentError::Unauthorized)
        }
        400 => {
            warn!("Gateway rejected checkout data: {}", response.body);
            Err(PaymentError::InvalidData {
                detail: response.body,
            })
        }
        status => {
            error!("Gateway error: status={}, body={}", status, response.body);
            Err(PaymentError::UnknownError {
                status,
                body: response.body,
            })
        }
    }
}

/// Extract code and date from a `<checkout>` document
pub fn parse_checkout(body: &str) -> PaymentResult<(String, DateTime<FixedOffset>)> {
    if !body.contains("<checkout") {
        return Err(PaymentError::MalformedResponse(
            "missing <checkout> element".to_string(),
        ));
    }

    let document: CheckoutDocument = quick_xml::de::from_str(body)
        .map_err(|e| PaymentError::MalformedResponse(format!("unreadable body: {}", e)))?;

    let code = document
        .code
        .filter(|c| !is_blank(c))
        .ok_or_else(|| PaymentError::MalformedResponse("missing <code>".to_string()))?;

    let raw_date = document
        .date
        .ok_or_else(|| PaymentError::MalformedResponse("missing <date>".to_string()))?;

    let date = DateTime::parse_from_rfc3339(raw_date.trim()).map_err(|e| {
        PaymentError::MalformedResponse(format!("invalid <date> '{}': {}", raw_date, e))
    })?;

    Ok((code.trim().to_string(), date))
}
