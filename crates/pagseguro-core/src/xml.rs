//! # Checkout XML
//!
//! Renders a [`Payment`] into the gateway's `<checkout>` request document.
//!
//! The document is built from borrowed serde structs, so rendering is a
//! pure function of the payment's fields: no template files, no I/O, and
//! identical input always yields identical bytes. Optional fields that are
//! unset are left out entirely, and quick-xml escapes every text node.

use crate::digits::render_amount;
use crate::error::PaymentResult;
use crate::item::Item;
use crate::payment::Payment;
use crate::pre_approval::PreApproval;
use crate::sender::Sender;
use crate::shipping::{Address, Shipping};
use chrono::SecondsFormat;
use serde::Serialize;

/// Prolog prepended to every rendered document
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Only currency the gateway settles in
pub const CURRENCY: &str = "BRL";

const DEFAULT_COUNTRY: &str = "BRA";

/// Render the full request document
pub fn render(payment: &Payment) -> PaymentResult<String> {
    let document = CheckoutXml::from_payment(payment);
    let body = quick_xml::se::to_string_with_root("checkout", &document)?;
    Ok(format!("{}{}", XML_DECLARATION, body))
}

// =============================================================================
// Document Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutXml<'a> {
    currency: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender: Option<SenderXml<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<ItemsXml<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping: Option<ShippingXml<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra_amount: Option<String>,
    #[serde(rename = "redirectURL", skip_serializing_if = "Option::is_none")]
    redirect_url: Option<&'a str>,
    #[serde(rename = "notificationURL", skip_serializing_if = "Option::is_none")]
    notification_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_uses: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pre_approval: Option<PreApprovalXml<'a>>,
}

impl<'a> CheckoutXml<'a> {
    fn from_payment(payment: &'a Payment) -> Self {
        Self {
            currency: CURRENCY,
            reference: payment.reference(),
            sender: (!payment.sender.is_empty()).then(|| SenderXml::from(&payment.sender)),
            items: (!payment.items.is_empty()).then(|| ItemsXml {
                item: payment.items.iter().map(ItemXml::from).collect(),
            }),
            shipping: payment.shipping.as_ref().map(ShippingXml::from),
            extra_amount: payment.extra_amount(),
            redirect_url: payment.redirect_url(),
            notification_url: payment.notification_url(),
            max_uses: payment.max_uses,
            max_age: payment.max_age,
            pre_approval: payment.pre_approval.as_ref().map(PreApprovalXml::from),
        }
    }
}

#[derive(Debug, Serialize)]
struct SenderXml<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<PhoneXml<'a>>,
}

impl<'a> From<&'a Sender> for SenderXml<'a> {
    fn from(sender: &'a Sender) -> Self {
        Self {
            name: sender.name.as_deref(),
            email: sender.email.as_deref(),
            phone: sender.phone.as_ref().map(|p| PhoneXml {
                area_code: &p.area_code,
                number: &p.number,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhoneXml<'a> {
    area_code: &'a str,
    number: &'a str,
}

#[derive(Debug, Serialize)]
struct ItemsXml<'a> {
    item: Vec<ItemXml<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemXml<'a> {
    id: &'a str,
    description: &'a str,
    amount: String,
    quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<u32>,
}

impl<'a> From<&'a Item> for ItemXml<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            id: &item.id,
            description: &item.description,
            amount: render_amount(&item.amount),
            quantity: item.quantity,
            shipping_cost: item.shipping_cost.as_deref().map(render_amount),
            weight: item.weight,
        }
    }
}

#[derive(Debug, Serialize)]
struct ShippingXml<'a> {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<AddressXml<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<String>,
}

impl<'a> From<&'a Shipping> for ShippingXml<'a> {
    fn from(shipping: &'a Shipping) -> Self {
        Self {
            kind: shipping.kind.code(),
            address: shipping.address.as_ref().map(AddressXml::from),
            cost: shipping.cost.as_deref().map(render_amount),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddressXml<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    street: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    complement: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    district: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    country: &'a str,
}

impl<'a> From<&'a Address> for AddressXml<'a> {
    fn from(address: &'a Address) -> Self {
        Self {
            street: address.street.as_deref(),
            number: address.number.as_deref(),
            complement: address.complement.as_deref(),
            district: address.district.as_deref(),
            postal_code: address.postal_code.as_deref(),
            city: address.city.as_deref(),
            state: address.state.as_deref(),
            country: address.country.as_deref().unwrap_or(DEFAULT_COUNTRY),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreApprovalXml<'a> {
    charge: &'static str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount_per_payment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_amount_per_payment: Option<String>,
    period: &'static str,
    final_date: String,
    max_total_amount: String,
}

impl<'a> From<&'a PreApproval> for PreApprovalXml<'a> {
    fn from(pre: &'a PreApproval) -> Self {
        Self {
            charge: pre.charge.as_str(),
            name: &pre.name,
            details: pre.details.as_deref(),
            amount_per_payment: pre.amount_per_payment.as_deref().map(render_amount),
            max_amount_per_payment: pre.max_amount_per_payment.as_deref().map(render_amount),
            period: pre.period.as_str(),
            final_date: pre.final_date.to_rfc3339_opts(SecondsFormat::Secs, false),
            max_total_amount: render_amount(&pre.max_total_amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pre_approval::Period;
    use crate::shipping::ShippingKind;
    use chrono::{FixedOffset, TimeZone};

    fn minimal() -> Payment {
        Payment::new("seller@example.com", "TOKEN")
            .with_reference("REF1234")
            .with_item(Item::new("0001", "Notebook Prata", "24300", 1))
    }

    #[test]
    fn test_minimal_document() {
        let xml = render(&minimal()).unwrap();

        assert_eq!(
            xml,
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                "<checkout>",
                "<currency>BRL</currency>",
                "<reference>REF1234</reference>",
                "<items><item>",
                "<id>0001</id><description>Notebook Prata</description>",
                "<amount>24300.00</amount><quantity>1</quantity>",
                "</item></items>",
                "</checkout>"
            )
        );
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let xml = render(&minimal()).unwrap();

        for tag in [
            "<sender",
            "<shipping",
            "<extraAmount",
            "<redirectURL",
            "<notificationURL",
            "<maxUses",
            "<maxAge",
            "<preApproval",
        ] {
            assert!(!xml.contains(tag), "unexpected {} in {}", tag, xml);
        }
    }

    #[test]
    fn test_full_document_fields() {
        let final_date = FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2031, 1, 21, 0, 0, 0)
            .unwrap();
        let payment = minimal()
            .with_item(
                Item::new("0002", "Mouse", "35.5", 2)
                    .with_weight(200)
                    .with_shipping_cost("1"),
            )
            .with_sender(
                Sender::new()
                    .with_name("José Comprador")
                    .with_email("comprador@uol.com.br")
                    .with_phone("11", "56273440"),
            )
            .with_shipping(Shipping::new(ShippingKind::Sedex).with_cost("12.5").with_address(
                Address {
                    street: Some("Av. Brig. Faria Lima".into()),
                    postal_code: Some("01452002".into()),
                    ..Default::default()
                },
            ))
            .with_extra_amount("3")
            .with_redirect_url("https://shop.example.com/thanks")
            .with_notification_url("https://shop.example.com/notify")
            .with_max_uses(5)
            .with_max_age(120)
            .with_pre_approval(PreApproval::new("Plan", Period::Monthly, final_date, "600"));

        let xml = render(&payment).unwrap();

        assert!(xml.contains("<sender><name>José Comprador</name><email>comprador@uol.com.br</email><phone><areaCode>11</areaCode><number>56273440</number></phone></sender>"));
        assert!(xml.contains("<item><id>0002</id><description>Mouse</description><amount>35.50</amount><quantity>2</quantity><shippingCost>1.00</shippingCost><weight>200</weight></item>"));
        assert!(xml.contains("<shipping><type>2</type><address><street>Av. Brig. Faria Lima</street><postalCode>01452002</postalCode><country>BRA</country></address><cost>12.50</cost></shipping>"));
        assert!(xml.contains("<extraAmount>3.00</extraAmount>"));
        assert!(xml.contains("<redirectURL>https://shop.example.com/thanks</redirectURL>"));
        assert!(xml.contains("<notificationURL>https://shop.example.com/notify</notificationURL>"));
        assert!(xml.contains("<maxUses>5</maxUses><maxAge>120</maxAge>"));
        assert!(xml.contains("<preApproval><charge>auto</charge><name>Plan</name><period>monthly</period><finalDate>2031-01-21T00:00:00-03:00</finalDate><maxTotalAmount>600.00</maxTotalAmount></preApproval>"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let payment = Payment::new("seller@example.com", "TOKEN")
            .with_reference("<order & co>")
            .with_item(Item::new("1", "Fish & \"Chips\" <large>", "10.00", 1));

        let xml = render(&payment).unwrap();

        assert!(!xml.contains("<order & co>"));
        assert!(xml.contains("&lt;order &amp; co"));
        assert!(xml.contains("Fish &amp;"));
        assert!(xml.contains("&lt;large"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let payment = minimal()
            .with_extra_amount("1.5")
            .with_sender(Sender::new().with_email("buyer@example.com"));

        assert_eq!(render(&payment).unwrap(), render(&payment).unwrap());
    }

    #[test]
    fn test_blank_optionals_are_omitted() {
        let payment = minimal()
            .with_extra_amount("")
            .with_redirect_url("")
            .with_notification_url("  ");

        let xml = render(&payment).unwrap();

        assert!(!xml.contains("<extraAmount"));
        assert!(!xml.contains("<redirectURL"));
        assert!(!xml.contains("<notificationURL"));
        assert_eq!(xml, render(&minimal()).unwrap());
    }

    #[test]
    fn test_credentials_are_not_in_the_body() {
        let xml = render(&minimal()).unwrap();
        assert!(!xml.contains("TOKEN"));
        assert!(!xml.contains("seller@example.com"));
    }
}
