//! Subcommand implementations.

use crate::cli::{CheckoutArgs, UrlsArgs};
use anyhow::{bail, Context, Result};
use pagseguro_client::GatewayConfig;
use pagseguro_core::{Environment, GatewayUrls, Payment, Validate, Violations};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct CheckoutReport<'a> {
    reference: Option<&'a str>,
    code: &'a str,
    date: String,
    payment_url: String,
}

#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    valid: bool,
    violations: &'a Violations,
}

/// Read a payment from a TOML order file
pub fn load_payment(path: &Path) -> Result<Payment> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading order file {}", path.display()))?;
    let payment: Payment =
        toml::from_str(&raw).with_context(|| format!("parsing order file {}", path.display()))?;
    Ok(payment)
}

pub async fn checkout(args: CheckoutArgs) -> Result<()> {
    let payment = load_payment(&args.order)?;

    if args.validate_only {
        // Credentials are optional here; fill them in when configured
        let payment = match GatewayConfig::from_env() {
            Ok(config) => payment.with_default_credentials(&config.credentials()),
            Err(_) => payment,
        };
        return report_validation(&payment, args.json);
    }

    let mut config = GatewayConfig::from_env().context("loading gateway configuration")?;
    if args.sandbox {
        // PAGSEGURO_*_BASE_URL overrides survive the switch
        config = config.with_environment(Environment::Sandbox);
    }
    info!("Environment: {}", config.environment);

    let mut payment = payment.with_default_credentials(&config.credentials());
    let violations = payment.validate();
    if !violations.is_empty() {
        warn!("Payment has violations: {}", violations);
    }

    let gateway = config.into_gateway()?;
    let response = payment.ensure_checkout(&gateway).await?.clone();
    let payment_url = gateway.urls().checkout_payment_url(&response.code);

    if args.json {
        let report = CheckoutReport {
            reference: payment.reference(),
            code: &response.code,
            date: response.date.to_rfc3339(),
            payment_url,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("code: {}", response.code);
        println!("date: {}", response.date.to_rfc3339());
        println!("redirect: {}", payment_url);
    }

    Ok(())
}

fn report_validation(payment: &Payment, json: bool) -> Result<()> {
    let violations = payment.validate();

    if json {
        let report = ValidationReport {
            valid: violations.is_empty(),
            violations: &violations,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if violations.is_empty() {
        println!("payment is valid");
    } else {
        for violation in violations.iter() {
            println!("{}", violation);
        }
    }

    if !violations.is_empty() {
        bail!("payment is invalid ({} violations)", violations.len());
    }
    Ok(())
}

pub fn urls(args: UrlsArgs) -> Result<()> {
    let environment = if args.sandbox {
        Environment::Sandbox
    } else {
        Environment::Production
    };
    let urls = GatewayUrls::for_environment(environment);

    println!("checkout: {}", urls.checkout_url());
    if let Some(code) = args.code {
        println!("redirect: {}", urls.checkout_payment_url(&code));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ORDER: &str = r#"
reference = "REF1234"
email = "seller@example.com"
token = "TOKEN"
redirect_url = "https://shop.example.com/thanks"

[[items]]
id = "0001"
description = "Notebook"
amount = "24300.00"
"#;

    #[test]
    fn test_load_payment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ORDER.as_bytes()).unwrap();

        let payment = load_payment(file.path()).unwrap();

        assert_eq!(payment.reference(), Some("REF1234"));
        assert_eq!(payment.items[0].quantity, 1);
        assert!(payment.is_valid());
    }

    #[test]
    fn test_load_payment_reports_path() {
        let err = load_payment(Path::new("/nonexistent/order.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/order.toml"));
    }

    #[test]
    fn test_invalid_order_fails_validation() {
        let payment = Payment::new("seller@example.com", "");
        let err = report_validation(&payment, true).unwrap_err();
        assert!(err.to_string().contains("invalid"));
    }

    #[test]
    fn test_valid_order_passes_validation() {
        let payment: Payment = toml::from_str(ORDER).unwrap();
        assert!(report_validation(&payment, false).is_ok());
    }
}
