//! End-to-end checkout against a mocked gateway.

use pagseguro_client::GatewayConfig;
use pagseguro_core::{Gateway, Item, Payment, PaymentError, Sender};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUCCESS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><checkout><code>ABC123</code><date>2011-02-05T15:14:50.000-03:00</date></checkout>"#;

fn gateway_for(server: &MockServer) -> Gateway {
    GatewayConfig::new("seller@example.com", "TOKEN")
        .with_api_base_url(format!("{}/v2", server.uri()))
        .with_site_base_url("https://pagseguro.example.test/v2")
        .into_gateway()
        .unwrap()
}

fn payment() -> Payment {
    Payment::new("seller@example.com", "TOKEN")
        .with_reference("REF1234")
        .with_sender(Sender::new().with_email("buyer@example.com"))
        .with_item(Item::new("0001", "Notebook", "24300", 1))
}

#[tokio::test]
async fn test_checkout_posts_xml_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout"))
        .and(query_param("email", "seller@example.com"))
        .and(query_param("token", "TOKEN"))
        .and(header("content-type", "application/xml"))
        .and(body_string_contains("<reference>REF1234</reference>"))
        .and(body_string_contains("<amount>24300.00</amount>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SUCCESS))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let mut payment = payment();

    assert_eq!(payment.code(&gateway).await.unwrap(), "ABC123");
    assert_eq!(
        payment.date(&gateway).await.unwrap().to_rfc3339(),
        "2011-02-05T15:14:50-03:00"
    );
    assert_eq!(
        payment.checkout_payment_url(&gateway).await.unwrap(),
        "https://pagseguro.example.test/v2/checkout/payment.html?code=ABC123"
    );
}

#[tokio::test]
async fn test_reset_posts_again() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SUCCESS))
        .expect(2)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let mut payment = payment();

    payment.code(&gateway).await.unwrap();
    payment.reset();
    payment.code(&gateway).await.unwrap();
}

#[tokio::test]
async fn test_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = payment().code(&gateway_for(&server)).await.unwrap_err();
    assert!(matches!(err, PaymentError::Unauthorized));
}

#[tokio::test]
async fn test_invalid_data_keeps_gateway_detail() {
    let server = MockServer::start().await;
    let detail = r#"<?xml version="1.0" encoding="UTF-8"?><errors><error><code>11004</code><message>Currency is required.</message></error></errors>"#;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string(detail))
        .mount(&server)
        .await;

    match payment().code(&gateway_for(&server)).await {
        Err(PaymentError::InvalidData { detail: got }) => assert_eq!(got, detail),
        other => panic!("expected InvalidData, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = payment().date(&gateway_for(&server)).await.unwrap_err();
    assert_eq!(err.gateway_status(), Some(500));
}

#[tokio::test]
async fn test_unreachable_gateway_is_a_network_error() {
    let gateway = GatewayConfig::new("seller@example.com", "TOKEN")
        .with_api_base_url("http://127.0.0.1:9")
        .into_gateway()
        .unwrap();

    let err = payment().code(&gateway).await.unwrap_err();
    assert!(matches!(err, PaymentError::NetworkError(_)));
}
