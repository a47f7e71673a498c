//! End-to-end check that `POST /api/purchase` is wired correctly into the
//! coordinator: a JSON request in, a mock transport reply, a JSON response
//! out, with the right shape and status code.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use tef_coordinator::TransactionCoordinator;
use tef_transport::{MockTransport, SerialConfig};

fn mock_approved_frame() -> Vec<u8> {
    tef_codec::encode_response_frame(
        tef_codec::constants::PURCHASE_HEADER,
        &[("48", 2, "00"), ("01", 6, "OK0001"), ("40", 12, "000000015000")],
    )
    .into_bytes()
}

#[tokio::test]
async fn purchase_round_trips_through_http_into_the_mock_transport() {
    let transport = MockTransport::new(mock_approved_frame());
    let coordinator = TransactionCoordinator::spawn(Box::new(transport), SerialConfig::default());
    coordinator.connect("mock").await.expect("mock transport connects");

    let app = tef_server::http::router(coordinator, std::time::Duration::from_secs(5));

    let body = serde_json::json!({
        "amount_cents": 150_00,
        "tax_cents": 0,
        "tip_cents": 0,
        "iac": 0,
        "terminal_id": "TERM0001",
        "transaction_id": "TX000001",
        "cashier_id": "CASHIER01",
        "send_pan": false,
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/purchase")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(parsed["approved"], true);
    assert_eq!(parsed["response_code"], "00");
    assert_eq!(parsed["auth_code"], "OK0001");
}

#[tokio::test]
async fn malformed_purchase_request_is_rejected_before_touching_the_transport() {
    let transport = MockTransport::new(mock_approved_frame());
    let coordinator = TransactionCoordinator::spawn(Box::new(transport), SerialConfig::default());
    coordinator.connect("mock").await.expect("mock transport connects");

    let app = tef_server::http::router(coordinator, std::time::Duration::from_secs(5));

    // amount_cents is zero, which `PurchaseRequest::validate` rejects.
    let body = serde_json::json!({
        "amount_cents": 0,
        "tax_cents": 0,
        "tip_cents": 0,
        "iac": 0,
        "terminal_id": "TERM0001",
        "transaction_id": "TX000001",
        "cashier_id": "CASHIER01",
        "send_pan": false,
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/purchase")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_check_reports_ok_without_a_connected_transport() {
    let transport = MockTransport::new(mock_approved_frame());
    let coordinator = TransactionCoordinator::spawn(Box::new(transport), SerialConfig::default());
    let app = tef_server::http::router(coordinator, std::time::Duration::from_secs(5));

    let request = Request::builder().method("GET").uri("/api/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
