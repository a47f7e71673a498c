mod support;

use std::time::Duration;

use assert_matches::assert_matches;
use support::TestTransport;

use tef_codec::PurchaseRequest;
use tef_coordinator::{CoordinatorError, TransactionCoordinator};
use tef_transport::SerialConfig;

fn sample_purchase() -> PurchaseRequest {
    PurchaseRequest {
        amount_cents: 150_00,
        tax_cents: 0,
        tip_cents: 0,
        iac: 0,
        terminal_id: "TERM0001".into(),
        transaction_id: "TX000001".into(),
        cashier_id: "CASHIER01".into(),
        send_pan: false,
    }
}

fn approved_frame() -> Vec<u8> {
    tef_codec::encode_response_frame(
        tef_codec::constants::PURCHASE_HEADER,
        &[("48", 2, "00"), ("01", 6, "A1B2C3")],
    )
    .into_bytes()
}

#[tokio::test]
async fn purchase_completes_when_response_arrives() {
    let transport = TestTransport::new();
    let handle = transport.clone();
    let coordinator = TransactionCoordinator::spawn(Box::new(transport), SerialConfig::default());
    coordinator.connect("mock").await.unwrap();

    let send = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.send_purchase(sample_purchase(), Some(Duration::from_secs(5))).await }
    });

    // Give the coordinator a moment to register the write before replying.
    tokio::time::sleep(Duration::from_millis(20)).await;
    handle.deliver(approved_frame()).await;

    let response = send.await.unwrap().expect("purchase completes");
    assert!(response.approved);
    assert_eq!(response.auth_code.as_deref(), Some("A1B2C3"));

    // The coordinator must have ACKed the frame.
    let writes = handle.writes().await;
    assert_eq!(writes.last().map(Vec::as_slice), Some(&[0x06][..]));
}

#[tokio::test]
async fn second_concurrent_send_is_busy() {
    let transport = TestTransport::new();
    let coordinator = TransactionCoordinator::spawn(Box::new(transport), SerialConfig::default());
    coordinator.connect("mock").await.unwrap();

    let first = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.send_purchase(sample_purchase(), Some(Duration::from_millis(200))).await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    let second = coordinator.send_purchase(sample_purchase(), Some(Duration::from_secs(5))).await;
    assert_matches!(second, Err(CoordinatorError::Busy));

    let first_outcome = first.await.unwrap();
    assert_matches!(first_outcome, Err(CoordinatorError::Timeout));
}

#[tokio::test]
async fn timeout_returns_to_idle_and_accepts_new_request() {
    let transport = TestTransport::new();
    let handle = transport.clone();
    let coordinator = TransactionCoordinator::spawn(Box::new(transport), SerialConfig::default());
    coordinator.connect("mock").await.unwrap();

    let timed_out = coordinator.send_purchase(sample_purchase(), Some(Duration::from_millis(50))).await;
    assert_matches!(timed_out, Err(CoordinatorError::Timeout));

    let send = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.send_purchase(sample_purchase(), Some(Duration::from_secs(5))).await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    handle.deliver(approved_frame()).await;

    let response = send.await.unwrap().expect("coordinator usable again after timeout");
    assert!(response.approved);
}

#[tokio::test]
async fn lone_ack_byte_does_not_complete_pending_transaction() {
    let transport = TestTransport::new();
    let handle = transport.clone();
    let coordinator = TransactionCoordinator::spawn(Box::new(transport), SerialConfig::default());
    coordinator.connect("mock").await.unwrap();

    let send = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.send_purchase(sample_purchase(), Some(Duration::from_secs(5))).await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    handle.deliver(vec![0x06]).await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    handle.deliver(approved_frame()).await;

    let response = send.await.unwrap().expect("approved frame still completes the transaction");
    assert!(response.approved);

    // Exactly one outbound ACK: the lone inbound ACK byte must not provoke one.
    let acks = handle.writes().await.into_iter().filter(|w| w.as_slice() == [0x06]).count();
    assert_eq!(acks, 1);
}

#[tokio::test]
async fn reassembles_frame_split_across_chunks_with_surrounding_garbage() {
    let transport = TestTransport::new();
    let handle = transport.clone();
    let coordinator = TransactionCoordinator::spawn(Box::new(transport), SerialConfig::default());
    coordinator.connect("mock").await.unwrap();

    let send = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.send_purchase(sample_purchase(), Some(Duration::from_secs(5))).await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    let frame = approved_frame();
    let (first_half, second_half) = frame.split_at(frame.len() / 2);
    let mut leading_garbage = vec![0xFF, 0xEE, 0xDD];
    leading_garbage.extend_from_slice(first_half);
    handle.deliver(leading_garbage).await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let mut trailing = second_half.to_vec();
    trailing.extend_from_slice(&[0xAA, 0xBB]);
    handle.deliver(trailing).await;

    let response = send.await.unwrap().expect("split frame with garbage still decodes");
    assert!(response.approved);
}

#[tokio::test]
async fn not_connected_is_rejected_immediately() {
    let transport = TestTransport::new();
    let coordinator = TransactionCoordinator::spawn(Box::new(transport), SerialConfig::default());

    let result = coordinator.send_purchase(sample_purchase(), None).await;
    assert_matches!(result, Err(CoordinatorError::NotConnected));
}
