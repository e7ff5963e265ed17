//! Payment webhook integration tests
//!
//! 覆盖验签、结构校验、幂等去重和事件分发到 SSE 订阅者的全链路。

use axum::body::{Body, to_bytes};
use booking_server::{Config, ServerState};
use hmac::{Hmac, Mac};
use http::{Request, StatusCode};
use serde_json::{Value, json};
use sha2::Sha256;

fn unsigned_state() -> ServerState {
    let mut config = Config::with_overrides(0);
    config.webhook_secret = None;
    ServerState::initialize(&config)
}

fn signed_state(secret: &str) -> ServerState {
    let mut config = Config::with_overrides(0);
    config.webhook_secret = Some(secret.to_string());
    config.webhook_tolerance_secs = 300;
    ServerState::initialize(&config)
}

fn sign(payload: &str, timestamp: i64, secret: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{timestamp}.{payload}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

async fn post_webhook(
    state: &ServerState,
    payload: &str,
    headers: &[(&str, String)],
) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(http::Method::POST)
        .uri("/api/payment-webhook")
        .header(http::header::CONTENT_TYPE, "application/json");
    for (name, value) in headers {
        request = request.header(*name, value.as_str());
    }

    let response = state
        .http
        .oneshot(request.body(Body::from(payload.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn payment_updated(payment_id: &str, order_id: &str, status: &str, updated_at: &str) -> String {
    json!({
        "type": "payment.updated",
        "data": {
            "id": payment_id,
            "order_id": order_id,
            "status": status,
            "updated_at": updated_at
        }
    })
    .to_string()
}

// ========== 分发 ==========

#[tokio::test]
async fn test_processed_payment_notifies_subscriber() {
    let state = unsigned_state();
    let mut subscription = state.order_streams.subscribe("SC-500");

    let payload = payment_updated("pay_1", "SC-500", "processed", "2026-08-01T10:00:00Z");
    let (status, body) = post_webhook(&state, &payload, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "received");
    assert_eq!(body["event_type"], "payment.updated");
    assert_eq!(body["payment_id"], "pay_1");
    assert!(body.get("duplicate").is_none());
    assert!(body["processing_time_ms"].is_u64());

    // processed 映射为订单状态 paid
    let first: Value = serde_json::from_str(&subscription.try_recv().unwrap()).unwrap();
    assert_eq!(first["type"], "status_update");
    assert_eq!(first["status"], "paid");
    assert_eq!(first["paymentId"], "pay_1");

    // 紧随其后的预订完成事件
    let second: Value = serde_json::from_str(&subscription.try_recv().unwrap()).unwrap();
    assert_eq!(second["type"], "reservation_complete");
    assert_eq!(second["status"], "completed");
    assert_eq!(second["paymentId"], "pay_1");
    assert!(second["reservationId"].as_str().unwrap().starts_with("SC-"));

    assert!(subscription.try_recv().is_err());
}

#[tokio::test]
async fn test_failed_payment_maps_to_cancelled() {
    let state = unsigned_state();
    let mut subscription = state.order_streams.subscribe("SC-501");

    let payload = payment_updated("pay_2", "SC-501", "failed", "2026-08-01T11:00:00Z");
    let (status, _) = post_webhook(&state, &payload, &[]).await;
    assert_eq!(status, StatusCode::OK);

    let event: Value = serde_json::from_str(&subscription.try_recv().unwrap()).unwrap();
    assert_eq!(event["status"], "cancelled");
    // 支付失败没有预订完成事件
    assert!(subscription.try_recv().is_err());
}

#[tokio::test]
async fn test_payment_created_defaults_to_pending() {
    let state = unsigned_state();
    let mut subscription = state.order_streams.subscribe("SC-502");

    let payload = json!({
        "type": "payment.created",
        "data": {"id": "pay_3", "order_id": "SC-502"}
    })
    .to_string();
    let (status, _) = post_webhook(&state, &payload, &[]).await;
    assert_eq!(status, StatusCode::OK);

    let event: Value = serde_json::from_str(&subscription.try_recv().unwrap()).unwrap();
    assert_eq!(event["type"], "status_update");
    assert_eq!(event["status"], "pending");
}

#[tokio::test]
async fn test_event_without_order_id_only_logged() {
    let state = unsigned_state();
    let mut subscription = state.order_streams.subscribe("SC-503");

    let payload = json!({
        "type": "payment.updated",
        "data": {"id": "pay_4", "status": "processed", "updated_at": "2026-08-01T12:00:00Z"}
    })
    .to_string();
    let (status, body) = post_webhook(&state, &payload, &[]).await;

    // 仍然确认接收，但没有任何订阅者收到事件
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "received");
    assert!(subscription.try_recv().is_err());
}

#[tokio::test]
async fn test_unknown_event_type_acknowledged() {
    let state = unsigned_state();
    let mut subscription = state.order_streams.subscribe("SC-504");

    let payload = json!({
        "type": "payout.created",
        "data": {"id": "po_1", "order_id": "SC-504"}
    })
    .to_string();
    let (status, body) = post_webhook(&state, &payload, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event_type"], "payout.created");
    assert!(subscription.try_recv().is_err());
}

// ========== 幂等 ==========

#[tokio::test]
async fn test_duplicate_event_not_reprocessed() {
    let state = unsigned_state();
    let mut subscription = state.order_streams.subscribe("SC-505");

    let payload = payment_updated("pay_5", "SC-505", "processed", "2026-08-02T09:00:00Z");

    let (status, body) = post_webhook(&state, &payload, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("duplicate").is_none());

    // 同一 id + updated_at 重复投递
    let (status, body) = post_webhook(&state, &payload, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duplicate"], true);

    // 订阅者只收到第一次的两条事件
    assert!(subscription.try_recv().is_ok());
    assert!(subscription.try_recv().is_ok());
    assert!(subscription.try_recv().is_err());
}

#[tokio::test]
async fn test_same_payment_new_update_is_processed() {
    let state = unsigned_state();
    let mut subscription = state.order_streams.subscribe("SC-506");

    let first = payment_updated("pay_6", "SC-506", "pending", "2026-08-02T09:00:00Z");
    let second = payment_updated("pay_6", "SC-506", "processed", "2026-08-02T09:05:00Z");

    post_webhook(&state, &first, &[]).await;
    let (_, body) = post_webhook(&state, &second, &[]).await;

    // updated_at 变了就是新事件
    assert!(body.get("duplicate").is_none());
    let events: Vec<Value> = std::iter::from_fn(|| {
        subscription
            .try_recv()
            .ok()
            .map(|payload| serde_json::from_str(&payload).unwrap())
    })
    .collect();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["status"], "pending");
    assert_eq!(events[1]["status"], "paid");
    assert_eq!(events[2]["type"], "reservation_complete");
}

// ========== 结构校验 ==========

#[tokio::test]
async fn test_invalid_payload_structure_rejected() {
    let state = unsigned_state();

    let missing_data = json!({"type": "payment.updated"}).to_string();
    let missing_type = json!({"data": {"id": "pay_7"}}).to_string();
    let missing_id = json!({"type": "payment.updated", "data": {"status": "processed"}}).to_string();

    for payload in [missing_data, missing_type, missing_id] {
        let (status, body) = post_webhook(&state, &payload, &[]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert_eq!(body["error"], "invalid_payload");
        assert_eq!(body["message"], "Invalid payload structure");
    }
}

#[tokio::test]
async fn test_non_json_body_rejected() {
    let state = unsigned_state();

    let (status, body) = post_webhook(&state, "definitely not json", &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_payload");
    assert_eq!(body["message"], "Invalid JSON payload");
}

// ========== 验签 ==========

#[tokio::test]
async fn test_signed_webhook_accepted() {
    let state = signed_state("whsec_test");
    let payload = payment_updated("pay_8", "SC-507", "processed", "2026-08-03T08:00:00Z");

    let timestamp = chrono::Utc::now().timestamp();
    let signature = sign(&payload, timestamp, "whsec_test");
    let headers = [
        ("x-signature", signature),
        ("x-timestamp", timestamp.to_string()),
    ];

    let (status, body) = post_webhook(&state, &payload, &headers).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "received");
}

#[tokio::test]
async fn test_unsigned_rejected_when_secret_configured() {
    let state = signed_state("whsec_test");
    let payload = payment_updated("pay_9", "SC-508", "processed", "2026-08-03T09:00:00Z");

    let (status, body) = post_webhook(&state, &payload, &[]).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
    assert_eq!(body["message"], "Invalid signature");
}

#[tokio::test]
async fn test_tampered_body_rejected() {
    let state = signed_state("whsec_test");
    let signed_payload = payment_updated("pay_10", "SC-509", "pending", "2026-08-03T10:00:00Z");
    let sent_payload = payment_updated("pay_10", "SC-509", "processed", "2026-08-03T10:00:00Z");

    let timestamp = chrono::Utc::now().timestamp();
    let headers = [
        ("x-signature", sign(&signed_payload, timestamp, "whsec_test")),
        ("x-timestamp", timestamp.to_string()),
    ];

    let (status, _) = post_webhook(&state, &sent_payload, &headers).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_replayed_timestamp_rejected() {
    let state = signed_state("whsec_test");
    let payload = payment_updated("pay_11", "SC-510", "processed", "2026-08-03T11:00:00Z");

    let stale = chrono::Utc::now().timestamp() - 400;
    let headers = [
        ("x-signature", sign(&payload, stale, "whsec_test")),
        ("x-timestamp", stale.to_string()),
    ];

    let (status, body) = post_webhook(&state, &payload, &headers).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}
