//! Payment Webhook Handlers
//!
//! 处理顺序：验签 → 结构校验 → 幂等去重 → 按事件类型分发。
//! 分发产生的订单事件经 [`ServerState::notify_order`] 推给 SSE 订阅者。

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use serde::{Deserialize, Serialize};

use super::signature::verify_webhook_signature;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::OrderEvent;

/// 支付方 webhook 事件信封
///
/// `type` 或 `data`/`data.id` 缺失算结构错误而不是解析错误，
/// 所以字段都带默认值，缺失统一走结构校验分支。
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub data: WebhookData,
}

/// 事件数据体
///
/// 只取本服务关心的字段，支付方附带的其余字段直接忽略。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookData {
    /// 支付方侧的支付 ID
    #[serde(default)]
    pub id: String,
    /// 关联的订单号 (没有就只记日志，不推送)
    #[serde(default)]
    pub order_id: Option<String>,
    /// 支付状态 (pending | processed | failed | refunded | ...)
    #[serde(default)]
    pub status: Option<String>,
    /// 支付方侧的最近更新时间，参与幂等键
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl WebhookData {
    /// 幂等键：`{id}:{updated_at}`
    ///
    /// 支付方没给 `updated_at` 时退化为接收时刻，此时同一支付的
    /// 重试不再去重，宁可重复推送也不丢事件。
    fn event_key(&self) -> String {
        match &self.updated_at {
            Some(updated_at) => format!("{}:{}", self.id, updated_at),
            None => format!("{}:{}", self.id, shared::util::now_millis()),
        }
    }
}

/// webhook 确认响应
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
    pub event_type: String,
    pub payment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<bool>,
    pub processing_time_ms: u64,
}

/// POST /api/payment-webhook - 支付方事件入口
pub async fn receive(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookAck>> {
    let started = std::time::Instant::now();

    // 1. 验签 (配置了密钥才启用)
    if let Some(secret) = &state.config.webhook_secret {
        let signature = header_str(&headers, "x-signature");
        let timestamp = header_str(&headers, "x-timestamp");

        verify_webhook_signature(
            &body,
            signature,
            timestamp,
            secret,
            state.config.webhook_tolerance_secs,
        )
        .map_err(|reason| {
            tracing::error!(target: "webhook", reason, "❌ Webhook signature verification failed");
            AppError::unauthorized("Invalid signature")
        })?;
    } else {
        tracing::warn!(target: "webhook", "WEBHOOK_SECRET not set, accepting unsigned webhook");
    }

    // 2. 结构校验
    let event: WebhookEvent =
        serde_json::from_slice(&body).map_err(|_| AppError::invalid("Invalid JSON payload"))?;
    if event.event_type.is_empty() || event.data.id.is_empty() {
        return Err(AppError::invalid("Invalid payload structure"));
    }

    // 3. 幂等去重
    let event_key = event.data.event_key();
    if !state.mark_event_processed(&event_key) {
        tracing::info!(target: "webhook", %event_key, "⏭️ Duplicate event, skipping");
        return Ok(Json(WebhookAck {
            status: "received",
            event_type: event.event_type,
            payment_id: event.data.id,
            duplicate: Some(true),
            processing_time_ms: started.elapsed().as_millis() as u64,
        }));
    }

    // 4. 分发
    process_event(&state, &event);

    Ok(Json(WebhookAck {
        status: "received",
        event_type: event.event_type,
        payment_id: event.data.id,
        duplicate: None,
        processing_time_ms: started.elapsed().as_millis() as u64,
    }))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// 按事件类型分发，产生订单通知
fn process_event(state: &ServerState, event: &WebhookEvent) {
    let data = &event.data;
    tracing::info!(
        target: "webhook",
        event_type = %event.event_type,
        payment_id = %data.id,
        order_id = ?data.order_id,
        status = ?data.status,
        "📥 Processing webhook event"
    );

    let Some(order_id) = data.order_id.as_deref().filter(|id| !id.is_empty()) else {
        tracing::warn!(target: "webhook", payment_id = %data.id, "Event carries no order_id, nothing to notify");
        return;
    };

    match event.event_type.as_str() {
        "payment.created" => {
            let status = data.status.as_deref().unwrap_or("pending");
            state.notify_order(order_id, &OrderEvent::payment_update(order_id, status, &data.id));
            tracing::info!(target: "webhook", payment_id = %data.id, order_id, "💰 Payment created");
        }
        "payment.updated" => {
            let payment_status = data.status.as_deref().unwrap_or("pending");
            // 支付方状态映射为订单状态，未知状态原样透传
            let order_status = match payment_status {
                "processed" => "paid",
                "failed" => "cancelled",
                "refunded" => "refunded",
                other => other,
            };
            state.notify_order(
                order_id,
                &OrderEvent::payment_update(order_id, order_status, &data.id),
            );

            if payment_status == "processed" {
                let reservation_id = shared::util::booking_reference();
                state.notify_order(
                    order_id,
                    &OrderEvent::reservation_complete(
                        order_id,
                        &data.id,
                        &reservation_id,
                        "Payment confirmed and reservation created",
                    ),
                );
                tracing::info!(
                    target: "webhook",
                    payment_id = %data.id,
                    order_id,
                    %reservation_id,
                    "✅ Reservation complete"
                );
            }
        }
        "transaction.created" | "transaction.updated" => {
            // 对账用途，记录即可，不产生订单通知
            tracing::info!(target: "webhook", payment_id = %data.id, event_type = %event.event_type, "📊 Transaction event recorded");
        }
        other => {
            tracing::warn!(target: "webhook", event_type = other, "⚠️ Unhandled webhook event type");
        }
    }
}
