//! Payment Status Stream Handlers

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderName, header};
use axum::response::IntoResponse;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, StreamExt};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::OrderEvent;

/// 订阅请求查询参数
#[derive(Debug, Deserialize)]
pub struct StreamParams {
    pub order_id: Option<String>,
}

/// GET /api/payment-status-stream - 订阅订单状态流
///
/// `order_id` 缺失或为空直接 400，不触碰注册表。
pub async fn subscribe(
    State(state): State<ServerState>,
    Query(params): Query<StreamParams>,
) -> AppResult<impl IntoResponse> {
    let order_id = params
        .order_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::validation("Missing order_id parameter"))?;

    let subscription = state.order_streams.subscribe(&order_id);
    tracing::info!(
        target: "notify",
        order_id = %order_id,
        online = state.order_streams.order_connections(&order_id),
        "SSE subscription opened"
    );

    let connected = serde_json::to_string(&OrderEvent::connected(&order_id))
        .map_err(|e| AppError::internal(format!("Failed to serialize connected event: {e}")))?;

    // 第一帧确认连接，之后转发注册表投递的预序列化事件。
    // 订阅守卫被流持有：响应被丢弃时守卫随流 Drop，句柄注销。
    let events = stream::once(futures::future::ready(connected))
        .chain(stream::unfold(subscription, |mut sub| async move {
            sub.recv().await.map(|payload| (payload, sub))
        }))
        .map(|payload| Ok::<Event, Infallible>(Event::default().data(payload)));

    let sse = Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(state.config.sse_keepalive_secs))
            .text("ping"),
    );

    // 反向代理不缓冲、不变换，事件帧才能实时到达浏览器
    let headers = [
        (header::CACHE_CONTROL, "no-cache, no-transform"),
        (HeaderName::from_static("x-accel-buffering"), "no"),
    ];

    Ok((headers, sse))
}
