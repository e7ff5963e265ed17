//! 支付状态流 API 模块 (SSE)
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/payment-status-stream?order_id=xxx | GET | 订阅订单状态事件流 |
//!
//! # 帧格式
//!
//! ```text
//! data: {"type":"connected","orderId":"SC-123"}
//!
//! : ping
//!
//! data: {"type":"status_update","orderId":"SC-123","status":"paid","paymentId":"pay_1"}
//! ```

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/payment-status-stream", get(handler::subscribe))
}
