//! Payment Webhook API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/payment-webhook | POST | 支付方事件入口 (HMAC 验签) |
//!
//! # 事件类型
//!
//! | 类型 | 处理 |
//! |------|------|
//! | payment.created | 推送 status_update (默认 pending) |
//! | payment.updated | 推送映射后的 status_update；processed 时追加 reservation_complete |
//! | transaction.* | 仅记录 |
//! | 其他 | 记录并跳过，仍回 200 |

mod handler;
mod signature;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub use handler::{WebhookAck, WebhookData, WebhookEvent};
pub use signature::verify_webhook_signature;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/payment-webhook", post(handler::receive))
}
