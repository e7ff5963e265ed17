//! 订单通知事件类型定义
//!
//! 这些事件在 booking-server 和浏览器之间共享：服务器端产生事件并通过
//! SSE 推送，浏览器按 `type` 判别符解析。事件是"即发即弃"的，不落盘、
//! 不重放，错过的订阅者通过拉取接口自行对账。

use serde::{Deserialize, Serialize};
use std::fmt;

// ==================== Order Event ====================

/// 订单通知事件 - 推送给流订阅者的封闭事件联合
///
/// 线上格式为带 `type` 判别符的 JSON，字段使用 camelCase：
///
/// ```json
/// {"type":"status_update","orderId":"SC-123","status":"paid","paymentId":"pay_1"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderEvent {
    /// 订阅建立后的首个事件，回显订单号，客户端据此确认通道可用
    #[serde(rename_all = "camelCase")]
    Connected { order_id: String },

    /// 支付/订单状态变更
    #[serde(rename_all = "camelCase")]
    StatusUpdate {
        order_id: String,
        /// 支付方状态原文 (pending | processed | failed | refunded | ...)
        status: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        payment_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// 预订完成 - 支付成功且住宿预订已落实
    #[serde(rename_all = "camelCase")]
    ReservationComplete {
        order_id: String,
        payment_id: String,
        reservation_id: String,
        status: String,
        message: String,
    },
}

impl OrderEvent {
    /// 创建 connected 事件
    pub fn connected(order_id: impl Into<String>) -> Self {
        Self::Connected {
            order_id: order_id.into(),
        }
    }

    /// 创建状态变更事件 (无支付信息)
    pub fn status_update(order_id: impl Into<String>, status: impl Into<String>) -> Self {
        Self::StatusUpdate {
            order_id: order_id.into(),
            status: status.into(),
            payment_id: None,
            message: None,
        }
    }

    /// 创建带支付 ID 的状态变更事件
    pub fn payment_update(
        order_id: impl Into<String>,
        status: impl Into<String>,
        payment_id: impl Into<String>,
    ) -> Self {
        Self::StatusUpdate {
            order_id: order_id.into(),
            status: status.into(),
            payment_id: Some(payment_id.into()),
            message: None,
        }
    }

    /// 创建预订完成事件 (状态固定为 completed)
    pub fn reservation_complete(
        order_id: impl Into<String>,
        payment_id: impl Into<String>,
        reservation_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ReservationComplete {
            order_id: order_id.into(),
            payment_id: payment_id.into(),
            reservation_id: reservation_id.into(),
            status: "completed".to_string(),
            message: message.into(),
        }
    }

    /// 事件所属订单号
    pub fn order_id(&self) -> &str {
        match self {
            Self::Connected { order_id }
            | Self::StatusUpdate { order_id, .. }
            | Self::ReservationComplete { order_id, .. } => order_id,
        }
    }
}

impl fmt::Display for OrderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected { .. } => write!(f, "connected"),
            Self::StatusUpdate { .. } => write!(f, "status_update"),
            Self::ReservationComplete { .. } => write!(f, "reservation_complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connected_wire_format() {
        let event = OrderEvent::connected("SC-123");
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value, json!({"type": "connected", "orderId": "SC-123"}));
    }

    #[test]
    fn test_status_update_skips_absent_fields() {
        let event = OrderEvent::status_update("SC-123", "paid");
        let value = serde_json::to_value(&event).unwrap();

        // payment_id/message 为 None 时不应出现在 JSON 中
        assert_eq!(
            value,
            json!({"type": "status_update", "orderId": "SC-123", "status": "paid"})
        );

        let event = OrderEvent::payment_update("SC-123", "processed", "pay_9");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["paymentId"], "pay_9");
    }

    #[test]
    fn test_reservation_complete_fields() {
        let event =
            OrderEvent::reservation_complete("SC-7", "pay_1", "RES-42", "Reservation created!");
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["type"], "reservation_complete");
        assert_eq!(value["reservationId"], "RES-42");
        assert_eq!(value["status"], "completed");
    }

    #[test]
    fn test_order_id_accessor() {
        assert_eq!(OrderEvent::connected("a").order_id(), "a");
        assert_eq!(OrderEvent::status_update("b", "paid").order_id(), "b");
        assert_eq!(
            OrderEvent::reservation_complete("c", "p", "r", "m").order_id(),
            "c"
        );
    }

    #[test]
    fn test_tagged_deserialization() {
        let event: OrderEvent =
            serde_json::from_str(r#"{"type":"status_update","orderId":"SC-1","status":"failed"}"#)
                .unwrap();

        match event {
            OrderEvent::StatusUpdate {
                order_id,
                status,
                payment_id,
                ..
            } => {
                assert_eq!(order_id, "SC-1");
                assert_eq!(status, "failed");
                assert!(payment_id.is_none());
            }
            other => panic!("unexpected event: {other}"),
        }
    }
}
